pub mod config;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod join;
pub mod process;
pub mod record;
pub mod views;
pub mod write;

pub use config::JoinConfig;
pub use error::LoadError;
pub use fetch::SourceLocation;
pub use join::{load_and_join, load_and_join_with};
pub use record::{Dataset, NormalizedRecord};

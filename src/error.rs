// src/error.rs

use std::io;
use thiserror::Error;

/// Failure to obtain or read one of the input sources.
///
/// Any of these aborts the whole pipeline; data-quality problems inside a
/// source that loaded fine are never reported through this type.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("reading {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CSV parse error in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{name} has no `{column}` column")]
    MissingColumn { name: String, column: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;

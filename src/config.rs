// src/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{LoadError, Result};
use crate::geo::{StateTable, UNKNOWN_STATE};

/// Column names read from the smoking-rate source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokingColumns {
    pub key: String,
    pub value: String,
}

impl Default for SmokingColumns {
    fn default() -> Self {
        Self {
            key: "cnty_fips".into(),
            value: "percent_smoking".into(),
        }
    }
}

/// Column names read from the foreign-born source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignBornColumns {
    pub key: String,
    pub value: String,
    pub county: String,
}

impl Default for ForeignBornColumns {
    fn default() -> Self {
        Self {
            key: "FIPS".into(),
            value: "ForeignBornPct".into(),
            county: "County".into(),
        }
    }
}

/// A (state, county) pair dropped from the joined output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub state: String,
    pub county: String,
}

impl Exclusion {
    pub fn new(state: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            county: county.into(),
        }
    }

    pub fn matches(&self, state: &str, county: &str) -> bool {
        self.state == state && self.county == county
    }
}

/// Everything the join treats as data rather than code.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// foreign_born:
///   value: ForeignBornPercent
/// concurrent_loads: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    pub smoking: SmokingColumns,
    pub foreign_born: ForeignBornColumns,
    pub states: StateTable,
    pub unknown_state: String,
    pub exclusions: Vec<Exclusion>,
    /// Request both sources at once instead of one after the other.
    pub concurrent_loads: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            smoking: SmokingColumns::default(),
            foreign_born: ForeignBornColumns::default(),
            states: StateTable::default(),
            unknown_state: UNKNOWN_STATE.into(),
            // duplicate entry in the 2024 county health dataset
            exclusions: vec![Exclusion::new("Alaska", "Valdez-Cordova")],
            concurrent_loads: false,
        }
    }
}

impl JoinConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| LoadError::Config(e.to_string()))
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("reading {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn is_excluded(&self, state: &str, county: &str) -> bool {
        self.exclusions.iter().any(|ex| ex.matches(state, county))
    }
}

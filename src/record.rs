// src/record.rs

use serde::{Deserialize, Serialize};
use std::{ops::Deref, sync::Arc};

/// One county present in both sources, after coercion and enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub county_id: String,
    pub state_name: String,
    pub county_name: String,
    pub smoking_pct: f64,
    pub foreign_born_pct: f64,
}

/// The joined sequence, frozen and shared by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Arc<[NormalizedRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }
}

impl From<Vec<NormalizedRecord>> for Dataset {
    fn from(records: Vec<NormalizedRecord>) -> Self {
        Self::new(records)
    }
}

impl Deref for Dataset {
    type Target = [NormalizedRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

// src/geo/mod.rs

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name returned when a county identifier does not resolve to a state.
pub const UNKNOWN_STATE: &str = "Unknown";

/// The 50 states keyed by two-digit FIPS code. DC and territories are absent.
static STATE_FIPS_CODES: &[(&str, &str)] = &[
    ("01", "Alabama"),
    ("02", "Alaska"),
    ("04", "Arizona"),
    ("05", "Arkansas"),
    ("06", "California"),
    ("08", "Colorado"),
    ("09", "Connecticut"),
    ("10", "Delaware"),
    ("12", "Florida"),
    ("13", "Georgia"),
    ("15", "Hawaii"),
    ("16", "Idaho"),
    ("17", "Illinois"),
    ("18", "Indiana"),
    ("19", "Iowa"),
    ("20", "Kansas"),
    ("21", "Kentucky"),
    ("22", "Louisiana"),
    ("23", "Maine"),
    ("24", "Maryland"),
    ("25", "Massachusetts"),
    ("26", "Michigan"),
    ("27", "Minnesota"),
    ("28", "Mississippi"),
    ("29", "Missouri"),
    ("30", "Montana"),
    ("31", "Nebraska"),
    ("32", "Nevada"),
    ("33", "New Hampshire"),
    ("34", "New Jersey"),
    ("35", "New Mexico"),
    ("36", "New York"),
    ("37", "North Carolina"),
    ("38", "North Dakota"),
    ("39", "Ohio"),
    ("40", "Oklahoma"),
    ("41", "Oregon"),
    ("42", "Pennsylvania"),
    ("44", "Rhode Island"),
    ("45", "South Carolina"),
    ("46", "South Dakota"),
    ("47", "Tennessee"),
    ("48", "Texas"),
    ("49", "Utah"),
    ("50", "Vermont"),
    ("51", "Virginia"),
    ("53", "Washington"),
    ("54", "West Virginia"),
    ("55", "Wisconsin"),
    ("56", "Wyoming"),
];

static DEFAULT_TABLE: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    STATE_FIPS_CODES
        .iter()
        .map(|&(code, name)| (code.to_string(), name.to_string()))
        .collect()
});

/// Lookup from the two-character state prefix of a county identifier to a
/// state name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateTable {
    codes: BTreeMap<String, String>,
}

impl Default for StateTable {
    fn default() -> Self {
        Self {
            codes: DEFAULT_TABLE.clone(),
        }
    }
}

impl StateTable {
    pub fn new(codes: BTreeMap<String, String>) -> Self {
        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// State name for `county_id`, or `unknown` when the identifier is shorter
    /// than two characters or its prefix is not in the table.
    pub fn derive_state_or(&self, county_id: &str, unknown: &str) -> String {
        county_id
            .get(..2)
            .and_then(|prefix| self.get(prefix))
            .unwrap_or(unknown)
            .to_string()
    }

    pub fn derive_state(&self, county_id: &str) -> String {
        self.derive_state_or(county_id, UNKNOWN_STATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_fifty_states() {
        let table = StateTable::default();
        assert_eq!(table.len(), 50);
        for missing in ["03", "07", "11", "14", "43", "52", "72"] {
            assert!(table.get(missing).is_none(), "{missing} should be absent");
        }
    }

    #[test]
    fn derives_from_prefix() {
        let table = StateTable::default();
        assert_eq!(table.derive_state("06037"), "California");
        assert_eq!(table.derive_state("48201"), "Texas");
        assert_eq!(table.derive_state("02"), "Alaska");
    }

    #[test]
    fn short_or_unknown_identifiers() {
        let table = StateTable::default();
        assert_eq!(table.derive_state(""), UNKNOWN_STATE);
        assert_eq!(table.derive_state("6"), UNKNOWN_STATE);
        assert_eq!(table.derive_state("72001"), UNKNOWN_STATE);
        assert_eq!(table.derive_state("11001"), UNKNOWN_STATE);
        // prefix that is not on a char boundary
        assert_eq!(table.derive_state("1é"), UNKNOWN_STATE);
    }

    #[test]
    fn custom_table_replaces_default() {
        let mut codes = BTreeMap::new();
        codes.insert("72".to_string(), "Puerto Rico".to_string());
        let table = StateTable::new(codes);
        assert_eq!(table.derive_state("72001"), "Puerto Rico");
        assert_eq!(table.derive_state("06037"), UNKNOWN_STATE);
        assert_eq!(table.derive_state_or("06037", "n/a"), "n/a");
    }
}

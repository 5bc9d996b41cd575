// src/views/bar.rs

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::record::NormalizedRecord;

use super::states;

/// Headroom above the tallest bar.
const Y_HEADROOM: f64 = 1.1;

/// Bar ordering offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Alphabetical,
    SmokersHighLow,
    SmokersLowHigh,
    ForeignHighLow,
    ForeignLowHigh,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Alphabetical,
        SortMode::SmokersHighLow,
        SortMode::SmokersLowHigh,
        SortMode::ForeignHighLow,
        SortMode::ForeignLowHigh,
    ];

    /// Option value, as stored in the dropdown.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "alphabetical",
            SortMode::SmokersHighLow => "smokers_high_low",
            SortMode::SmokersLowHigh => "smokers_low_high",
            SortMode::ForeignHighLow => "foreign_high_low",
            SortMode::ForeignLowHigh => "foreign_low_high",
        }
    }

    /// Option text shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "Alphabetical Order",
            SortMode::SmokersHighLow => "Smokers % (High to Low)",
            SortMode::SmokersLowHigh => "Smokers % (Low to High)",
            SortMode::ForeignHighLow => "Foreign Born % (High to Low)",
            SortMode::ForeignLowHigh => "Foreign Born % (Low to High)",
        }
    }

    /// Unrecognised values sort alphabetically.
    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .unwrap_or_default()
    }

    pub fn compare(self, a: &NormalizedRecord, b: &NormalizedRecord) -> Ordering {
        match self {
            SortMode::Alphabetical => compare_names(&a.county_name, &b.county_name),
            SortMode::SmokersHighLow => compare_values(b.smoking_pct, a.smoking_pct),
            SortMode::SmokersLowHigh => compare_values(a.smoking_pct, b.smoking_pct),
            SortMode::ForeignHighLow => compare_values(b.foreign_born_pct, a.foreign_born_pct),
            SortMode::ForeignLowHigh => compare_values(a.foreign_born_pct, b.foreign_born_pct),
        }
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_value(s))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// NaN compares equal to everything, leaving those bars where they were
fn compare_values(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// case-insensitive first; on a tie lowercase sorts before uppercase
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Bars for one state, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartView<'a> {
    pub state: String,
    pub sort: SortMode,
    pub bars: Vec<&'a NormalizedRecord>,
    /// Upper bound of the y axis; `0` when no bars are shown.
    pub y_max: f64,
}

impl BarChartView<'_> {
    /// Bar keys (county identifiers), in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.bars.iter().map(|r| r.county_id.as_str()).collect()
    }
}

/// The state preselected when the chart first renders.
pub fn default_state(records: &[NormalizedRecord]) -> Option<String> {
    states(records).into_iter().next()
}

/// Records of `state`, stably sorted by `sort`, with the y-axis bound.
pub fn bar_chart<'a>(records: &'a [NormalizedRecord], state: &str, sort: SortMode) -> BarChartView<'a> {
    let mut bars: Vec<&NormalizedRecord> = records.iter().filter(|r| r.state_name == state).collect();
    bars.sort_by(|a, b| sort.compare(a, b));

    // a NaN on either side leaves the whole county out of the bound
    let y_max = bars
        .iter()
        .map(|r| {
            if r.smoking_pct.is_nan() || r.foreign_born_pct.is_nan() {
                f64::NAN
            } else {
                r.smoking_pct.max(r.foreign_born_pct)
            }
        })
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .map_or(0.0, |m| m * Y_HEADROOM);

    BarChartView {
        state: state.to_string(),
        sort,
        bars,
        y_max,
    }
}

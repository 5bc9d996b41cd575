// src/views/mod.rs
//! Data preparation for the three linked views.
//!
//! Renderers receive the frozen dataset and call these functions on every
//! interaction (dropdown change, brush end, zoom); nothing here keeps state
//! between calls or touches the dataset.

use std::collections::BTreeSet;
use std::fmt;

use crate::record::NormalizedRecord;

pub mod bar;
pub mod choropleth;
pub mod scatter;

pub use bar::{bar_chart, default_state, BarChartView, SortMode};
pub use choropleth::{ChoroplethView, LegendStop, Metric, ZoomTransform};
pub use scatter::{Brush, Extent, ScatterView, StateFilter};

/// Distinct state names, ascending.
pub fn states(records: &[NormalizedRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.state_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Hover text shared by the bar chart, scatterplot and maps.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip<'a> {
    pub record: &'a NormalizedRecord,
}

impl<'a> Tooltip<'a> {
    pub fn new(record: &'a NormalizedRecord) -> Self {
        Self { record }
    }

    pub fn title(&self) -> String {
        format!("{}, {}", self.record.county_name, self.record.state_name)
    }

    pub fn lines(&self) -> [String; 3] {
        [
            self.title(),
            format!("Smokers: {}%", display_number(self.record.smoking_pct)),
            format!("Foreign Born: {}%", display_number(self.record.foreign_born_pct)),
        ]
    }
}

impl fmt::Display for Tooltip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Format a number the way a browser prints it in text: `NaN`, `Infinity`,
/// no negative zero, and exponent notation below `1e-6` or from `1e21` up.
pub fn display_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let sci = format!("{:e}", v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };
    if (-6..21).contains(&exp) {
        format!("{}", v)
    } else if exp < 0 {
        format!("{}e{}", mantissa, exp)
    } else {
        format!("{}e+{}", mantissa, exp)
    }
}

/// Largest non-NaN value of `f`, if any.
pub(crate) fn max_by(records: &[NormalizedRecord], f: impl Fn(&NormalizedRecord) -> f64) -> Option<f64> {
    records
        .iter()
        .map(f)
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// Smallest non-NaN value of `f`, if any.
pub(crate) fn min_by(records: &[NormalizedRecord], f: impl Fn(&NormalizedRecord) -> f64) -> Option<f64> {
    records
        .iter()
        .map(f)
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::record::NormalizedRecord;

    pub fn rec(id: &str, state: &str, county: &str, s: f64, f: f64) -> NormalizedRecord {
        NormalizedRecord {
            county_id: id.into(),
            state_name: state.into(),
            county_name: county.into(),
            smoking_pct: s,
            foreign_born_pct: f,
        }
    }

    pub fn sample() -> Vec<NormalizedRecord> {
        vec![
            rec("48201", "Texas", "Harris", 14.3, 25.9),
            rec("06037", "California", "Los Angeles", 12.5, 34.2),
            rec("48029", "Texas", "Bexar", 15.8, 12.4),
            rec("06001", "California", "alameda", 9.1, 32.8),
            rec("01001", "Alabama", "Autauga", 18.1, 1.6),
            rec("48113", "Texas", "Dallas", 15.8, 23.7),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn states_sorted_unique() {
        assert_eq!(states(&sample()), vec!["Alabama", "California", "Texas"]);
        assert!(states(&[]).is_empty());
    }

    #[test]
    fn tooltip_text() {
        let r = rec("06037", "California", "Los Angeles", 12.5, 34.2);
        assert_eq!(
            Tooltip::new(&r).to_string(),
            "Los Angeles, California\nSmokers: 12.5%\nForeign Born: 34.2%"
        );
    }

    #[test]
    fn numbers_print_like_a_browser() {
        assert_eq!(display_number(12.5), "12.5");
        assert_eq!(display_number(18.0), "18");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(f64::INFINITY), "Infinity");
        assert_eq!(display_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(display_number(1e20), "100000000000000000000");
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(-2.5e22), "-2.5e+22");
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn tooltip_prints_non_finite_values() {
        let r = rec("06037", "California", "Los Angeles", f64::NAN, f64::INFINITY);
        let [_, smokers, foreign] = Tooltip::new(&r).lines();
        assert_eq!(smokers, "Smokers: NaN%");
        assert_eq!(foreign, "Foreign Born: Infinity%");
    }

    #[test]
    fn extremes_skip_nan() {
        let mut rs = sample();
        rs.push(rec("06075", "California", "San Francisco", f64::NAN, 34.0));
        assert_eq!(max_by(&rs, |r| r.smoking_pct), Some(18.1));
        assert_eq!(min_by(&rs, |r| r.smoking_pct), Some(9.1));
        assert_eq!(max_by(&[], |r| r.smoking_pct), None);
    }
}

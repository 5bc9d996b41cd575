// src/views/scatter.rs

use crate::record::NormalizedRecord;

use super::{max_by, min_by, states};

/// Text of the first option in the state dropdown.
pub const ALL_STATES: &str = "All States";

/// Size of the categorical palette the point colors cycle through.
pub const PALETTE_LEN: usize = 10;

/// Which points the state dropdown leaves visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    All,
    State(String),
}

impl StateFilter {
    /// Map a dropdown option back to a filter.
    pub fn from_option(option: &str) -> Self {
        if option == ALL_STATES {
            StateFilter::All
        } else {
            StateFilter::State(option.to_string())
        }
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::State(s) => record.state_name == *s,
        }
    }
}

/// Closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// A rectangular selection in data space: smoking % on x, foreign-born % on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub x: Extent,
    pub y: Extent,
}

impl Brush {
    /// Build from two opposite corners given in any order.
    pub fn from_corners((x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> Self {
        Self {
            x: Extent::new(x0, x1),
            y: Extent::new(y0, y1),
        }
    }

    pub fn contains(&self, record: &NormalizedRecord) -> bool {
        self.x.contains(record.smoking_pct) && self.y.contains(record.foreign_born_pct)
    }
}

/// Smoking vs foreign-born scatterplot over the whole dataset.
#[derive(Debug, Clone)]
pub struct ScatterView<'a> {
    records: &'a [NormalizedRecord],
    options: Vec<String>,
    /// Domain of the x axis (smoking %), `None` without numeric data.
    pub x: Option<Extent>,
    /// Domain of the y axis (foreign-born %), `None` without numeric data.
    pub y: Option<Extent>,
}

impl<'a> ScatterView<'a> {
    pub fn new(records: &'a [NormalizedRecord]) -> Self {
        let mut options = vec![ALL_STATES.to_string()];
        options.extend(states(records));

        let x = min_by(records, |r| r.smoking_pct)
            .zip(max_by(records, |r| r.smoking_pct))
            .map(|(lo, hi)| Extent::new(lo, hi));
        let y = min_by(records, |r| r.foreign_born_pct)
            .zip(max_by(records, |r| r.foreign_born_pct))
            .map(|(lo, hi)| Extent::new(lo, hi));

        Self {
            records,
            options,
            x,
            y,
        }
    }

    /// Dropdown options: "All States" followed by each state, ascending.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn visible(&self, filter: &StateFilter) -> Vec<&'a NormalizedRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Points inside the brush, bounds inclusive.
    pub fn brush(&self, selection: &Brush) -> Vec<&'a NormalizedRecord> {
        self.records.iter().filter(|r| selection.contains(r)).collect()
    }

    /// Palette slot for a state: its option position, cycling through the palette.
    pub fn palette_index(&self, state: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o == state)
            .map(|i| i % PALETTE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn options_lead_with_all_states() {
        let data = sample();
        let view = ScatterView::new(&data);
        assert_eq!(
            view.options(),
            &["All States", "Alabama", "California", "Texas"]
        );
    }

    #[test]
    fn extents_cover_data() {
        let data = sample();
        let view = ScatterView::new(&data);
        assert_eq!(view.x, Some(Extent { min: 9.1, max: 18.1 }));
        assert_eq!(view.y, Some(Extent { min: 1.6, max: 34.2 }));

        let empty = ScatterView::new(&[]);
        assert_eq!(empty.x, None);
        assert_eq!(empty.options(), &["All States"]);
    }

    #[test]
    fn all_states_option_shows_everything() {
        let data = sample();
        let view = ScatterView::new(&data);
        assert_eq!(view.visible(&StateFilter::from_option("All States")).len(), 6);
        let tx = view.visible(&StateFilter::from_option("Texas"));
        assert_eq!(tx.len(), 3);
        assert!(tx.iter().all(|r| r.state_name == "Texas"));
    }

    #[test]
    fn brush_is_inclusive_and_order_free() {
        let data = sample();
        let view = ScatterView::new(&data);
        let sel = Brush::from_corners((15.8, 30.0), (12.5, 12.4));
        let ids: Vec<&str> = view.brush(&sel).iter().map(|r| r.county_id.as_str()).collect();
        assert_eq!(ids, vec!["48201", "48029", "48113"]);

        let none = Brush::from_corners((0.0, 0.0), (1.0, 1.0));
        assert!(view.brush(&none).is_empty());
    }

    #[test]
    fn palette_cycles() {
        let data: Vec<_> = (0..12)
            .map(|i| rec(&format!("{:02}001", i), &format!("S{:02}", i), "c", 1.0, 1.0))
            .collect();
        let view = ScatterView::new(&data);
        assert_eq!(view.palette_index("All States"), Some(0));
        assert_eq!(view.palette_index("S00"), Some(1));
        assert_eq!(view.palette_index("S09"), Some(0));
        assert_eq!(view.palette_index("S10"), Some(1));
        assert_eq!(view.palette_index("Nowhere"), None);
    }
}

// src/views/choropleth.rs

use std::collections::HashMap;

use crate::record::NormalizedRecord;

use super::max_by;

/// Number of gradient stops in each legend (offsets 0.0, 0.1, ... 1.0).
const LEGEND_STOPS: usize = 11;

/// Which of the two maps a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Smoking,
    ForeignBorn,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::Smoking => "Percentage of Residents Who Smoke",
            Metric::ForeignBorn => "Percentage of Foreign Born Residents",
        }
    }

    pub fn value(self, record: &NormalizedRecord) -> f64 {
        match self {
            Metric::Smoking => record.smoking_pct,
            Metric::ForeignBorn => record.foreign_born_pct,
        }
    }
}

/// One gradient stop: position along the legend and the value it represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendStop {
    pub offset: f64,
    pub value: f64,
}

/// Lookup and color domains for the paired county maps.
#[derive(Debug, Clone)]
pub struct ChoroplethView<'a> {
    by_county: HashMap<&'a str, &'a NormalizedRecord>,
    smoking_max: f64,
    foreign_born_max: f64,
}

impl<'a> ChoroplethView<'a> {
    pub fn new(records: &'a [NormalizedRecord]) -> Self {
        let mut by_county = HashMap::with_capacity(records.len());
        for r in records {
            // first match wins, as a linear search over the records would
            by_county.entry(r.county_id.as_str()).or_insert(r);
        }
        Self {
            by_county,
            smoking_max: max_by(records, |r| r.smoking_pct).unwrap_or(0.0),
            foreign_born_max: max_by(records, |r| r.foreign_born_pct).unwrap_or(0.0),
        }
    }

    pub fn record(&self, county_id: &str) -> Option<&'a NormalizedRecord> {
        self.by_county.get(county_id).copied()
    }

    /// Color domain `[0, max]` for a metric.
    pub fn domain(&self, metric: Metric) -> (f64, f64) {
        match metric {
            Metric::Smoking => (0.0, self.smoking_max),
            Metric::ForeignBorn => (0.0, self.foreign_born_max),
        }
    }

    pub fn value(&self, county_id: &str, metric: Metric) -> Option<f64> {
        self.record(county_id).map(|r| metric.value(r))
    }

    /// Position of a county's value within the color domain, clamped to `[0, 1]`.
    ///
    /// A collapsed domain (`max == 0`) maps every value to the midpoint.
    /// `None` for counties missing from the dataset and for NaN values; both
    /// are drawn without a gradient color.
    pub fn intensity(&self, county_id: &str, metric: Metric) -> Option<f64> {
        let v = self.value(county_id, metric)?;
        if v.is_nan() {
            return None;
        }
        let (_, max) = self.domain(metric);
        if max == 0.0 {
            return Some(0.5);
        }
        Some((v / max).clamp(0.0, 1.0))
    }

    pub fn legend_stops(&self, metric: Metric) -> Vec<LegendStop> {
        let (_, max) = self.domain(metric);
        (0..LEGEND_STOPS)
            .map(|i| {
                let offset = i as f64 / (LEGEND_STOPS - 1) as f64;
                LegendStop {
                    offset,
                    value: offset * max,
                }
            })
            .collect()
    }
}

/// Shared pan/zoom state of both maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Allowed zoom factors.
    pub const SCALE_EXTENT: (f64, f64) = (1.0, 8.0);

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Clamp the scale to `SCALE_EXTENT` and the translation so the scaled map
    /// always covers the `width` x `height` viewport.
    pub fn constrain(self, width: f64, height: f64) -> Self {
        let (lo, hi) = Self::SCALE_EXTENT;
        let k = self.k.clamp(lo, hi);
        Self {
            k,
            x: self.x.max(width * (1.0 - k)).min(0.0),
            y: self.y.max(height * (1.0 - k)).min(0.0),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::CanonicalRegionId;

/// A reporting period, expressed as calendar year.
pub type Period = i32;

/// A single measurement as supplied by a data source.
///
/// The region name is kept exactly as it appears in the source, including stray whitespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// The region label as found in the source data.
    pub region_name: String,
    /// The period this measurement belongs to.
    pub period: Period,
    /// The measured value, or `None` if the source has no value for this period.
    pub value: Option<f64>,
}

impl RawRecord {
    /// Creates a new raw record.
    pub fn new(region_name: impl Into<String>, period: Period, value: Option<f64>) -> Self {
        Self {
            region_name: region_name.into(),
            period,
            value,
        }
    }

    /// Returns the value if it is present and a number.
    pub fn present_value(&self) -> Option<f64> {
        self.value.filter(|value| !value.is_nan())
    }
}

/// A measurement attributed to a canonical region.
///
/// Normalized records are created by the [`RegionNormalizer`](crate::RegionNormalizer) and are
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedRecord {
    canonical_region: CanonicalRegionId,
    original_region: String,
    period: Period,
    value: f64,
}

impl NormalizedRecord {
    /// Creates a normalized record.
    pub fn new(
        canonical_region: impl Into<CanonicalRegionId>,
        original_region: impl Into<String>,
        period: Period,
        value: f64,
    ) -> Self {
        Self {
            canonical_region: canonical_region.into(),
            original_region: original_region.into(),
            period,
            value,
        }
    }

    /// The canonical region this record is attributed to.
    pub fn canonical_region(&self) -> &CanonicalRegionId {
        &self.canonical_region
    }

    /// The trimmed region name from the source record.
    pub fn original_region(&self) -> &str {
        &self.original_region
    }

    /// The period of the measurement.
    pub fn period(&self) -> Period {
        self.period
    }

    /// The measured value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

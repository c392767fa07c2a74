use std::cmp::Ordering;

use oncomap_regions::Period;
use serde::Serialize;

use crate::{Dataset, RegionValue};

/// Summary statistics of all regions in one period.
///
/// Regions without a value in the period are not counted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeriodStatistics {
    /// The period.
    pub period: Period,
    /// Number of regions with a value.
    pub count: usize,
    /// Sum of all values.
    pub total: f64,
    /// Mean value per region.
    pub average: f64,
    /// The first region with the highest value.
    pub max: RegionValue,
    /// The first region with the lowest value.
    pub min: RegionValue,
    /// Sample standard deviation, absent with fewer than two regions.
    pub std_dev: Option<f64>,
    /// The median value.
    pub median: f64,
    /// The 25th percentile.
    pub percentile_25: f64,
    /// The 75th percentile.
    pub percentile_75: f64,
    /// Number of regions strictly above the average.
    pub above_average: usize,
    /// Number of regions strictly above twice the average.
    pub above_twice_average: usize,
}

impl PeriodStatistics {
    /// Computes the statistics of a period, or `None` if no region has a value in it.
    pub fn compute(dataset: &Dataset, period: Period) -> Option<Self> {
        let values: Vec<(&str, f64)> = dataset.values(period).collect();
        let (&(first_region, first_value), rest) = values.split_first()?;

        let mut max = (first_region, first_value);
        let mut min = (first_region, first_value);
        for &(region, value) in rest {
            if value > max.1 {
                max = (region, value);
            }
            if value < min.1 {
                min = (region, value);
            }
        }

        let mut sorted: Vec<f64> = values.iter().map(|(_, value)| *value).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let total: f64 = sorted.iter().sum();
        let average = total / sorted.len() as f64;

        Some(Self {
            period,
            count: sorted.len(),
            total,
            average,
            max: RegionValue {
                region: max.0.to_owned(),
                value: max.1,
            },
            min: RegionValue {
                region: min.0.to_owned(),
                value: min.1,
            },
            std_dev: sample_std_dev(&sorted, average),
            median: percentile(&sorted, 0.5),
            percentile_25: percentile(&sorted, 0.25),
            percentile_75: percentile(&sorted, 0.75),
            above_average: sorted.iter().filter(|v| **v > average).count(),
            above_twice_average: sorted.iter().filter(|v| **v > average * 2.0).count(),
        })
    }
}

fn sample_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Percentile of sorted values, interpolating linearly between the closest ranks.
fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = quantile * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

use oncomap_regions::Period;
use serde::Serialize;

use crate::Dataset;

/// The total of one period and its change against the previous period.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrendPoint {
    /// The period.
    pub period: Period,
    /// Sum of all present values of the period.
    pub total: f64,
    /// Change against the previous period in percent.
    ///
    /// Absent for the first period and when the previous total is zero.
    pub change: Option<f64>,
}

/// Totals of all periods in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trend {
    points: Vec<TrendPoint>,
}

impl Trend {
    /// Computes the totals and year-over-year changes of a dataset.
    pub fn compute(dataset: &Dataset) -> Self {
        let mut points = Vec::<TrendPoint>::with_capacity(dataset.periods().len());

        for &period in dataset.periods() {
            let total: f64 = dataset.values(period).map(|(_, value)| value).sum();
            let change = points.last().and_then(|previous| {
                (previous.total != 0.0).then(|| (total - previous.total) / previous.total * 100.0)
            });

            points.push(TrendPoint {
                period,
                total,
                change,
            });
        }

        Self { points }
    }

    /// All points in ascending period order.
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// Returns the point of a period.
    pub fn get(&self, period: Period) -> Option<&TrendPoint> {
        self.points.iter().find(|point| point.period == period)
    }

    /// The change of the most recent period.
    pub fn latest_change(&self) -> Option<f64> {
        self.points.last().and_then(|point| point.change)
    }
}

use std::fmt;

use oncomap_regions::ZoneTotals;
use serde::Serialize;

use crate::{PeriodStatistics, Trend, format_number};

/// Labels used to phrase insights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    /// What the values count, for instance `Deaths`.
    pub measure: String,
    /// The area all regions make up, for instance `India`.
    pub scope: String,
}

impl Labels {
    /// Creates labels from a measure and a scope.
    pub fn new(measure: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            measure: measure.into(),
            scope: scope.into(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::new("Deaths", "India")
    }
}

/// The fact an [`Insight`] states.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Total of the period.
    Total,
    /// Region with the highest value.
    Highest,
    /// Region with the lowest value.
    Lowest,
    /// Change against the previous period.
    Trend,
    /// Regions above twice the average.
    HighRisk,
    /// Zone with the highest total.
    Regional,
}

/// A short statement about a period, formatted as Markdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Insight {
    /// The fact this insight states.
    pub kind: InsightKind,
    /// The statement.
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Phrases the key facts of a period.
///
/// Insights appear in a fixed order: total, highest, lowest, trend, high risk, regional. The trend
/// is omitted without a latest change, high risk is omitted if no region is above twice the
/// average, and regional is omitted without zones.
pub fn insights(
    stats: &PeriodStatistics,
    trend: &Trend,
    zones: &ZoneTotals,
    labels: &Labels,
) -> Vec<Insight> {
    let measure = labels.measure.to_lowercase();
    let mut insights = vec![
        Insight::new(
            InsightKind::Total,
            format!(
                "**Total {} in {}**: {} people across {}",
                labels.measure,
                stats.period,
                format_number(stats.total),
                labels.scope
            ),
        ),
        Insight::new(
            InsightKind::Highest,
            format!(
                "**Highest Impact**: {} with {} {measure}",
                stats.max.region,
                format_number(stats.max.value)
            ),
        ),
        Insight::new(
            InsightKind::Lowest,
            format!(
                "**Lowest Impact**: {} with {} {measure}",
                stats.min.region,
                format_number(stats.min.value)
            ),
        ),
    ];

    if let Some(change) = trend.latest_change() {
        let message = if change > 0.0 {
            format!("**Concerning Trend**: {change:.1}% increase from previous year")
        } else {
            format!(
                "**Positive Trend**: {:.1}% decrease from previous year",
                change.abs()
            )
        };
        insights.push(Insight::new(InsightKind::Trend, message));
    }

    if stats.above_twice_average > 0 {
        insights.push(Insight::new(
            InsightKind::HighRisk,
            format!(
                "**High Risk Regions**: {} regions have {measure} above twice the {} average",
                stats.above_twice_average, labels.scope
            ),
        ));
    }

    if let Some((zone, total)) = zones.highest() {
        insights.push(Insight::new(
            InsightKind::Regional,
            format!(
                "**Regional Impact**: {zone} has the highest total with {} {measure}",
                format_number(total)
            ),
        ));
    }

    insights
}

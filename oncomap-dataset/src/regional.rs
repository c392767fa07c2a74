use oncomap_regions::{NormalizedRecord, Period, RegionalAggregator};
use serde::Serialize;

/// Rollup of one zone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneStatistics {
    /// The zone name.
    pub zone: String,
    /// Sum of the values of all member regions.
    pub total: f64,
    /// Number of member regions with a value.
    pub regions: usize,
    /// Average per member region with a value, or `0.0` if there are none.
    pub average: f64,
}

/// Computes the rollup of every zone for one period.
///
/// Zones appear in declaration order, including zones without any records.
pub fn regional_statistics(
    aggregator: &RegionalAggregator<'_>,
    records: &[NormalizedRecord],
    period: Period,
) -> Vec<ZoneStatistics> {
    let totals = aggregator.aggregate(records, period);

    aggregator
        .zones()
        .iter()
        .map(|zone| {
            let total = totals.get(zone.name()).unwrap_or_default();
            let regions = zone
                .members()
                .filter(|member| {
                    records.iter().any(|record| {
                        record.period() == period && record.canonical_region() == *member
                    })
                })
                .count();

            let average = if regions > 0 {
                total / regions as f64
            } else {
                0.0
            };

            ZoneStatistics {
                zone: zone.name().to_owned(),
                total,
                regions,
                average,
            }
        })
        .collect()
}

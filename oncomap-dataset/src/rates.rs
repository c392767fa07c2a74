use indexmap::IndexMap;
use oncomap_regions::{CanonicalRegionId, NormalizedRecord, Period};
use serde::Serialize;

/// Mortality and survival of one region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MortalityRate {
    /// The canonical region.
    pub region: CanonicalRegionId,
    /// Number of incident cases.
    pub incidence: f64,
    /// Number of deaths.
    pub mortality: f64,
    /// Deaths per 100 cases.
    pub mortality_rate: f64,
    /// `100 - mortality_rate`.
    pub survival_rate: f64,
}

fn totals(records: &[NormalizedRecord], period: Period) -> IndexMap<&CanonicalRegionId, f64> {
    let mut totals = IndexMap::new();
    for record in records.iter().filter(|record| record.period() == period) {
        *totals.entry(record.canonical_region()).or_default() += record.value();
    }
    totals
}

/// Joins incidence and mortality records of a period by canonical region.
///
/// Values of the same region are summed on each side. Regions are returned in incidence order.
/// Regions missing on either side and regions without incidence are skipped.
pub fn mortality_rates(
    incidence: &[NormalizedRecord],
    mortality: &[NormalizedRecord],
    period: Period,
) -> Vec<MortalityRate> {
    let deaths = totals(mortality, period);

    totals(incidence, period)
        .into_iter()
        .filter_map(|(region, cases)| {
            let Some(&died) = deaths.get(region) else {
                oncomap_log::debug!("no mortality for {region} in {period}");
                return None;
            };

            if cases <= 0.0 {
                oncomap_log::debug!("no incidence for {region} in {period}");
                return None;
            }

            let mortality_rate = died / cases * 100.0;
            Some(MortalityRate {
                region: region.clone(),
                incidence: cases,
                mortality: died,
                mortality_rate,
                survival_rate: 100.0 - mortality_rate,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        oncomap_log::init_test!();
        let incidence = [
            NormalizedRecord::new("Kerala", "Kerala", 2024, 400.0),
            NormalizedRecord::new("Goa", "Goa", 2024, 0.0),
            NormalizedRecord::new("Bihar", "Bihar", 2024, 100.0),
            NormalizedRecord::new("Kerala", "Kerala", 2023, 1.0),
        ];
        let mortality = [
            NormalizedRecord::new("Goa", "Goa", 2024, 5.0),
            NormalizedRecord::new("Kerala", "Kerala", 2024, 100.0),
        ];

        let rates = mortality_rates(&incidence, &mortality, 2024);
        insta::assert_json_snapshot!(rates, @r#"
        [
          {
            "region": "Kerala",
            "incidence": 400.0,
            "mortality": 100.0,
            "mortality_rate": 25.0,
            "survival_rate": 75.0
          }
        ]
        "#);
    }
}

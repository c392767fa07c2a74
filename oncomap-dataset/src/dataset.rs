use std::cmp::Ordering;

use oncomap_regions::{NormalizedRecord, Period, RawRecord, RegionTables};
use serde::Serialize;

/// The value of one region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionValue {
    /// The region name as found in the data.
    pub region: String,
    /// The value of the region.
    pub value: f64,
}

/// A single point of a region series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// The period of the point.
    pub period: Period,
    /// The value, or `None` if the region has no value in this period.
    pub value: Option<f64>,
}

/// The values of one region across periods.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionSeries {
    /// The region name as found in the data.
    pub region: String,
    /// One point per requested period.
    pub points: Vec<SeriesPoint>,
}

/// A table of measurements by region and period.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<RawRecord>,
    periods: Vec<Period>,
    regions: Vec<String>,
}

impl Dataset {
    /// Creates a dataset from raw records.
    pub fn new(records: Vec<RawRecord>) -> Self {
        let mut periods: Vec<Period> = records.iter().map(|record| record.period).collect();
        periods.sort_unstable();
        periods.dedup();

        let mut regions = Vec::<String>::new();
        for record in &records {
            let region = record.region_name.trim();
            if !regions.iter().any(|r| r == region) {
                regions.push(region.to_owned());
            }
        }

        Self {
            records,
            periods,
            regions,
        }
    }

    /// All records in file order.
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Distinct periods in ascending order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// The most recent period.
    pub fn latest_period(&self) -> Option<Period> {
        self.periods.last().copied()
    }

    /// Distinct trimmed region names in order of first appearance.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Iterates the present values of a period with their trimmed region names.
    pub fn values(&self, period: Period) -> impl Iterator<Item = (&str, f64)> {
        self.records
            .iter()
            .filter(move |record| record.period == period)
            .filter_map(|record| Some((record.region_name.trim(), record.present_value()?)))
    }

    /// Returns the value of a region in a period.
    pub fn value(&self, region: &str, period: Period) -> Option<f64> {
        let region = region.trim();
        self.values(period)
            .find(|(name, _)| *name == region)
            .map(|(_, value)| value)
    }

    /// Normalizes the records of a period through the given tables.
    pub fn normalize(&self, tables: &RegionTables, period: Period) -> Vec<NormalizedRecord> {
        tables.normalizer().normalize(&self.records, period)
    }

    /// Returns the `n` regions with the highest values in a period.
    ///
    /// Regions with equal values keep their order in the data.
    pub fn top_regions(&self, period: Period, n: usize) -> Vec<RegionValue> {
        let mut ranking: Vec<RegionValue> = self
            .values(period)
            .map(|(region, value)| RegionValue {
                region: region.to_owned(),
                value,
            })
            .collect();

        ranking.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        ranking.truncate(n);
        ranking
    }

    /// Returns the values of the given regions across the given periods.
    ///
    /// Regions that do not appear in the data are skipped.
    pub fn region_series<S: AsRef<str>>(&self, regions: &[S], periods: &[Period]) -> Vec<RegionSeries> {
        let mut series = Vec::with_capacity(regions.len());

        for region in regions {
            let region = region.as_ref().trim();
            if !self.regions.iter().any(|r| r == region) {
                oncomap_log::warn!("region {region:?} does not appear in the data");
                continue;
            }

            let points = periods
                .iter()
                .map(|&period| SeriesPoint {
                    period,
                    value: self.value(region, period),
                })
                .collect();

            series.push(RegionSeries {
                region: region.to_owned(),
                points,
            });
        }

        series
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            RawRecord::new("Kerala", 2023, Some(30.0)),
            RawRecord::new("Kerala", 2024, Some(40.0)),
            RawRecord::new("Goa ", 2024, Some(40.0)),
            RawRecord::new("Goa ", 2023, None),
            RawRecord::new("Punjab", 2024, Some(50.0)),
        ])
    }

    #[test]
    fn test_periods_and_regions() {
        let dataset = dataset();
        assert_eq!(dataset.periods(), [2023, 2024]);
        assert_eq!(dataset.latest_period(), Some(2024));
        assert_eq!(dataset.regions(), ["Kerala", "Goa", "Punjab"]);
    }

    #[test]
    fn test_value() {
        let dataset = dataset();
        assert_eq!(dataset.value("Goa", 2024), Some(40.0));
        assert_eq!(dataset.value("Goa", 2023), None);
        assert_eq!(dataset.value("Bihar", 2024), None);
    }

    #[test]
    fn test_top_regions_stable() {
        let top = dataset().top_regions(2024, 2);
        insta::assert_json_snapshot!(top, @r#"
        [
          {
            "region": "Punjab",
            "value": 50.0
          },
          {
            "region": "Kerala",
            "value": 40.0
          }
        ]
        "#);
    }

    #[test]
    fn test_region_series() {
        let series = dataset().region_series(&["Goa", "Bihar"], &[2023, 2024]);
        assert_eq!(
            series,
            vec![RegionSeries {
                region: "Goa".to_owned(),
                points: vec![
                    SeriesPoint {
                        period: 2023,
                        value: None
                    },
                    SeriesPoint {
                        period: 2024,
                        value: Some(40.0)
                    },
                ],
            }]
        );
    }
}

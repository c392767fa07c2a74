use indexmap::IndexMap;
use serde::Serialize;

use crate::{CanonicalRegionId, NormalizedRecord, Period, ZoneTable};

/// Per-zone sums of one period.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ZoneTotals {
    period: Period,
    totals: IndexMap<String, f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unassigned: Vec<CanonicalRegionId>,
}

impl ZoneTotals {
    /// The period these totals were computed for.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the total of the named zone.
    pub fn get(&self, zone: &str) -> Option<f64> {
        self.totals.get(zone).copied()
    }

    /// Iterates `(zone, total)` pairs in zone declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(zone, total)| (zone.as_str(), *total))
    }

    /// Returns the zone with the highest total.
    ///
    /// Ties resolve to the zone declared first. Returns `None` if there are no zones.
    pub fn highest(&self) -> Option<(&str, f64)> {
        let mut highest: Option<(&str, f64)> = None;
        for (zone, total) in self.iter() {
            if highest.is_none_or(|(_, max)| total > max) {
                highest = Some((zone, total));
            }
        }
        highest
    }

    /// Regions of the period that belong to no zone.
    ///
    /// These regions do not contribute to any total.
    pub fn unassigned(&self) -> &[CanonicalRegionId] {
        &self.unassigned
    }

    /// Returns the number of zones.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns `true` if there are no zones.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sums normalized records per zone.
#[derive(Clone, Copy, Debug)]
pub struct RegionalAggregator<'a> {
    zones: &'a ZoneTable,
}

impl<'a> RegionalAggregator<'a> {
    /// Creates an aggregator over the given zones.
    pub fn new(zones: &'a ZoneTable) -> Self {
        Self { zones }
    }

    /// The zones this aggregator sums over.
    pub fn zones(&self) -> &'a ZoneTable {
        self.zones
    }

    /// Sums the values of all records of `period` per zone.
    ///
    /// Every zone appears in the result, with `0.0` if none of its members has a record. A region
    /// listed in several zones is counted in each of them. Regions in no zone are excluded from
    /// all totals and reported through [`ZoneTotals::unassigned`].
    pub fn aggregate(&self, records: &[NormalizedRecord], period: Period) -> ZoneTotals {
        let mut totals: IndexMap<String, f64> = self
            .zones
            .iter()
            .map(|zone| (zone.name().to_owned(), 0.0))
            .collect();
        let mut unassigned = Vec::new();

        let records = records
            .iter()
            .filter(|record| record.period() == period && !record.value().is_nan());

        for record in records {
            let region = record.canonical_region();
            let mut assigned = false;

            for zone in self.zones.zones_of(region.as_str()) {
                assigned = true;
                if let Some(total) = totals.get_mut(zone.name()) {
                    *total += record.value();
                }
            }

            if !assigned && !unassigned.contains(region) {
                oncomap_log::debug!("region {region} belongs to no zone");
                unassigned.push(region.clone());
            }
        }

        ZoneTotals {
            period,
            totals,
            unassigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Zone;

    fn zones() -> ZoneTable {
        ZoneTable::from_iter([
            Zone::new("North", ["Punjab", "Jammu & Kashmir"]),
            Zone::new("South", ["Karnataka", "Kerala"]),
            Zone::new("Islands", ["Lakshadweep"]),
        ])
    }

    #[test]
    fn test_sum_per_zone() {
        let zones = zones();
        let records = [
            NormalizedRecord::new("Karnataka", "Karnataka", 2020, 100.0),
            NormalizedRecord::new("Kerala", "Kerala", 2020, 200.0),
            NormalizedRecord::new("Karnataka", "Karnataka", 2019, 50.0),
        ];

        let totals = RegionalAggregator::new(&zones).aggregate(&records, 2020);
        assert_eq!(totals.get("South"), Some(300.0));
        assert_eq!(totals.period(), 2020);
    }

    #[test]
    fn test_empty_zone_is_zero() {
        let zones = zones();
        let totals = RegionalAggregator::new(&zones).aggregate(&[], 2020);
        assert_eq!(totals.get("Islands"), Some(0.0));
        assert_eq!(totals.len(), 3);
        assert_eq!(totals.highest(), Some(("North", 0.0)));
    }

    #[test]
    fn test_unassigned_regions() {
        let zones = zones();
        let records = [
            NormalizedRecord::new("Jammu & Kashmir", "Jammu & Kashmir", 2024, 500.0),
            NormalizedRecord::new("Ladakh", "Jammu & Kashmir", 2024, 500.0),
            NormalizedRecord::new("Ladakh", "Ladakh", 2024, 1.0),
        ];

        let totals = RegionalAggregator::new(&zones).aggregate(&records, 2024);
        assert_eq!(totals.get("North"), Some(500.0));
        assert_eq!(totals.unassigned(), ["Ladakh"]);
    }

    #[test]
    fn test_overlapping_zones_double_count() {
        let mut zones = zones();
        zones.insert(Zone::new("Coast", ["Kerala"]));
        let records = [NormalizedRecord::new("Kerala", "Kerala", 2020, 10.0)];

        let totals = RegionalAggregator::new(&zones).aggregate(&records, 2020);
        assert_eq!(totals.get("South"), Some(10.0));
        assert_eq!(totals.get("Coast"), Some(10.0));
    }

    #[test]
    fn test_highest_first_max() {
        let zones = zones();
        let records = [
            NormalizedRecord::new("Kerala", "Kerala", 2020, 10.0),
            NormalizedRecord::new("Lakshadweep", "Lakshadweep", 2020, 10.0),
            NormalizedRecord::new("Punjab", "Punjab", 2020, 3.0),
        ];

        let totals = RegionalAggregator::new(&zones).aggregate(&records, 2020);
        assert_eq!(totals.highest(), Some(("South", 10.0)));
    }

    #[test]
    fn test_serialize() {
        let zones = zones();
        let records = [
            NormalizedRecord::new("Punjab", "Punjab", 2020, 4.0),
            NormalizedRecord::new("Goa", "Goa", 2020, 2.0),
        ];

        let totals = RegionalAggregator::new(&zones).aggregate(&records, 2020);
        insta::assert_json_snapshot!(totals, @r#"
        {
          "period": 2020,
          "totals": {
            "North": 4.0,
            "South": 0.0,
            "Islands": 0.0
          },
          "unassigned": [
            "Goa"
          ]
        }
        "#);
    }
}

use oncomap_regions::{
    CanonicalRegionId, NormalizedRecord, RawRecord, RegionTables, RegionalAggregator, Zone,
    ZoneTable,
};
use similar_asserts::assert_eq;

fn canonical(records: &[NormalizedRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.canonical_region().as_str())
        .collect()
}

#[test]
fn test_canonical_ids_are_fixed_points() {
    let tables = RegionTables::india();
    let normalizer = tables.normalizer();
    let ids: Vec<CanonicalRegionId> = tables.aliases().canonical_ids().cloned().collect();

    for id in ids {
        assert_eq!(normalizer.resolve(id.as_str()), id);

        let renormalized = normalizer.resolve(normalizer.resolve(id.as_str()).as_str());
        assert_eq!(renormalized, id);
    }
}

#[test]
fn test_split_territory_replaced_by_targets() {
    let tables = RegionTables::india();
    let records = vec![
        RawRecord::new("Jammu & Kashmir", 2024, Some(500.0)),
        RawRecord::new("Kerala", 2024, Some(80.0)),
    ];

    let normalized = tables.normalizer().normalize(&records, 2024);
    assert_eq!(
        canonical(&normalized),
        vec!["Kerala", "Jammu & Kashmir", "Ladakh"]
    );

    let replicas: Vec<_> = normalized
        .iter()
        .filter(|record| record.original_region() == "Jammu & Kashmir")
        .collect();

    let target_count = tables.split_rules()[0].targets().len();
    assert_eq!(replicas.len(), target_count);
    for replica in replicas {
        assert_eq!(replica.value(), 500.0);
        assert_eq!(replica.period(), 2024);
    }
}

#[test]
fn test_aliases_and_unknown_regions() {
    let tables = RegionTables::india();
    let records = vec![
        RawRecord::new("Orissa", 2024, Some(1.0)),
        RawRecord::new("Unknown Territory", 2024, Some(2.0)),
        RawRecord::new("Telangana ", 2024, Some(3.0)),
    ];

    let normalized = tables.normalizer().normalize(&records, 2024);
    assert_eq!(
        canonical(&normalized),
        vec!["Odisha", "Unknown Territory", "Telangana"]
    );
    assert_eq!(normalized[0].original_region(), "Orissa");
}

#[test]
fn test_absent_values_contribute_nothing() {
    let tables = RegionTables::india();
    let records = vec![
        RawRecord::new("Karnataka", 2020, None),
        RawRecord::new("Kerala", 2020, Some(f64::NAN)),
        RawRecord::new("Tamil Nadu", 2020, Some(10.0)),
    ];

    let normalized = tables.normalizer().normalize(&records, 2020);
    assert_eq!(canonical(&normalized), vec!["Tamil Nadu"]);

    let totals = tables.aggregator().aggregate(&normalized, 2020);
    assert_eq!(totals.get("South India"), Some(10.0));
}

#[test]
fn test_zone_sum_ignores_other_periods() {
    let zones = ZoneTable::from_iter([Zone::new("South", ["Karnataka", "Kerala"])]);
    let tables = RegionTables::new(Default::default(), Vec::new(), zones);

    let records = vec![
        RawRecord::new("Karnataka", 2020, Some(100.0)),
        RawRecord::new("Kerala", 2020, Some(200.0)),
        RawRecord::new("Karnataka", 2019, Some(50.0)),
    ];

    let normalized = tables.normalizer().normalize(&records, 2020);
    let totals = tables.aggregator().aggregate(&normalized, 2020);
    assert_eq!(totals.get("South"), Some(300.0));

    // Records of other periods are ignored even when passed in.
    let mixed = vec![
        NormalizedRecord::new("Karnataka", "Karnataka", 2020, 100.0),
        NormalizedRecord::new("Karnataka", "Karnataka", 2019, 50.0),
    ];
    let totals = RegionalAggregator::new(tables.zones()).aggregate(&mixed, 2020);
    assert_eq!(totals.get("South"), Some(100.0));
}

#[test]
fn test_empty_zone_totals_zero() {
    let tables = RegionTables::india();
    let totals = tables.aggregator().aggregate(&[], 2024);

    let zones: Vec<_> = totals.iter().collect();
    assert_eq!(
        zones,
        vec![
            ("North India", 0.0),
            ("South India", 0.0),
            ("East India", 0.0),
            ("West India", 0.0),
            ("Islands & Others", 0.0),
        ]
    );
}

#[test]
fn test_split_value_counted_once_in_india_zones() {
    let tables = RegionTables::india();
    let records = vec![RawRecord::new("Jammu and Kashmir", 2024, Some(500.0))];

    let normalized = tables.normalizer().normalize(&records, 2024);
    let totals = tables.aggregator().aggregate(&normalized, 2024);

    assert_eq!(totals.get("North India"), Some(500.0));
    assert_eq!(totals.unassigned(), ["Ladakh"]);
    insta::assert_json_snapshot!(totals, @r#"
    {
      "period": 2024,
      "totals": {
        "North India": 500.0,
        "South India": 0.0,
        "East India": 0.0,
        "West India": 0.0,
        "Islands & Others": 0.0
      },
      "unassigned": [
        "Ladakh"
      ]
    }
    "#);
}

#[test]
fn test_tables_shared_across_threads() {
    let tables = RegionTables::india();
    let records = vec![RawRecord::new("Orissa", 2024, Some(1.0))];

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| tables.normalizer().normalize(&records, 2024)))
            .collect();

        for handle in handles {
            let normalized = handle.join().unwrap();
            assert_eq!(canonical(&normalized), vec!["Odisha"]);
        }
    });
}

use oncomap_dataset::{
    Dataset, DatasetConfig, Labels, LongColumns, PeriodStatistics, TableFormat, Trend, insights,
    mortality_rates, regional_statistics,
};
use oncomap_regions::RegionTables;
use similar_asserts::assert_eq;

const MORTALITY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mortality.csv");
const INCIDENCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/incidence.csv");

fn mortality() -> Dataset {
    Dataset::from_path(MORTALITY, &DatasetConfig::default()).unwrap()
}

fn incidence() -> Dataset {
    let config = DatasetConfig {
        format: TableFormat::Long,
        columns: LongColumns {
            period: "year".to_owned(),
            value: "cases".to_owned(),
        },
        ..Default::default()
    };

    Dataset::from_path(INCIDENCE, &config).unwrap()
}

#[test]
fn test_load_skips_total_row() {
    let dataset = mortality();
    assert_eq!(dataset.periods(), [2022, 2023, 2024]);
    assert_eq!(dataset.regions().len(), 10);
    assert!(!dataset.regions().iter().any(|region| region == "Total"));
}

#[test]
fn test_statistics_match_total_row() {
    let dataset = mortality();
    let stats = PeriodStatistics::compute(&dataset, 2024).unwrap();

    assert_eq!(stats.total, 249050.0);
    assert_eq!(stats.count, 9);
    assert_eq!(stats.max.region, "Bihar");
    assert_eq!(stats.min.region, "Pondicherry");
}

#[test]
fn test_zone_totals() {
    let dataset = mortality();
    let tables = RegionTables::india();
    let normalized = dataset.normalize(&tables, 2024);

    let totals = tables.aggregator().aggregate(&normalized, 2024);
    insta::assert_json_snapshot!(totals, @r#"
    {
      "period": 2024,
      "totals": {
        "North India": 15710.0,
        "South India": 142360.0,
        "East India": 89500.0,
        "West India": 0.0,
        "Islands & Others": 1480.0
      },
      "unassigned": [
        "Ladakh"
      ]
    }
    "#);

    let stats = regional_statistics(&tables.aggregator(), &normalized, 2024);
    let south = stats.iter().find(|zone| zone.zone == "South India").unwrap();
    assert_eq!(south.regions, 4);
    assert_eq!(south.average, 35590.0);
}

#[test]
fn test_insights() {
    let dataset = mortality();
    let tables = RegionTables::india();
    let stats = PeriodStatistics::compute(&dataset, 2024).unwrap();
    let zones = tables
        .aggregator()
        .aggregate(&dataset.normalize(&tables, 2024), 2024);

    let insights = insights(&stats, &Trend::compute(&dataset), &zones, &Labels::default());
    assert_eq!(
        insights.first().map(ToString::to_string).as_deref(),
        Some("**Total Deaths in 2024**: 249,050 people across India")
    );
    assert_eq!(
        insights.last().map(ToString::to_string).as_deref(),
        Some("**Regional Impact**: South India has the highest total with 142,360 deaths")
    );
}

#[test]
fn test_mortality_rates() {
    let tables = RegionTables::india();
    let deaths = mortality().normalize(&tables, 2024);
    let cases = incidence().normalize(&tables, 2024);

    let rates = mortality_rates(&cases, &deaths, 2024);
    let regions: Vec<_> = rates.iter().map(|rate| rate.region.as_str()).collect();
    assert_eq!(regions, ["Kerala", "Odisha", "Jammu & Kashmir", "Ladakh"]);

    let kerala = &rates[0];
    assert!((kerala.mortality_rate - 56.75).abs() < 1e-9);
    assert!((kerala.survival_rate - 43.25).abs() < 1e-9);
}

use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use oncomap_config::{Config, OverridableConfig};
use oncomap_dataset::{
    Dataset, PeriodStatistics, Trend, ZoneStatistics, insights, mortality_rates,
    regional_statistics,
};
use oncomap_regions::{CanonicalRegionId, Period, RegionTables, ZoneOverlap};
use serde::Serialize;

use crate::cliapp::{Cli, Command, CompareArgs, InsightsArgs, PeriodArgs, RatesArgs, TopArgs};
use crate::setup;

/// Zone rollups of one period.
#[derive(Debug, Serialize)]
struct ZonesReport {
    period: Period,
    zones: Vec<ZoneStatistics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unassigned: Vec<CanonicalRegionId>,
}

/// Findings of the table check.
#[derive(Debug, Serialize)]
struct CheckReport {
    aliases: usize,
    split_rules: usize,
    zones: usize,
    overlaps: Vec<ZoneOverlap>,
    unzoned: Vec<CanonicalRegionId>,
}

/// Runs the command line application.
pub fn execute() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    config.apply_override(OverridableConfig {
        log_level: cli.log_level,
        log_format: cli.log_format,
        table_format: cli.table_format,
        measure: cli.measure,
        scope: cli.scope,
    })?;

    setup::init_logging(&config);
    setup::dump_spawn_infos(&config);

    let tables = config
        .region_tables()
        .context("failed to build region tables")?;

    match cli.command {
        Command::Normalize(args) => normalize(&config, &tables, args),
        Command::Zones(args) => zones(&config, &tables, args),
        Command::Stats(args) => stats(&config, args),
        Command::Trend(args) => {
            let dataset = load_dataset(&config, &args.path)?;
            write_json(&Trend::compute(&dataset))
        }
        Command::Top(args) => top(&config, args),
        Command::Compare(args) => compare(&config, args),
        Command::Insights(args) => show_insights(&config, &tables, args),
        Command::Rates(args) => rates(&config, &tables, args),
        Command::Tables => write_yaml(&tables),
        Command::Check => check(&tables),
    }
}

fn load_dataset(config: &Config, path: &Path) -> Result<Dataset> {
    Dataset::from_path(path, config.dataset())
        .with_context(|| format!("failed to load dataset {}", path.display()))
}

/// Returns the requested period, or the latest period of the dataset.
fn resolve_period(dataset: &Dataset, requested: Option<Period>) -> Result<Period> {
    match requested {
        Some(period) if dataset.periods().contains(&period) => Ok(period),
        Some(period) => bail!("the dataset has no values for {period}"),
        None => dataset
            .latest_period()
            .context("the dataset does not contain any records"),
    }
}

fn load_period(config: &Config, args: &PeriodArgs) -> Result<(Dataset, Period)> {
    let dataset = load_dataset(config, &args.dataset.path)?;
    let period = resolve_period(&dataset, args.period)?;
    oncomap_log::debug!("evaluating period {period}");
    Ok((dataset, period))
}

fn period_statistics(dataset: &Dataset, period: Period) -> Result<PeriodStatistics> {
    PeriodStatistics::compute(dataset, period)
        .with_context(|| format!("no region has a value for {period}"))
}

fn normalize(config: &Config, tables: &RegionTables, args: PeriodArgs) -> Result<()> {
    let (dataset, period) = load_period(config, &args)?;
    write_json(&dataset.normalize(tables, period))
}

fn zones(config: &Config, tables: &RegionTables, args: PeriodArgs) -> Result<()> {
    let (dataset, period) = load_period(config, &args)?;
    let normalized = dataset.normalize(tables, period);

    let aggregator = tables.aggregator();
    let totals = aggregator.aggregate(&normalized, period);

    write_json(&ZonesReport {
        period,
        zones: regional_statistics(&aggregator, &normalized, period),
        unassigned: totals.unassigned().to_vec(),
    })
}

fn stats(config: &Config, args: PeriodArgs) -> Result<()> {
    let (dataset, period) = load_period(config, &args)?;
    write_json(&period_statistics(&dataset, period)?)
}

fn top(config: &Config, args: TopArgs) -> Result<()> {
    let (dataset, period) = load_period(config, &args.period)?;
    write_json(&dataset.top_regions(period, args.count))
}

fn compare(config: &Config, args: CompareArgs) -> Result<()> {
    let dataset = load_dataset(config, &args.dataset.path)?;
    let periods = if args.periods.is_empty() {
        dataset.periods().to_vec()
    } else {
        args.periods
    };

    write_json(&dataset.region_series(&args.regions, &periods))
}

fn show_insights(config: &Config, tables: &RegionTables, args: InsightsArgs) -> Result<()> {
    let (dataset, period) = load_period(config, &args.period)?;
    let stats = period_statistics(&dataset, period)?;
    let trend = Trend::compute(&dataset);
    let zones = tables
        .aggregator()
        .aggregate(&dataset.normalize(tables, period), period);

    let insights = insights(&stats, &trend, &zones, &config.labels());

    if args.markdown {
        let mut stdout = io::stdout().lock();
        for insight in insights {
            io::Write::write_all(&mut stdout, format!("{insight}\n").as_bytes())?;
        }
        return Ok(());
    }

    write_json(&insights)
}

fn rates(config: &Config, tables: &RegionTables, args: RatesArgs) -> Result<()> {
    let incidence = load_dataset(config, &args.incidence)?;
    let mortality = load_dataset(config, &args.mortality)?;
    let period = resolve_period(&mortality, args.period)?;

    let rates = mortality_rates(
        &incidence.normalize(tables, period),
        &mortality.normalize(tables, period),
        period,
    );

    if rates.is_empty() {
        oncomap_log::warn!("no region has both incidence and mortality for {period}");
    }

    write_json(&rates)
}

fn check(tables: &RegionTables) -> Result<()> {
    let overlaps = tables.zones().overlaps();
    let unzoned: Vec<_> = tables
        .aliases()
        .canonical_ids()
        .filter(|id| !tables.zones().is_assigned(id.as_str()))
        .cloned()
        .collect();

    for region in &unzoned {
        oncomap_log::info!("region {region} belongs to no zone");
    }

    write_json(&CheckReport {
        aliases: tables.aliases().len(),
        split_rules: tables.split_rules().len(),
        zones: tables.zones().len(),
        overlaps: overlaps.clone(),
        unzoned,
    })?;

    if !overlaps.is_empty() {
        bail!("{} regions are assigned to multiple zones", overlaps.len());
    }

    Ok(())
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to write output")?;
    io::Write::write_all(&mut stdout, b"\n")?;
    Ok(())
}

fn write_yaml<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout().lock();
    serde_yaml::to_writer(stdout, value).context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use oncomap_regions::RawRecord;

    use super::*;

    #[test]
    fn test_resolve_period() {
        let dataset = Dataset::new(vec![
            RawRecord::new("Kerala", 2023, Some(1.0)),
            RawRecord::new("Kerala", 2024, None),
        ]);

        assert_eq!(resolve_period(&dataset, None).unwrap(), 2024);
        assert_eq!(resolve_period(&dataset, Some(2023)).unwrap(), 2023);
        assert_eq!(
            resolve_period(&dataset, Some(2019)).unwrap_err().to_string(),
            "the dataset has no values for 2019"
        );
        assert!(resolve_period(&Dataset::default(), None).is_err());
    }

    #[test]
    fn test_zones_report() {
        let tables = RegionTables::india();
        let dataset = Dataset::new(vec![
            RawRecord::new("Jammu and Kashmir", 2024, Some(10.0)),
            RawRecord::new("Orissa", 2024, Some(5.0)),
        ]);
        let normalized = dataset.normalize(&tables, 2024);
        let aggregator = tables.aggregator();

        let report = ZonesReport {
            period: 2024,
            zones: regional_statistics(&aggregator, &normalized, 2024),
            unassigned: aggregator.aggregate(&normalized, 2024).unassigned().to_vec(),
        };

        insta::assert_json_snapshot!(report, @r#"
        {
          "period": 2024,
          "zones": [
            {
              "zone": "North India",
              "total": 10.0,
              "regions": 1,
              "average": 10.0
            },
            {
              "zone": "South India",
              "total": 0.0,
              "regions": 0,
              "average": 0.0
            },
            {
              "zone": "East India",
              "total": 5.0,
              "regions": 1,
              "average": 5.0
            },
            {
              "zone": "West India",
              "total": 0.0,
              "regions": 0,
              "average": 0.0
            },
            {
              "zone": "Islands & Others",
              "total": 0.0,
              "regions": 0,
              "average": 0.0
            }
          ],
          "unassigned": [
            "Ladakh"
          ]
        }
        "#);
    }
}

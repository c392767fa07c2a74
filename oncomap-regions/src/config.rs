//! Configuration of region tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    AliasTable, CanonicalRegionId, RegionNormalizer, RegionalAggregator, SplitTerritoryRule,
    ValuePolicy, ZoneOverlap, ZoneTable, presets,
};

/// Built-in tables to start from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Indian states and union territories.
    #[default]
    India,
    /// Empty tables.
    None,
}

/// Configuration of a single split rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitRuleConfig {
    /// Identifiers of the region to split, matched case-insensitively.
    pub matches: Vec<String>,
    /// Canonical regions the record is replicated to.
    pub targets: Vec<String>,
    /// How values are distributed over targets.
    #[serde(default)]
    pub value_policy: ValuePolicy,
}

/// Region table configuration.
///
/// Starts from the tables of the [`Preset`], then applies additional aliases and split rules.
/// If `zones` is given, it replaces the preset's zones entirely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionsConfig {
    /// Built-in tables to start from.
    pub preset: Preset,
    /// Additional aliases, mapping a spelling to its canonical id.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, String>,
    /// Canonical ids whose identity entry is removed from the alias table.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_identity: Vec<String>,
    /// Additional split rules, applied after the preset's rules.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub split_rules: Vec<SplitRuleConfig>,
    /// Zones replacing the preset's zones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<ZoneTable>,
    /// Rejects zone tables that list a region in more than one zone.
    pub strict_zones: bool,
}

/// Errors raised while building [`RegionTables`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TableError {
    /// A split rule does not list any identifier to match.
    #[error("split rule {index} has no identifiers to match")]
    EmptySplitMatch {
        /// Position of the rule in the configuration.
        index: usize,
    },
    /// A split rule does not list any target.
    #[error("split rule {index} has no targets")]
    EmptySplitTargets {
        /// Position of the rule in the configuration.
        index: usize,
    },
    /// A region belongs to several zones while strict zones are enabled.
    #[error("region {region} is assigned to multiple zones: {}", .zones.join(", "))]
    OverlappingZones {
        /// The region in question.
        region: CanonicalRegionId,
        /// The zones listing the region.
        zones: Vec<String>,
    },
}

/// The immutable set of tables used for normalization and aggregation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegionTables {
    aliases: AliasTable,
    split_rules: Vec<SplitTerritoryRule>,
    zones: ZoneTable,
}

impl RegionTables {
    /// Creates tables from their parts.
    pub fn new(aliases: AliasTable, split_rules: Vec<SplitTerritoryRule>, zones: ZoneTable) -> Self {
        Self {
            aliases,
            split_rules,
            zones,
        }
    }

    /// Returns the built-in tables for India.
    pub fn india() -> Self {
        Self::new(
            presets::india::alias_table(),
            presets::india::split_rules(),
            presets::india::zones(),
        )
    }

    /// Returns the tables of a preset.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::India => Self::india(),
            Preset::None => Self::default(),
        }
    }

    /// Builds tables from configuration.
    ///
    /// Overlapping zones are logged as warning, or rejected if `strict_zones` is set.
    pub fn from_config(config: &RegionsConfig) -> Result<Self, TableError> {
        let mut tables = Self::preset(config.preset);

        for (alias, canonical) in &config.aliases {
            tables.aliases.insert(alias, canonical.as_str());
        }

        for canonical in &config.exclude_identity {
            if !tables.aliases.exclude_identity(canonical) {
                oncomap_log::warn!("cannot exclude identity of {canonical:?}: no identity entry");
            }
        }

        for (index, rule) in config.split_rules.iter().enumerate() {
            let split = SplitTerritoryRule::new(&rule.matches, rule.targets.iter().map(String::as_str))
                .with_value_policy(rule.value_policy);

            if split.identifiers().is_empty() {
                return Err(TableError::EmptySplitMatch { index });
            }
            if split.targets().is_empty() {
                return Err(TableError::EmptySplitTargets { index });
            }

            tables.split_rules.push(split);
        }

        if let Some(ref zones) = config.zones {
            tables.zones = zones.clone();
        }

        for ZoneOverlap { region, zones } in tables.zones.overlaps() {
            if config.strict_zones {
                return Err(TableError::OverlappingZones { region, zones });
            }

            oncomap_log::warn!(
                "region {region} is assigned to multiple zones and will be counted in each: {}",
                zones.join(", ")
            );
        }

        Ok(tables)
    }

    /// The alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// The split rules in application order.
    pub fn split_rules(&self) -> &[SplitTerritoryRule] {
        &self.split_rules
    }

    /// The zone table.
    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    /// Returns a normalizer over these tables.
    pub fn normalizer(&self) -> RegionNormalizer<'_> {
        RegionNormalizer::new(&self.aliases, &self.split_rules)
    }

    /// Returns an aggregator over these tables' zones.
    pub fn aggregator(&self) -> RegionalAggregator<'_> {
        RegionalAggregator::new(&self.zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_india() {
        let tables = RegionTables::from_config(&RegionsConfig::default()).unwrap();
        assert_eq!(tables, RegionTables::india());
    }

    #[test]
    fn test_extend_preset() {
        let yaml = r#"
aliases:
  "NCT of Delhi": Delhi
split_rules:
  - matches: [Andhra Pradesh]
    targets: [Andhra Pradesh, Telangana]
"#;
        let config: RegionsConfig = serde_yaml::from_str(yaml).unwrap();
        let tables = RegionTables::from_config(&config).unwrap();

        assert_eq!(tables.aliases().resolve("NCT of Delhi"), "Delhi");
        assert_eq!(tables.split_rules().len(), 2);
        assert_eq!(tables.zones().len(), 5);
    }

    #[test]
    fn test_replace_zones() {
        let yaml = r#"
preset: none
zones:
  South: [Karnataka, Kerala]
"#;
        let config: RegionsConfig = serde_yaml::from_str(yaml).unwrap();
        let tables = RegionTables::from_config(&config).unwrap();

        assert!(tables.aliases().is_empty());
        assert!(tables.split_rules().is_empty());
        assert_eq!(tables.zones().len(), 1);
    }

    #[test]
    fn test_empty_split_targets() {
        let config = RegionsConfig {
            split_rules: vec![SplitRuleConfig {
                matches: vec!["Jammu & Kashmir".to_owned()],
                targets: vec![" ".to_owned()],
                value_policy: ValuePolicy::Replicate,
            }],
            ..Default::default()
        };

        assert_eq!(
            RegionTables::from_config(&config),
            Err(TableError::EmptySplitTargets { index: 0 })
        );
    }

    #[test]
    fn test_overlapping_zones_lenient() {
        oncomap_log::init_test!();
        let yaml = r#"
zones:
  South: [Kerala]
  Coast: [Kerala]
"#;
        let config: RegionsConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(RegionTables::from_config(&config).is_ok());
    }

    #[test]
    fn test_overlapping_zones_strict() {
        let yaml = r#"
strict_zones: true
zones:
  South: [Kerala]
  Coast: [Kerala]
"#;
        let config: RegionsConfig = serde_yaml::from_str(yaml).unwrap();
        let error = RegionTables::from_config(&config).unwrap_err();
        assert_eq!(
            error.to_string(),
            "region Kerala is assigned to multiple zones: South, Coast"
        );
    }

    #[test]
    fn test_respell_canonical_id() {
        let yaml = r#"
aliases:
  "Jammu & Kashmir": Jammu and Kashmir
"#;
        let config: RegionsConfig = serde_yaml::from_str(yaml).unwrap();
        let tables = RegionTables::from_config(&config).unwrap();
        let aliases = tables.aliases();

        assert_eq!(aliases.resolve("J&K"), "Jammu and Kashmir");
        assert_eq!(aliases.resolve("Jammu & Kashmir"), "Jammu and Kashmir");
        for id in aliases.canonical_ids() {
            assert_eq!(&aliases.resolve(id.as_str()), id, "{id} must map to itself");
        }
    }

    #[test]
    fn test_exclude_identity() {
        let config = RegionsConfig {
            exclude_identity: vec!["Ladakh".to_owned()],
            ..Default::default()
        };
        let tables = RegionTables::from_config(&config).unwrap();
        assert!(tables.aliases().lookup("Ladakh").is_none());
    }
}

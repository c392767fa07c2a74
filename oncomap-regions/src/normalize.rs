use crate::{AliasTable, CanonicalRegionId, NormalizedRecord, Period, RawRecord, SplitTerritoryRule};

/// A record after alias resolution, before missing values are dropped.
struct Candidate<'a> {
    canonical: CanonicalRegionId,
    original: &'a str,
    value: Option<f64>,
}

/// Maps raw records onto canonical regions.
///
/// The normalizer borrows immutable tables, so a single set of tables can serve any number of
/// passes. Each pass is a pure function of its inputs.
#[derive(Clone, Copy, Debug)]
pub struct RegionNormalizer<'a> {
    aliases: &'a AliasTable,
    split_rules: &'a [SplitTerritoryRule],
}

impl<'a> RegionNormalizer<'a> {
    /// Creates a normalizer from an alias table and an ordered list of split rules.
    pub fn new(aliases: &'a AliasTable, split_rules: &'a [SplitTerritoryRule]) -> Self {
        Self {
            aliases,
            split_rules,
        }
    }

    /// Resolves a single region name to its canonical id.
    pub fn resolve(&self, region_name: &str) -> CanonicalRegionId {
        self.aliases.resolve(region_name)
    }

    /// Normalizes all records of the given period.
    ///
    /// For every record of `period`:
    ///
    ///  1. The region name is trimmed and resolved through the alias table. Unknown names pass
    ///     through under their trimmed spelling.
    ///  2. If a split rule matches, the record is removed and one record per rule target is
    ///     appended after all other records, carrying the same value. The first matching rule
    ///     wins. Replicas appear in rule order, then record order, then target order.
    ///  3. Records without a value are dropped. Absent values are never treated as zero.
    ///
    /// Records of other periods are skipped. This never fails.
    pub fn normalize(&self, records: &[RawRecord], period: Period) -> Vec<NormalizedRecord> {
        let mut kept = Vec::with_capacity(records.len());
        let mut split: Vec<Vec<Candidate<'_>>> =
            self.split_rules.iter().map(|_| Vec::new()).collect();

        for record in records.iter().filter(|record| record.period == period) {
            let original = record.region_name.trim();
            let canonical = match self.aliases.lookup(original) {
                Some(canonical) => canonical.clone(),
                None => {
                    oncomap_log::debug!("passing through unknown region {original:?}");
                    CanonicalRegionId::new(original)
                }
            };

            let candidate = Candidate {
                canonical,
                original,
                value: record.present_value(),
            };

            let rule = self
                .split_rules
                .iter()
                .position(|rule| rule.matches(&candidate.canonical, original));

            match rule {
                Some(index) => split[index].push(candidate),
                None => kept.push(candidate),
            }
        }

        for (rule, candidates) in self.split_rules.iter().zip(split) {
            for source in candidates {
                oncomap_log::trace!(
                    "replicating {:?} to {} regions",
                    source.original,
                    rule.targets().len()
                );

                kept.extend(rule.targets().iter().map(|target| Candidate {
                    canonical: target.clone(),
                    original: source.original,
                    value: source.value,
                }));
            }
        }

        kept.into_iter()
            .filter_map(|candidate| match candidate.value {
                Some(value) => Some(NormalizedRecord::new(
                    candidate.canonical,
                    candidate.original,
                    period,
                    value,
                )),
                None => {
                    oncomap_log::debug!(
                        "dropping {} without value for {period}",
                        candidate.canonical
                    );
                    None
                }
            })
            .collect()
    }
}

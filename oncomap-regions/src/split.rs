use serde::{Deserialize, Serialize};

use crate::CanonicalRegionId;

/// Determines how the value of a split territory is distributed over its targets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuePolicy {
    /// Every target carries the full value of the source record.
    ///
    /// This is a display replication, not an apportionment. Summing over all targets of a
    /// replicated record counts the value several times.
    #[default]
    Replicate,
}

/// Expands one region of the measurement data into several canonical regions.
///
/// Some territories appear as a single entity in measurement data but as several features in the
/// boundary data, for instance after an administrative reorganization. A record that matches the
/// rule is replaced by one record per target.
///
/// Matching uses an explicit list of identifiers, each compared case-insensitively against both
/// the resolved canonical id and the trimmed raw name of a record. There is no substring matching.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitTerritoryRule {
    matches: Vec<String>,
    targets: Vec<CanonicalRegionId>,
    value_policy: ValuePolicy,
}

impl SplitTerritoryRule {
    /// Creates a replicating rule.
    ///
    /// Identifiers are trimmed and empty ones are skipped. Targets keep their order, but duplicate
    /// targets are only kept at their first occurrence.
    pub fn new<M, T>(matches: M, targets: T) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: Into<CanonicalRegionId>,
    {
        let matches = matches
            .into_iter()
            .map(|m| m.as_ref().trim().to_owned())
            .filter(|m| !m.is_empty())
            .collect();

        let mut deduped = Vec::new();
        for target in targets.into_iter().map(Into::into) {
            if !target.as_str().is_empty() && !deduped.contains(&target) {
                deduped.push(target);
            }
        }

        Self {
            matches,
            targets: deduped,
            value_policy: ValuePolicy::Replicate,
        }
    }

    /// Sets the value policy of this rule.
    pub fn with_value_policy(mut self, value_policy: ValuePolicy) -> Self {
        self.value_policy = value_policy;
        self
    }

    /// Returns `true` if a record with the given canonical id and raw name is subject to this rule.
    pub fn matches(&self, canonical: &CanonicalRegionId, original: &str) -> bool {
        let original = original.trim();
        self.matches.iter().any(|identifier| {
            unicase::eq(identifier.as_str(), canonical.as_str())
                || unicase::eq(identifier.as_str(), original)
        })
    }

    /// The identifiers this rule matches.
    pub fn identifiers(&self) -> &[String] {
        &self.matches
    }

    /// The ordered, distinct target regions.
    pub fn targets(&self) -> &[CanonicalRegionId] {
        &self.targets
    }

    /// The value policy of this rule.
    pub fn value_policy(&self) -> ValuePolicy {
        self.value_policy
    }
}

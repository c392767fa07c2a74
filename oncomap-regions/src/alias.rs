use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::CanonicalRegionId;

/// Mapping from region name spellings to canonical region ids.
///
/// The mapping is many-to-one: several historic names or spellings can resolve to the same
/// canonical id. Every canonical id inserted through [`insert`](Self::insert) also receives an
/// identity entry, so that resolving an already canonical name yields itself. Identity entries can
/// be removed deliberately with [`exclude_identity`](Self::exclude_identity).
///
/// Keys are stored trimmed. Lookups are exact and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: IndexMap<String, CanonicalRegionId>,
}

impl AliasTable {
    /// Creates an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `alias` to `canonical` and ensures the identity entry for `canonical`.
    ///
    /// An existing entry for the same alias is replaced, and so is an entry that mapped
    /// `canonical` itself to another id. If `alias` was a canonical id, all of its aliases are
    /// moved to `canonical`. Empty aliases are ignored.
    pub fn insert(&mut self, alias: &str, canonical: impl Into<CanonicalRegionId>) {
        let canonical = canonical.into();
        let alias = alias.trim();
        if alias.is_empty() || canonical.as_str().is_empty() {
            return;
        }

        if canonical != alias && self.is_canonical(alias) {
            oncomap_log::debug!("moving aliases of {alias} to {canonical}");
            for id in self.entries.values_mut() {
                if *id == alias {
                    *id = canonical.clone();
                }
            }
        }

        if !self.is_canonical(canonical.as_str()) {
            if let Some(previous) = self.lookup(canonical.as_str()) {
                oncomap_log::debug!("{canonical} no longer resolves to {previous}");
            }
            self.entries
                .insert(canonical.as_str().to_owned(), canonical.clone());
        }

        self.entries.insert(alias.to_owned(), canonical);
    }

    /// Removes the identity entry of `canonical`.
    ///
    /// Returns `true` if an identity entry existed. Entries that map `canonical` to a different id
    /// are left in place.
    pub fn exclude_identity(&mut self, canonical: &str) -> bool {
        let canonical = canonical.trim();
        if !self.is_canonical(canonical) {
            return false;
        }

        self.entries.shift_remove(canonical);
        true
    }

    /// Looks up the canonical id for a name, ignoring surrounding whitespace.
    pub fn lookup(&self, name: &str) -> Option<&CanonicalRegionId> {
        self.entries.get(name.trim())
    }

    /// Resolves a name to its canonical id.
    ///
    /// Names missing from the table pass through as canonical id under their trimmed spelling.
    pub fn resolve(&self, name: &str) -> CanonicalRegionId {
        match self.lookup(name) {
            Some(canonical) => canonical.clone(),
            None => CanonicalRegionId::new(name.trim()),
        }
    }

    /// Returns `true` if the name maps to itself.
    pub fn is_canonical(&self, name: &str) -> bool {
        let name = name.trim();
        self.entries.get(name).is_some_and(|id| id == name)
    }

    /// Iterates all distinct canonical ids in insertion order.
    pub fn canonical_ids(&self) -> impl Iterator<Item = &CanonicalRegionId> {
        self.entries.values().collect::<IndexSet<_>>().into_iter()
    }

    /// Iterates all `(alias, canonical)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalRegionId)> {
        self.entries.iter().map(|(alias, id)| (alias.as_str(), id))
    }

    /// Returns the number of entries, including identity entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A, C> FromIterator<(A, C)> for AliasTable
where
    A: AsRef<str>,
    C: Into<CanonicalRegionId>,
{
    fn from_iter<T: IntoIterator<Item = (A, C)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (alias, canonical) in iter {
            table.insert(alias.as_ref(), canonical);
        }
        table
    }
}

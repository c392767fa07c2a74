use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a single administrative region in the canonical naming scheme.
///
/// Canonical ids are opaque tokens. They must match the names used by the boundary data that
/// renders the regions, so they are compared exactly and never case-folded.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalRegionId(String);

impl CanonicalRegionId {
    /// Creates a canonical id from the given name, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().len() == id.len() {
            Self(id)
        } else {
            Self(id.trim().to_owned())
        }
    }

    /// Returns the id as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for CanonicalRegionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Display for CanonicalRegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalRegionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalRegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalRegionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CanonicalRegionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for CanonicalRegionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalRegionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

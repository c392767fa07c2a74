use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::CanonicalRegionId;

/// A named group of canonical regions used for rollups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    name: String,
    members: IndexSet<CanonicalRegionId>,
}

impl Zone {
    /// Creates a zone from its name and members.
    pub fn new<I>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CanonicalRegionId>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// The display name of this zone.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member regions in declaration order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = &CanonicalRegionId> {
        self.members.iter()
    }

    /// Returns `true` if the region belongs to this zone.
    pub fn contains(&self, region: &str) -> bool {
        self.members.contains(region)
    }
}

/// A region that is assigned to more than one zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZoneOverlap {
    /// The region in question.
    pub region: CanonicalRegionId,
    /// Names of all zones listing the region, in declaration order.
    pub zones: Vec<String>,
}

type ZoneMap = IndexMap<String, Vec<CanonicalRegionId>>;

/// An ordered collection of zones.
///
/// Zones are expected to be disjoint, but this is not enforced on construction. Use
/// [`overlaps`](Self::overlaps) to detect regions that would be counted in several zones.
///
/// In configuration files, a zone table is a map from zone name to member list:
///
/// ```yaml
/// South India: [Karnataka, Kerala]
/// East India: [Odisha, Bihar]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ZoneMap", into = "ZoneMap")]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    /// Creates an empty zone table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a zone, replacing an existing zone with the same name in place.
    pub fn insert(&mut self, zone: Zone) {
        match self.zones.iter_mut().find(|z| z.name == zone.name) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    /// Returns the zone with the given name.
    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.name == name)
    }

    /// Iterates zones in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    /// Returns all zones that list the given region.
    pub fn zones_of<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Zone> + 'a {
        self.zones.iter().filter(move |zone| zone.contains(region))
    }

    /// Returns `true` if the region belongs to at least one zone.
    pub fn is_assigned(&self, region: &str) -> bool {
        self.zones_of(region).next().is_some()
    }

    /// Finds all regions listed in more than one zone.
    pub fn overlaps(&self) -> Vec<ZoneOverlap> {
        let mut assignments = IndexMap::<&CanonicalRegionId, Vec<String>>::new();
        for zone in &self.zones {
            for member in &zone.members {
                assignments
                    .entry(member)
                    .or_default()
                    .push(zone.name.clone());
            }
        }

        assignments
            .into_iter()
            .filter(|(_, zones)| zones.len() > 1)
            .map(|(region, zones)| ZoneOverlap {
                region: region.clone(),
                zones,
            })
            .collect()
    }

    /// Returns the number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if there are no zones.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<Zone> for ZoneTable {
    fn from_iter<T: IntoIterator<Item = Zone>>(iter: T) -> Self {
        let mut table = Self::new();
        for zone in iter {
            table.insert(zone);
        }
        table
    }
}

impl<'a> IntoIterator for &'a ZoneTable {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<ZoneMap> for ZoneTable {
    fn from(map: ZoneMap) -> Self {
        map.into_iter()
            .map(|(name, members)| Zone::new(name, members))
            .collect()
    }
}

impl From<ZoneTable> for ZoneMap {
    fn from(table: ZoneTable) -> Self {
        table
            .zones
            .into_iter()
            .map(|zone| (zone.name, zone.members.into_iter().collect()))
            .collect()
    }
}

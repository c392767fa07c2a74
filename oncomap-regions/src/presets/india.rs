//! Region tables for Indian states and union territories.
//!
//! Canonical ids follow the `ST_NM` property of the widely used India states GeoJSON, which still
//! renders Jammu & Kashmir and Ladakh as separate features while most cancer registries report
//! them as one.

use crate::{AliasTable, SplitTerritoryRule, Zone, ZoneTable};

/// The merged union territory of Dadra and Nagar Haveli and Daman and Diu.
pub const DNHDD: &str = "Dadra and Nagar Haveli and Daman and Diu";

/// Names that are already canonical.
const CANONICAL: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu & Kashmir",
    "Ladakh",
    "Chandigarh",
    "Lakshadweep",
    "Puducherry",
    "Andaman & Nicobar",
    DNHDD,
];

/// Historic names and alternate spellings.
const ALIASES: &[(&str, &str)] = &[
    ("Orissa", "Odisha"),
    ("Uttaranchal", "Uttarakhand"),
    ("Jammu and Kashmir", "Jammu & Kashmir"),
    ("J&K", "Jammu & Kashmir"),
    ("Dadra & Nagar Haveli", DNHDD),
    ("Daman", DNHDD),
    ("Pondicherry", "Puducherry"),
    ("Andaman & Nicobar Islands", "Andaman & Nicobar"),
];

const NORTH: &[&str] = &[
    "Punjab",
    "Haryana",
    "Himachal Pradesh",
    "Uttarakhand",
    "Uttar Pradesh",
    "Delhi",
    "Jammu & Kashmir",
    "Chandigarh",
];

const SOUTH: &[&str] = &[
    "Karnataka",
    "Tamil Nadu",
    "Andhra Pradesh",
    "Telangana",
    "Kerala",
    "Goa",
];

const EAST: &[&str] = &[
    "West Bengal",
    "Odisha",
    "Bihar",
    "Jharkhand",
    "Assam",
    "Tripura",
    "Meghalaya",
    "Manipur",
    "Mizoram",
    "Nagaland",
    "Arunachal Pradesh",
    "Sikkim",
];

const WEST: &[&str] = &[
    "Maharashtra",
    "Gujarat",
    "Rajasthan",
    "Madhya Pradesh",
    "Chhattisgarh",
    DNHDD,
];

const ISLANDS: &[&str] = &["Lakshadweep", "Andaman & Nicobar", "Puducherry"];

/// Returns the alias table for Indian states and union territories.
pub fn alias_table() -> AliasTable {
    CANONICAL
        .iter()
        .map(|name| (*name, *name))
        .chain(ALIASES.iter().copied())
        .collect()
}

/// Returns the split rules for territories reported jointly.
///
/// Jammu & Kashmir is reported as one region but rendered as Jammu & Kashmir and Ladakh. Both
/// features show the full value.
pub fn split_rules() -> Vec<SplitTerritoryRule> {
    vec![SplitTerritoryRule::new(
        ["Jammu & Kashmir"],
        ["Jammu & Kashmir", "Ladakh"],
    )]
}

/// Returns the cardinal zones.
///
/// Ladakh is in no zone. The replicated Jammu & Kashmir value is counted once in rollups.
pub fn zones() -> ZoneTable {
    ZoneTable::from_iter([
        Zone::new("North India", NORTH.iter().copied()),
        Zone::new("South India", SOUTH.iter().copied()),
        Zone::new("East India", EAST.iter().copied()),
        Zone::new("West India", WEST.iter().copied()),
        Zone::new("Islands & Others", ISLANDS.iter().copied()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        let table = alias_table();
        assert_eq!(table.resolve("Orissa"), "Odisha");
        assert_eq!(table.resolve("Uttaranchal"), "Uttarakhand");
        assert_eq!(table.resolve("Pondicherry"), "Puducherry");
        assert_eq!(table.resolve("Telangana "), "Telangana");
        assert_eq!(table.resolve("Daman"), DNHDD);
        assert_eq!(table.resolve("Andaman & Nicobar Islands"), "Andaman & Nicobar");
    }

    #[test]
    fn test_canonical_ids_are_identities() {
        let table = alias_table();
        for name in CANONICAL {
            assert!(table.is_canonical(name), "{name} is not canonical");
        }
        assert_eq!(table.canonical_ids().count(), CANONICAL.len());
    }

    #[test]
    fn test_zones_disjoint() {
        assert!(zones().overlaps().is_empty());
    }

    #[test]
    fn test_zone_members_canonical() {
        let table = alias_table();
        for zone in &zones() {
            for member in zone.members() {
                assert!(table.is_canonical(member.as_str()), "{member} in {}", zone.name());
            }
        }
    }

    #[test]
    fn test_ladakh_unzoned() {
        assert!(!zones().is_assigned("Ladakh"));
    }
}

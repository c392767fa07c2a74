//! Region name normalization and zone aggregation.
//!
//! Measurement datasets label administrative regions inconsistently: historic names, alternate
//! spellings, stray whitespace, and territories that were split or merged over time. This crate
//! maps such raw names onto a set of [canonical region ids](CanonicalRegionId) that downstream
//! consumers (tables, charts, boundary data) share, and rolls canonical regions up into
//! [zones](Zone).
//!
//! The data flow is:
//!
//!  1. [`RawRecord`]s are produced by a loader.
//!  2. The [`RegionNormalizer`] canonicalizes region names through an [`AliasTable`] and expands
//!     records of split territories according to [`SplitTerritoryRule`]s.
//!  3. The [`RegionalAggregator`] sums [`NormalizedRecord`] values per [`Zone`].
//!
//! Neither step fails on bad input. Unknown regions pass through under their trimmed name and
//! records without a value are omitted.
//!
//! # Example
//!
//! ```
//! use oncomap_regions::{RawRecord, RegionTables};
//!
//! let tables = RegionTables::india();
//! let records = vec![
//!     RawRecord::new("Orissa", 2024, Some(1200.0)),
//!     RawRecord::new("Kerala ", 2024, Some(800.0)),
//! ];
//!
//! let normalized = tables.normalizer().normalize(&records, 2024);
//! assert_eq!(normalized[0].canonical_region(), "Odisha");
//!
//! let totals = tables.aggregator().aggregate(&normalized, 2024);
//! assert_eq!(totals.get("East India"), Some(1200.0));
//! assert_eq!(totals.get("South India"), Some(800.0));
//! ```

#![warn(missing_docs)]

mod aggregate;
mod alias;
mod config;
mod id;
mod normalize;
mod record;
mod split;
mod zone;

pub mod presets;

pub use self::aggregate::*;
pub use self::alias::*;
pub use self::config::*;
pub use self::id::*;
pub use self::normalize::*;
pub use self::record::*;
pub use self::split::*;
pub use self::zone::*;

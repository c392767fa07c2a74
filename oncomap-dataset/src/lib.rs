//! Loading and statistics of regional measurement tables.
//!
//! A [`Dataset`] is read from a CSV file in one of two layouts:
//!
//!  - **wide**: one row per region and one column per year, as exported by most registries.
//!  - **long**: one row per region and year, with explicit region, period and value columns.
//!
//! On top of a dataset, this crate computes the figures of a mortality dashboard: per-period
//! [statistics](PeriodStatistics), the [trend](Trend) over all periods, rankings, regional
//! rollups, mortality and survival [rates](mortality_rates), and textual [insights](insights).
//!
//! Region names are used as found in the data (trimmed) for statistics and rankings. Regional
//! rollups and rates work on records normalized through
//! [`RegionTables`](oncomap_regions::RegionTables).

#![warn(missing_docs)]

mod dataset;
mod format;
mod insights;
mod load;
mod rates;
mod regional;
mod stats;
mod trend;

pub use self::dataset::*;
pub use self::format::*;
pub use self::insights::*;
pub use self::load::*;
pub use self::rates::*;
pub use self::regional::*;
pub use self::stats::*;
pub use self::trend::*;

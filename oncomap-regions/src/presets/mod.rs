//! Built-in region tables.

pub mod india;

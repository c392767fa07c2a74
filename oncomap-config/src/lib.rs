//! Configuration for the oncomap tools.
//!
//! Configuration is read from a `config.yml` file in a config directory. Every section is
//! optional:
//!
//! ```yaml
//! logging:
//!   level: debug
//!   format: pretty
//! dataset:
//!   format: wide
//!   total_label: Total
//!   measure: Deaths
//!   scope: India
//! regions:
//!   preset: india
//!   aliases:
//!     NCT of Delhi: Delhi
//!   strict_zones: true
//! ```
//!
//! Values can be overridden from the command line or the environment through
//! [`OverridableConfig`].

#![warn(missing_docs)]

mod config;

pub use self::config::*;

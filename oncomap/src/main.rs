//! The oncomap command line tool.
//!
//! Loads regional cancer incidence and mortality tables, canonicalizes region names, rolls regions
//! up into zones, and prints statistics, rankings, trends, and insights as JSON.

mod cli;
mod cliapp;
mod setup;

use std::process;

pub fn main() {
    let exit_code = match cli::execute() {
        Ok(()) => 0,
        Err(err) => {
            oncomap_log::ensure_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use oncomap_regions::{Period, RawRecord};
use serde::{Deserialize, Serialize};

use crate::Dataset;

/// Cell contents treated as absent values, compared case-insensitively.
const MISSING_TOKENS: &[&str] = &["", "-", "na", "n/a", "nan", "null"];

/// Default region column of long tables.
const DEFAULT_REGION_COLUMN: &str = "region";

/// Layout of a CSV table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// One row per region, one column per year.
    #[default]
    Wide,
    /// One row per region and year.
    Long,
}

/// Error returned when parsing an unknown [`TableFormat`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown table format `{0}`")]
pub struct ParseTableFormatError(String);

impl FromStr for TableFormat {
    type Err = ParseTableFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(Self::Wide),
            "long" => Ok(Self::Long),
            _ => Err(ParseTableFormatError(s.to_owned())),
        }
    }
}

/// Column names of long tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongColumns {
    /// Column holding the year.
    pub period: String,
    /// Column holding the measured value.
    pub value: String,
}

impl Default for LongColumns {
    fn default() -> Self {
        Self {
            period: "period".to_owned(),
            value: "value".to_owned(),
        }
    }
}

/// Controls how datasets are read and labelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Layout of the table.
    pub format: TableFormat,
    /// Column holding region names.
    ///
    /// Defaults to the first column in wide tables and to `region` in long tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_column: Option<String>,
    /// Region label of summary rows, which are skipped.
    pub total_label: String,
    /// Column names of long tables.
    pub columns: LongColumns,
    /// What the values count, used in insights.
    pub measure: String,
    /// The area all regions make up, used in insights.
    pub scope: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            format: TableFormat::Wide,
            region_column: None,
            total_label: "Total".to_owned(),
            columns: LongColumns::default(),
            measure: "Deaths".to_owned(),
            scope: "India".to_owned(),
        }
    }
}

/// Errors raised while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("could not open {}", .path.display())]
    Open {
        /// The path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid CSV.
    #[error("malformed csv")]
    Csv(#[from] csv::Error),
    /// A configured column does not exist.
    #[error("missing column {0:?}")]
    MissingColumn(String),
    /// The table has no header row.
    #[error("the table has no columns")]
    NoColumns,
    /// A wide table has no column whose header is a year.
    #[error("no year columns besides the region column")]
    NoPeriodColumns,
    /// A period cell of a long table is not a year.
    #[error("invalid period {value:?} on line {line}")]
    InvalidPeriod {
        /// The line in the file.
        line: u64,
        /// The cell contents.
        value: String,
    },
}

impl Dataset {
    /// Loads a dataset from a CSV file.
    pub fn from_path(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;

        let dataset = Self::from_reader(file, config)?;
        oncomap_log::info!(
            "loaded {} records of {} regions and {} periods from {}",
            dataset.records().len(),
            dataset.regions().len(),
            dataset.periods().len(),
            path.display()
        );

        Ok(dataset)
    }

    /// Loads a dataset from CSV data.
    pub fn from_reader<R: io::Read>(reader: R, config: &DatasetConfig) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let records = match config.format {
            TableFormat::Wide => read_wide(&mut reader, config)?,
            TableFormat::Long => read_long(&mut reader, config)?,
        };

        Ok(Self::new(records))
    }
}

fn read_wide<R: io::Read>(
    reader: &mut csv::Reader<R>,
    config: &DatasetConfig,
) -> Result<Vec<RawRecord>, LoadError> {
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::NoColumns);
    }

    let region_index = match config.region_column {
        Some(ref name) => column_index(&headers, name)?,
        None => 0,
    };

    let mut periods = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if index == region_index {
            continue;
        }

        match header.parse::<Period>() {
            Ok(period) => periods.push((index, period)),
            Err(_) => oncomap_log::debug!("ignoring column {header:?}"),
        }
    }

    if periods.is_empty() {
        return Err(LoadError::NoPeriodColumns);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = line_of(&row);

        let Some(region) = included_region(row.get(region_index), line, config) else {
            continue;
        };

        for &(index, period) in &periods {
            let value = parse_cell(row.get(index).unwrap_or_default(), line, &headers[index]);
            records.push(RawRecord::new(region, period, value));
        }
    }

    Ok(records)
}

fn read_long<R: io::Read>(
    reader: &mut csv::Reader<R>,
    config: &DatasetConfig,
) -> Result<Vec<RawRecord>, LoadError> {
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::NoColumns);
    }

    let region_column = config
        .region_column
        .as_deref()
        .unwrap_or(DEFAULT_REGION_COLUMN);
    let region_index = column_index(&headers, region_column)?;
    let period_index = column_index(&headers, &config.columns.period)?;
    let value_index = column_index(&headers, &config.columns.value)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = line_of(&row);

        let Some(region) = included_region(row.get(region_index), line, config) else {
            continue;
        };

        let period = row.get(period_index).unwrap_or_default().trim();
        let period = period
            .parse::<Period>()
            .map_err(|_| LoadError::InvalidPeriod {
                line,
                value: period.to_owned(),
            })?;

        let value = parse_cell(
            row.get(value_index).unwrap_or_default(),
            line,
            &config.columns.value,
        );

        records.push(RawRecord::new(region, period, value));
    }

    Ok(records)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    let name = name.trim();
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_owned()))
}

fn line_of(row: &csv::StringRecord) -> u64 {
    row.position().map_or(0, |position| position.line())
}

/// Returns the region name of a row unless the row must be skipped.
fn included_region<'a>(
    region: Option<&'a str>,
    line: u64,
    config: &DatasetConfig,
) -> Option<&'a str> {
    let region = region?;
    let trimmed = region.trim();

    if trimmed.is_empty() {
        oncomap_log::debug!("skipping row without region on line {line}");
        return None;
    }

    if trimmed == config.total_label.trim() {
        oncomap_log::debug!("skipping total row on line {line}");
        return None;
    }

    Some(region)
}

/// Parses a value cell, accepting thousands separators.
///
/// Cells that are not a non-negative number are treated as absent.
fn parse_cell(cell: &str, line: u64, column: &str) -> Option<f64> {
    let cell = cell.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(cell))
    {
        return None;
    }

    let number: String = cell.chars().filter(|c| *c != ',').collect();
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            oncomap_log::warn!(
                "ignoring invalid value {cell:?} in column {column:?} on line {line}"
            );
            None
        }
    }
}

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{debug, trace};
use miette::Diagnostic;
use thiserror::Error;

use crate::{Dataset, WeatherRow};

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("No such file: {}", path.display())]
    #[diagnostic(code(weather::load::not_found))]
    NotFound { path: PathBuf },
    #[error("Could not read input: {0}")]
    #[diagnostic(code(weather::load::io))]
    Io(#[from] io::Error),
    #[error("Bad CSV: {0}")]
    #[diagnostic(code(weather::load::csv))]
    Csv(#[from] csv::Error),
    #[error("Missing header line")]
    #[diagnostic(
        code(weather::load::header),
        help("the first line is skipped as a header, even an empty file needs one")
    )]
    MissingHeader,
    #[error("Line {line}: expected 3 fields, found {found}")]
    #[diagnostic(
        code(weather::load::field),
        help("rows look like `2021-07-02,49,67`")
    )]
    MissingField { line: u64, found: usize },
    #[error("Line {line}: {column} temperature `{value}` is not an integer")]
    #[diagnostic(code(weather::load::temperature))]
    InvalidTemperature {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Loads the CSV file at `path`. See [`load_data_from_reader`] for the format.
pub fn load_data_from_csv(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    debug!("opening {}", path.display());

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(e),
    })?;

    load_data_from_reader(file)
}

/// Reads `date,min,max` rows. The first record is always skipped as a header,
/// without looking at it, and blank lines are ignored, including any before
/// the header. Extra fields past the third one are ignored too.
pub fn load_data_from_reader(reader: impl Read) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();
    records.next().ok_or(LoadError::MissingHeader)??;

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());

        // Only truly blank lines are skipped, `,,` still has to parse.
        if record.is_empty() || (record.len() == 1 && record[0].is_empty()) {
            trace!("skipping blank line {line}");
            continue;
        }
        if record.len() < 3 {
            return Err(LoadError::MissingField {
                line,
                found: record.len(),
            });
        }

        rows.push(WeatherRow {
            date: record[0].to_string(),
            min_temp: parse_temperature(&record[1], line, "minimum")?,
            max_temp: parse_temperature(&record[2], line, "maximum")?,
        });
    }

    debug!("loaded {} rows", rows.len());
    Ok(Dataset { rows })
}

fn parse_temperature(field: &str, line: u64, column: &'static str) -> Result<i64, LoadError> {
    field
        .trim()
        .parse()
        .map_err(|_| LoadError::InvalidTemperature {
            line,
            column,
            value: field.to_string(),
        })
}

impl FromStr for Dataset {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        load_data_from_reader(s.as_bytes())
    }
}

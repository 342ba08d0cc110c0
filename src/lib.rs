use std::fmt;

use logos::Logos;
use miette::Diagnostic;
use thiserror::Error;
use time::{macros::format_description, Date, Time};

mod load;
mod report;
mod stats;

pub use load::{load_data_from_csv, load_data_from_reader, LoadError};
pub use report::{generate_daily_summary, generate_summary};
pub use stats::{calculate_mean, find_max, find_min, StatsError};

/// Degree sign followed by the Celsius unit letter.
pub const DEGREE_SYMBOL: &str = "\u{00B0}C";

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Ignore this regex pattern between tokens
enum Token {
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,
}

/// One day of the input file. Temperatures are in Fahrenheit, exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRow {
    /// ISO-8601 date, kept as the raw text of the first column.
    pub date: String,
    pub min_temp: i64,
    pub max_temp: i64,
}

/// Every row of an input file in file order, header and blank lines excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<WeatherRow>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRow> {
        self.rows.iter()
    }

    pub fn dates(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.date.as_str()).collect()
    }

    pub fn min_temps(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.min_temp).collect()
    }

    pub fn max_temps(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.max_temp).collect()
    }
}

impl From<Vec<WeatherRow>> for Dataset {
    fn from(rows: Vec<WeatherRow>) -> Self {
        Self { rows }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a WeatherRow;
    type IntoIter = std::slice::Iter<'a, WeatherRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// An extreme value of a searched sequence and its zero-based position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub index: usize,
}

/// A Celsius value that always displays with a single decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Celsius(pub f64);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("Invalid date `{input}`: {source}")]
    #[diagnostic(
        code(weather::parse::date),
        help("dates must look like `2021-07-06` or `2021-07-06T07:00:00`")
    )]
    InvalidDate {
        input: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Invalid time in `{input}`: {source}")]
    #[diagnostic(code(weather::parse::time))]
    InvalidTime {
        input: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Could not render date: {0}")]
    #[diagnostic(code(weather::parse::render))]
    Render(#[from] time::error::Format),
    #[error("Not a number: `{0}`")]
    #[diagnostic(code(weather::parse::number))]
    InvalidNumber(String),
}

/// Anything that can stand in for a temperature or a statistic input:
/// native numbers, or text holding a single decimal number.
pub trait Reading {
    fn reading(&self) -> Result<f64, ParseError>;
}

macro_rules! lossless_reading {
    ($($ty:ty),*) => {
        $(
            impl Reading for $ty {
                fn reading(&self) -> Result<f64, ParseError> {
                    Ok(f64::from(*self))
                }
            }
        )*
    };
}

lossless_reading!(f32, f64, i8, i16, i32, u8, u16, u32);

macro_rules! wide_reading {
    ($($ty:ty),*) => {
        $(
            impl Reading for $ty {
                fn reading(&self) -> Result<f64, ParseError> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

wide_reading!(i64, u64, isize, usize);

impl Reading for str {
    fn reading(&self) -> Result<f64, ParseError> {
        let invalid = || ParseError::InvalidNumber(self.to_string());

        let mut lexer = Token::lexer(self);
        match lexer.next() {
            Some(Ok(Token::Number)) => (),
            _ => return Err(invalid()),
        };
        let number = lexer.slice();
        if lexer.next().is_some() {
            return Err(invalid());
        }

        number.parse().map_err(|_| invalid())
    }
}

impl Reading for String {
    fn reading(&self) -> Result<f64, ParseError> {
        self.as_str().reading()
    }
}

impl<T: Reading + ?Sized> Reading for &T {
    fn reading(&self) -> Result<f64, ParseError> {
        (**self).reading()
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),
}

/// Appends the degree symbol to whatever `temp` displays as.
/// No rounding or conversion happens here.
pub fn format_temperature(temp: impl fmt::Display) -> String {
    format!("{temp}{DEGREE_SYMBOL}")
}

/// Parses an ISO-8601 date, optionally followed by a time (`T` or a space,
/// then `HH:MM[:SS[.fff]]`). The time is validated then dropped.
pub fn parse_iso_date(iso_string: &str) -> Result<Date, ParseError> {
    let (date, time) = match iso_string.find(|c: char| c == 'T' || c == ' ') {
        Some(split) => (&iso_string[..split], Some(&iso_string[split + 1..])),
        None => (iso_string, None),
    };

    let date = Date::parse(date, format_description!("[year]-[month]-[day]")).map_err(
        |source| ParseError::InvalidDate {
            input: iso_string.to_string(),
            source,
        },
    )?;

    if let Some(time) = time {
        Time::parse(
            time,
            format_description!("[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"),
        )
        .map_err(|source| ParseError::InvalidTime {
            input: iso_string.to_string(),
            source,
        })?;
    }

    Ok(date)
}

/// Renders an ISO-8601 date as e.g. `Tuesday 06 July 2021`.
pub fn convert_date(iso_string: &str) -> Result<String, ParseError> {
    let date = parse_iso_date(iso_string)?;

    Ok(date.format(format_description!(
        "[weekday repr:long] [day] [month repr:long] [year]"
    ))?)
}

/// Converts Fahrenheit to Celsius, rounded to one decimal digit.
///
/// Rounding is `f64::round` on the value scaled by ten, so exact ties go away
/// from zero: `0.25` becomes `0.3` and `-0.25` becomes `-0.3`.
pub fn convert_f_to_c(temp_in_fahrenheit: impl Reading) -> Result<f64, ParseError> {
    let fahrenheit = temp_in_fahrenheit.reading()?;
    Ok(round_to_tenth((fahrenheit - 32.0) / 1.8))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_temperature_appends_degree_symbol() {
        assert_eq!(format_temperature(20), "20°C");
        assert_eq!(format_temperature("-4.5"), "-4.5°C");
        assert_eq!(format_temperature(Celsius(20.0)), "20.0°C");
    }

    #[test]
    fn celsius_always_has_one_decimal() {
        assert_eq!(Celsius(14.0).to_string(), "14.0");
        assert_eq!(Celsius(-17.8).to_string(), "-17.8");
    }

    #[test]
    fn convert_date_long_form() {
        assert_eq!(convert_date("2021-07-06").unwrap(), "Tuesday 06 July 2021");
        assert_eq!(convert_date("2021-07-02").unwrap(), "Friday 02 July 2021");
        assert_eq!(
            convert_date("2021-07-06T07:00:00").unwrap(),
            "Tuesday 06 July 2021"
        );
        assert_eq!(
            convert_date("2021-07-06 23:59").unwrap(),
            "Tuesday 06 July 2021"
        );
    }

    #[test]
    fn parse_iso_date_keeps_only_the_date() {
        let date = parse_iso_date("2021-07-06T07:30:15.250").unwrap();
        assert_eq!(
            date,
            Date::from_calendar_date(2021, time::Month::July, 6).unwrap()
        );
    }

    #[test]
    fn convert_date_rejects_garbage() {
        assert!(matches!(
            convert_date("06/07/2021"),
            Err(ParseError::InvalidDate { .. })
        ));
        assert!(matches!(
            convert_date("2021-02-30"),
            Err(ParseError::InvalidDate { .. })
        ));
        assert!(matches!(convert_date(""), Err(ParseError::InvalidDate { .. })));
        assert!(matches!(
            convert_date("2021-07-06T25:00"),
            Err(ParseError::InvalidTime { .. })
        ));
    }

    #[test]
    fn render_failures_surface_as_errors() {
        let err = ParseError::from(Time::MIDNIGHT.format(format_description!("[year]")).unwrap_err());
        assert!(matches!(err, ParseError::Render(_)));
        assert!(err.to_string().starts_with("Could not render date: "));
    }

    #[test]
    fn fahrenheit_to_celsius() {
        assert_eq!(convert_f_to_c(32).unwrap(), 0.0);
        assert_eq!(convert_f_to_c(100).unwrap(), 37.8);
        assert_eq!(convert_f_to_c(0).unwrap(), -17.8);
        assert_eq!(convert_f_to_c(-40).unwrap(), -40.0);
        assert_eq!(convert_f_to_c(212.0).unwrap(), 100.0);
        assert_eq!(convert_f_to_c(67.5).unwrap(), 19.7);
        assert_eq!(convert_f_to_c("57").unwrap(), 13.9);
        assert_eq!(convert_f_to_c(String::from(" 49 ")).unwrap(), 9.4);
    }

    #[test]
    fn fahrenheit_to_celsius_rejects_text() {
        assert!(matches!(
            convert_f_to_c("warm"),
            Err(ParseError::InvalidNumber(s)) if s == "warm"
        ));
        assert!(convert_f_to_c("12abc").is_err());
        assert!(convert_f_to_c("1 2").is_err());
        assert!(convert_f_to_c("").is_err());
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(-0.25), -0.3);
        assert_eq!(round_to_tenth(0.24), 0.2);
    }

    #[test]
    fn readings_from_text() {
        assert_eq!("3".reading().unwrap(), 3.0);
        assert_eq!("-2.5".reading().unwrap(), -2.5);
        assert_eq!("+.5".reading().unwrap(), 0.5);
        assert_eq!("1e2".reading().unwrap(), 100.0);
        assert_eq!(7_u8.reading().unwrap(), 7.0);
        assert_eq!(7_i64.reading().unwrap(), 7.0);
    }

    #[test]
    fn dataset_columns() {
        let dataset = Dataset::from(vec![
            WeatherRow {
                date: String::from("2021-07-02"),
                min_temp: 49,
                max_temp: 67,
            },
            WeatherRow {
                date: String::from("2021-07-03"),
                min_temp: 57,
                max_temp: 68,
            },
        ]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dates(), ["2021-07-02", "2021-07-03"]);
        assert_eq!(dataset.min_temps(), [49, 57]);
        assert_eq!(dataset.max_temps(), [67, 68]);
    }
}

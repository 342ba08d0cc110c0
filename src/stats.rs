use log::trace;
use miette::Diagnostic;
use thiserror::Error;

use crate::{Extremum, ParseError, Reading};

#[derive(Debug, Error, Diagnostic)]
pub enum StatsError {
    #[error("Cannot compute the mean of an empty sequence")]
    #[diagnostic(
        code(weather::stats::empty),
        help("the input file probably only contains a header line")
    )]
    Empty,
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Arithmetic mean of `values`, each coerced to `f64` first.
pub fn calculate_mean<T: Reading>(values: &[T]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::Empty);
    }

    let sum = values.iter().try_fold(0.0, |sum, value| {
        value.reading().map(|value| sum + value)
    })?;

    Ok(sum / values.len() as f64)
}

/// Smallest value of `values` and where it is. When several elements share
/// the minimum, the **last** one wins. Empty input gives `None`.
pub fn find_min<T: Reading>(values: &[T]) -> Result<Option<Extremum>, StatsError> {
    find_extremum(values, |value, best| value <= best)
}

/// Largest value of `values` and where it is. When several elements share
/// the maximum, the **last** one wins. Empty input gives `None`.
pub fn find_max<T: Reading>(values: &[T]) -> Result<Option<Extremum>, StatsError> {
    find_extremum(values, |value, best| value >= best)
}

// The first element seeds the accumulator, so there is no sentinel to beat.
fn find_extremum<T: Reading>(
    values: &[T],
    replaces: fn(f64, f64) -> bool,
) -> Result<Option<Extremum>, StatsError> {
    let extremum = values
        .iter()
        .enumerate()
        .try_fold(None, |best: Option<Extremum>, (index, value)| {
            let value = value.reading()?;
            Ok::<_, ParseError>(match best {
                Some(best) if !replaces(value, best.value) => Some(best),
                _ => Some(Extremum { value, index }),
            })
        })?;

    trace!("extremum of {} values: {extremum:?}", values.len());
    Ok(extremum)
}

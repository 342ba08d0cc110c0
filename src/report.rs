use crate::{
    calculate_mean, convert_date, convert_f_to_c, find_max, find_min, format_temperature, Celsius,
    Dataset, Error, ParseError, Reading, StatsError,
};

fn celsius(fahrenheit: impl Reading) -> Result<String, ParseError> {
    convert_f_to_c(fahrenheit).map(|c| format_temperature(Celsius(c)))
}

/// Overview of the whole dataset: number of days, the lowest minimum and the
/// highest maximum with the day they occur, and the average low and high.
///
/// Fails with [`StatsError::Empty`] when the dataset has no rows.
pub fn generate_summary(dataset: &Dataset) -> Result<String, Error> {
    let dates = dataset
        .dates()
        .into_iter()
        .map(convert_date)
        .collect::<Result<Vec<_>, _>>()?;
    let lows = dataset.min_temps();
    let highs = dataset.max_temps();

    let average_low = calculate_mean(&lows)?;
    let average_high = calculate_mean(&highs)?;
    let lowest = find_min(&lows)?.ok_or(StatsError::Empty)?;
    let highest = find_max(&highs)?.ok_or(StatsError::Empty)?;

    Ok(format!(
        "{} Day Overview\n  \
         The lowest temperature will be {}, and will occur on {}.\n  \
         The highest temperature will be {}, and will occur on {}.\n  \
         The average low this week is {}.\n  \
         The average high this week is {}.\n",
        dataset.len(),
        celsius(lowest.value)?,
        dates[lowest.index],
        celsius(highest.value)?,
        dates[highest.index],
        celsius(average_low)?,
        celsius(average_high)?,
    ))
}

/// One block per row, in dataset order, each followed by a blank line.
/// An empty dataset gives an empty string.
pub fn generate_daily_summary(dataset: &Dataset) -> Result<String, ParseError> {
    let mut summary = String::new();
    for row in dataset {
        summary.push_str(&format!(
            "---- {} ----\n  Minimum Temperature: {}\n  Maximum Temperature: {}\n\n",
            convert_date(&row.date)?,
            celsius(row.min_temp)?,
            celsius(row.max_temp)?,
        ));
    }
    Ok(summary)
}

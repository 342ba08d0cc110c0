use plotters::prelude::*;
use weather::{convert_f_to_c, load_data_from_csv, parse_iso_date, Dataset};

fn to_chrono(date: &str) -> chrono::NaiveDate {
    let date = parse_iso_date(date).unwrap();
    chrono::NaiveDate::from_ymd_opt(date.year(), date.month() as u32, date.day() as u32)
        .unwrap_or_else(|| panic!("chrono rejected {date:?}"))
}

fn series(
    dataset: &Dataset,
    retrieve: fn(&weather::WeatherRow) -> i64,
) -> Vec<(chrono::NaiveDate, f64)> {
    dataset
        .iter()
        .map(|row| (to_chrono(&row.date), convert_f_to_c(retrieve(row)).unwrap()))
        .collect()
}

fn main() {
    env_logger::init();

    let input = std::env::args().nth(1).expect("Missing filename");
    println!("opening {input}");
    let output = format!("{input}.png");

    let dataset = load_data_from_csv(&input).unwrap();
    assert!(!dataset.is_empty(), "nothing to plot in {input}");

    let lows = series(&dataset, |row| row.min_temp);
    let highs = series(&dataset, |row| row.max_temp);

    let first_date = lows.iter().map(|(date, _)| *date).min().unwrap();
    let last_date = lows.iter().map(|(date, _)| *date).max().unwrap();
    let coldest = lows.iter().map(|(_, c)| *c).fold(f64::INFINITY, f64::min);
    let hottest = highs.iter().map(|(_, c)| *c).fold(f64::NEG_INFINITY, f64::max);

    let root = BitMapBackend::new(&output, (1920, 1080)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Temperatures from {first_date} to {last_date}"),
            ("sans-serif", 100).into_font(),
        )
        .margin(5)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d(
            first_date..last_date.succ_opt().unwrap(),
            (coldest - 1.0)..(hottest + 1.0),
        )
        .unwrap();

    chart.configure_mesh().draw().unwrap();

    chart
        .draw_series(LineSeries::new(highs, RED))
        .unwrap()
        .label("Maximum temperature (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(LineSeries::new(lows, BLUE))
        .unwrap()
        .label("Minimum temperature (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .unwrap();

    root.present().unwrap();
}

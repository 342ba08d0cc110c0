use weather::{generate_daily_summary, generate_summary, load_data_from_csv};

fn main() -> miette::Result<()> {
    env_logger::init();

    let file = std::env::args().nth(1).expect("Missing filename");
    println!("opening {file}");

    let dataset = load_data_from_csv(&file)?;

    print!("{}", generate_summary(&dataset)?);
    println!();
    print!("{}", generate_daily_summary(&dataset)?);

    Ok(())
}

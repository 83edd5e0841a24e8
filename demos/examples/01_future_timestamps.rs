use horizon::{Frequency, TimestampSeries, analyze_frequency, make_future_timestamps};
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=horizon_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let daily = ["2022-01-01", "2022-01-02", "2022-01-03", "2022-01-04"];
    let next = make_future_timestamps(daily.as_slice(), 5, None, false)?;
    println!("daily      -> {:?}", render(&next));

    let single = make_future_timestamps("2011-01-01", 5, Some(Frequency::DAILY), false)?;
    println!("single + D -> {:?}", render(&single));

    // Fri, Mon, Tue, Wed
    let business =
        TimestampSeries::parse(&["2021-01-01", "2021-01-04", "2021-01-05", "2021-01-06"])?;
    let profile = analyze_frequency(&business, false)?;
    println!(
        "business   -> inferred {} (regular={}, median step {}s)",
        profile.frequency, profile.regular, profile.summary.median
    );
    println!(
        "              skipping: {:?}",
        render(&make_future_timestamps(&business, 4, None, false)?)
    );
    println!(
        "              regular:  {:?}",
        render(&make_future_timestamps(&business, 4, None, true)?)
    );

    let month_ends = TimestampSeries::parse(&["2023-10-31", "2023-11-30", "2023-12-31"])?;
    println!(
        "month ends -> {:?}",
        render(&make_future_timestamps(&month_ends, 3, None, false)?)
    );
    Ok(())
}

fn render(series: &TimestampSeries) -> Vec<String> {
    series
        .local_values()
        .iter()
        .map(|v| v.format("%Y-%m-%d %H:%M").to_string())
        .collect()
}

use horizon::{FutureFrameExt, Threads};
use horizon_demos::common::sales_table;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,horizon=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let sales = sales_table(8, 30)?;
    let grouped = sales.group_by(&["store"])?;
    println!(
        "{} rows across {} stores",
        sales.height(),
        grouped.n_groups()
    );

    let future = grouped
        .future_frame("date")
        .length_out(7)
        .bind_data(false)
        .threads(Threads::All)
        .show_progress(true)
        .run()?;

    println!("{} future rows:", future.height());
    for row in 0..future.height().min(10) {
        println!(
            "  store={} date={}",
            future.value(row, "store"),
            future.value(row, "date")
        );
    }

    let extended = grouped.future_frame("date").length_out(7).run()?;
    println!(
        "extended table: {} rows, columns {:?}",
        extended.height(),
        extended.column_names()
    );
    Ok(())
}

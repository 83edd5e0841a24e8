use horizon::{
    Column, FutureFrameBuilder, FutureFrameConfig, FutureFrameExt, Frequency, Table, Value,
    future_frame,
};

use crate::helpers::{date_table, day, timestamps};

#[test]
fn daily_table_is_extended_by_five_days() {
    let table = date_table(&[
        day(2022, 1, 1),
        day(2022, 1, 2),
        day(2022, 1, 3),
        day(2022, 1, 4),
    ]);
    let cfg = FutureFrameConfig {
        bind_data: false,
        ..FutureFrameConfig::with_length(5)
    };
    let out = future_frame(&table, "date", &cfg).unwrap();

    assert_eq!(out.column_names(), ["date"]);
    assert_eq!(
        timestamps(&out, "date"),
        (5..=9).map(|d| day(2022, 1, d)).collect::<Vec<_>>()
    );
}

#[test]
fn bind_data_keeps_original_rows_first() {
    let table = date_table(&[day(2022, 1, 1), day(2022, 1, 2), day(2022, 1, 3)]);
    let out = table.future_frame("date").length_out(2).run().unwrap();

    assert_eq!(out.height(), 5);
    assert_eq!(out.column_names(), ["date", "value"]);
    assert_eq!(out.take(&[0, 1, 2]), table);
    assert_eq!(out.value(3, "date"), Value::Timestamp(day(2022, 1, 4)));
    assert_eq!(out.value(4, "date"), Value::Timestamp(day(2022, 1, 5)));
    assert_eq!(out.value(3, "value"), Value::Null);
    assert_eq!(out.value(4, "value"), Value::Null);
}

#[test]
fn business_day_history_skips_weekends_unless_forced_regular() {
    // Fri, Mon, Tue, Wed
    let table = date_table(&[
        day(2021, 1, 1),
        day(2021, 1, 4),
        day(2021, 1, 5),
        day(2021, 1, 6),
    ]);

    let skipping = table
        .future_frame("date")
        .length_out(4)
        .bind_data(false)
        .run()
        .unwrap();
    assert_eq!(
        timestamps(&skipping, "date"),
        vec![
            day(2021, 1, 7),
            day(2021, 1, 8),
            day(2021, 1, 11),
            day(2021, 1, 12)
        ]
    );

    let regular = table
        .future_frame("date")
        .length_out(4)
        .bind_data(false)
        .force_regular(true)
        .run()
        .unwrap();
    assert_eq!(
        timestamps(&regular, "date"),
        (7..=10).map(|d| day(2021, 1, d)).collect::<Vec<_>>()
    );
}

#[test]
fn explicit_frequency_is_used_as_given() {
    let table = date_table(&[day(2024, 1, 15), day(2024, 1, 16)]);
    let out = FutureFrameBuilder::new(&table, "date")
        .length_out(3)
        .freq(Frequency::MONTH_START)
        .bind_data(false)
        .run()
        .unwrap();
    assert_eq!(
        timestamps(&out, "date"),
        vec![day(2024, 2, 1), day(2024, 3, 1), day(2024, 4, 1)]
    );
}

#[test]
fn single_row_table_works_with_explicit_frequency() {
    let table = date_table(&[day(2011, 1, 1)]);
    let out = table
        .future_frame("date")
        .length_out(5)
        .freq(Frequency::DAILY)
        .bind_data(false)
        .run()
        .unwrap();
    assert_eq!(
        timestamps(&out, "date"),
        (2..=6).map(|d| day(2011, 1, d)).collect::<Vec<_>>()
    );
}

#[test]
fn null_dates_are_ignored_and_zone_is_kept() {
    let tz = chrono_tz::Europe::Berlin;
    let table = Table::new(vec![Column::timestamps(
        "date",
        vec![
            Some(day(2024, 5, 1)),
            None,
            Some(day(2024, 5, 2)),
            Some(day(2024, 5, 3)),
        ],
        Some(tz),
    )])
    .unwrap();

    let out = table.future_frame("date").length_out(2).run().unwrap();
    assert_eq!(out.height(), 6);
    assert_eq!(
        out.column("date").unwrap().dtype(),
        horizon::DataType::Timestamp(Some(tz))
    );
    assert_eq!(out.value(1, "date"), Value::Null);
    assert_eq!(out.value(5, "date"), Value::Timestamp(day(2024, 5, 5)));
}

#[test]
fn builder_reports_the_configuration_it_will_run() {
    let table = date_table(&[day(2022, 1, 1), day(2022, 1, 2)]);
    let builder = table
        .future_frame("date")
        .length_out(7)
        .shared_frequency(false)
        .show_progress(true);
    let cfg = builder.current_config();
    assert_eq!(cfg.length_out, 7);
    assert!(!cfg.shared_frequency);
    assert!(cfg.show_progress);
    assert!(cfg.bind_data);

    let replaced = builder.config(FutureFrameConfig::with_length(2));
    assert_eq!(replaced.current_config(), &FutureFrameConfig::with_length(2));
}

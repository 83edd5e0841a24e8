use std::sync::Mutex;

use chrono::Duration;
use horizon::{
    Column, DataType, FutureFrameConfig, FutureFrameExt, Frequency, Progress, Table, Threads,
    Value, future_frame,
};

use crate::helpers::{day, grouped_daily, id_date_rows, timestamps};

fn three_groups() -> Table {
    grouped_daily(
        &[
            ("a", day(2024, 3, 10)),
            ("b", day(2024, 3, 20)),
            ("c", day(2024, 4, 5)),
        ],
        5,
    )
}

#[test]
fn each_group_gets_its_own_rows_with_keys() {
    let grouped = three_groups().group_by(&["id"]).unwrap();
    let cfg = FutureFrameConfig {
        bind_data: false,
        ..FutureFrameConfig::with_length(2)
    };
    let out = future_frame(&grouped, "date", &cfg).unwrap();

    assert_eq!(out.height(), 6);
    assert_eq!(out.column_names(), ["date", "id"]);
    assert_eq!(
        id_date_rows(&out),
        vec![
            ("a".to_string(), day(2024, 3, 11)),
            ("a".to_string(), day(2024, 3, 12)),
            ("b".to_string(), day(2024, 3, 21)),
            ("b".to_string(), day(2024, 3, 22)),
            ("c".to_string(), day(2024, 4, 6)),
            ("c".to_string(), day(2024, 4, 7)),
        ]
    );
}

#[test]
fn bind_data_appends_future_rows_after_all_original_rows() {
    let table = three_groups();
    let grouped = table.group_by(&["id"]).unwrap();
    let out = grouped.future_frame("date").length_out(2).run().unwrap();

    assert_eq!(out.height(), table.height() + 6);
    assert_eq!(out.column_names(), ["id", "date", "value"]);
    let originals: Vec<usize> = (0..table.height()).collect();
    assert_eq!(out.take(&originals), table);
    for row in table.height()..out.height() {
        assert_eq!(out.value(row, "value"), Value::Null);
        assert!(!out.value(row, "id").is_null());
    }
}

#[test]
fn multiple_key_columns_keep_their_types() {
    let table = Table::new(vec![
        Column::utf8("id", vec![Some("x"), Some("x"), Some("x"), Some("x")]),
        Column::int64("store", vec![Some(1), Some(1), Some(2), Some(2)]),
        Column::timestamps(
            "date",
            vec![
                Some(day(2024, 1, 1)),
                Some(day(2024, 1, 2)),
                Some(day(2024, 1, 1)),
                Some(day(2024, 1, 2)),
            ],
            None,
        ),
    ])
    .unwrap();
    let grouped = table.group_by(&["id", "store"]).unwrap();
    let out = grouped
        .future_frame("date")
        .length_out(1)
        .bind_data(false)
        .run()
        .unwrap();

    assert_eq!(out.column_names(), ["date", "id", "store"]);
    assert_eq!(out.column("store").unwrap().dtype(), DataType::Int64);
    assert_eq!(out.value(0, "store"), Value::Int64(1));
    assert_eq!(out.value(1, "store"), Value::Int64(2));
    assert_eq!(
        timestamps(&out, "date"),
        vec![day(2024, 1, 3), day(2024, 1, 3)]
    );
}

#[test]
fn signed_zero_float_keys_extend_as_one_group() {
    let table = Table::new(vec![
        Column::float64("level", vec![Some(0.0), Some(-0.0), Some(f64::NAN)]),
        Column::timestamps(
            "date",
            vec![
                Some(day(2024, 1, 1)),
                Some(day(2024, 1, 2)),
                Some(day(2024, 1, 9)),
            ],
            None,
        ),
    ])
    .unwrap();
    let grouped = table.group_by(&["level"]).unwrap();
    let out = grouped
        .future_frame("date")
        .length_out(2)
        .bind_data(false)
        .run()
        .unwrap();

    // the NaN row belongs to no group, so its later date is not the anchor
    assert_eq!(out.height(), 2);
    assert_eq!(out.value(0, "level"), Value::Float64(0.0));
    assert_eq!(
        timestamps(&out, "date"),
        vec![day(2024, 1, 3), day(2024, 1, 4)]
    );
}

fn daily_and_weekly() -> Table {
    let daily = grouped_daily(&[("daily", day(2024, 6, 10))], 4);
    let weekly_dates: Vec<_> = (0..4)
        .map(|k| Some(day(2024, 6, 3) + Duration::weeks(k)))
        .collect();
    let weekly = Table::new(vec![
        Column::utf8("id", vec![Some("weekly"); 4]),
        Column::timestamps("date", weekly_dates, None),
        Column::float64("value", vec![Some(0.0); 4]),
    ])
    .unwrap();
    Table::concat(&[daily, weekly]).unwrap()
}

#[test]
fn shared_frequency_comes_from_the_first_group() {
    let grouped = daily_and_weekly().group_by(&["id"]).unwrap();
    let out = grouped
        .future_frame("date")
        .length_out(2)
        .bind_data(false)
        .run()
        .unwrap();
    let rows = id_date_rows(&out);
    // last weekly date is 2024-06-24; the shared cadence is daily
    assert_eq!(rows[2], ("weekly".to_string(), day(2024, 6, 25)));
    assert_eq!(rows[3], ("weekly".to_string(), day(2024, 6, 26)));
}

#[test]
fn per_group_frequency_follows_each_group() {
    let grouped = daily_and_weekly().group_by(&["id"]).unwrap();
    let out = grouped
        .future_frame("date")
        .length_out(2)
        .bind_data(false)
        .shared_frequency(false)
        .run()
        .unwrap();
    assert_eq!(
        id_date_rows(&out),
        vec![
            ("daily".to_string(), day(2024, 6, 11)),
            ("daily".to_string(), day(2024, 6, 12)),
            ("weekly".to_string(), day(2024, 7, 1)),
            ("weekly".to_string(), day(2024, 7, 8)),
        ]
    );
}

#[test]
fn shared_frequency_covers_single_row_groups() {
    let many = grouped_daily(&[("many", day(2024, 2, 10))], 3);
    let one = grouped_daily(&[("one", day(2024, 2, 1))], 1);
    let grouped = Table::concat(&[many, one])
        .unwrap()
        .group_by(&["id"])
        .unwrap();
    let out = grouped
        .future_frame("date")
        .length_out(1)
        .bind_data(false)
        .run()
        .unwrap();
    assert_eq!(
        timestamps(&out, "date"),
        vec![day(2024, 2, 11), day(2024, 2, 2)]
    );
}

#[test]
fn explicit_frequency_applies_to_every_group() {
    let grouped = three_groups().group_by(&["id"]).unwrap();
    let out = grouped
        .future_frame("date")
        .length_out(1)
        .freq(Frequency::MONTH_END)
        .bind_data(false)
        .run()
        .unwrap();
    assert_eq!(
        timestamps(&out, "date"),
        vec![day(2024, 3, 31), day(2024, 3, 31), day(2024, 4, 30)]
    );
}

#[test]
fn worker_count_does_not_change_the_result() {
    let groups: Vec<(String, _)> = (0..7)
        .map(|i| (format!("g{i}"), day(2024, 1, 10) + Duration::days(i)))
        .collect();
    let refs: Vec<(&str, _)> = groups.iter().map(|(id, d)| (id.as_str(), *d)).collect();
    let grouped = grouped_daily(&refs, 3).group_by(&["id"]).unwrap();

    let run = |threads: usize| {
        grouped
            .future_frame("date")
            .length_out(3)
            .threads(Threads::count(threads).unwrap())
            .run()
            .unwrap()
    };
    let sequential = run(1);
    for threads in [2, 3, 4, 16] {
        assert_eq!(run(threads), sequential, "threads={threads}");
    }
}

#[test]
fn progress_is_reported_once_per_chunk() {
    let grouped = three_groups().group_by(&["id"]).unwrap();
    for threads in [1, 2] {
        let seen = Mutex::new(Vec::new());
        let observer = |p: Progress| seen.lock().unwrap().push(p);
        grouped
            .future_frame("date")
            .length_out(1)
            .threads(Threads::count(threads).unwrap())
            .show_progress(true)
            .observer(&observer)
            .run()
            .unwrap();

        let mut seen = seen.into_inner().unwrap();
        // 3 groups over 2 workers is 2 chunks; 1 worker is a single chunk
        let chunks = 3usize.div_ceil(3usize.div_ceil(threads));
        assert_eq!(seen.len(), chunks);
        seen.sort_by_key(|p| p.completed);
        assert!(seen.iter().all(|p| p.total == chunks));
        assert_eq!(seen.last().map(|p| p.completed), Some(chunks));
    }
}

#[test]
fn progress_is_silent_when_disabled() {
    let grouped = three_groups().group_by(&["id"]).unwrap();
    let seen = Mutex::new(0usize);
    let observer = |_: Progress| *seen.lock().unwrap() += 1;
    grouped
        .future_frame("date")
        .length_out(1)
        .observer(&observer)
        .run()
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), 0);
}

use horizon::{Column, FutureFrameConfig, FutureFrameExt, HorizonError, Table, future_frame};

use crate::helpers::{date_table, day, grouped_daily};

#[test]
fn missing_date_column() {
    let table = date_table(&[day(2024, 1, 1), day(2024, 1, 2)]);
    let err = table.future_frame("when").run().unwrap_err();
    assert_eq!(err, HorizonError::missing_column("when"));
    assert!(err.is_input_error());
}

#[test]
fn date_column_must_hold_timestamps() {
    let table = date_table(&[day(2024, 1, 1), day(2024, 1, 2)]);
    let err = table.future_frame("value").run().unwrap_err();
    assert!(matches!(
        err,
        HorizonError::ColumnType { ref column, ref expected, .. }
            if column == "value" && expected == "timestamp"
    ));
}

#[test]
fn zero_length_is_rejected_before_column_checks() {
    let table = date_table(&[day(2024, 1, 1), day(2024, 1, 2)]);
    let cfg = FutureFrameConfig::with_length(0);
    let err = future_frame(&table, "when", &cfg).unwrap_err();
    assert!(matches!(err, HorizonError::InvalidArg(ref m) if m.contains("length_out")));
}

#[test]
fn single_timestamp_without_frequency_is_an_input_error() {
    let table = date_table(&[day(2011, 1, 1)]);
    let err = table.future_frame("date").length_out(5).run().unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn date_column_cannot_be_a_group_key() {
    let table = date_table(&[day(2024, 1, 1), day(2024, 1, 2)]);
    let grouped = table.group_by(&["date"]).unwrap();
    let err = grouped.future_frame("date").run().unwrap_err();
    assert!(matches!(err, HorizonError::InvalidArg(ref m) if m.contains("group key")));
}

#[test]
fn grouped_table_without_groups_is_rejected() {
    let table = Table::new(vec![
        Column::utf8("id", vec![None::<&str>, None]),
        Column::timestamps("date", vec![Some(day(2024, 1, 1)), Some(day(2024, 1, 2))], None),
    ])
    .unwrap();
    let grouped = table.group_by(&["id"]).unwrap();
    let err = grouped.future_frame("date").run().unwrap_err();
    assert!(matches!(err, HorizonError::InvalidArg(ref m) if m.contains("no groups")));
}

#[test]
fn per_group_inference_failure_names_the_group() {
    let many = grouped_daily(&[("many", day(2024, 2, 10))], 3);
    let one = grouped_daily(&[("one", day(2024, 2, 1))], 1);
    let grouped = Table::concat(&[many, one])
        .unwrap()
        .group_by(&["id"])
        .unwrap();

    let err = grouped
        .future_frame("date")
        .shared_frequency(false)
        .threads(horizon::Threads::count(2).unwrap())
        .run()
        .unwrap_err();
    let HorizonError::Group { group, source } = &err else {
        panic!("expected a group error, got {err:?}");
    };
    assert_eq!(group, "[id=one]");
    assert!(matches!(**source, HorizonError::InvalidArg(_)));
    assert!(err.is_input_error());
}

#[test]
fn shared_inference_failure_names_the_first_group() {
    let one = grouped_daily(&[("one", day(2024, 2, 1))], 1);
    let many = grouped_daily(&[("many", day(2024, 2, 10))], 3);
    let grouped = Table::concat(&[one, many])
        .unwrap()
        .group_by(&["id"])
        .unwrap();

    let err = grouped.future_frame("date").run().unwrap_err();
    let HorizonError::Group { group, source } = &err else {
        panic!("expected a group error, got {err:?}");
    };
    assert_eq!(group, "[id=one]");
    assert!(matches!(**source, HorizonError::Inference(_)));
}

#[test]
fn group_with_only_null_dates_is_rejected() {
    let table = Table::new(vec![
        Column::utf8("id", vec![Some("a"), Some("a"), Some("b")]),
        Column::timestamps(
            "date",
            vec![Some(day(2024, 1, 1)), Some(day(2024, 1, 2)), None],
            None,
        ),
    ])
    .unwrap();
    let grouped = table.group_by(&["id"]).unwrap();
    let err = grouped.future_frame("date").run().unwrap_err();
    assert!(matches!(err, HorizonError::Group { ref group, .. } if group == "[id=b]"));
}

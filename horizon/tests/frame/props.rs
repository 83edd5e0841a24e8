use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use horizon::{FutureFrameExt, Table, Threads};
use proptest::prelude::*;

use crate::helpers::{day, grouped_daily, id_date_rows};

fn arb_groups() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(0i64..400, 1..12).prop_map(|offsets| {
        offsets
            .into_iter()
            .enumerate()
            .map(|(i, off)| (format!("g{i}"), off))
            .collect()
    })
}

fn build(groups: &[(String, i64)], rows: usize) -> Table {
    let refs: Vec<(&str, DateTime<Utc>)> = groups
        .iter()
        .map(|(id, off)| (id.as_str(), day(2023, 1, 1) + Duration::days(*off)))
        .collect();
    grouped_daily(&refs, rows)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn rows_per_group_are_exact_and_move_forward(
        groups in arb_groups(),
        rows in 2usize..6,
        length_out in 1usize..6,
        threads in 1usize..5,
    ) {
        let table = build(&groups, rows);
        let grouped = table.group_by(&["id"]).unwrap();
        let out = grouped
            .future_frame("date")
            .length_out(length_out)
            .bind_data(false)
            .threads(Threads::count(threads).unwrap())
            .run()
            .unwrap();

        prop_assert_eq!(out.height(), groups.len() * length_out);

        let mut per_group: HashMap<String, Vec<DateTime<Utc>>> = HashMap::new();
        for (id, ts) in id_date_rows(&out) {
            per_group.entry(id).or_default().push(ts);
        }
        for (id, off) in &groups {
            let last = day(2023, 1, 1) + Duration::days(*off);
            let future = &per_group[id];
            prop_assert_eq!(future.len(), length_out);
            prop_assert!(future[0] > last);
            prop_assert!(future.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn result_is_independent_of_worker_count(
        groups in arb_groups(),
        rows in 2usize..5,
        threads in 2usize..9,
    ) {
        let grouped = build(&groups, rows).group_by(&["id"]).unwrap();
        let sequential = grouped.future_frame("date").length_out(3).run().unwrap();
        let parallel = grouped
            .future_frame("date")
            .length_out(3)
            .threads(Threads::count(threads).unwrap())
            .run()
            .unwrap();
        prop_assert_eq!(parallel, sequential);
    }

    #[test]
    fn repeated_calls_are_identical(groups in arb_groups(), rows in 2usize..5) {
        let grouped = build(&groups, rows).group_by(&["id"]).unwrap();
        let first = grouped.future_frame("date").length_out(2).run().unwrap();
        let second = grouped.future_frame("date").length_out(2).run().unwrap();
        prop_assert_eq!(first, second);
    }
}

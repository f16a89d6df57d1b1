mod common;

use std::collections::BTreeSet;

use common::{fixture_frame, shuffled_frame, FIXTURE_GROUPS};
use kadro::column::StringColumn;
use kadro::{ops, Aggregations, Column, ColumnType, Error, Frame, Mutations, Table, Value};

#[test]
fn test_grouped_mutate_preserves_row_order() {
    let frame = shuffled_frame().group_by(&["c", "d"]).unwrap();
    let out = frame
        .mutate(
            Mutations::new()
                .add("rank_a", |t: &Table| ops::rank(t.column("a")?))
                .add("centered", |t: &Table| ops::center(t.column("b")?))
                .add("prev_b", |t: &Table| ops::shift(t.column("b")?, 1)),
        )
        .unwrap();

    assert_eq!(out.row_count(), frame.row_count());
    for name in ["a", "b", "c", "d"] {
        assert_eq!(
            out.table().column(name).unwrap(),
            frame.table().column(name).unwrap(),
            "column {} moved",
            name
        );
    }
    assert_eq!(out.groups(), &["c", "d"]);
}

#[test]
fn test_grouped_window_stays_in_group() {
    let frame = shuffled_frame().group_by(&["c", "d"]).unwrap();
    let out = frame
        .mutate(Mutations::new().add("n", |t: &Table| Ok(t.row_count() as i64)))
        .unwrap();

    for row in 0..out.row_count() {
        let c = out.table().value(row, "c").unwrap();
        let d = out.table().value(row, "d").unwrap();
        let expected = FIXTURE_GROUPS
            .iter()
            .find(|(ck, dk, _)| c == Value::from(*ck) && d == Value::from(*dk))
            .map(|g| g.2 as i64)
            .unwrap();
        assert_eq!(out.table().value(row, "n").unwrap(), Value::Int64(expected));
    }
}

#[test]
fn test_visibility_asymmetry() {
    let mutations = || {
        Mutations::new()
            .add("x", |t: &Table| t.column("a")?.map_f64(|v| v * 2.0))
            .add("y", |t: &Table| t.column("x")?.map_f64(|v| v + 1.0))
    };

    let ungrouped = fixture_frame().mutate(mutations()).unwrap();
    assert_eq!(ungrouped.shape(), (20, 6));

    let grouped = fixture_frame().group_by(&["c"]).unwrap().mutate(mutations());
    assert!(matches!(grouped, Err(Error::InvalidColumn(_))));
}

#[test]
fn test_grouped_overwrite_not_seen_by_sibling() {
    let out = fixture_frame()
        .group_by(&["c"])
        .unwrap()
        .mutate(
            Mutations::new()
                .add("b", |t: &Table| Ok(vec![0i64; t.row_count()]))
                .add("old_b_sum", |t: &Table| ops::sum(t.column("b")?)),
        )
        .unwrap();

    let sum = out.table().value(0, "old_b_sum").unwrap();
    assert_ne!(sum, Value::Int64(0));
    assert_eq!(out.table().value(0, "b").unwrap(), Value::Int64(0));
}

#[test]
fn test_aggregate_cardinality_and_order() {
    let out = shuffled_frame()
        .group_by(&["c", "d"])
        .unwrap()
        .agg(
            Aggregations::new()
                .add("n", |t: &Table| Ok(t.row_count()))
                .add("max_a", |t: &Table| ops::max(t.column("a")?))
                .add("first_b", |t: &Table| Ok(ops::first(t.column("b")?))),
        )
        .unwrap();

    let distinct: BTreeSet<(String, String)> = (0..20)
        .map(|row| {
            let t = fixture_frame().into_table();
            (
                t.value(row, "c").unwrap().to_string(),
                t.value(row, "d").unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(out.row_count(), distinct.len());
    assert_eq!(out.columns(), &["c", "d", "n", "max_a", "first_b"]);

    // ascending key order, not first occurrence
    for (row, (c, d, n)) in FIXTURE_GROUPS.iter().enumerate() {
        assert_eq!(out.table().value(row, "c").unwrap(), Value::from(*c));
        assert_eq!(out.table().value(row, "d").unwrap(), Value::from(*d));
        assert_eq!(out.table().value(row, "n").unwrap(), Value::Int64(*n as i64));
    }
}

#[test]
fn test_agg_always_ungroups() {
    let reducers = || Aggregations::new().add("n", |t: &Table| Ok(t.row_count()));
    let frame = fixture_frame();
    assert!(frame.agg(reducers()).unwrap().groups().is_empty());
    assert!(frame
        .group_by(&["d"])
        .unwrap()
        .agg(reducers())
        .unwrap()
        .groups()
        .is_empty());
}

#[test]
fn test_transforms_leave_source_untouched() {
    let frame = fixture_frame().group_by(&["c"]).unwrap();
    let before = frame.clone();

    let _ = frame
        .mutate(Mutations::new().add("a", |_t: &Table| Ok(0.0)))
        .unwrap();
    let _ = frame
        .agg(Aggregations::new().add("n", |t: &Table| Ok(t.row_count())))
        .unwrap();
    let _ = frame.sort(&["a"], false).unwrap();
    let _ = frame.ungroup();

    assert_eq!(frame, before);
}

#[test]
fn test_null_keys_are_excluded() {
    let table = Table::from_columns(vec![
        (
            "k",
            Column::String(StringColumn::from_options(vec![
                Some("x".to_string()),
                None,
                Some("y".to_string()),
                Some("x".to_string()),
            ])),
        ),
        ("v", Column::from(vec![1.0, 2.0, 3.0, 4.0])),
    ])
    .unwrap();
    let grouped = Frame::from_table(table).group_by(&["k"]).unwrap();

    let summary = grouped
        .agg(Aggregations::new().add("total", |t: &Table| ops::sum(t.column("v")?)))
        .unwrap();
    assert_eq!(summary.row_count(), 2);

    let mutated = grouped
        .mutate(Mutations::new().add("cum", |t: &Table| ops::cumsum(t.column("v")?)))
        .unwrap();
    let cum = mutated.table().column("cum").unwrap();
    assert_eq!(cum.get(3).unwrap(), Value::Float64(5.0));
    assert!(cum.is_null(1));
}

#[test]
fn test_signed_zero_keys_form_one_group() {
    let table = Table::from_columns(vec![
        ("k", Column::from(vec![0.0, -0.0, 0.0])),
        ("v", Column::from(vec![1i64, 2, 3])),
    ])
    .unwrap();
    let summary = Frame::from_table(table)
        .group_by(&["k"])
        .unwrap()
        .agg(Aggregations::new().add("n", |t: &Table| Ok(t.row_count())))
        .unwrap();
    assert_eq!(summary.row_count(), 1);
    assert_eq!(summary.table().value(0, "n").unwrap(), Value::Int64(3));
}

#[test]
fn test_empty_grouped_frame() {
    let empty = fixture_frame().head(0).group_by(&["c", "d"]).unwrap();

    let summary = empty
        .agg(Aggregations::new().add("m", |t: &Table| ops::mean(t.column("a")?)))
        .unwrap();
    assert_eq!(summary.shape(), (0, 3));
    assert_eq!(summary.columns(), &["c", "d", "m"]);

    let mutated = empty
        .mutate(Mutations::new().add("r", |t: &Table| ops::rank(t.column("a")?)))
        .unwrap();
    assert_eq!(mutated.shape(), (0, 5));
    assert_eq!(
        mutated.table().column("r").unwrap().column_type(),
        ColumnType::Float64
    );
}

#[test]
fn test_lazy_group_validation() {
    let frame = Frame::new(common::fixture_table(), vec!["nope"]);
    let result = frame.agg(Aggregations::new().add("n", |t: &Table| Ok(t.row_count())));
    assert!(matches!(result, Err(Error::InvalidColumn(_))));
}

mod common;

use common::fixture_table;
use common::test_utils::{temp_csv_path, write_temp_csv};
use kadro::{Aggregations, ColumnType, Frame, JsonOrient, Table, Value};

// CSVファイル操作のテスト (一時ファイルを利用)
#[test]
fn test_csv_round_trip() {
    let (_dir, path) = temp_csv_path("fixture.csv");
    let table = fixture_table();

    table.write_csv(&path).unwrap();
    assert!(path.exists());

    let back = Table::read_csv(&path, true).unwrap();
    assert_eq!(back, table);
}

#[test]
fn test_read_csv_with_missing_values() {
    let (_dir, path) = write_temp_csv(
        &["team", "score"],
        &[&["red", "3"], &["blue", ""], &["red", "5"]],
    );

    let table = Table::read_csv(&path, true).unwrap();
    assert_eq!(table.shape(), (3, 2));
    assert_eq!(
        table.column("score").unwrap().column_type(),
        ColumnType::Int64
    );

    let summary = Frame::from_table(table)
        .group_by(&["team"])
        .unwrap()
        .agg(Aggregations::new().add("n", |t: &Table| Ok(kadro::ops::count(t.column("score")?))))
        .unwrap();
    assert_eq!(summary.table().value(0, "n").unwrap(), Value::Int64(0));
    assert_eq!(summary.table().value(1, "n").unwrap(), Value::Int64(2));
}

#[test]
fn test_read_missing_file() {
    let (_dir, path) = temp_csv_path("absent.csv");
    assert!(matches!(
        Table::read_csv(&path, true),
        Err(kadro::Error::Io(_))
    ));
}

#[test]
fn test_json_split_round_trip() {
    let table = fixture_table();
    let text = table.to_json(JsonOrient::Split).unwrap();
    let back = Table::from_json(&text, JsonOrient::Split).unwrap();
    assert_eq!(back, table);
}

//! Common test utilities module
//!
//! Provides shared fixtures and temporary file helpers for the integration
//! tests.

#![allow(dead_code)]

pub mod test_utils;

use kadro::{Column, Frame, Table};

/// Row counts of the (c, d) combinations in [`fixture_table`], in row order
pub const FIXTURE_GROUPS: [(&str, &str, usize); 4] = [
    ("bar", "bo", 5),
    ("bar", "fizz", 7),
    ("foo", "bo", 3),
    ("foo", "fizz", 5),
];

/// 20 rows: `a` Float64, `b` Int64, `c` in {foo, bar}, `d` in {fizz, bo},
/// sorted by (c, d)
pub fn fixture_table() -> Table {
    let mut c = Vec::new();
    let mut d = Vec::new();
    for (ck, dk, n) in FIXTURE_GROUPS {
        c.extend(std::iter::repeat(ck).take(n));
        d.extend(std::iter::repeat(dk).take(n));
    }

    let a: Vec<f64> = (0..20).map(|i| ((i * 7) % 20) as f64 / 20.0).collect();
    let b: Vec<i64> = (0..20).map(|i| (i * 3 % 11) as i64).collect();

    Table::from_columns(vec![
        ("a", Column::from(a)),
        ("b", Column::from(b)),
        ("c", Column::from(c)),
        ("d", Column::from(d)),
    ])
    .unwrap()
}

pub fn fixture_frame() -> Frame {
    Frame::from_table(fixture_table())
}

/// The fixture with its rows shuffled (seeded), so groups are interleaved
pub fn shuffled_frame() -> Frame {
    fixture_frame().sample_n_seeded(20, false, 42).unwrap()
}

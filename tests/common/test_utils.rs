//! Test utilities for temporary file handling
//!
//! Files live inside a `tempfile::TempDir`, so they are removed when the
//! returned guard is dropped.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// A path for `file_name` inside a fresh temporary directory
pub fn temp_csv_path(file_name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(file_name);
    (dir, path)
}

/// Writes a CSV file with the given header and rows
pub fn write_temp_csv(headers: &[&str], rows: &[&[&str]]) -> (TempDir, PathBuf) {
    let (dir, path) = temp_csv_path("input.csv");
    let mut file = File::create(&path).expect("Failed to create test CSV");

    // Write headers
    writeln!(file, "{}", headers.join(",")).expect("Failed to write headers");

    // Write rows
    for row in rows {
        writeln!(file, "{}", row.join(",")).expect("Failed to write row");
    }

    (dir, path)
}

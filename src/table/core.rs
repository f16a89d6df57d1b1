//! Tableの核となる構造体定義と基本機能

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use crate::column::{Column, Value};
use crate::config::{self, DisplayConfig};
use crate::error::{Error, Result};

/// 列指向のインメモリテーブル
///
/// Columns are `Arc`-backed, so cloning a table shares every buffer. No
/// operation writes into a buffer in place: a "modified" table always holds
/// freshly built columns, so clones never observe each other's changes.
#[derive(Clone, Default)]
pub struct Table {
    // 列データ
    pub(crate) columns: Vec<Column>,
    // 列名→インデックスのマッピング
    pub(crate) column_indices: HashMap<String, usize>,
    // 列の順序
    pub(crate) column_names: Vec<String>,
    // 行数
    pub(crate) row_count: usize,
}

impl Table {
    /// 新しい空のテーブルを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs in order
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, column) in columns {
            table.add_column(name, column)?;
        }
        Ok(table)
    }

    /// A table with no columns and a fixed row count
    pub(crate) fn with_row_count(row_count: usize) -> Self {
        Self {
            row_count,
            ..Self::default()
        }
    }

    /// 列を追加する
    pub fn add_column<S: Into<String>>(&mut self, name: S, column: Column) -> Result<()> {
        let name = name.into();

        if self.column_indices.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        if self.columns.is_empty() && self.row_count == 0 {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }

        self.column_indices.insert(name.clone(), self.columns.len());
        self.column_names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Row-count-preserving assignment: replaces the column in place if it
    /// exists, appends it otherwise.
    pub fn set_column<S: Into<String>>(&mut self, name: S, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() && self.row_count == 0 {
            return self.add_column(name, column);
        }
        if column.len() != self.row_count {
            return Err(Error::ShapeMismatch {
                expected: self.row_count,
                found: column.len(),
            });
        }
        match self.column_indices.get(&name) {
            Some(&idx) => {
                self.columns[idx] = column;
                Ok(())
            }
            None => self.add_column(name, column),
        }
    }

    /// Copy of the table with one column assigned
    pub fn with_column<S: Into<String>>(&self, name: S, column: Column) -> Result<Self> {
        let mut table = self.clone();
        table.set_column(name, column)?;
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_indices.contains_key(name)
    }

    /// 列を名前で取得する
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.column_indices
            .get(name)
            .map(|&idx| &self.columns[idx])
            .ok_or_else(|| Error::InvalidColumn(format!("column '{}' does not exist", name)))
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter())
    }

    /// Float view of a column with nulls as NaN
    pub fn f64_values(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?.to_f64_vec()
    }

    /// Single cell
    pub fn value(&self, row: usize, name: &str) -> Result<Value> {
        self.column(name)?.get(row)
    }

    /// All cells of one row in column order
    pub fn row(&self, index: usize) -> Result<Vec<Value>> {
        if index >= self.row_count {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.row_count,
            });
        }
        Ok(self.columns.iter().map(|c| c.value(index)).collect())
    }

    /// Check every name exists, reporting the first missing one
    pub(crate) fn ensure_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            let name = name.as_ref();
            if !self.contains_column(name) {
                return Err(Error::InvalidColumn(format!(
                    "column '{}' does not exist",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Render the first `max_rows` rows with the given options
    pub fn render(&self, max_rows: usize, config: &DisplayConfig) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_rows(&mut out, max_rows, config);
        out
    }

    fn write_rows<W: fmt::Write>(
        &self,
        f: &mut W,
        max_rows: usize,
        config: &DisplayConfig,
    ) -> fmt::Result {
        let width = config.column_width;

        if self.columns.is_empty() {
            return writeln!(f, "Table ({} rows x 0 columns)", self.row_count);
        }

        writeln!(
            f,
            "Table ({} rows x {} columns):",
            self.row_count,
            self.columns.len()
        )?;

        // 列ヘッダー
        write!(f, "{:<5} |", "idx")?;
        for name in &self.column_names {
            write!(f, " {:<width$} |", name, width = width)?;
        }
        writeln!(f)?;

        // 区切り線
        write!(f, "{:-<5}-+", "")?;
        for _ in &self.column_names {
            write!(f, "-{:-<width$}-+", "", width = width)?;
        }
        writeln!(f)?;

        let display_rows = self.row_count.min(max_rows);
        for i in 0..display_rows {
            write!(f, "{:<5} |", i)?;
            for col in &self.columns {
                let cell = col.format_cell(i, config.float_precision);
                write!(f, " {:<width$} |", cell, width = width)?;
            }
            writeln!(f)?;
        }

        if self.row_count > display_rows {
            writeln!(f, "... ({} more rows)", self.row_count - display_rows)?;
        }

        Ok(())
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = config::global();
        self.write_rows(f, config.max_rows, &config)
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl PartialEq for Table {
    /// Same names in the same order and the same cells (nulls equal)
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names
            && self.row_count == other.row_count
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|(a, b)| a == b)
    }
}

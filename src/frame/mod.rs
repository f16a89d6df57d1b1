//! Frame: an immutable handle over a [`Table`] plus the active group list
//!
//! Every verb takes `&self` and returns a new `Frame`. Column buffers are
//! shared between frames and never written in place, so a frame can keep
//! being used after any number of verbs were called on it.

use std::fmt::{self, Display};

use crate::config::{self, DisplayConfig};
use crate::error::Result;
use crate::table::Table;

// 名前付き関数（mutate / agg / filter）
pub mod functions;

// 列の追加・更新
mod mutate;

// 集約
mod aggregate;

// 行・列の操作
mod verbs;

// 結合
mod join;

// 縦持ち・横持ち変換
mod reshape;

pub use functions::{
    predicate, Aggregations, ColumnFn, ColumnOutput, Mutations, ReduceFn, RowPredicate,
};

/// 表とグループ化列のペア
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    table: Table,
    groups: Vec<String>,
}

impl Frame {
    /// Wraps `table` with the given group list.
    ///
    /// The group names are not checked here; a name that is not a column
    /// surfaces as an error from the first grouped verb. Use
    /// [`Frame::group_by`] for an up-front check.
    pub fn new<S: Into<String>>(table: Table, groups: Vec<S>) -> Self {
        Self {
            table,
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Ungrouped frame over `table`
    pub fn from_table(table: Table) -> Self {
        Self {
            table,
            groups: Vec::new(),
        }
    }

    /// A frame over a new table that keeps this frame's groups
    pub(crate) fn derive(&self, table: Table) -> Self {
        Self {
            table,
            groups: self.groups.clone(),
        }
    }

    /// グループ化する
    ///
    /// # Arguments
    /// * `names` - Grouping columns, in key order. Repeats are kept.
    ///
    /// # Returns
    /// * `Result<Frame>` - The same table grouped by `names`, or
    ///   `InvalidColumn` for the first name that is not a column
    pub fn group_by<S: AsRef<str>>(&self, names: &[S]) -> Result<Frame> {
        self.table.ensure_columns(names)?;
        log::debug!(
            "group_by {:?}",
            names.iter().map(|s| s.as_ref()).collect::<Vec<_>>()
        );
        Ok(Self {
            table: self.table.clone(),
            groups: names.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// グループ化を解除する
    pub fn ungroup(&self) -> Frame {
        Self::from_table(self.table.clone())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn is_grouped(&self) -> bool {
        !self.groups.is_empty()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.table.shape()
    }

    pub fn columns(&self) -> &[String] {
        self.table.column_names()
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Text view of the first `max_rows` rows
    pub fn render(&self, max_rows: usize) -> String {
        let mut out = String::new();
        let _ = self.write_to(&mut out, max_rows, &config::global());
        out
    }

    /// Prints [`Frame::render`] to stdout
    pub fn show(&self, max_rows: usize) {
        print!("{}", self.render(max_rows));
    }

    fn write_to<W: fmt::Write>(
        &self,
        f: &mut W,
        max_rows: usize,
        config: &DisplayConfig,
    ) -> fmt::Result {
        writeln!(f, "kadro Frame")?;
        if !self.groups.is_empty() {
            writeln!(f, "With groups [{}]", self.groups.join(", "))?;
        }
        f.write_str(&self.table.render(max_rows, config))?;
        if self.table.row_count() > max_rows {
            writeln!(f, " only showing top {} rows.", max_rows)?;
        }
        Ok(())
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = config::global();
        self.write_to(f, config.max_rows, &config)
    }
}

impl From<Table> for Frame {
    fn from(table: Table) -> Self {
        Self::from_table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::error::Error;

    fn table() -> Table {
        Table::from_columns(vec![
            ("k", Column::from(vec!["a", "b", "a"])),
            ("v", Column::from(vec![1i64, 2, 3])),
        ])
        .unwrap()
    }

    #[test]
    fn test_group_by_validates_names() {
        let frame = Frame::from_table(table());
        assert!(matches!(
            frame.group_by(&["k", "nope"]),
            Err(Error::InvalidColumn(_))
        ));

        let grouped = frame.group_by(&["k", "k"]).unwrap();
        assert_eq!(grouped.groups(), &["k", "k"]);
        assert!(frame.groups().is_empty());
        assert!(grouped.ungroup().groups().is_empty());
    }

    #[test]
    fn test_new_does_not_validate_groups() {
        let frame = Frame::new(table(), vec!["missing"]);
        assert_eq!(frame.groups(), &["missing"]);
        assert!(frame.is_grouped());
    }

    #[test]
    fn test_render_lists_groups_and_truncates() {
        let frame = Frame::from_table(table()).group_by(&["k"]).unwrap();
        let text = frame.render(2);

        assert!(text.starts_with("kadro Frame\n"));
        assert!(text.contains("With groups [k]"));
        assert!(text.contains(" only showing top 2 rows."));

        let all = frame.render(10);
        assert!(!all.contains("only showing"));
    }
}

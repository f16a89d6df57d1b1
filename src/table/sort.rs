//! 並べ替え

use std::cmp::Ordering;

use super::core::Table;
use crate::error::Result;

/// One sort key: a column and its direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub ascending: bool,
}

impl SortKey {
    pub fn new(column: impl Into<String>, ascending: bool) -> Self {
        Self {
            column: column.into(),
            ascending,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, true)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, false)
    }
}

impl Table {
    /// Stable sort by `keys`, first key most significant. Nulls go last in
    /// either direction.
    pub fn sort_by(&self, keys: &[SortKey]) -> Result<Table> {
        let names: Vec<&str> = keys.iter().map(|k| k.column.as_str()).collect();
        self.ensure_columns(&names)?;

        let columns = names
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<Vec<_>>>()?;

        let mut order: Vec<usize> = (0..self.row_count).collect();
        order.sort_by(|&a, &b| {
            for (key, column) in keys.iter().zip(columns.iter()) {
                let (a_null, b_null) = (column.is_null(a), column.is_null(b));
                let ordering = match (a_null, b_null) {
                    (false, false) if key.ascending => column.compare_rows(a, b),
                    (false, false) => column.compare_rows(b, a),
                    // nulls last regardless of direction
                    _ => column.compare_rows(a, b),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        self.take(&order)
    }

    /// Sort by columns, all in the same direction
    pub fn sort_values<S: AsRef<str>>(&self, columns: &[S], ascending: bool) -> Result<Table> {
        let keys: Vec<SortKey> = columns
            .iter()
            .map(|c| SortKey::new(c.as_ref(), ascending))
            .collect();
        self.sort_by(&keys)
    }
}

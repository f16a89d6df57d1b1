//! Tableのグループ分割（パーティション）機能

use std::collections::BTreeMap;

use super::core::Table;
use crate::column::{Column, Value};
use crate::error::Result;

/// Partition key: one value per grouping column, ordered lexicographically
/// with [`Value::total_cmp`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey(pub Vec<Value>);

impl GroupKey {
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    fn has_null(&self) -> bool {
        self.0.iter().any(Value::is_null)
    }
}

/// Rows sharing one key value, in their original order
#[derive(Debug, Clone)]
pub struct Partition {
    pub key: GroupKey,
    pub rows: Vec<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Table {
    /// Splits the rows by the values of `by`.
    ///
    /// Partitions come back in ascending key order. Within a partition rows
    /// keep their original order. Rows with a null in any key column belong
    /// to no partition.
    pub fn partition_by<S: AsRef<str>>(&self, by: &[S]) -> Result<Vec<Partition>> {
        self.ensure_columns(by)?;
        let key_columns: Vec<&Column> = by
            .iter()
            .map(|name| self.column(name.as_ref()))
            .collect::<Result<_>>()?;

        let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        let mut skipped = 0usize;
        for row in 0..self.row_count {
            let key = GroupKey(key_columns.iter().map(|c| c.value(row)).collect());
            if key.has_null() {
                skipped += 1;
                continue;
            }
            groups.entry(key).or_default().push(row);
        }

        if skipped > 0 {
            log::debug!("{} rows with null group keys left out of partitions", skipped);
        }

        Ok(groups
            .into_iter()
            .map(|(key, rows)| Partition { key, rows })
            .collect())
    }

    /// 一意なキーの数
    pub fn group_count<S: AsRef<str>>(&self, by: &[S]) -> Result<usize> {
        Ok(self.partition_by(by)?.len())
    }
}

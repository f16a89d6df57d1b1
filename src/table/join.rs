//! Tableの結合操作

use std::collections::{BTreeMap, HashSet};

use super::core::Table;
use super::group::GroupKey;
use crate::column::Column;
use crate::error::{Error, Result};

/// 結合タイプの列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// 内部結合 (両方の表に一致する行のみ)
    Inner,
    /// 左結合 (左側の表の全ての行と、右側の表の一致する行)
    Left,
}

/// Suffixes for non-key columns present on both sides
const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

impl Table {
    /// Merges `right` into `self` on the key columns `on`.
    ///
    /// Output rows follow the left table's order; a left row matching several
    /// right rows repeats once per match, in right-table order. Keys compare
    /// with [`crate::Value::total_cmp`], and a key containing a null never
    /// matches. Output columns are the left columns followed by the right
    /// non-key columns; other names present on both sides get `_x` / `_y`.
    pub fn merge<S: AsRef<str>>(&self, right: &Table, on: &[S], how: JoinType) -> Result<Table> {
        if on.is_empty() {
            return Err(Error::JoinColumn("no join columns given".to_string()));
        }
        for name in on {
            let name = name.as_ref();
            if !self.contains_column(name) || !right.contains_column(name) {
                return Err(Error::JoinColumn(format!(
                    "column '{}' does not exist in both tables",
                    name
                )));
            }
        }

        let keys: Vec<&str> = on.iter().map(|s| s.as_ref()).collect();
        let left_keys = key_columns(self, &keys)?;
        let right_keys = key_columns(right, &keys)?;

        // 右側のキー→行インデックス
        let mut right_index: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        for row in 0..right.row_count {
            if let Some(key) = row_key(&right_keys, row) {
                right_index.entry(key).or_default().push(row);
            }
        }

        let mut left_rows = Vec::new();
        let mut right_rows: Vec<Option<usize>> = Vec::new();
        for row in 0..self.row_count {
            let matches = row_key(&left_keys, row).and_then(|key| right_index.get(&key));
            match matches {
                Some(rows) => {
                    for &r in rows {
                        left_rows.push(row);
                        right_rows.push(Some(r));
                    }
                }
                None if how == JoinType::Left => {
                    left_rows.push(row);
                    right_rows.push(None);
                }
                None => {}
            }
        }

        log::debug!(
            "{:?} join on {:?}: {} x {} rows -> {} rows",
            how,
            keys,
            self.row_count,
            right.row_count,
            left_rows.len()
        );

        let key_set: HashSet<&str> = keys.iter().copied().collect();
        let mut result = Table::with_row_count(left_rows.len());

        for (name, column) in self.columns() {
            let out_name = if !key_set.contains(name) && right.contains_column(name) {
                format!("{}{}", name, LEFT_SUFFIX)
            } else {
                name.to_string()
            };
            result.add_column(out_name, column.take(&left_rows)?)?;
        }

        for (name, column) in right.columns() {
            if key_set.contains(name) {
                continue;
            }
            let out_name = if self.contains_column(name) {
                format!("{}{}", name, RIGHT_SUFFIX)
            } else {
                name.to_string()
            };
            result.add_column(out_name, column.take_opt(&right_rows)?)?;
        }

        Ok(result)
    }

    /// Column names present in both tables, in this table's column order
    pub fn common_columns(&self, other: &Table) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|name| other.contains_column(name))
            .cloned()
            .collect()
    }
}

fn key_columns<'a>(table: &'a Table, keys: &[&str]) -> Result<Vec<&'a Column>> {
    keys.iter().map(|k| table.column(k)).collect()
}

fn row_key(columns: &[&Column], row: usize) -> Option<GroupKey> {
    let values: Vec<_> = columns.iter().map(|c| c.value(row)).collect();
    if values.iter().any(|v| v.is_null()) {
        None
    } else {
        Some(GroupKey(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Value;

    fn ages() -> Table {
        Table::from_columns(vec![
            ("name", Column::from(vec!["vincent", "tim", "anna"])),
            ("age", Column::from(vec![28i64, 30, 25])),
        ])
        .unwrap()
    }

    fn lengths() -> Table {
        Table::from_columns(vec![
            ("name", Column::from(vec!["vincent", "tim"])),
            ("length", Column::from(vec![188i64, 172])),
        ])
        .unwrap()
    }

    #[test]
    fn test_inner_and_left() {
        let inner = ages().merge(&lengths(), &["name"], JoinType::Inner).unwrap();
        assert_eq!(inner.shape(), (2, 3));
        assert_eq!(inner.column_names(), &["name", "age", "length"]);

        let left = ages().merge(&lengths(), &["name"], JoinType::Left).unwrap();
        assert_eq!(left.row_count(), 3);
        assert!(left.column("length").unwrap().is_null(2));
        assert_eq!(left.value(2, "name").unwrap(), Value::from("anna"));
    }

    #[test]
    fn test_one_to_many_repeats_left_rows() {
        let right = Table::from_columns(vec![
            ("name", Column::from(vec!["tim", "tim", "vincent"])),
            ("score", Column::from(vec![1i64, 2, 3])),
        ])
        .unwrap();

        let left = ages().merge(&right, &["name"], JoinType::Left).unwrap();
        assert_eq!(left.row_count(), 4);
        let names = left.column("name").unwrap().to_values();
        assert_eq!(names[0], Value::from("vincent"));
        assert_eq!(names[1], Value::from("tim"));
        assert_eq!(names[2], Value::from("tim"));
        assert_eq!(names[3], Value::from("anna"));
    }

    #[test]
    fn test_overlapping_columns_get_suffixes() {
        let joined = ages().merge(&ages(), &["name"], JoinType::Inner).unwrap();
        assert_eq!(joined.column_names(), &["name", "age_x", "age_y"]);
    }

    #[test]
    fn test_missing_key_column() {
        assert!(matches!(
            ages().merge(&lengths(), &["age"], JoinType::Inner),
            Err(Error::JoinColumn(_))
        ));
        assert_eq!(ages().common_columns(&lengths()), vec!["name".to_string()]);
    }

    #[test]
    fn test_signed_zero_keys_match() {
        let left = Table::from_columns(vec![
            ("k", Column::from(vec![-0.0, 1.0])),
            ("a", Column::from(vec![1i64, 2])),
        ])
        .unwrap();
        let right = Table::from_columns(vec![
            ("k", Column::from(vec![0.0])),
            ("b", Column::from(vec![10i64])),
        ])
        .unwrap();

        let inner = left.merge(&right, &["k"], JoinType::Inner).unwrap();
        assert_eq!(inner.row_count(), 1);
        assert_eq!(inner.value(0, "b").unwrap(), Value::Int64(10));
    }
}

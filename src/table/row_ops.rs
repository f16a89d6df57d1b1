//! 行の選択・連結・重複削除・サンプリング

use std::collections::BTreeSet;

use rand::Rng;

use super::core::Table;
use super::group::GroupKey;
use crate::column::Column;
use crate::error::{Error, Result};

impl Table {
    /// Keeps the rows whose mask entry is `true`
    pub fn filter_mask(&self, mask: &[bool]) -> Result<Table> {
        if mask.len() != self.row_count {
            return Err(Error::ShapeMismatch {
                expected: self.row_count,
                found: mask.len(),
            });
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take(&indices)
    }

    /// Positional row selection; indices may repeat and appear in any order
    pub fn take(&self, indices: &[usize]) -> Result<Table> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.row_count) {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                size: self.row_count,
            });
        }

        let mut result = Table::with_row_count(indices.len());
        for (name, column) in self.columns() {
            result.add_column(name, column.take(indices)?)?;
        }
        Ok(result)
    }

    /// 先頭n行
    pub fn head(&self, n: usize) -> Table {
        let end = n.min(self.row_count);
        let indices: Vec<usize> = (0..end).collect();
        // in range by construction
        self.take(&indices).unwrap_or_default()
    }

    /// 末尾n行
    pub fn tail(&self, n: usize) -> Table {
        let start = self.row_count.saturating_sub(n);
        let indices: Vec<usize> = (start..self.row_count).collect();
        self.take(&indices).unwrap_or_default()
    }

    /// Appends the rows of `tables` in order. Every table must have the same
    /// column names; columns are matched by name and widened Int64 → Float64
    /// where the inputs disagree.
    pub fn concat_rows(tables: &[Table]) -> Result<Table> {
        let Some(first) = tables.first() else {
            return Ok(Table::new());
        };

        for table in &tables[1..] {
            if table.column_count() != first.column_count() {
                return Err(Error::InvalidInput(format!(
                    "cannot concatenate tables with {} and {} columns",
                    first.column_count(),
                    table.column_count()
                )));
            }
            table.ensure_columns(first.column_names())?;
        }

        let total_rows = tables.iter().map(Table::row_count).sum();
        let mut result = Table::with_row_count(total_rows);
        for name in first.column_names() {
            let pieces = tables
                .iter()
                .map(|t| t.column(name).cloned())
                .collect::<Result<Vec<Column>>>()?;
            result.add_column(name.clone(), Column::concat(name, &pieces)?)?;
        }
        Ok(result)
    }

    /// Removes repeated rows, keeping the first occurrence. With `subset`,
    /// only those columns decide whether two rows are duplicates.
    pub fn drop_duplicates<S: AsRef<str>>(&self, subset: Option<&[S]>) -> Result<Table> {
        let keys: Vec<&Column> = match subset {
            Some(names) => {
                self.ensure_columns(names)?;
                names
                    .iter()
                    .map(|n| self.column(n.as_ref()))
                    .collect::<Result<_>>()?
            }
            None => self.columns.iter().collect(),
        };

        let mut seen = BTreeSet::new();
        let mut keep = Vec::new();
        for row in 0..self.row_count {
            let key = GroupKey(keys.iter().map(|c| c.value(row)).collect());
            if seen.insert(key) {
                keep.push(row);
            }
        }
        self.take(&keep)
    }

    /// Keeps only rows without a null in any column
    pub fn drop_nulls(&self) -> Table {
        let keep: Vec<usize> = (0..self.row_count)
            .filter(|&row| self.columns.iter().all(|c| !c.is_null(row)))
            .collect();
        self.take(&keep).unwrap_or_default()
    }

    /// Draws `n` rows using the supplied random source
    pub fn sample<R: Rng>(&self, n: usize, replace: bool, rng: &mut R) -> Result<Table> {
        let indices = sample_indices(self.row_count, n, replace, rng)?;
        self.take(&indices)
    }
}

/// Row positions for a sample of `n` out of `len`
pub(crate) fn sample_indices<R: Rng>(
    len: usize,
    n: usize,
    replace: bool,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if len == 0 {
        return Err(Error::InvalidInput(
            "cannot sample rows from an empty table".to_string(),
        ));
    }

    if replace {
        Ok((0..n).map(|_| rng.random_range(0..len)).collect())
    } else {
        if n > len {
            return Err(Error::InvalidInput(format!(
                "cannot take a sample of {} rows from {} rows without replacement",
                n, len
            )));
        }
        Ok(rand::seq::index::sample(rng, len, n).into_vec())
    }
}

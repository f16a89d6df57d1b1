//! Row and column verbs delegated to the table. All keep the group list.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::functions::RowPredicate;
use super::Frame;
use crate::error::Result;
use crate::table::{SortKey, Table};

impl Frame {
    /// Keeps the rows every predicate accepts.
    ///
    /// Predicates run in order, each on the rows left by the previous one;
    /// a mask of the wrong length is `ShapeMismatch`. Grouping is ignored.
    pub fn filter(&self, predicates: &[&dyn RowPredicate]) -> Result<Frame> {
        let mut table = self.table.clone();
        for predicate in predicates {
            let mask = predicate.mask(&table)?;
            table = table.filter_mask(&mask)?;
        }
        log::debug!(
            "filter with {} predicates: {} -> {} rows",
            predicates.len(),
            self.table.row_count(),
            table.row_count()
        );
        Ok(self.derive(table))
    }

    /// Single-predicate [`Frame::filter`] that infers the closure signature
    pub fn filter_by<F>(&self, predicate: F) -> Result<Frame>
    where
        F: Fn(&Table) -> Result<Vec<bool>>,
    {
        self.filter(&[&predicate])
    }

    /// 列を選択する（指定順）
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Frame> {
        Ok(self.derive(self.table.select(names)?))
    }

    /// Removes the named columns; unknown names are ignored
    pub fn drop<S: AsRef<str>>(&self, names: &[S]) -> Frame {
        self.derive(self.table.drop_columns(names))
    }

    pub fn rename<S: AsRef<str>, T: AsRef<str>>(&self, mapping: &[(S, T)]) -> Result<Frame> {
        Ok(self.derive(self.table.rename(mapping)?))
    }

    /// Replaces every column name; `names` must match the column count
    pub fn set_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Frame> {
        Ok(self.derive(self.table.set_names(names)?))
    }

    /// Stable sort on `columns`, all in one direction. The group columns
    /// are prepended in the same direction, so a grouped frame sorts
    /// group-major.
    pub fn sort<S: AsRef<str>>(&self, columns: &[S], ascending: bool) -> Result<Frame> {
        let keys: Vec<SortKey> = columns
            .iter()
            .map(|c| SortKey::new(c.as_ref(), ascending))
            .collect();
        self.sort_by(&keys)
    }

    /// Stable sort with a direction per key, after the group columns.
    ///
    /// The group columns take the direction of the first key (ascending
    /// when `keys` is empty).
    pub fn sort_by(&self, keys: &[SortKey]) -> Result<Frame> {
        let group_ascending = keys.first().map_or(true, |k| k.ascending);
        let mut all: Vec<SortKey> = self
            .groups
            .iter()
            .map(|g| SortKey::new(g.as_str(), group_ascending))
            .collect();
        all.extend(keys.iter().cloned());
        Ok(self.derive(self.table.sort_by(&all)?))
    }

    /// 先頭n行
    pub fn head(&self, n: usize) -> Frame {
        self.derive(self.table.head(n))
    }

    /// 末尾n行
    pub fn tail(&self, n: usize) -> Frame {
        self.derive(self.table.tail(n))
    }

    /// Rows at `indices`, in that order
    pub fn slice(&self, indices: &[usize]) -> Result<Frame> {
        Ok(self.derive(self.table.take(indices)?))
    }

    /// Draws `n` rows from `rng`
    ///
    /// Without replacement `n` may not exceed the row count.
    pub fn sample_n<R: Rng>(&self, n: usize, replace: bool, rng: &mut R) -> Result<Frame> {
        Ok(self.derive(self.table.sample(n, replace, rng)?))
    }

    /// [`Frame::sample_n`] with a generator seeded from `seed`
    pub fn sample_n_seeded(&self, n: usize, replace: bool, seed: u64) -> Result<Frame> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.sample_n(n, replace, &mut rng)
    }

    /// Keeps the first row of each distinct combination of `subset` (all
    /// columns when `None`)
    pub fn drop_duplicates<S: AsRef<str>>(&self, subset: Option<&[S]>) -> Result<Frame> {
        Ok(self.derive(self.table.drop_duplicates(subset)?))
    }

    /// Rows without a null in any column
    pub fn complete_cases(&self) -> Frame {
        self.derive(self.table.drop_nulls())
    }

    /// Applies an arbitrary table transform
    pub fn pipe<F>(&self, f: F) -> Result<Frame>
    where
        F: FnOnce(&Table) -> Result<Table>,
    {
        Ok(self.derive(f(&self.table)?))
    }
}

//! 列の選択・削除・名前変更

use std::collections::HashMap;

use super::core::Table;
use crate::error::{Error, Result};

impl Table {
    /// Projection onto `names`, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        self.ensure_columns(names)?;

        let mut result = Table::with_row_count(self.row_count);
        for name in names {
            let name = name.as_ref();
            result.add_column(name, self.column(name)?.clone())?;
        }
        Ok(result)
    }

    /// Removes the named columns; unknown names are ignored
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Table {
        let mut result = Table::with_row_count(self.row_count);
        for (name, column) in self.columns() {
            if names.iter().any(|n| n.as_ref() == name) {
                continue;
            }
            // Names in `self` are unique, so this cannot collide
            let _ = result.add_column(name, column.clone());
        }
        result
    }

    /// Renames columns by `(old, new)` pairs. Old names that do not exist are
    /// ignored; a rename that produces a duplicate name is an error.
    pub fn rename<S: AsRef<str>, T: AsRef<str>>(&self, mapping: &[(S, T)]) -> Result<Table> {
        let lookup: HashMap<&str, &str> = mapping
            .iter()
            .map(|(old, new)| (old.as_ref(), new.as_ref()))
            .collect();

        let names: Vec<String> = self
            .column_names
            .iter()
            .map(|name| {
                lookup
                    .get(name.as_str())
                    .map(|new| new.to_string())
                    .unwrap_or_else(|| name.clone())
            })
            .collect();

        self.with_names(names)
    }

    /// Replaces every column name; `names` must have one entry per column
    pub fn set_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        if names.len() != self.columns.len() {
            return Err(Error::ShapeMismatch {
                expected: self.columns.len(),
                found: names.len(),
            });
        }
        self.with_names(names.iter().map(|n| n.as_ref().to_string()).collect())
    }

    fn with_names(&self, names: Vec<String>) -> Result<Table> {
        let mut result = Table::with_row_count(self.row_count);
        for (name, column) in names.into_iter().zip(self.columns.iter()) {
            result.add_column(name, column.clone())?;
        }
        Ok(result)
    }
}

//! Named functions handed to `mutate`, `agg` and `filter`
//!
//! `Mutations` and `Aggregations` keep their entries in insertion order,
//! which fixes the order of the output columns.

use std::fmt;

use crate::column::{Column, Value};
use crate::error::{Error, Result};
use crate::table::Table;

/// What a mutate function returns for one table or partition
#[derive(Debug, Clone)]
pub enum ColumnOutput {
    /// One value per row
    Column(Column),
    /// Broadcast to every row
    Scalar(Value),
}

impl ColumnOutput {
    /// Materialises the output for a table of `rows` rows
    pub(crate) fn into_column(self, name: &str, rows: usize) -> Result<Column> {
        match self {
            ColumnOutput::Column(column) if column.len() == rows => Ok(column),
            ColumnOutput::Column(column) => {
                log::debug!(
                    "mutate '{}' returned {} values for {} rows",
                    name,
                    column.len(),
                    rows
                );
                Err(Error::ShapeMismatch {
                    expected: rows,
                    found: column.len(),
                })
            }
            ColumnOutput::Scalar(value) => Ok(Column::full(&value, rows)),
        }
    }
}

impl From<Column> for ColumnOutput {
    fn from(column: Column) -> Self {
        ColumnOutput::Column(column)
    }
}

impl From<Value> for ColumnOutput {
    fn from(value: Value) -> Self {
        ColumnOutput::Scalar(value)
    }
}

macro_rules! column_output_from {
    ($($vec:ty),* ; $($scalar:ty),*) => {
        $(
            impl From<$vec> for ColumnOutput {
                fn from(values: $vec) -> Self {
                    ColumnOutput::Column(Column::from(values))
                }
            }
        )*
        $(
            impl From<$scalar> for ColumnOutput {
                fn from(value: $scalar) -> Self {
                    ColumnOutput::Scalar(Value::from(value))
                }
            }
        )*
    };
}

column_output_from!(Vec<i64>, Vec<f64>, Vec<String>, Vec<bool>; i64, f64, bool, String, &str);

/// Column-producing function: `&Table -> column or scalar`
pub trait ColumnFn {
    fn apply(&self, table: &Table) -> Result<ColumnOutput>;
}

impl<F> ColumnFn for F
where
    F: Fn(&Table) -> Result<ColumnOutput>,
{
    fn apply(&self, table: &Table) -> Result<ColumnOutput> {
        self(table)
    }
}

/// Reducer: `&Table -> one value`
pub trait ReduceFn {
    fn reduce(&self, table: &Table) -> Result<Value>;
}

impl<F> ReduceFn for F
where
    F: Fn(&Table) -> Result<Value>,
{
    fn reduce(&self, table: &Table) -> Result<Value> {
        self(table)
    }
}

/// Row predicate: `&Table -> mask` with one entry per row
pub trait RowPredicate {
    fn mask(&self, table: &Table) -> Result<Vec<bool>>;
}

impl<F> RowPredicate for F
where
    F: Fn(&Table) -> Result<Vec<bool>>,
{
    fn mask(&self, table: &Table) -> Result<Vec<bool>> {
        self(table)
    }
}

/// Pins a closure's signature so it can be passed as `&dyn RowPredicate`
///
/// ```ignore
/// frame.filter(&[
///     &predicate(|t| Ok(t.column("a")?.gt(0.5))),
///     &predicate(|t| Ok(t.column("c")?.equals("foo"))),
/// ])?;
/// ```
pub fn predicate<F>(f: F) -> F
where
    F: Fn(&Table) -> Result<Vec<bool>>,
{
    f
}

/// Ordered `name -> function` map shared by the two builders
struct Named<T: ?Sized> {
    entries: Vec<(String, Box<T>)>,
}

impl<T: ?Sized> Named<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    // re-adding a name replaces the function but keeps the slot
    fn insert(&mut self, name: String, f: Box<T>) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = f,
            None => self.entries.push((name, f)),
        }
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

/// Functions for [`crate::Frame::mutate`], applied in insertion order
pub struct Mutations {
    inner: Named<dyn ColumnFn>,
}

impl Mutations {
    pub fn new() -> Self {
        Self {
            inner: Named::new(),
        }
    }

    /// Adds an output column computed by `f`.
    ///
    /// `f` may return a `Column`, a `Vec` of values, or a scalar that is
    /// broadcast to every row.
    pub fn add<S, F, O>(mut self, name: S, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Table) -> Result<O> + 'static,
        O: Into<ColumnOutput>,
    {
        let boxed: Box<dyn ColumnFn> =
            Box::new(move |t: &Table| f(t).map(Into::<ColumnOutput>::into));
        self.inner.insert(name.into(), boxed);
        self
    }

    /// Adds an already boxed function
    pub fn add_fn<S: Into<String>>(mut self, name: S, f: Box<dyn ColumnFn>) -> Self {
        self.inner.insert(name.into(), f);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.names()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn ColumnFn)> {
        self.inner
            .entries
            .iter()
            .map(|(n, f)| (n.as_str(), &**f))
    }
}

impl Default for Mutations {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mutations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Reducers for [`crate::Frame::agg`], one output column each
pub struct Aggregations {
    inner: Named<dyn ReduceFn>,
}

impl Aggregations {
    pub fn new() -> Self {
        Self {
            inner: Named::new(),
        }
    }

    pub fn add<S, F, V>(mut self, name: S, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Table) -> Result<V> + 'static,
        V: Into<Value>,
    {
        let boxed: Box<dyn ReduceFn> =
            Box::new(move |t: &Table| f(t).map(Into::<Value>::into));
        self.inner.insert(name.into(), boxed);
        self
    }

    pub fn add_fn<S: Into<String>>(mut self, name: S, f: Box<dyn ReduceFn>) -> Self {
        self.inner.insert(name.into(), f);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.names()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn ReduceFn)> {
        self.inner
            .entries
            .iter()
            .map(|(n, f)| (n.as_str(), &**f))
    }
}

impl Default for Aggregations {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Aggregations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

use std::cmp::Ordering;
use std::sync::Arc;

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use super::value::cmp_f64;
use crate::column::{BooleanColumn, Float64Column, Int64Column, StringColumn, Value};
use crate::error::{Error, Result};

/// 列の型を識別するための列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Boolean,
}

impl ColumnType {
    /// Common type two columns widen to, if any
    pub fn unify(self, other: ColumnType) -> Option<ColumnType> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (ColumnType::Int64, ColumnType::Float64) | (ColumnType::Float64, ColumnType::Int64) => {
                Some(ColumnType::Float64)
            }
            _ => None,
        }
    }
}

/// 列を表す列挙型
#[derive(Debug, Clone)]
pub enum Column {
    Int64(Int64Column),
    Float64(Float64Column),
    String(StringColumn),
    Boolean(BooleanColumn),
}

/// NULL値を追跡するビットマスク（ビットが立っている位置がNULL）
#[derive(Debug, Clone)]
pub struct BitMask {
    pub(crate) data: Arc<[u8]>,
    pub(crate) len: usize,
}

impl BitMask {
    /// ブール値のベクトルからビットマスクを作成する
    pub fn from_bools(bools: &[bool]) -> Self {
        let length = bools.len();
        let bytes_needed = (length + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_set) in bools.iter().enumerate() {
            if is_set {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        Self {
            data: data.into(),
            len: length,
        }
    }

    /// Null mask for a column, `None` when nothing is null
    pub fn from_nulls(nulls: &[bool]) -> Option<Self> {
        if nulls.iter().any(|&is_null| is_null) {
            Some(Self::from_bools(nulls))
        } else {
            None
        }
    }

    /// ビットが設定されているかどうかを確認する
    pub fn get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len,
            });
        }
        Ok(self.is_set(index))
    }

    pub(crate) fn is_set(&self, index: usize) -> bool {
        index < self.len && (self.data[index / 8] & (1 << (index % 8))) != 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Gathers `indices` out of `data`. A `None` index yields a null slot.
pub(crate) fn gather_values<T: Clone + Default>(
    data: &[T],
    nulls: Option<&BitMask>,
    indices: &[Option<usize>],
) -> (Vec<T>, Option<BitMask>) {
    let mut values = Vec::with_capacity(indices.len());
    let mut null_flags = Vec::with_capacity(indices.len());

    for idx in indices {
        match idx {
            Some(i) => {
                values.push(data[*i].clone());
                null_flags.push(nulls.map(|m| m.is_set(*i)).unwrap_or(false));
            }
            None => {
                values.push(T::default());
                null_flags.push(true);
            }
        }
    }

    (values, BitMask::from_nulls(&null_flags))
}

// Column enumの実装
impl Column {
    /// 列の長さを返す
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(col) => col.len(),
            Column::Float64(col) => col.len(),
            Column::String(col) => col.len(),
            Column::Boolean(col) => col.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 列の型を返す
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::String(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    pub fn as_int64(&self) -> Option<&Int64Column> {
        match self {
            Column::Int64(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_float64(&self) -> Option<&Float64Column> {
        match self {
            Column::Float64(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BooleanColumn> {
        match self {
            Column::Boolean(col) => Some(col),
            _ => None,
        }
    }

    /// Whether row `index` is missing. Out-of-range rows read as null.
    pub fn is_null(&self, index: usize) -> bool {
        if index >= self.len() {
            return true;
        }
        match self {
            Column::Int64(col) => col.is_null(index),
            Column::Float64(col) => col.is_null(index),
            Column::String(col) => col.is_null(index),
            Column::Boolean(col) => col.is_null(index),
        }
    }

    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// インデックスで値を取得する
    pub fn get(&self, index: usize) -> Result<Value> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.value(index))
    }

    /// Unchecked read; callers guarantee `index < len`
    pub(crate) fn value(&self, index: usize) -> Value {
        if self.is_null(index) {
            return Value::Null;
        }
        match self {
            Column::Int64(col) => Value::Int64(col.data[index]),
            Column::Float64(col) => Value::Float64(col.data[index]),
            Column::String(col) => Value::String(col.data[index].clone()),
            Column::Boolean(col) => Value::Boolean(col.data[index]),
        }
    }

    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }

    /// Positional row selection. Indices may repeat and appear in any order.
    pub fn take(&self, indices: &[usize]) -> Result<Column> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                size: len,
            });
        }
        let indices: Vec<Option<usize>> = indices.iter().copied().map(Some).collect();
        Ok(self.gather(&indices))
    }

    /// Like `take`, but `None` positions produce nulls
    pub fn take_opt(&self, indices: &[Option<usize>]) -> Result<Column> {
        let len = self.len();
        if let Some(bad) = indices.iter().flatten().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfBounds {
                index: *bad,
                size: len,
            });
        }
        Ok(self.gather(indices))
    }

    fn gather(&self, indices: &[Option<usize>]) -> Column {
        match self {
            Column::Int64(col) => Column::Int64(col.gather(indices)),
            Column::Float64(col) => Column::Float64(col.gather(indices)),
            Column::String(col) => Column::String(col.gather(indices)),
            Column::Boolean(col) => Column::Boolean(col.gather(indices)),
        }
    }

    /// Boolean-mask row filter; the mask must match the column length
    pub fn filter(&self, mask: &[bool]) -> Result<Column> {
        if mask.len() != self.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
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

    /// Compares two rows of this column, nulls last
    pub(crate) fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        match (self.is_null(a), self.is_null(b)) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match self {
            Column::Int64(col) => col.data[a].cmp(&col.data[b]),
            Column::Float64(col) => cmp_f64(col.data[a], col.data[b]),
            Column::String(col) => col.data[a].cmp(&col.data[b]),
            Column::Boolean(col) => col.data[a].cmp(&col.data[b]),
        }
    }

    /// An all-null column of the given type
    pub fn new_null(column_type: ColumnType, len: usize) -> Column {
        let nulls = vec![true; len];
        match column_type {
            ColumnType::Int64 => Column::Int64(Int64Column::with_nulls(vec![0; len], nulls)),
            ColumnType::Float64 => {
                Column::Float64(Float64Column::with_nulls(vec![f64::NAN; len], nulls))
            }
            ColumnType::String => {
                Column::String(StringColumn::with_nulls(vec![String::new(); len], nulls))
            }
            ColumnType::Boolean => Column::Boolean(BooleanColumn::with_nulls(vec![false; len], nulls)),
        }
    }

    /// Broadcasts a scalar to `len` rows. A null scalar becomes a Float64 null column.
    pub fn full(value: &Value, len: usize) -> Column {
        match value {
            Value::Null => Column::new_null(ColumnType::Float64, len),
            Value::Int64(v) => Column::Int64(Int64Column::new(vec![*v; len])),
            Value::Float64(v) => Column::Float64(Float64Column::new(vec![*v; len])),
            Value::String(v) => Column::String(StringColumn::new(vec![v.clone(); len])),
            Value::Boolean(v) => Column::Boolean(BooleanColumn::new(vec![*v; len])),
        }
    }

    /// Builds a column from scalars, inferring the type from the non-null values
    pub fn from_values(values: &[Value]) -> Result<Column> {
        Self::collect_values("<values>", values)
    }

    /// Type inference used by the engines; `name` only labels the error
    pub(crate) fn collect_values(name: &str, values: &[Value]) -> Result<Column> {
        let mut inferred: Option<ColumnType> = None;
        for value in values {
            let Some(found) = value.value_type() else {
                continue;
            };
            inferred = match inferred {
                None => Some(found),
                Some(current) => Some(current.unify(found).ok_or_else(|| {
                    Error::ColumnTypeMismatch {
                        name: name.to_string(),
                        expected: current,
                        found,
                    }
                })?),
            };
        }
        Self::from_values_typed(name, inferred.unwrap_or(ColumnType::Float64), values)
    }

    /// Builds a column of a fixed type; Int64 values widen into Float64
    pub(crate) fn from_values_typed(
        name: &str,
        column_type: ColumnType,
        values: &[Value],
    ) -> Result<Column> {
        let mismatch = |value: &Value| Error::ColumnTypeMismatch {
            name: name.to_string(),
            expected: column_type,
            found: value.value_type().unwrap_or(column_type),
        };

        let column = match column_type {
            ColumnType::Int64 => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    match v {
                        _ if v.is_null() => out.push(None),
                        Value::Int64(x) => out.push(Some(*x)),
                        other => return Err(mismatch(other)),
                    }
                }
                Column::Int64(Int64Column::from_options(out))
            }
            ColumnType::Float64 => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    match v {
                        _ if v.is_null() => out.push(None),
                        Value::Float64(x) => out.push(Some(*x)),
                        Value::Int64(x) => out.push(Some(*x as f64)),
                        other => return Err(mismatch(other)),
                    }
                }
                Column::Float64(Float64Column::from_options(out))
            }
            ColumnType::String => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    match v {
                        _ if v.is_null() => out.push(None),
                        Value::String(x) => out.push(Some(x.clone())),
                        other => return Err(mismatch(other)),
                    }
                }
                Column::String(StringColumn::from_options(out))
            }
            ColumnType::Boolean => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    match v {
                        _ if v.is_null() => out.push(None),
                        Value::Boolean(x) => out.push(Some(*x)),
                        other => return Err(mismatch(other)),
                    }
                }
                Column::Boolean(BooleanColumn::from_options(out))
            }
        };
        Ok(column)
    }

    /// Stacks columns end to end, widening Int64 to Float64 when they mix
    pub fn concat(name: &str, pieces: &[Column]) -> Result<Column> {
        let Some(first) = pieces.first() else {
            return Ok(Column::new_null(ColumnType::Float64, 0));
        };

        // all-null pieces (a broadcast null scalar, say) take any type
        let mut typed = pieces.iter().filter(|c| c.null_count() < c.len());
        let mut target = typed
            .next()
            .map(Column::column_type)
            .unwrap_or_else(|| first.column_type());
        for piece in typed {
            let found = piece.column_type();
            target = target.unify(found).ok_or_else(|| Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: target,
                found,
            })?;
        }

        if pieces.len() == 1 && target == first.column_type() {
            return Ok(first.clone());
        }

        let values: Vec<Value> = pieces.iter().flat_map(|c| c.to_values()).collect();
        Self::from_values_typed(name, target, &values)
    }

    /// Numeric view of the column; nulls are `None`, booleans read as 0/1
    pub fn to_numeric<T: NumCast>(&self) -> Result<Vec<Option<T>>> {
        match self {
            Column::Int64(col) => Ok(col.iter().map(|v| v.and_then(num_traits::cast)).collect()),
            Column::Float64(col) => Ok(col.iter().map(|v| v.and_then(num_traits::cast)).collect()),
            Column::Boolean(col) => Ok(col
                .iter()
                .map(|v| v.and_then(|b| num_traits::cast(b as u8)))
                .collect()),
            Column::String(_) => Err(Error::ColumnTypeMismatch {
                name: "<numeric>".to_string(),
                expected: ColumnType::Float64,
                found: ColumnType::String,
            }),
        }
    }

    /// Float view with nulls as NaN
    pub fn to_f64_vec(&self) -> Result<Vec<f64>> {
        Ok(self
            .to_numeric::<f64>()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    /// Element-wise numeric transform into a Float64 column; nulls stay null
    pub fn map_f64<F>(&self, f: F) -> Result<Column>
    where
        F: Fn(f64) -> f64,
    {
        let values = self.to_numeric::<f64>()?;
        Ok(Column::Float64(Float64Column::from_options(
            values.into_iter().map(|v| v.map(&f)).collect(),
        )))
    }

    /// Element-wise binary numeric transform; null on either side gives null
    pub fn zip_f64<F>(&self, other: &Column, f: F) -> Result<Column>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.len() != other.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        let lhs = self.to_numeric::<f64>()?;
        let rhs = other.to_numeric::<f64>()?;
        Ok(Column::Float64(Float64Column::from_options(
            lhs.into_iter()
                .zip(rhs)
                .map(|(a, b)| match (a, b) {
                    (Some(a), Some(b)) => Some(f(a, b)),
                    _ => None,
                })
                .collect(),
        )))
    }

    fn compare_with<F>(&self, value: Value, keep: F) -> Vec<bool>
    where
        F: Fn(Ordering) -> bool,
    {
        (0..self.len())
            .map(|i| {
                let cell = self.value(i);
                !cell.is_null() && !value.is_null() && keep(cell.total_cmp(&value))
            })
            .collect()
    }

    /// Row mask of `cell > value`; nulls never match
    pub fn gt(&self, value: impl Into<Value>) -> Vec<bool> {
        self.compare_with(value.into(), |o| o == Ordering::Greater)
    }

    pub fn ge(&self, value: impl Into<Value>) -> Vec<bool> {
        self.compare_with(value.into(), |o| o != Ordering::Less)
    }

    pub fn lt(&self, value: impl Into<Value>) -> Vec<bool> {
        self.compare_with(value.into(), |o| o == Ordering::Less)
    }

    pub fn le(&self, value: impl Into<Value>) -> Vec<bool> {
        self.compare_with(value.into(), |o| o != Ordering::Greater)
    }

    pub fn equals(&self, value: impl Into<Value>) -> Vec<bool> {
        self.compare_with(value.into(), |o| o == Ordering::Equal)
    }

    pub fn is_null_mask(&self) -> Vec<bool> {
        (0..self.len()).map(|i| self.is_null(i)).collect()
    }

    pub fn not_null_mask(&self) -> Vec<bool> {
        (0..self.len()).map(|i| !self.is_null(i)).collect()
    }

    /// Cell text for rendering
    pub(crate) fn format_cell(&self, index: usize, precision: usize) -> String {
        match self.value(index) {
            Value::Null => "NULL".to_string(),
            Value::Float64(v) => format!("{:.*}", precision, v),
            Value::String(v) => format!("\"{}\"", v),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Column {
    /// Same type and the same cells, nulls comparing equal
    fn eq(&self, other: &Self) -> bool {
        self.column_type() == other.column_type() && self.to_values() == other.to_values()
    }
}

impl From<Int64Column> for Column {
    fn from(col: Int64Column) -> Self {
        Column::Int64(col)
    }
}

impl From<Float64Column> for Column {
    fn from(col: Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<StringColumn> for Column {
    fn from(col: StringColumn) -> Self {
        Column::String(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<Vec<i64>> for Column {
    fn from(data: Vec<i64>) -> Self {
        Column::Int64(Int64Column::new(data))
    }
}

impl From<Vec<f64>> for Column {
    fn from(data: Vec<f64>) -> Self {
        Column::Float64(Float64Column::new(data))
    }
}

impl From<Vec<String>> for Column {
    fn from(data: Vec<String>) -> Self {
        Column::String(StringColumn::new(data))
    }
}

impl From<Vec<&str>> for Column {
    fn from(data: Vec<&str>) -> Self {
        Column::String(StringColumn::from_strs(&data))
    }
}

impl From<Vec<bool>> for Column {
    fn from(data: Vec<bool>) -> Self {
        Column::Boolean(BooleanColumn::new(data))
    }
}

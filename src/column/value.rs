use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::column::ColumnType;

/// A single cell of a table, or the scalar result of a reducer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    String(String),
}

impl Value {
    /// Whether the value is missing. A NaN float counts as missing.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// The column type this value would be stored in, `None` for `Null`
    pub fn value_type(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Int64(_) => Some(ColumnType::Int64),
            Value::Float64(_) => Some(ColumnType::Float64),
            Value::String(_) => Some(ColumnType::String),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Boolean(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Total order used for sorting, partitioning and join matching.
    ///
    /// Nulls (and NaN) sort after everything else. Int64 and Float64 compare
    /// exactly by numeric value, so `-0.0 == 0.0 == 0` and `2^53 + 1` is
    /// above `2^53 as f64`. Other cross-type pairs order by type rank.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }

        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Float64(a), Value::Float64(b)) => cmp_f64(*a, *b),
            (Value::Int64(a), Value::Float64(b)) => cmp_i64_f64(*a, *b),
            (Value::Float64(a), Value::Int64(b)) => cmp_i64_f64(*b, *a).reverse(),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Boolean(_) => 0,
            Value::Int64(_) | Value::Float64(_) => 1,
            Value::String(_) => 2,
            Value::Null => 3,
        }
    }
}

/// Numeric order of two floats; zeros of either sign are equal
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.total_cmp(&b),
    }
}

/// Exact order of an integer against a float, without rounding `a`
fn cmp_i64_f64(a: i64, b: f64) -> Ordering {
    // i64::MIN is -2^63 exactly; 2^63 is one past i64::MAX
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if b.is_nan() {
        return Ordering::Less;
    }
    if b >= TWO_POW_63 {
        return Ordering::Less;
    }
    if b < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_f64(0.0, b - whole),
        ord => ord,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) if v.is_nan() => write!(f, "NULL"),
            Value::Float64(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_zeros_are_equal() {
        assert_eq!(Value::Float64(-0.0), Value::Float64(0.0));
        assert_eq!(Value::Float64(-0.0), Value::Int64(0));
        assert!(Value::Float64(-0.5) < Value::Float64(0.0));
    }

    #[test]
    fn test_int_float_compare_exactly() {
        let big = 1i64 << 53;
        let f = Value::Float64(big as f64);
        assert_eq!(Value::Int64(big), f);
        assert!(Value::Int64(big + 1) > f);
        assert!(f < Value::Int64(big + 1));
        assert!(Value::Int64(i64::MAX) < Value::Float64(9.3e18));
        assert!(Value::Int64(i64::MIN) == Value::Float64(-9_223_372_036_854_775_808.0));
        assert!(Value::Int64(2) < Value::Float64(2.5));
        assert!(Value::Int64(-2) > Value::Float64(-2.5));
        assert!(Value::Int64(0) > Value::Float64(f64::NEG_INFINITY));
    }

    #[test]
    fn test_nulls_sort_last() {
        assert!(Value::Null > Value::Int64(i64::MAX));
        assert_eq!(Value::Float64(f64::NAN), Value::Null);
    }
}

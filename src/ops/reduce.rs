//! Reducers for `agg`: each collapses a column to one [`Value`].
//!
//! Nulls are skipped. A reducer with nothing to reduce returns `Value::Null`.

use crate::column::{Column, Value};
use crate::error::{Error, Result};

fn valid_f64(col: &Column) -> Result<Vec<f64>> {
    Ok(col.to_numeric::<f64>()?.into_iter().flatten().collect())
}

/// 平均
pub fn mean(col: &Column) -> Result<Value> {
    let values = valid_f64(col)?;
    if values.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::Float64(values.iter().sum::<f64>() / values.len() as f64))
}

/// 合計; integer and boolean columns sum to Int64
pub fn sum(col: &Column) -> Result<Value> {
    match col {
        Column::Int64(c) => Ok(Value::Int64(c.sum())),
        Column::Boolean(c) => Ok(Value::Int64(c.count_true() as i64)),
        _ => Ok(Value::Float64(valid_f64(col)?.iter().sum())),
    }
}

/// 最小値
pub fn min(col: &Column) -> Result<Value> {
    Ok(col
        .to_values()
        .into_iter()
        .filter(|v| !v.is_null())
        .min()
        .unwrap_or(Value::Null))
}

/// 最大値
pub fn max(col: &Column) -> Result<Value> {
    Ok(col
        .to_values()
        .into_iter()
        .filter(|v| !v.is_null())
        .max()
        .unwrap_or(Value::Null))
}

/// Number of non-null values
pub fn count(col: &Column) -> Value {
    Value::Int64((col.len() - col.null_count()) as i64)
}

/// 分散 with `ddof` delta degrees of freedom
pub fn var(col: &Column, ddof: usize) -> Result<Value> {
    let values = valid_f64(col)?;
    if values.len() <= ddof {
        return Ok(Value::Null);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(Value::Float64(ss / (values.len() - ddof) as f64))
}

/// 標準偏差
pub fn std(col: &Column, ddof: usize) -> Result<Value> {
    Ok(match var(col, ddof)? {
        Value::Float64(v) => Value::Float64(v.sqrt()),
        other => other,
    })
}

/// Covariance over the rows where both columns are present
pub fn cov(a: &Column, b: &Column, ddof: usize) -> Result<Value> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    let pairs: Vec<(f64, f64)> = a
        .to_numeric::<f64>()?
        .into_iter()
        .zip(b.to_numeric::<f64>()?)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();
    if pairs.len() <= ddof {
        return Ok(Value::Null);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let cross: f64 = pairs.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    Ok(Value::Float64(cross / (pairs.len() - ddof) as f64))
}

/// 中央値
pub fn median(col: &Column) -> Result<Value> {
    let mut values = valid_f64(col)?;
    if values.is_empty() {
        return Ok(Value::Null);
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };
    Ok(Value::Float64(median))
}

/// First row's value (which may itself be null)
pub fn first(col: &Column) -> Value {
    col.get(0).unwrap_or(Value::Null)
}

/// Last row's value
pub fn last(col: &Column) -> Value {
    match col.len() {
        0 => Value::Null,
        n => col.get(n - 1).unwrap_or(Value::Null),
    }
}

//! Window functions for `mutate`. Under a grouped frame they run once per
//! partition, so every window stays inside its group.

use crate::column::{Column, Float64Column};
use crate::error::{Error, Result};

/// Moves values down by `periods` rows (up when negative), filling with nulls.
/// Keeps the column type.
pub fn shift(col: &Column, periods: isize) -> Result<Column> {
    let len = col.len() as isize;
    let indices: Vec<Option<usize>> = (0..len)
        .map(|i| {
            let src = i - periods;
            (0..len).contains(&src).then_some(src as usize)
        })
        .collect();
    col.take_opt(&indices)
}

/// 累積和; nulls stay null and do not reset the running total
pub fn cumsum(col: &Column) -> Result<Column> {
    let mut total = 0.0;
    let values = col
        .to_numeric::<f64>()?
        .into_iter()
        .map(|v| {
            v.map(|x| {
                total += x;
                total
            })
        })
        .collect();
    Ok(Column::Float64(Float64Column::from_options(values)))
}

/// 1-based rank, ties share the average of their positions; nulls stay null
pub fn rank(col: &Column) -> Result<Column> {
    let len = col.len();
    let mut order: Vec<usize> = (0..len).filter(|&i| !col.is_null(i)).collect();
    order.sort_by(|&a, &b| col.compare_rows(a, b));

    let mut ranks: Vec<Option<f64>> = vec![None; len];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && col.compare_rows(order[start], order[end]).is_eq() {
            end += 1;
        }
        // positions start..end are 0-based; ranks are 1-based
        let average = (start + end + 1) as f64 / 2.0;
        for &row in &order[start..end] {
            ranks[row] = Some(average);
        }
        start = end;
    }

    Ok(Column::Float64(Float64Column::from_options(ranks)))
}

/// Trailing-window mean. A window with fewer than `min_periods` present
/// values yields null.
pub fn rolling_mean(col: &Column, window: usize, min_periods: Option<usize>) -> Result<Column> {
    if window == 0 {
        return Err(Error::InvalidInput("window must be at least 1".to_string()));
    }
    let min_periods = min_periods.unwrap_or(window);
    let values = col.to_numeric::<f64>()?;

    let result = (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window - 1);
            let present: Vec<f64> = values[start..=i].iter().flatten().copied().collect();
            if present.len() >= min_periods && !present.is_empty() {
                Some(present.iter().sum::<f64>() / present.len() as f64)
            } else {
                None
            }
        })
        .collect();

    Ok(Column::Float64(Float64Column::from_options(result)))
}

/// Deviation from the column mean
pub fn center(col: &Column) -> Result<Column> {
    let values = col.to_numeric::<f64>()?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let mean = if present.is_empty() {
        0.0
    } else {
        present.iter().sum::<f64>() / present.len() as f64
    };
    col.map_f64(|x| x - mean)
}

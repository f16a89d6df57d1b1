use std::sync::Arc;

use crate::column::common::{gather_values, BitMask};
use crate::error::{Error, Result};

/// Float64型の列を表す構造体
///
/// NaN is treated as missing by every reader, whether or not the slot is
/// flagged in the null mask.
#[derive(Debug, Clone)]
pub struct Float64Column {
    pub(crate) data: Arc<[f64]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl Float64Column {
    /// 新しいFloat64Columnを作成する
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// NULL値を含むFloat64Columnを作成する
    pub fn with_nulls(data: Vec<f64>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn from_options(values: Vec<Option<f64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<f64> = values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Self::with_nulls(data, nulls)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// インデックスでデータを取得する
    pub fn get(&self, index: usize) -> Result<Option<f64>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if self.is_null(index) {
            return Ok(None);
        }

        Ok(Some(self.data[index]))
    }

    pub fn is_null(&self, index: usize) -> bool {
        let masked = self
            .null_mask
            .as_ref()
            .map(|mask| mask.is_set(index))
            .unwrap_or(false);
        masked || self.data[index].is_nan()
    }

    /// Raw storage, null slots hold NaN
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.data.len()).map(move |i| {
            if self.is_null(i) {
                None
            } else {
                Some(self.data[i])
            }
        })
    }

    /// データの合計を計算する（NULL値を除く）
    pub fn sum(&self) -> f64 {
        self.iter().flatten().sum()
    }

    /// データの平均を計算する（NULL値を除く）
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .iter()
            .flatten()
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    pub(crate) fn gather(&self, indices: &[Option<usize>]) -> Self {
        let (data, null_mask) = gather_values(&self.data, self.null_mask.as_ref(), indices);
        // gather fills missing slots with the default 0.0; keep NaN as the sentinel
        let data: Vec<f64> = data
            .into_iter()
            .zip(indices)
            .map(|(v, idx)| if idx.is_some() { v } else { f64::NAN })
            .collect();
        Self {
            data: data.into(),
            null_mask,
        }
    }
}

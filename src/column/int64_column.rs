use std::sync::Arc;

use crate::column::common::{gather_values, BitMask};
use crate::error::{Error, Result};

/// Int64型の列を表す構造体
#[derive(Debug, Clone)]
pub struct Int64Column {
    pub(crate) data: Arc<[i64]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl Int64Column {
    /// 新しいInt64Columnを作成する
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// NULL値を含むInt64Columnを作成する
    pub fn with_nulls(data: Vec<i64>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    /// Build from optional values; `None` becomes a null slot
    pub fn from_options(values: Vec<Option<i64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<i64> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
        Self::with_nulls(data, nulls)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// インデックスでデータを取得する
    pub fn get(&self, index: usize) -> Result<Option<i64>> {
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
        self.null_mask
            .as_ref()
            .map(|mask| mask.is_set(index))
            .unwrap_or(false)
    }

    /// Raw storage, null slots hold `0`
    pub fn values(&self) -> &[i64] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<i64>> + '_ {
        (0..self.data.len()).map(move |i| {
            if self.is_null(i) {
                None
            } else {
                Some(self.data[i])
            }
        })
    }

    /// データの合計を計算する（NULL値を除く）
    pub fn sum(&self) -> i64 {
        self.iter().flatten().sum()
    }

    pub(crate) fn gather(&self, indices: &[Option<usize>]) -> Self {
        let (data, null_mask) = gather_values(&self.data, self.null_mask.as_ref(), indices);
        Self {
            data: data.into(),
            null_mask,
        }
    }
}

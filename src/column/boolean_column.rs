use std::sync::Arc;

use crate::column::common::{gather_values, BitMask};
use crate::error::{Error, Result};

/// ブール型の列を表す構造体
#[derive(Debug, Clone)]
pub struct BooleanColumn {
    pub(crate) data: Arc<[bool]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl BooleanColumn {
    /// ブールベクトルから新しいBooleanColumnを作成する
    pub fn new(data: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// NULL値を含むBooleanColumnを作成する
    pub fn with_nulls(data: Vec<bool>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn from_options(values: Vec<Option<bool>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<bool> = values.into_iter().map(|v| v.unwrap_or(false)).collect();
        Self::with_nulls(data, nulls)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// インデックスでブール値を取得する
    pub fn get(&self, index: usize) -> Result<Option<bool>> {
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

    pub fn iter(&self) -> impl Iterator<Item = Option<bool>> + '_ {
        (0..self.data.len()).map(move |i| {
            if self.is_null(i) {
                None
            } else {
                Some(self.data[i])
            }
        })
    }

    /// Number of `true` slots, nulls excluded
    pub fn count_true(&self) -> usize {
        self.iter().filter(|v| *v == Some(true)).count()
    }

    pub(crate) fn gather(&self, indices: &[Option<usize>]) -> Self {
        let (data, null_mask) = gather_values(&self.data, self.null_mask.as_ref(), indices);
        Self {
            data: data.into(),
            null_mask,
        }
    }
}

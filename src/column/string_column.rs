use std::sync::Arc;

use crate::column::common::{gather_values, BitMask};
use crate::error::{Error, Result};

/// 文字列型の列を表す構造体
#[derive(Debug, Clone)]
pub struct StringColumn {
    pub(crate) data: Arc<[String]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl StringColumn {
    /// 文字列ベクトルから新しいStringColumnを作成する
    pub fn new(data: Vec<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// Convenience constructor from string slices
    pub fn from_strs(data: &[&str]) -> Self {
        Self::new(data.iter().map(|s| s.to_string()).collect())
    }

    /// NULL値を含むStringColumnを作成する
    pub fn with_nulls(data: Vec<String>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn from_options(values: Vec<Option<String>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<String> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
        Self::with_nulls(data, nulls)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// インデックスで文字列を取得する
    pub fn get(&self, index: usize) -> Result<Option<&str>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if self.is_null(index) {
            return Ok(None);
        }

        Ok(Some(self.data[index].as_str()))
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.null_mask
            .as_ref()
            .map(|mask| mask.is_set(index))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.data.len()).map(move |i| {
            if self.is_null(i) {
                None
            } else {
                Some(self.data[i].as_str())
            }
        })
    }

    /// Owned copy of every slot
    pub fn to_strings(&self) -> Vec<Option<String>> {
        self.iter().map(|s| s.map(str::to_string)).collect()
    }

    /// 部分文字列を含むかどうか（NULLはfalse）
    pub fn contains(&self, needle: &str) -> Vec<bool> {
        self.iter()
            .map(|s| s.map(|s| s.contains(needle)).unwrap_or(false))
            .collect()
    }

    pub(crate) fn gather(&self, indices: &[Option<usize>]) -> Self {
        let (data, null_mask) = gather_values(&self.data, self.null_mask.as_ref(), indices);
        Self {
            data: data.into(),
            null_mask,
        }
    }
}

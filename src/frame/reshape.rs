//! Wide/long reshaping. Not implemented yet.

use super::Frame;
use crate::error::{Error, Result};

impl Frame {
    /// Long format: stacks `columns` into `key`/`value` pairs
    pub fn gather<S: AsRef<str>>(&self, key: &str, value: &str, columns: &[S]) -> Result<Frame> {
        log::warn!(
            "gather({}, {}, {} columns) is not implemented",
            key,
            value,
            columns.len()
        );
        Err(Error::NotImplemented("gather".to_string()))
    }

    /// Wide format: one column per distinct value of `key`
    pub fn spread(&self, key: &str, value: &str) -> Result<Frame> {
        log::warn!("spread({}, {}) is not implemented", key, value);
        Err(Error::NotImplemented("spread".to_string()))
    }
}

use std::sync::Arc;

use crate::core::error::{Error, Result};

/// Structure representing an Int64 column
#[derive(Debug, Clone)]
pub struct Int64Column {
    pub(crate) data: Arc<[i64]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
}

impl Int64Column {
    /// Create a new Int64Column
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create an Int64Column with a name
    pub fn with_name(data: Vec<i64>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: Some(name.into()),
        }
    }

    /// Create an Int64Column with NULL values
    ///
    /// `nulls` marks rows by position; rows past its end read as present.
    pub fn with_nulls(data: Vec<i64>, nulls: Vec<bool>) -> Self {
        let null_mask = if nulls.iter().any(|&is_null| is_null) {
            Some(crate::column::common::utils::create_bitmask(&nulls))
        } else {
            None
        };

        Self {
            data: data.into(),
            null_mask,
            name: None,
        }
    }

    /// Get the name
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get data at the specified index
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

    /// Get the length of the column
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Unchecked row access for comparators; panics when out of range
    pub(crate) fn value_at(&self, index: usize) -> Option<i64> {
        let value = self.data[index];
        if self.is_null(index) {
            None
        } else {
            Some(value)
        }
    }

    fn is_null(&self, index: usize) -> bool {
        if let Some(ref mask) = self.null_mask {
            let byte_idx = index / 8;
            let bit_idx = index % 8;
            byte_idx < mask.len() && (mask[byte_idx] & (1 << bit_idx)) != 0
        } else {
            false
        }
    }
}

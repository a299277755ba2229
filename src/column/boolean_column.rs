use std::sync::Arc;

use crate::column::common::BitMask;
use crate::core::error::{Error, Result};

/// Structure representing a boolean column (bit-packed with BitMask)
#[derive(Debug, Clone)]
pub struct BooleanColumn {
    pub(crate) data: BitMask,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
    pub(crate) length: usize,
}

impl BooleanColumn {
    /// Create a new BooleanColumn from a vector of booleans
    pub fn new(data: Vec<bool>) -> Self {
        let length = data.len();
        let bitmask = BitMask::from_bools(&data);

        Self {
            data: bitmask,
            null_mask: None,
            name: None,
            length,
        }
    }

    /// Create a named BooleanColumn
    pub fn with_name(data: Vec<bool>, name: impl Into<String>) -> Self {
        let length = data.len();
        let bitmask = BitMask::from_bools(&data);

        Self {
            data: bitmask,
            null_mask: None,
            name: Some(name.into()),
            length,
        }
    }

    /// Create a BooleanColumn with NULL values
    ///
    /// `nulls` marks rows by position; rows past its end read as present.
    pub fn with_nulls(data: Vec<bool>, nulls: Vec<bool>) -> Self {
        let null_mask = if nulls.iter().any(|&is_null| is_null) {
            Some(crate::column::common::utils::create_bitmask(&nulls))
        } else {
            None
        };

        let length = data.len();
        let bitmask = BitMask::from_bools(&data);

        Self {
            data: bitmask,
            null_mask,
            name: None,
            length,
        }
    }

    /// Get the name
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get a boolean value by index
    pub fn get(&self, index: usize) -> Result<Option<bool>> {
        if index >= self.length {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.length,
            });
        }

        if self.is_null(index) {
            return Ok(None);
        }

        Ok(Some(self.data.bit(index)))
    }

    /// Get the length of the column
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Unchecked row access for comparators; panics when out of range
    pub(crate) fn value_at(&self, index: usize) -> Option<bool> {
        let value = self.data.bit(index);
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

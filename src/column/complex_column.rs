use std::fmt;
use std::sync::Arc;

use crate::core::error::{Error, Result};

/// Complex number with f64 real and imaginary parts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex64 {
    pub re: f64,
    pub im: f64,
}

impl Complex64 {
    /// Create a new complex value
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

/// Structure representing a complex-valued column
#[derive(Debug, Clone)]
pub struct ComplexColumn {
    pub(crate) data: Arc<[Complex64]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
}

impl ComplexColumn {
    /// Create a new ComplexColumn
    pub fn new(data: Vec<Complex64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create a ComplexColumn with a name
    pub fn with_name(data: Vec<Complex64>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: Some(name.into()),
        }
    }

    /// Create a ComplexColumn from separate real and imaginary parts
    pub fn from_parts(re: Vec<f64>, im: Vec<f64>) -> Result<Self> {
        if re.len() != im.len() {
            return Err(Error::LengthMismatch {
                expected: re.len(),
                found: im.len(),
            });
        }

        let data: Vec<Complex64> = re
            .into_iter()
            .zip(im)
            .map(|(re, im)| Complex64::new(re, im))
            .collect();

        Ok(Self::new(data))
    }

    /// Create a ComplexColumn with NULL values
    ///
    /// `nulls` marks rows by position; rows past its end read as present.
    pub fn with_nulls(data: Vec<Complex64>, nulls: Vec<bool>) -> Self {
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
    pub fn get(&self, index: usize) -> Result<Option<Complex64>> {
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
    pub(crate) fn value_at(&self, index: usize) -> Option<Complex64> {
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

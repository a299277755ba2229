//! Common definitions shared by the typed column implementations

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::column::boolean_column::BooleanColumn;
use crate::column::categorical_column::CategoricalColumn;
use crate::column::complex_column::ComplexColumn;
use crate::column::float64_column::Float64Column;
use crate::column::int64_column::Int64Column;
use crate::column::string_column::StringColumn;
use crate::core::error::{Error, Result};

/// Enum representing the storage kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Boolean,
    Complex128,
    Categorical,
}

/// Enum representing a column
///
/// This is a closed set: join key resolution matches on pairs of `Column`
/// values without a wildcard arm, so adding a variant fails compilation in
/// every place that must decide how the new kind joins.
#[derive(Debug, Clone)]
pub enum Column {
    Int64(Int64Column),
    Float64(Float64Column),
    String(StringColumn),
    Boolean(BooleanColumn),
    Complex128(ComplexColumn),
    Categorical(CategoricalColumn),
}

impl Column {
    /// Returns the length of the column
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(col) => col.len(),
            Column::Float64(col) => col.len(),
            Column::String(col) => col.len(),
            Column::Boolean(col) => col.len(),
            Column::Complex128(col) => col.len(),
            Column::Categorical(col) => col.len(),
        }
    }

    /// Returns whether the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the type of the column
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::String(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
            Column::Complex128(_) => ColumnType::Complex128,
            Column::Categorical(_) => ColumnType::Categorical,
        }
    }

    /// Returns the name of the column
    pub fn name(&self) -> Option<&str> {
        match self {
            Column::Int64(col) => col.name.as_deref(),
            Column::Float64(col) => col.name.as_deref(),
            Column::String(col) => col.name.as_deref(),
            Column::Boolean(col) => col.name.as_deref(),
            Column::Complex128(col) => col.name.as_deref(),
            Column::Categorical(col) => col.name.as_deref(),
        }
    }

    /// Casts to Int64Column
    pub fn as_int64(&self) -> Option<&Int64Column> {
        match self {
            Column::Int64(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to Float64Column
    pub fn as_float64(&self) -> Option<&Float64Column> {
        match self {
            Column::Float64(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to StringColumn
    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to BooleanColumn
    pub fn as_boolean(&self) -> Option<&BooleanColumn> {
        match self {
            Column::Boolean(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to ComplexColumn
    pub fn as_complex128(&self) -> Option<&ComplexColumn> {
        match self {
            Column::Complex128(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to CategoricalColumn
    pub fn as_categorical(&self) -> Option<&CategoricalColumn> {
        match self {
            Column::Categorical(col) => Some(col),
            _ => None,
        }
    }
}

impl From<Int64Column> for Column {
    fn from(col: Int64Column) -> Self {
        Column::Int64(col)
    }
}

impl From<Float64Column> for Column {
    fn from(col: Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<StringColumn> for Column {
    fn from(col: StringColumn) -> Self {
        Column::String(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<ComplexColumn> for Column {
    fn from(col: ComplexColumn) -> Self {
        Column::Complex128(col)
    }
}

impl From<CategoricalColumn> for Column {
    fn from(col: CategoricalColumn) -> Self {
        Column::Categorical(col)
    }
}

/// Bitmask holding one bit per row
///
/// Backs boolean column storage.
#[derive(Debug, Clone)]
pub struct BitMask {
    pub(crate) data: Arc<[u8]>,
    pub(crate) len: usize,
}

impl BitMask {
    /// Creates a bitmask from a vector of boolean values
    pub fn from_bools(bools: &[bool]) -> Self {
        let length = bools.len();
        let bytes_needed = (length + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_set) in bools.iter().enumerate() {
            if is_set {
                let byte_idx = i / 8;
                let bit_idx = i % 8;
                data[byte_idx] |= 1 << bit_idx;
            }
        }

        Self {
            data: data.into(),
            len: length,
        }
    }

    /// Checks if a bit is set
    pub fn get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len,
            });
        }

        Ok(self.bit(index))
    }

    /// Reads a bit without the Result wrapper; panics when out of range
    pub(crate) fn bit(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "bit index {} out of range for mask of {} bits",
            index,
            self.len
        );
        (self.data[index / 8] & (1 << (index % 8))) != 0
    }

    /// Returns the length of the bitmask
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the bitmask is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Utility functions for column operations
pub mod utils {
    use std::sync::Arc;

    /// Creates a null bitmask from a vector of boolean values (1 = null)
    pub fn create_bitmask(nulls: &[bool]) -> Arc<[u8]> {
        let length = nulls.len();
        let bytes_needed = (length + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_null) in nulls.iter().enumerate() {
            if is_null {
                let byte_idx = i / 8;
                let bit_idx = i % 8;
                data[byte_idx] |= 1 << bit_idx;
            }
        }

        data.into()
    }

    /// Converts a bitmask to a vector of boolean values
    pub fn bitmask_to_bools(mask: &[u8], len: usize) -> Vec<bool> {
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let byte_idx = i / 8;
            let bit_idx = i % 8;
            let is_set = (mask[byte_idx] & (1 << bit_idx)) != 0;
            result.push(is_set);
        }

        result
    }
}

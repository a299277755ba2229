mod boolean_column;
mod categorical_column;
mod common;
mod complex_column;
mod float64_column;
mod int64_column;
mod string_column;

pub use boolean_column::BooleanColumn;
pub use categorical_column::CategoricalColumn;
pub use common::{BitMask, Column, ColumnType};
pub use complex_column::{Complex64, ComplexColumn};
pub use float64_column::Float64Column;
pub use int64_column::Int64Column;
pub use string_column::{StringColumn, TextDatum, TextEncoding};

// Re-export column utility functions
pub use common::utils;

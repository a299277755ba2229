//! JoinRS: join key resolution and value normalization for columnar tables
//!
//! When two tables are joined on a pair of key columns, the pair's storage
//! kinds decide how rows compare: directly, after promotion into a common
//! numeric type, after text canonicalization, or not at all. This crate
//! implements that decision as a total function over a closed set of
//! column kinds and hands back a ready-to-use comparison strategy.
//!
//! ```
//! use joinrs::{Int64Column, KeyColumn, KeyComparator, KeyResolver};
//!
//! let left = KeyColumn::new(Int64Column::new(vec![1, 2, 3]));
//! let right = KeyColumn::new(Int64Column::new(vec![3, 4]));
//!
//! let resolver = KeyResolver::new();
//! let cmp = resolver.resolve(&left, &right, "id", "id", true, false).unwrap();
//! assert!(cmp.equal(2, 0));
//! ```

// Core module with fundamental definitions
pub mod core;

// Column storage types
pub mod column;

// Join key resolution
pub mod join;

// Re-export core types
pub use crate::core::error::{Error, Result};

// Re-export column types
pub use crate::column::{
    BitMask, BooleanColumn, CategoricalColumn, Column, ColumnType, Complex64, ComplexColumn,
    Float64Column, Int64Column, StringColumn, TextDatum, TextEncoding,
};

// Re-export join types
pub use crate::join::{
    normalize_text, AttrValue, KeyColumn, KeyComparator, KeyResolver, TemporalKind,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

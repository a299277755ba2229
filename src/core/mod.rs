//! Core module with fundamental definitions shared across the crate

pub mod error;

pub use self::error::{Error, Result};

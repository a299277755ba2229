//! Join key resolution and value normalization
//!
//! The entry point is [`KeyResolver::resolve`]: given two key columns it
//! either returns the [`KeyComparator`] a join should use for that pair or
//! rejects the pairing. [`normalize_text`] exposes the text
//! canonicalization the resolver applies when a pairing coerces to text.

mod comparator;
mod encode;
mod key_column;
mod resolve;

pub use comparator::KeyComparator;
pub use encode::normalize_text;
pub use key_column::{AttrValue, KeyColumn, TemporalKind};
pub use resolve::KeyResolver;

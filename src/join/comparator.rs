//! Row-level comparison strategies produced by join key resolution
//!
//! A resolved pair of key columns yields a [`KeyComparator`]: equality and
//! per-side bucket hashing with the missing-value policy baked in. Mixed
//! storage pairs are promoted into a common comparison type before
//! comparing, so an integer 2 equals a float 2.0 across the pair.

use std::fmt::Debug;
use std::hash::Hasher;
use std::marker::PhantomData;

use rustc_hash::FxHasher;

use crate::column::{
    BooleanColumn, CategoricalColumn, Complex64, ComplexColumn, Float64Column, Int64Column,
    StringColumn, TextDatum,
};

/// Bucket hash reserved for missing values
const MISSING_KEY_HASH: u64 = 0x9e37_79b9_7f4a_7c15;

/// Row-level comparison strategy over a resolved pair of join keys
///
/// Rows that compare equal hash identically on both sides, so the hashes
/// are directly usable as bucket keys when building a join index.
pub trait KeyComparator: Debug + Send + Sync {
    /// Compare the left row at `left_index` with the right row at `right_index`
    fn equal(&self, left_index: usize, right_index: usize) -> bool;

    /// Bucket hash of the left row at `index`
    fn hash_left(&self, index: usize) -> u64;

    /// Bucket hash of the right row at `index`
    fn hash_right(&self, index: usize) -> u64;

    /// Number of rows on the left side
    fn left_len(&self) -> usize;

    /// Number of rows on the right side
    fn right_len(&self) -> usize;
}

/// Storage read out as the promoted comparison type `C`
pub(crate) trait KeySource<C>: Debug + Send + Sync {
    /// Value at `index`, or None when the row is missing
    fn key_at(&self, index: usize) -> Option<C>;

    /// Number of rows
    fn len(&self) -> usize;
}

/// Equality and hashing semantics of a promoted comparison type
pub(crate) trait KeyValue: Copy + Debug {
    /// Compare two present values under the missing-value policy
    fn key_eq(self, other: Self, na_matches: bool) -> bool;

    /// Feed the canonical form of this value into a hasher
    fn write_hash(self, state: &mut FxHasher);
}

impl KeyValue for i64 {
    fn key_eq(self, other: Self, _na_matches: bool) -> bool {
        self == other
    }

    fn write_hash(self, state: &mut FxHasher) {
        state.write_i64(self);
    }
}

impl KeyValue for f64 {
    /// NaN is a value here, not a missing marker: it matches another NaN
    /// exactly when the policy says missing values match, and nothing else.
    fn key_eq(self, other: Self, na_matches: bool) -> bool {
        if self.is_nan() || other.is_nan() {
            return na_matches && self.is_nan() && other.is_nan();
        }
        self == other
    }

    fn write_hash(self, state: &mut FxHasher) {
        state.write_u64(canonical_float_bits(self));
    }
}

impl KeyValue for Complex64 {
    fn key_eq(self, other: Self, na_matches: bool) -> bool {
        self.re.key_eq(other.re, na_matches) && self.im.key_eq(other.im, na_matches)
    }

    fn write_hash(self, state: &mut FxHasher) {
        state.write_u64(canonical_float_bits(self.re));
        state.write_u64(canonical_float_bits(self.im));
    }
}

/// Collapse the bit patterns float equality conflates: all NaNs hash the
/// same and -0.0 hashes like 0.0.
fn canonical_float_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0u64
    } else {
        value.to_bits()
    }
}

impl KeySource<i64> for Int64Column {
    fn key_at(&self, index: usize) -> Option<i64> {
        self.value_at(index)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<f64> for Int64Column {
    fn key_at(&self, index: usize) -> Option<f64> {
        self.value_at(index).map(|value| value as f64)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<f64> for Float64Column {
    fn key_at(&self, index: usize) -> Option<f64> {
        self.value_at(index)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<i64> for BooleanColumn {
    fn key_at(&self, index: usize) -> Option<i64> {
        self.value_at(index).map(i64::from)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<f64> for BooleanColumn {
    fn key_at(&self, index: usize) -> Option<f64> {
        self.value_at(index).map(|value| if value { 1.0 } else { 0.0 })
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<i64> for CategoricalColumn {
    fn key_at(&self, index: usize) -> Option<i64> {
        self.code_at(index)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<f64> for CategoricalColumn {
    fn key_at(&self, index: usize) -> Option<f64> {
        self.code_at(index).map(|code| code as f64)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl KeySource<Complex64> for ComplexColumn {
    fn key_at(&self, index: usize) -> Option<Complex64> {
        self.value_at(index)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

/// Comparator over two storages promoted into a common comparison type
#[derive(Debug)]
pub(crate) struct TypedComparator<L, R, C> {
    left: L,
    right: R,
    na_matches: bool,
    promoted: PhantomData<fn() -> C>,
}

impl<L, R, C> TypedComparator<L, R, C> {
    pub(crate) fn new(left: L, right: R, na_matches: bool) -> Self {
        Self {
            left,
            right,
            na_matches,
            promoted: PhantomData,
        }
    }
}

impl<L, R, C> KeyComparator for TypedComparator<L, R, C>
where
    L: KeySource<C>,
    R: KeySource<C>,
    C: KeyValue,
{
    fn equal(&self, left_index: usize, right_index: usize) -> bool {
        match (self.left.key_at(left_index), self.right.key_at(right_index)) {
            (Some(left), Some(right)) => left.key_eq(right, self.na_matches),
            (None, None) => self.na_matches,
            _ => false,
        }
    }

    fn hash_left(&self, index: usize) -> u64 {
        hash_key(self.left.key_at(index))
    }

    fn hash_right(&self, index: usize) -> u64 {
        hash_key(self.right.key_at(index))
    }

    fn left_len(&self) -> usize {
        self.left.len()
    }

    fn right_len(&self) -> usize {
        self.right.len()
    }
}

/// Comparator over two canonical text columns, byte-wise
#[derive(Debug)]
pub(crate) struct TextComparator {
    left: StringColumn,
    right: StringColumn,
    na_matches: bool,
}

impl TextComparator {
    pub(crate) fn new(left: StringColumn, right: StringColumn, na_matches: bool) -> Self {
        Self {
            left,
            right,
            na_matches,
        }
    }
}

impl KeyComparator for TextComparator {
    fn equal(&self, left_index: usize, right_index: usize) -> bool {
        match (self.left.value_at(left_index), self.right.value_at(right_index)) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.na_matches,
            _ => false,
        }
    }

    fn hash_left(&self, index: usize) -> u64 {
        hash_text(self.left.value_at(index))
    }

    fn hash_right(&self, index: usize) -> u64 {
        hash_text(self.right.value_at(index))
    }

    fn left_len(&self) -> usize {
        self.left.len()
    }

    fn right_len(&self) -> usize {
        self.right.len()
    }
}

fn hash_key<C: KeyValue>(key: Option<C>) -> u64 {
    match key {
        None => MISSING_KEY_HASH,
        Some(value) => {
            let mut state = FxHasher::default();
            value.write_hash(&mut state);
            state.finish()
        }
    }
}

fn hash_text(datum: Option<&TextDatum>) -> u64 {
    match datum {
        None => MISSING_KEY_HASH,
        Some(datum) => {
            let mut state = FxHasher::default();
            state.write(datum.as_bytes());
            state.finish()
        }
    }
}

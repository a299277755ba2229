//! Join key resolution
//!
//! Decides, for one pair of key columns, the comparison strategy a join
//! will use, coercing to text or rejecting the pairing where the storage
//! kinds require it. Calendar-tagged columns are checked before storage
//! kinds so a date never silently joins against a plain number.

use std::fmt;

use crate::column::{Column, Complex64};
use crate::core::error::{Error, Result};
use crate::join::comparator::{KeyComparator, TextComparator, TypedComparator};
use crate::join::encode::normalize_to_string;
use crate::join::key_column::{KeyColumn, TemporalKind};

type WarningSink = Box<dyn Fn(&str) + Send + Sync>;
type AttrPredicate = Box<dyn Fn(&KeyColumn, &KeyColumn) -> bool + Send + Sync>;

/// Resolves pairs of key columns into comparison strategies
///
/// The resolver owns two injected collaborators: the sink that receives
/// advisory diagnostics (by default they go to the `log` facade as
/// warnings) and the predicate deciding whether two columns' attributes
/// are compatible (by default, map equality). Both can be replaced with
/// the builder methods.
pub struct KeyResolver {
    sink: WarningSink,
    attr_equal: AttrPredicate,
}

impl KeyResolver {
    /// Create a resolver with the default sink and attribute predicate
    pub fn new() -> Self {
        Self {
            sink: Box::new(|message| log::warn!("{}", message)),
            attr_equal: Box::new(|left, right| left.attrs() == right.attrs()),
        }
    }

    /// Replace the diagnostic sink, consuming and returning the resolver
    pub fn with_warning_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replace the attribute-compatibility predicate, consuming and
    /// returning the resolver
    ///
    /// The predicate must be total and side-effect-free; it may be invoked
    /// even when diagnostics are suppressed.
    pub fn with_attr_equal(
        mut self,
        attr_equal: impl Fn(&KeyColumn, &KeyColumn) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.attr_equal = Box::new(attr_equal);
        self
    }

    /// Resolve the comparison strategy for one pair of join keys
    ///
    /// `left_name` and `right_name` are the key names as written in the
    /// join request; they only feed diagnostics. `warn` suppresses
    /// the advisory diagnostics when false, never the hard failures.
    /// `accept_na_match` fixes the missing-value policy of the returned
    /// strategy: when true, missing matches missing (and NaN matches NaN).
    ///
    /// At most one diagnostic is emitted per call.
    pub fn resolve(
        &self,
        left: &KeyColumn,
        right: &KeyColumn,
        left_name: &str,
        right_name: &str,
        warn: bool,
        accept_na_match: bool,
    ) -> Result<Box<dyn KeyComparator>> {
        match (left.temporal(), right.temporal()) {
            (Some(TemporalKind::Date), Some(TemporalKind::Date)) => {
                return date_strategy(left, right, accept_na_match);
            }
            (Some(TemporalKind::Date), _) | (_, Some(TemporalKind::Date)) => {
                return Err(Error::IncompatibleTypes(
                    "cannot join a Date object with an object that is not a Date object"
                        .to_string(),
                ));
            }
            (Some(TemporalKind::Timestamp), Some(TemporalKind::Timestamp)) => {
                return timestamp_strategy(left, right, accept_na_match);
            }
            (Some(TemporalKind::Timestamp), None) | (None, Some(TemporalKind::Timestamp)) => {
                return Err(Error::IncompatibleTypes(
                    "cannot join a POSIXct object with an object that is not a POSIXct object"
                        .to_string(),
                ));
            }
            (None, None) => {}
        }

        // Storage-kind matrix. Every pairing is written out so a new
        // column kind cannot fall through to a silent default.
        match (left.data(), right.data()) {
            (Column::Int64(l), Column::Int64(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, i64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Int64(l), Column::Float64(r)) => {
                // Promotion across the integer/float boundary is reserved
                // for float columns carrying no metadata of their own.
                if right.is_bare() {
                    self.check_attributes(left, right, left_name, right_name, warn);
                    Ok(Box::new(TypedComparator::<_, _, f64>::new(
                        l.clone(),
                        r.clone(),
                        accept_na_match,
                    )))
                } else {
                    Err(incompatible(left, right, left_name, right_name))
                }
            }
            (Column::Int64(l), Column::Boolean(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, i64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Int64(_), Column::String(_) | Column::Complex128(_) | Column::Categorical(_)) => {
                Err(incompatible(left, right, left_name, right_name))
            }

            (Column::Float64(l), Column::Float64(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, f64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Float64(l), Column::Int64(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, f64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Float64(l), Column::Categorical(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, f64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Float64(_), Column::Boolean(_) | Column::String(_) | Column::Complex128(_)) => {
                Err(incompatible(left, right, left_name, right_name))
            }

            (Column::Boolean(l), Column::Boolean(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, i64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Boolean(l), Column::Int64(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, i64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Boolean(l), Column::Float64(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, f64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Boolean(l), Column::Categorical(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, i64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (Column::Boolean(_), Column::String(_) | Column::Complex128(_)) => {
                Err(incompatible(left, right, left_name, right_name))
            }

            (Column::String(_), Column::String(_)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(text_strategy(left, right, accept_na_match))
            }
            (Column::String(_), Column::Categorical(_)) => {
                self.warn_key(
                    left_name,
                    right_name,
                    "joining character vector and factor, coercing into character vector",
                    warn,
                );
                Ok(text_strategy(left, right, accept_na_match))
            }
            (
                Column::String(_),
                Column::Int64(_) | Column::Float64(_) | Column::Boolean(_) | Column::Complex128(_),
            ) => Err(incompatible(left, right, left_name, right_name)),

            (Column::Categorical(l), Column::Categorical(r)) => {
                if l.has_same_levels(r) {
                    self.check_attributes(left, right, left_name, right_name, warn);
                    Ok(Box::new(TypedComparator::<_, _, i64>::new(
                        l.clone(),
                        r.clone(),
                        accept_na_match,
                    )))
                } else {
                    self.warn_key(
                        left_name,
                        right_name,
                        "joining factors with different levels, coercing to character vector",
                        warn,
                    );
                    Ok(text_strategy(left, right, accept_na_match))
                }
            }
            (Column::Categorical(_), Column::String(_)) => {
                self.warn_key(
                    left_name,
                    right_name,
                    "joining factor and character vector, coercing into character vector",
                    warn,
                );
                Ok(text_strategy(left, right, accept_na_match))
            }
            (
                Column::Categorical(_),
                Column::Int64(_) | Column::Float64(_) | Column::Boolean(_) | Column::Complex128(_),
            ) => Err(incompatible(left, right, left_name, right_name)),

            (Column::Complex128(l), Column::Complex128(r)) => {
                self.check_attributes(left, right, left_name, right_name, warn);
                Ok(Box::new(TypedComparator::<_, _, Complex64>::new(
                    l.clone(),
                    r.clone(),
                    accept_na_match,
                )))
            }
            (
                Column::Complex128(_),
                Column::Int64(_)
                | Column::Float64(_)
                | Column::Boolean(_)
                | Column::String(_)
                | Column::Categorical(_),
            ) => Err(incompatible(left, right, left_name, right_name)),
        }
    }

    /// Emit one advisory diagnostic about a key pair
    ///
    /// Uses the single-name form when both sides share a name.
    fn warn_key(&self, left_name: &str, right_name: &str, message: &str, warn: bool) {
        if !warn {
            return;
        }

        if left_name == right_name {
            (self.sink)(&format!("Variable `{}` {}", left_name, message));
        } else {
            (self.sink)(&format!(
                "Variable `{}`/`{}` {}",
                left_name, right_name, message
            ));
        }
    }

    fn check_attributes(
        &self,
        left: &KeyColumn,
        right: &KeyColumn,
        left_name: &str,
        right_name: &str,
        warn: bool,
    ) {
        if !(self.attr_equal)(left, right) {
            self.warn_key(
                left_name,
                right_name,
                "has different attributes on RHS and LHS of join",
                warn,
            );
        }
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyResolver").finish_non_exhaustive()
    }
}

/// Strategy for a pair of date keys; both sides must be stored as days in
/// integer or float columns
fn date_strategy(
    left: &KeyColumn,
    right: &KeyColumn,
    accept_na_match: bool,
) -> Result<Box<dyn KeyComparator>> {
    match (left.data(), right.data()) {
        (Column::Int64(l), Column::Int64(r)) => Ok(Box::new(TypedComparator::<_, _, i64>::new(
            l.clone(),
            r.clone(),
            accept_na_match,
        ))),
        (Column::Int64(l), Column::Float64(r)) => Ok(Box::new(
            TypedComparator::<_, _, f64>::new(l.clone(), r.clone(), accept_na_match),
        )),
        (Column::Float64(l), Column::Int64(r)) => Ok(Box::new(
            TypedComparator::<_, _, f64>::new(l.clone(), r.clone(), accept_na_match),
        )),
        (Column::Float64(l), Column::Float64(r)) => Ok(Box::new(
            TypedComparator::<_, _, f64>::new(l.clone(), r.clone(), accept_na_match),
        )),
        _ => Err(Error::InvalidRepresentation(
            "Date objects should be represented as integer or numeric".to_string(),
        )),
    }
}

/// Strategy for a pair of timestamp keys; both sides must be stored as
/// fractional epoch seconds in float columns
fn timestamp_strategy(
    left: &KeyColumn,
    right: &KeyColumn,
    accept_na_match: bool,
) -> Result<Box<dyn KeyComparator>> {
    match (left.data(), right.data()) {
        (Column::Float64(l), Column::Float64(r)) => Ok(Box::new(
            TypedComparator::<_, _, f64>::new(l.clone(), r.clone(), accept_na_match),
        )),
        _ => Err(Error::InvalidRepresentation(
            "POSIXct objects should be represented as numeric".to_string(),
        )),
    }
}

/// Text strategy over both sides normalized to canonical form
fn text_strategy(left: &KeyColumn, right: &KeyColumn, accept_na_match: bool) -> Box<dyn KeyComparator> {
    Box::new(TextComparator::new(
        normalize_to_string(left.data()),
        normalize_to_string(right.data()),
        accept_na_match,
    ))
}

fn incompatible(left: &KeyColumn, right: &KeyColumn, left_name: &str, right_name: &str) -> Error {
    Error::IncompatibleTypes(format!(
        "Can't join on '{}' x '{}' because of incompatible types ({} / {})",
        left_name,
        right_name,
        left.kind_label(),
        right.kind_label()
    ))
}

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnType, Float64Column, Int64Column};

/// Calendar interpretation attached to a key column
///
/// The tag takes precedence over the storage kind during join key
/// resolution: a tagged column only ever joins against a column tagged the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalKind {
    /// Calendar date, stored as days since the Unix epoch
    Date,
    /// Point in time, stored as fractional seconds since the Unix epoch
    Timestamp,
}

/// Attribute value attached to a key column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    StrList(Vec<String>),
    IntList(Vec<i64>),
}

// Days from 0001-01-01 to the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i64 = 719_163;

/// A column prepared for use as a join key
///
/// Wraps column storage together with the metadata resolution consults:
/// named attributes (ordered, so attribute maps compare deterministically)
/// and an optional calendar interpretation.
#[derive(Debug, Clone)]
pub struct KeyColumn {
    data: Column,
    attrs: BTreeMap<String, AttrValue>,
    temporal: Option<TemporalKind>,
}

impl KeyColumn {
    /// Create a key column over plain storage
    pub fn new(data: impl Into<Column>) -> Self {
        Self {
            data: data.into(),
            attrs: BTreeMap::new(),
            temporal: None,
        }
    }

    /// Attach an attribute, consuming and returning the column
    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Attach a calendar interpretation, consuming and returning the column
    pub fn with_temporal(mut self, temporal: TemporalKind) -> Self {
        self.temporal = Some(temporal);
        self
    }

    /// Build a date key from calendar dates (days since the Unix epoch)
    pub fn from_dates(dates: Vec<Option<NaiveDate>>) -> Self {
        let mut data: Vec<i64> = Vec::with_capacity(dates.len());
        let mut nulls: Vec<bool> = vec![false; dates.len()];

        for (i, date) in dates.iter().enumerate() {
            match date {
                Some(date) => {
                    data.push(i64::from(date.num_days_from_ce()) - UNIX_EPOCH_CE_DAYS)
                }
                None => {
                    data.push(0);
                    nulls[i] = true;
                }
            }
        }

        Self::new(Int64Column::with_nulls(data, nulls)).with_temporal(TemporalKind::Date)
    }

    /// Build a timestamp key from instants (fractional seconds since the
    /// Unix epoch, millisecond precision)
    pub fn from_timestamps(timestamps: Vec<Option<DateTime<Utc>>>) -> Self {
        let mut data: Vec<f64> = Vec::with_capacity(timestamps.len());
        let mut nulls: Vec<bool> = vec![false; timestamps.len()];

        for (i, instant) in timestamps.iter().enumerate() {
            match instant {
                Some(instant) => data.push(instant.timestamp_millis() as f64 / 1000.0),
                None => {
                    data.push(0.0);
                    nulls[i] = true;
                }
            }
        }

        Self::new(Float64Column::with_nulls(data, nulls))
            .with_temporal(TemporalKind::Timestamp)
            .with_attr("tzone", AttrValue::Str("UTC".to_string()))
    }

    /// Get the underlying storage
    pub fn data(&self) -> &Column {
        &self.data
    }

    /// Get the attributes
    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }

    /// Get the calendar interpretation, if any
    pub fn temporal(&self) -> Option<TemporalKind> {
        self.temporal
    }

    /// Get the storage column's name, if set
    pub fn name(&self) -> Option<&str> {
        self.data.name()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this column carries no metadata beyond names and comments
    ///
    /// Bare numeric columns may be promoted across the integer/float
    /// boundary; anything with extra attributes or a calendar tag may not.
    pub fn is_bare(&self) -> bool {
        self.temporal.is_none()
            && self.attrs.keys().all(|key| key == "names" || key == "comment")
    }

    /// Kind label used in resolution diagnostics
    pub fn kind_label(&self) -> &'static str {
        match self.temporal {
            Some(TemporalKind::Date) => "date",
            Some(TemporalKind::Timestamp) => "datetime",
            None => match self.data.column_type() {
                ColumnType::Int64 => "integer",
                ColumnType::Float64 => "numeric",
                ColumnType::String => "character",
                ColumnType::Boolean => "logical",
                ColumnType::Complex128 => "complex",
                ColumnType::Categorical => "factor",
            },
        }
    }
}

impl From<Column> for KeyColumn {
    fn from(data: Column) -> Self {
        Self::new(data)
    }
}

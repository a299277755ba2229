use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::column::string_column::{StringColumn, TextDatum};
use crate::core::error::{Error, Result};

/// Structure representing a categorical column
///
/// Values are `i32` codes indexing into an ordered list of text levels.
/// A negative or out-of-range code reads as a missing value, so the codes
/// themselves are the only missing-value channel.
#[derive(Debug, Clone)]
pub struct CategoricalColumn {
    pub(crate) codes: Arc<[i32]>,
    pub(crate) levels: Arc<[TextDatum]>,
    pub(crate) name: Option<String>,
}

impl CategoricalColumn {
    /// Create a new CategoricalColumn from codes and UTF-8 levels
    pub fn new(codes: Vec<i32>, levels: Vec<String>) -> Result<Self> {
        let levels: Vec<TextDatum> = levels.into_iter().map(TextDatum::utf8).collect();
        Self::with_level_datums(codes, levels)
    }

    /// Create a new CategoricalColumn from codes and prepared level datums
    pub fn with_level_datums(codes: Vec<i32>, levels: Vec<TextDatum>) -> Result<Self> {
        let mut seen: HashSet<&[u8]> = HashSet::new();
        for level in &levels {
            if !seen.insert(level.as_bytes()) {
                return Err(Error::Consistency(format!(
                    "Duplicate level value: {}",
                    level
                )));
            }
        }

        Ok(Self {
            codes: codes.into(),
            levels: levels.into(),
            name: None,
        })
    }

    /// Create a CategoricalColumn from optional values, inferring levels
    ///
    /// Levels are recorded in order of first appearance; None becomes a
    /// missing code.
    pub fn from_values(values: &[Option<&str>]) -> Self {
        let mut levels: Vec<TextDatum> = Vec::new();
        let mut seen: HashMap<&str, i32> = HashMap::new();
        let mut codes: Vec<i32> = Vec::with_capacity(values.len());

        for value in values {
            match value {
                None => codes.push(-1),
                Some(text) => {
                    let code = match seen.get(text) {
                        Some(&code) => code,
                        None => {
                            let code = levels.len() as i32;
                            seen.insert(*text, code);
                            levels.push(TextDatum::utf8(*text));
                            code
                        }
                    };
                    codes.push(code);
                }
            }
        }

        Self {
            codes: codes.into(),
            levels: levels.into(),
            name: None,
        }
    }

    /// Set the name, consuming and returning the column
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the name
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the codes
    pub fn codes(&self) -> &[i32] {
        &self.codes
    }

    /// Get the levels
    pub fn levels(&self) -> &[TextDatum] {
        &self.levels
    }

    /// Whether both columns have byte-identical levels in the same order
    pub fn has_same_levels(&self, other: &CategoricalColumn) -> bool {
        self.levels == other.levels
    }

    /// Get the label at the specified index; None for a missing code
    pub fn get(&self, index: usize) -> Result<Option<&TextDatum>> {
        if index >= self.codes.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.codes.len(),
            });
        }

        let code = self.codes[index];
        if code < 0 || code as usize >= self.levels.len() {
            return Ok(None);
        }

        Ok(Some(&self.levels[code as usize]))
    }

    /// Get the length of the column
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Expand codes into a text column over canonicalized levels
    ///
    /// Every valid code becomes its level's text; missing and out-of-range
    /// codes become NULL values.
    pub fn expand_to_text(&self) -> StringColumn {
        let levels = self.canonical_levels();

        let mut data: Vec<TextDatum> = Vec::with_capacity(self.codes.len());
        let mut nulls: Vec<bool> = vec![false; self.codes.len()];

        for (i, &code) in self.codes.iter().enumerate() {
            if code < 0 || code as usize >= levels.len() {
                data.push(TextDatum::utf8(""));
                nulls[i] = true;
            } else {
                data.push(levels[code as usize].clone());
            }
        }

        let mut column = StringColumn::from_datums_with_nulls(data, nulls);
        column.name = self.name.clone();
        column
    }

    /// Valid code at the specified index as an integer key
    pub(crate) fn code_at(&self, index: usize) -> Option<i64> {
        let code = self.codes[index];
        if code < 0 || code as usize >= self.levels.len() {
            None
        } else {
            Some(i64::from(code))
        }
    }

    fn canonical_levels(&self) -> Arc<[TextDatum]> {
        if self.levels.iter().all(|level| level.is_canonical()) {
            self.levels.clone()
        } else {
            self.levels.iter().map(|level| level.to_canonical()).collect()
        }
    }
}

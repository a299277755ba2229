use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Declared encoding of a text value
///
/// `Ascii` and `Utf8` are canonical; `Latin1` values must be re-encoded
/// before they can be compared against canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    Ascii,
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// Whether values in this encoding compare correctly against UTF-8 text
    pub fn is_canonical(&self) -> bool {
        matches!(self, TextEncoding::Ascii | TextEncoding::Utf8)
    }
}

/// One text value: raw bytes plus their declared encoding
///
/// Equality and hashing are byte-wise and ignore the declared encoding, so
/// two datums representing the same character sequence in different
/// encodings are unequal until both are canonicalized.
#[derive(Debug, Clone)]
pub struct TextDatum {
    bytes: Arc<[u8]>,
    encoding: TextEncoding,
}

impl TextDatum {
    /// Create a datum from UTF-8 text
    pub fn utf8(text: impl Into<String>) -> Self {
        let text = text.into();
        let encoding = if text.is_ascii() {
            TextEncoding::Ascii
        } else {
            TextEncoding::Utf8
        };

        Self {
            bytes: text.into_bytes().into(),
            encoding,
        }
    }

    /// Create a datum from Latin-1 bytes
    ///
    /// Pure ASCII input is marked canonical directly since the encodings
    /// agree on that range.
    pub fn latin1(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let encoding = if bytes.is_ascii() {
            TextEncoding::Ascii
        } else {
            TextEncoding::Latin1
        };

        Self {
            bytes: bytes.into(),
            encoding,
        }
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the declared encoding
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Whether this datum is already in canonical form
    pub fn is_canonical(&self) -> bool {
        self.encoding.is_canonical()
    }

    /// View as a string slice; None when the datum is not canonical
    pub fn as_str(&self) -> Option<&str> {
        if self.is_canonical() {
            std::str::from_utf8(&self.bytes).ok()
        } else {
            None
        }
    }

    /// Return this datum re-encoded to canonical form
    ///
    /// Canonical datums are returned as cheap clones. Latin-1 bytes are
    /// decoded through the WHATWG `latin1` mapping (windows-1252), which is
    /// total over single bytes.
    pub fn to_canonical(&self) -> TextDatum {
        match self.encoding {
            TextEncoding::Ascii | TextEncoding::Utf8 => self.clone(),
            TextEncoding::Latin1 => {
                let (decoded, _, _) =
                    encoding_rs::WINDOWS_1252.decode(&self.bytes);
                TextDatum::utf8(decoded.into_owned())
            }
        }
    }
}

impl PartialEq for TextDatum {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for TextDatum {}

impl Hash for TextDatum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for TextDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoding {
            TextEncoding::Ascii | TextEncoding::Utf8 => {
                f.write_str(&String::from_utf8_lossy(&self.bytes))
            }
            TextEncoding::Latin1 => {
                let (decoded, _, _) =
                    encoding_rs::WINDOWS_1252.decode(&self.bytes);
                f.write_str(&decoded)
            }
        }
    }
}

/// Structure representing a string column
#[derive(Debug, Clone)]
pub struct StringColumn {
    pub(crate) data: Arc<[TextDatum]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
}

impl StringColumn {
    /// Create a new StringColumn from UTF-8 strings
    pub fn new(data: Vec<String>) -> Self {
        let data: Vec<TextDatum> = data.into_iter().map(TextDatum::utf8).collect();

        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create a StringColumn with a name
    pub fn with_name(data: Vec<String>, name: impl Into<String>) -> Self {
        let mut column = Self::new(data);
        column.name = Some(name.into());
        column
    }

    /// Create a StringColumn with NULL values
    ///
    /// `nulls` marks rows by position; rows past its end read as present.
    pub fn with_nulls(data: Vec<String>, nulls: Vec<bool>) -> Self {
        let null_mask = if nulls.iter().any(|&is_null| is_null) {
            Some(crate::column::common::utils::create_bitmask(&nulls))
        } else {
            None
        };

        let mut column = Self::new(data);
        column.null_mask = null_mask;
        column
    }

    /// Create a StringColumn from prepared datums
    pub fn from_datums(data: Vec<TextDatum>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create a StringColumn from prepared datums with NULL values
    ///
    /// `nulls` marks rows by position; rows past its end read as present.
    pub fn from_datums_with_nulls(data: Vec<TextDatum>, nulls: Vec<bool>) -> Self {
        let null_mask = if nulls.iter().any(|&is_null| is_null) {
            Some(crate::column::common::utils::create_bitmask(&nulls))
        } else {
            None
        };

        let mut column = Self::from_datums(data);
        column.null_mask = null_mask;
        column
    }

    /// Get the name
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the datum at the specified index
    pub fn get(&self, index: usize) -> Result<Option<&TextDatum>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if self.is_null(index) {
            return Ok(None);
        }

        Ok(Some(&self.data[index]))
    }

    /// Get the length of the column
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether every non-null value is already in canonical form
    pub fn is_canonical(&self) -> bool {
        (0..self.data.len()).all(|i| self.is_null(i) || self.data[i].is_canonical())
    }

    /// Return this column with every value in canonical form
    ///
    /// When no value needs re-encoding the column is returned as a cheap
    /// clone. Otherwise the scan restarts at the first offending value, so
    /// everything before it is reused as-is.
    pub fn to_canonical(&self) -> StringColumn {
        let first = (0..self.data.len())
            .find(|&i| !self.is_null(i) && !self.data[i].is_canonical());

        let first = match first {
            None => return self.clone(),
            Some(first) => first,
        };

        let mut data: Vec<TextDatum> = Vec::with_capacity(self.data.len());
        data.extend(self.data[..first].iter().cloned());
        for (i, datum) in self.data.iter().enumerate().skip(first) {
            if self.is_null(i) || datum.is_canonical() {
                data.push(datum.clone());
            } else {
                data.push(datum.to_canonical());
            }
        }

        Self {
            data: data.into(),
            null_mask: self.null_mask.clone(),
            name: self.name.clone(),
        }
    }

    /// Unchecked row access for comparators; panics when out of range
    pub(crate) fn value_at(&self, index: usize) -> Option<&TextDatum> {
        let datum = &self.data[index];
        if self.is_null(index) {
            None
        } else {
            Some(datum)
        }
    }

    pub(crate) fn is_null(&self, index: usize) -> bool {
        if let Some(ref mask) = self.null_mask {
            let byte_idx = index / 8;
            let bit_idx = index % 8;
            byte_idx < mask.len() && (mask[byte_idx] & (1 << bit_idx)) != 0
        } else {
            false
        }
    }
}

//! Canonical text renditions of columns
//!
//! Join key resolution coerces some column pairs to text before comparing
//! them. The entry point here is total over every storage kind so it can
//! also serve as a plain formatting pass, but resolution itself only ever
//! feeds it string and categorical columns.

use crate::column::{Column, StringColumn};

/// Return a column whose text content is in canonical form
///
/// String columns are re-encoded, reusing the existing storage when
/// nothing needs rewriting. Categorical columns expand into the text of
/// their levels with invalid codes becoming NULL; every other kind is
/// formatted value by value with NULL preserved.
pub fn normalize_text(column: &Column) -> Column {
    Column::String(normalize_to_string(column))
}

pub(crate) fn normalize_to_string(column: &Column) -> StringColumn {
    match column {
        Column::String(col) => col.to_canonical(),
        Column::Categorical(col) => col.expand_to_text(),
        Column::Int64(col) => text_from_values(col.len(), col.get_name(), |i| {
            col.value_at(i).map(|value| value.to_string())
        }),
        Column::Float64(col) => text_from_values(col.len(), col.get_name(), |i| {
            col.value_at(i).map(|value| value.to_string())
        }),
        Column::Boolean(col) => text_from_values(col.len(), col.get_name(), |i| {
            col.value_at(i).map(|value| value.to_string())
        }),
        Column::Complex128(col) => text_from_values(col.len(), col.get_name(), |i| {
            col.value_at(i).map(|value| value.to_string())
        }),
    }
}

fn text_from_values(
    len: usize,
    name: Option<&str>,
    value: impl Fn(usize) -> Option<String>,
) -> StringColumn {
    let mut data: Vec<String> = Vec::with_capacity(len);
    let mut nulls: Vec<bool> = vec![false; len];

    for i in 0..len {
        match value(i) {
            Some(text) => data.push(text),
            None => {
                data.push(String::new());
                nulls[i] = true;
            }
        }
    }

    let mut column = StringColumn::with_nulls(data, nulls);
    column.name = name.map(str::to_string);
    column
}

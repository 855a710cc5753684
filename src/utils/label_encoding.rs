//! Categorical label encoding
//!
//! Categories are the distinct non-null values in lexicographic (byte)
//! order; each row gets the index of its value, nulls get -1. Codes are
//! stable across reruns as long as the category set is unchanged.

use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Code assigned to null values
pub const MISSING_LABEL: i32 = -1;

/// Sorted categories plus one code per input row
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoding {
    pub categories: Vec<String>,
    pub codes: Vec<i32>,
}

impl LabelEncoding {
    pub fn num_classes(&self) -> usize {
        self.categories.len()
    }

    pub fn into_series(self, name: &str) -> Series {
        Series::new(name.into(), self.codes)
    }
}

pub fn encode_labels<'a, I>(values: I) -> LabelEncoding
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let values: Vec<Option<&str>> = values.into_iter().collect();

    let categories: BTreeSet<&str> = values.iter().flatten().copied().collect();
    let index: FxHashMap<&str, i32> = categories
        .iter()
        .enumerate()
        .map(|(code, category)| (*category, code as i32))
        .collect();

    let codes = values
        .iter()
        .map(|&value| {
            value
                .and_then(|v| index.get(v).copied())
                .unwrap_or(MISSING_LABEL)
        })
        .collect();

    LabelEncoding {
        categories: categories.into_iter().map(str::to_string).collect(),
        codes,
    }
}

/// Encode a string column of `df`
pub fn encode_column(df: &DataFrame, column: &str) -> PolarsResult<LabelEncoding> {
    let ca = df.column(column)?.str()?;
    Ok(encode_labels(ca.into_iter()))
}

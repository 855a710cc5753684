//! Column selection with validation
//!
//! Projects a DataFrame to an exact column list through a LazyFrame,
//! failing with the available columns listed when one is absent.

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Select `columns` from `df`, in that order
///
/// # Errors
/// Returns error if any column is missing or the projection fails.
///
/// # Example
/// ```rust,ignore
/// let out = select_columns(df, &OUTPUT_COLUMNS, "output table")?;
/// ```
pub fn select_columns(df: DataFrame, columns: &[&str], context: &str) -> Result<DataFrame> {
    let available: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| !available.contains(*name))
        .collect();

    if !missing.is_empty() {
        let mut available: Vec<String> = available.into_iter().collect();
        available.sort();
        return Err(anyhow!(
            "{}: Missing expected columns {:?}. Available columns: {:?}",
            context, missing, available
        ));
    }

    let exprs: Vec<Expr> = columns.iter().map(|&name| col(name)).collect();

    df.lazy()
        .select(&exprs)
        .collect()
        .with_context(|| format!("{}: Failed to select columns {:?}", context, columns))
}

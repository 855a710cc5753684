//! Data Loading
//!
//! Loads the training manifest with Polars and the two visual-trait mapping
//! files with serde_json. The species list lives in `species`.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use std::sync::Arc;

use crate::error::PrepError;

// Output schema, in column order
pub const FILEPATH: &str = "filepath";
pub const CLASSID: &str = "classid";
pub const SPECIES_NAME: &str = "species_name";
pub const DOMAIN: &str = "domain";
pub const LEAF_SHAPE: &str = "leaf_shape";
pub const LEAF_ARRANGEMENT: &str = "leaf_arrangement";
pub const SPECIES_LABEL: &str = "species_label";
pub const LEAF_SHAPE_LABEL: &str = "leaf_shape_label";
pub const LEAF_ARRANGEMENT_LABEL: &str = "leaf_arrangement_label";

pub const OUTPUT_COLUMNS: [&str; 9] = [
    FILEPATH,
    CLASSID,
    SPECIES_NAME,
    DOMAIN,
    LEAF_SHAPE,
    LEAF_ARRANGEMENT,
    SPECIES_LABEL,
    LEAF_SHAPE_LABEL,
    LEAF_ARRANGEMENT_LABEL,
];

/// Load the training manifest: `<filepath> <classid>` per line, no header
///
/// Blank lines are skipped. Filepaths are rewritten to the platform separator.
pub fn load_manifest(path: &Path) -> Result<DataFrame> {
    let schema = Schema::from_iter([
        Field::new(FILEPATH.into(), DataType::String),
        Field::new(CLASSID.into(), DataType::Int64),
    ]);

    let parse_options = CsvParseOptions::default().with_separator(b' ');

    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create manifest reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load training manifest: {}", path.display()))?;

    to_platform_separators(drop_blank_rows(df)?)
}

/// Blank manifest lines read back as rows with every field null
fn drop_blank_rows(df: DataFrame) -> Result<DataFrame> {
    df.lazy()
        .filter(col(FILEPATH).is_not_null().or(col(CLASSID).is_not_null()))
        .collect()
        .context("Failed to drop blank manifest lines")
}

fn to_platform_separators(mut df: DataFrame) -> Result<DataFrame> {
    if MAIN_SEPARATOR == '/' {
        return Ok(df);
    }

    let rewritten: Vec<Option<String>> = df
        .column(FILEPATH)?
        .str()?
        .into_iter()
        .map(|opt| opt.map(|p| platform_path(p).into_owned()))
        .collect();

    df.with_column(Series::new(FILEPATH.into(), rewritten))?;
    Ok(df)
}

/// Manifest paths use `/`; swap in the platform separator where it differs
pub fn platform_path(path: &str) -> Cow<'_, str> {
    if MAIN_SEPARATOR == '/' || !path.contains('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.replace('/', MAIN_SEPARATOR_STR))
    }
}

/// Visual-trait mapping keyed by clean name ("Acer rubrum" → "palmate")
///
/// Externally authored; completeness is not checked.
#[derive(Debug, Clone)]
pub struct TraitMap {
    source: PathBuf,
    entries: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RawTraitMap(BTreeMap<String, Value>);

impl TraitMap {
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PrepError::DescriptorNotFound {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read descriptor file: {}", path.display()));
            }
        };

        Self::from_json(path, &text)
    }

    /// Parse a JSON object; `source` is only used in messages
    pub fn from_json(source: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let source = source.into();
        let RawTraitMap(entries) = serde_json::from_str(text)
            .with_context(|| format!("Failed to parse descriptor JSON: {}", source.display()))?;

        Ok(TraitMap { source, entries })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clean name and trait text; JSON null reads as missing
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<String>)> {
        self.entries
            .iter()
            .map(|(clean, value)| (clean.as_str(), trait_text(value)))
    }
}

fn trait_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

//! Manifest enrichment: species name, domain and visual traits
//!
//! Every step appends a column and keeps the row count. Unknown classids and
//! species without trait coverage become nulls, never dropped rows.

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::data::{CLASSID, DOMAIN, FILEPATH, SPECIES_NAME};
use crate::species::SpeciesIndex;
use crate::traits::FormalTraitMap;

/// Image provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Herbarium,
    Field,
}

impl Domain {
    /// Herbarium iff the path contains the literal "herbarium"; everything
    /// else is assumed to be a field photo.
    pub fn from_path(path: &str) -> Self {
        if path.contains("herbarium") {
            Domain::Herbarium
        } else {
            Domain::Field
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Herbarium => "herbarium",
            Domain::Field => "field",
        }
    }
}

/// Add `species_name` from the classid → formal name map
pub fn attach_species_names(df: &mut DataFrame, species: &SpeciesIndex) -> Result<()> {
    let names: Vec<Option<&str>> = df
        .column(CLASSID)
        .context("Manifest has no classid column")?
        .i64()?
        .into_iter()
        .map(|classid| classid.and_then(|id| species.formal_name(id)))
        .collect();

    let missing = names.iter().filter(|n| n.is_none()).count();
    if missing > 0 {
        tracing::warn!("{} manifest rows have a classid missing from the species list", missing);
    }

    df.with_column(Series::new(SPECIES_NAME.into(), names))?;
    Ok(())
}

/// Add `domain` ("herbarium" / "field") from the filepath
pub fn attach_domain(df: &mut DataFrame) -> Result<()> {
    let domains: Vec<Option<&str>> = df
        .column(FILEPATH)
        .context("Manifest has no filepath column")?
        .str()?
        .into_iter()
        .map(|path| path.map(|p| Domain::from_path(p).as_str()))
        .collect();

    df.with_column(Series::new(DOMAIN.into(), domains))?;
    Ok(())
}

/// Left-join a formal-name keyed trait map onto `species_name`
pub fn attach_trait(df: &mut DataFrame, column: &str, traits: &FormalTraitMap) -> Result<()> {
    let values: Vec<Option<&str>> = df
        .column(SPECIES_NAME)
        .with_context(|| format!("{}: species_name must be attached first", column))?
        .str()?
        .into_iter()
        .map(|name| name.and_then(|n| traits.get(n).map(String::as_str)))
        .collect();

    df.with_column(Series::new(column.into(), values))?;
    Ok(())
}

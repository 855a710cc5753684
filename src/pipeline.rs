//! Metadata preparation pipeline
//!
//! Stages, in order:
//! 1. species list → classid and clean-name lookups
//! 2. training manifest → table
//! 3. classid → formal species name
//! 4. filepath → domain
//! 5. trait maps remapped to formal names and left-joined
//! 6. categorical label codes
//! 7. verification summary, then the CSV output
//!
//! Nothing is written until every stage has succeeded.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::config::{PrepConfig, UnmatchedKeyPolicy};
use crate::data::{
    load_manifest, TraitMap, LEAF_ARRANGEMENT, LEAF_ARRANGEMENT_LABEL, LEAF_SHAPE,
    LEAF_SHAPE_LABEL, OUTPUT_COLUMNS, SPECIES_LABEL, SPECIES_NAME,
};
use crate::enrich::{attach_domain, attach_species_names, attach_trait};
use crate::species::SpeciesIndex;
use crate::summary::{LabelSet, MetadataSummary};
use crate::traits::{remap_to_formal, FormalTraitMap};
use crate::utils::{encode_column, select_columns};

/// Load every input named by `config`, build the table and write it
pub fn run(config: &PrepConfig) -> Result<MetadataSummary> {
    tracing::info!("Loading official species map from: {}", config.species_list.display());
    let species = SpeciesIndex::load(&config.species_list)?;
    tracing::info!("  Loaded {} official species names", species.len());
    tracing::debug!(
        "  Example formal name for classid 105951: '{}'",
        species.formal_name(105951).unwrap_or("None")
    );

    tracing::info!("Loading training file list from: {}", config.train_list.display());
    let manifest = load_manifest(&config.train_list)?;
    tracing::info!("  Loaded {} training image records", manifest.height());

    tracing::info!("Loading and re-mapping visual descriptors...");
    let leaf_shapes = load_formal_traits(&config.leaf_shape_map, &species, config.unmatched_keys)?;
    let leaf_arrangements =
        load_formal_traits(&config.leaf_arrangement_map, &species, config.unmatched_keys)?;

    let (mut table, summary) = build_table(manifest, &species, &leaf_shapes, &leaf_arrangements)?;
    summary.log(&table);

    write_table(&mut table, &config.output)?;
    tracing::info!("The final unified metadata has been saved to: {}", config.output.display());

    Ok(summary)
}

/// Load a clean-name keyed trait file and rekey it by formal name
pub fn load_formal_traits(
    path: &Path,
    species: &SpeciesIndex,
    policy: UnmatchedKeyPolicy,
) -> Result<FormalTraitMap> {
    let traits = TraitMap::load(path)?;
    let remapped = remap_to_formal(&traits, species, policy)?;
    tracing::info!(
        "  {}: {} species with a value ({} entries in file)",
        path.display(),
        remapped.len(),
        traits.len()
    );
    Ok(remapped)
}

/// Enrich the manifest and project it to the output columns
///
/// Row count and order are those of `manifest`.
pub fn build_table(
    mut manifest: DataFrame,
    species: &SpeciesIndex,
    leaf_shapes: &FormalTraitMap,
    leaf_arrangements: &FormalTraitMap,
) -> Result<(DataFrame, MetadataSummary)> {
    attach_species_names(&mut manifest, species)?;
    attach_domain(&mut manifest)?;
    attach_trait(&mut manifest, LEAF_SHAPE, leaf_shapes)?;
    attach_trait(&mut manifest, LEAF_ARRANGEMENT, leaf_arrangements)?;

    let labels = attach_labels(&mut manifest)?;

    let table = select_columns(manifest, &OUTPUT_COLUMNS, "output table")?;
    let summary = MetadataSummary::from_table(&table, &labels)?;

    Ok((table, summary))
}

fn attach_labels(df: &mut DataFrame) -> Result<LabelSet> {
    let labels = LabelSet {
        species: encode_column(df, SPECIES_NAME)?,
        leaf_shape: encode_column(df, LEAF_SHAPE)?,
        leaf_arrangement: encode_column(df, LEAF_ARRANGEMENT)?,
    };

    df.with_column(labels.species.clone().into_series(SPECIES_LABEL))?;
    df.with_column(labels.leaf_shape.clone().into_series(LEAF_SHAPE_LABEL))?;
    df.with_column(labels.leaf_arrangement.clone().into_series(LEAF_ARRANGEMENT_LABEL))?;

    Ok(labels)
}

/// Write `table` as comma-separated CSV with a header; nulls are empty fields
///
/// Goes through a sibling `.tmp` file so a failure leaves no partial output.
pub fn write_table(table: &mut DataFrame, output: &Path) -> Result<()> {
    let tmp = temp_path(output);

    let written = File::create(&tmp)
        .with_context(|| format!("Failed to create output file: {}", tmp.display()))
        .and_then(|mut file| {
            CsvWriter::new(&mut file)
                .include_header(true)
                .with_separator(b',')
                .finish(table)
                .with_context(|| format!("Failed to write metadata CSV: {}", tmp.display()))
        })
        .and_then(|_| {
            fs::rename(&tmp, output)
                .with_context(|| format!("Failed to move output into place: {}", output.display()))
        });

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    output.with_file_name(name)
}

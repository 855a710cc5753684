//! Verification summary of the merged metadata table

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::{DOMAIN, LEAF_ARRANGEMENT, LEAF_SHAPE, SPECIES_NAME};
use crate::utils::LabelEncoding;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataSummary {
    pub rows: usize,
    pub species_classes: usize,
    pub leaf_shape_classes: usize,
    pub leaf_arrangement_classes: usize,
    /// "herbarium" / "field" → row count
    pub domain_counts: BTreeMap<String, usize>,
    pub missing_species_name: usize,
    pub missing_leaf_shape: usize,
    pub missing_leaf_arrangement: usize,
}

/// Encodings produced for the three label columns
#[derive(Debug, Clone)]
pub struct LabelSet {
    pub species: LabelEncoding,
    pub leaf_shape: LabelEncoding,
    pub leaf_arrangement: LabelEncoding,
}

impl MetadataSummary {
    pub fn from_table(table: &DataFrame, labels: &LabelSet) -> Result<Self> {
        let mut domain_counts = BTreeMap::new();
        for domain in table.column(DOMAIN)?.str()?.into_iter().flatten() {
            *domain_counts.entry(domain.to_string()).or_insert(0) += 1;
        }

        Ok(MetadataSummary {
            rows: table.height(),
            species_classes: labels.species.num_classes(),
            leaf_shape_classes: labels.leaf_shape.num_classes(),
            leaf_arrangement_classes: labels.leaf_arrangement.num_classes(),
            domain_counts,
            missing_species_name: table.column(SPECIES_NAME)?.null_count(),
            missing_leaf_shape: table.column(LEAF_SHAPE)?.null_count(),
            missing_leaf_arrangement: table.column(LEAF_ARRANGEMENT)?.null_count(),
        })
    }

    pub fn domain_count(&self, domain: &str) -> usize {
        self.domain_counts.get(domain).copied().unwrap_or(0)
    }

    /// Preview, per-column info and domain counts
    pub fn log(&self, table: &DataFrame) {
        tracing::info!("--- Verification ---");
        tracing::info!("Final DataFrame preview (first 5 rows):\n{}", table.head(Some(5)));

        tracing::info!("DataFrame info: {} rows x {} columns", table.height(), table.width());
        for column in table.get_columns() {
            tracing::info!(
                "  {:<24} {:>8} non-null  {}",
                column.name().as_str(),
                column.len() - column.null_count(),
                column.dtype()
            );
        }

        tracing::info!("Domain counts:");
        for (domain, count) in &self.domain_counts {
            tracing::info!("  {:<10} {}", domain, count);
        }

        tracing::info!(
            "Classes: {} species, {} leaf shapes, {} leaf arrangements",
            self.species_classes,
            self.leaf_shape_classes,
            self.leaf_arrangement_classes
        );

        match serde_json::to_string(self) {
            Ok(json) => tracing::debug!("summary: {}", json),
            Err(e) => tracing::debug!("summary not serializable: {}", e),
        }
    }
}

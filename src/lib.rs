//! Plant Visual Metadata Preparation
//!
//! Builds the unified metadata table for the multi-task plant image model by
//! joining the official species list, the training manifest and the leaf
//! shape / leaf arrangement trait maps.
//!
//! - `species`: species list parsing and clean-name reconciliation
//! - `data`: manifest (Polars) and trait map (serde_json) loading
//! - `traits`: clean-name → formal-name trait remapping
//! - `enrich`: species name, domain and trait columns
//! - `utils/`: label encoding and validated column selection
//! - `pipeline`: stage orchestration and CSV output

pub mod config;
pub mod data;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod species;
pub mod summary;
pub mod traits;
pub mod utils;

// Re-export commonly used types
pub use config::{PrepConfig, UnmatchedKeyPolicy};
pub use data::{load_manifest, TraitMap, OUTPUT_COLUMNS};
pub use enrich::Domain;
pub use error::{report_failure, PrepError};
pub use pipeline::{build_table, run};
pub use species::{clean_name, SpeciesIndex};
pub use summary::MetadataSummary;
pub use utils::{encode_labels, LabelEncoding, MISSING_LABEL};

//! Input/output locations for the metadata preparation run
//!
//! The run takes no flags: every path is a fixed constant relative to the
//! working directory. `rooted_at` re-anchors the same layout elsewhere.

use std::path::{Path, PathBuf};

pub const SPECIES_LIST_FILE: &str = "list/species_list.txt";
pub const TRAIN_LIST_FILE: &str = "list/train.txt";
pub const LEAF_SHAPE_MAPPING_FILE: &str = "species_to_leaf_shape.json";
pub const LEAF_ARRANGEMENT_MAPPING_FILE: &str = "species_to_leaf_arrangement.json";
pub const FINAL_METADATA_FILE: &str = "full_visual_metadata.csv";

/// What to do with a trait-map key whose clean name is not in the species list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedKeyPolicy {
    /// Drop the entry silently
    #[default]
    Skip,
    /// Abort the run with `PrepError::UnresolvedCleanName`
    Strict,
}

#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub species_list: PathBuf,
    pub train_list: PathBuf,
    pub leaf_shape_map: PathBuf,
    pub leaf_arrangement_map: PathBuf,
    pub output: PathBuf,
    pub unmatched_keys: UnmatchedKeyPolicy,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self::rooted_at(".")
    }
}

impl PrepConfig {
    /// Same relative layout as `Default`, under `root`
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            species_list: root.join(SPECIES_LIST_FILE),
            train_list: root.join(TRAIN_LIST_FILE),
            leaf_shape_map: root.join(LEAF_SHAPE_MAPPING_FILE),
            leaf_arrangement_map: root.join(LEAF_ARRANGEMENT_MAPPING_FILE),
            output: root.join(FINAL_METADATA_FILE),
            unmatched_keys: UnmatchedKeyPolicy::default(),
        }
    }

    pub fn with_unmatched_keys(mut self, policy: UnmatchedKeyPolicy) -> Self {
        self.unmatched_keys = policy;
        self
    }
}

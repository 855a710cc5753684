//! Trait remapping: clean-name keys → formal-name keys
//!
//! The trait files are keyed by "Genus epithet" while the manifest joins on
//! the formal name from the species list. Entries whose clean name has no
//! formal counterpart are dropped unless the policy is `Strict`.

use rustc_hash::FxHashMap;

use crate::config::UnmatchedKeyPolicy;
use crate::data::TraitMap;
use crate::error::PrepError;
use crate::species::SpeciesIndex;

/// Trait values keyed by formal species name
pub type FormalTraitMap = FxHashMap<String, String>;

pub fn remap_to_formal(
    traits: &TraitMap,
    species: &SpeciesIndex,
    policy: UnmatchedKeyPolicy,
) -> Result<FormalTraitMap, PrepError> {
    let mut remapped = FormalTraitMap::default();
    let mut unmatched = 0usize;

    for (clean, value) in traits.entries() {
        let Some(formal) = species.resolve_clean(clean) else {
            if policy == UnmatchedKeyPolicy::Strict {
                return Err(PrepError::UnresolvedCleanName {
                    clean_name: clean.to_string(),
                    source_file: traits.source().to_path_buf(),
                });
            }
            unmatched += 1;
            continue;
        };

        if let Some(value) = value {
            remapped.insert(formal.to_string(), value);
        }
    }

    tracing::debug!(
        "{}: {} of {} entries remapped, {} unmatched clean names dropped",
        traits.source().display(),
        remapped.len(),
        traits.len(),
        unmatched
    );

    Ok(remapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species() -> SpeciesIndex {
        SpeciesIndex::parse("105951;Acer rubrum L.\n106023;Rosa canina L.\n").unwrap()
    }

    fn shapes() -> TraitMap {
        TraitMap::from_json(
            "species_to_leaf_shape.json",
            r#"{"Acer rubrum": "palmate", "Rosa canina": null, "Betula pendula": "ovate"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_remap_drops_unmatched_by_default() {
        let remapped = remap_to_formal(&shapes(), &species(), UnmatchedKeyPolicy::Skip).unwrap();

        assert_eq!(remapped.len(), 1);
        assert_eq!(remapped.get("Acer rubrum L.").map(String::as_str), Some("palmate"));
        assert!(!remapped.contains_key("Rosa canina L."));
        assert!(!remapped.contains_key("Betula pendula"));
    }

    #[test]
    fn test_remap_strict_rejects_unmatched() {
        let err = remap_to_formal(&shapes(), &species(), UnmatchedKeyPolicy::Strict).unwrap_err();
        match err {
            PrepError::UnresolvedCleanName { clean_name, source_file } => {
                assert_eq!(clean_name, "Betula pendula");
                assert!(source_file.ends_with("species_to_leaf_shape.json"));
            }
            other => panic!("expected UnresolvedCleanName, got {:?}", other),
        }
    }

    #[test]
    fn test_remap_strict_accepts_full_coverage() {
        let traits = TraitMap::from_json("arr.json", r#"{"Acer rubrum": "opposite"}"#).unwrap();
        let remapped = remap_to_formal(&traits, &species(), UnmatchedKeyPolicy::Strict).unwrap();
        assert_eq!(remapped.get("Acer rubrum L.").map(String::as_str), Some("opposite"));
    }
}

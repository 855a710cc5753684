//! Official species list: classid → formal name, clean name → formal name
//!
//! Each line is `classid;formal name`. The clean name (genus + epithet) is
//! the join key used by the trait mapping files, which drop the authority.

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

/// First two whitespace-separated tokens of a formal name
///
/// "Acer rubrum L." → "Acer rubrum"
pub fn clean_name(formal_name: &str) -> String {
    formal_name
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesIndex {
    by_classid: FxHashMap<i64, String>,
    by_clean_name: FxHashMap<String, String>,
}

impl SpeciesIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read species list: {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("Failed to parse species list: {}", path.display()))
    }

    /// Parse species list text. Blank lines are skipped; anything else must
    /// be `classid;formal name`. Later lines overwrite earlier duplicates.
    pub fn parse(text: &str) -> Result<Self> {
        let mut index = SpeciesIndex::default();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let Some((classid_str, formal_full)) = line.split_once(';') else {
                bail!("line {}: expected 'classid;name', got '{}'", line_no + 1, line);
            };

            let classid: i64 = classid_str.trim().parse().with_context(|| {
                format!("line {}: invalid classid '{}'", line_no + 1, classid_str)
            })?;

            let formal_name = formal_full.trim().to_string();
            index.insert(classid, formal_name);
        }

        Ok(index)
    }

    fn insert(&mut self, classid: i64, formal_name: String) {
        self.by_clean_name
            .insert(clean_name(&formal_name), formal_name.clone());
        self.by_classid.insert(classid, formal_name);
    }

    pub fn formal_name(&self, classid: i64) -> Option<&str> {
        self.by_classid.get(&classid).map(String::as_str)
    }

    /// Formal name for a clean (genus + epithet) key
    pub fn resolve_clean(&self, clean: &str) -> Option<&str> {
        self.by_clean_name.get(clean).map(String::as_str)
    }

    /// Number of distinct classids
    pub fn len(&self) -> usize {
        self.by_classid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_classid.is_empty()
    }

    pub fn clean_name_count(&self) -> usize {
        self.by_clean_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("Acer rubrum L."), "Acer rubrum");
        assert_eq!(clean_name("  Quercus   robur  subsp. robur"), "Quercus robur");
        assert_eq!(clean_name("Ginkgo"), "Ginkgo");
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn test_parse_builds_both_maps() {
        let index = SpeciesIndex::parse("105951;Acer rubrum L.\n\n  \n106023;Rosa canina L.\n")
            .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.clean_name_count(), 2);
        assert_eq!(index.formal_name(105951), Some("Acer rubrum L."));
        assert_eq!(index.resolve_clean("Acer rubrum"), Some("Acer rubrum L."));
        assert_eq!(index.resolve_clean("Rosa canina"), Some("Rosa canina L."));
        assert_eq!(index.formal_name(1), None);
    }

    #[test]
    fn test_parse_splits_on_first_semicolon_only() {
        let index = SpeciesIndex::parse("7; Salix alba L.; var. vitellina \n").unwrap();
        assert_eq!(index.formal_name(7), Some("Salix alba L.; var. vitellina"));
        assert_eq!(index.resolve_clean("Salix alba"), Some("Salix alba L.; var. vitellina"));
    }

    #[test]
    fn test_duplicate_clean_names_last_wins() {
        let index = SpeciesIndex::parse("1;Acer rubrum L.\n2;Acer rubrum var. drummondii\n")
            .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.clean_name_count(), 1);
        assert_eq!(index.resolve_clean("Acer rubrum"), Some("Acer rubrum var. drummondii"));
    }

    #[test]
    fn test_malformed_line_fails() {
        let err = SpeciesIndex::parse("1;Acer rubrum L.\nno separator here\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = SpeciesIndex::parse("abc;Acer rubrum L.\n").unwrap_err();
        assert!(err.to_string().contains("invalid classid"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SpeciesIndex::load(Path::new("/nonexistent/species_list.txt"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("species_list.txt"));
    }
}

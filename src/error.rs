//! Failures the preparation run reports by name before aborting
//!
//! Everything else (malformed species list, missing manifest, bad JSON)
//! travels as a plain `anyhow::Error` with its context chain.

use std::path::PathBuf;
use std::process::ExitCode;

#[derive(thiserror::Error, Debug)]
pub enum PrepError {
    /// A trait mapping file does not exist
    #[error("A descriptor file was not found: {}", path.display())]
    DescriptorNotFound { path: PathBuf },

    /// A clean name from a trait mapping has no formal name in the species list
    #[error(
        "A key mismatch occurred. The clean name '{clean_name}' from {} could not be found in the official species list.",
        source_file.display()
    )]
    UnresolvedCleanName {
        clean_name: String,
        source_file: PathBuf,
    },
}

/// Exit status for a failed run
///
/// Reported failures log their message and exit 1 with no output written.
/// Any other error is handed back to propagate out of `main`.
pub fn report_failure(err: anyhow::Error) -> anyhow::Result<ExitCode> {
    match err.downcast_ref::<PrepError>() {
        Some(reported) => {
            tracing::error!("{}", reported);
            Ok(ExitCode::FAILURE)
        }
        None => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_failure_exits_for_reported_errors_only() {
        let reported = anyhow::Error::from(PrepError::DescriptorNotFound {
            path: PathBuf::from("species_to_leaf_shape.json"),
        });
        assert!(report_failure(reported).is_ok());

        let unhandled = anyhow::anyhow!("Failed to parse species list: line 3");
        let err = report_failure(unhandled).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_messages_name_the_offender() {
        let missing = PrepError::DescriptorNotFound {
            path: PathBuf::from("species_to_leaf_shape.json"),
        };
        assert!(missing.to_string().contains("species_to_leaf_shape.json"));

        let mismatch = PrepError::UnresolvedCleanName {
            clean_name: "Quercus robur".to_string(),
            source_file: PathBuf::from("species_to_leaf_arrangement.json"),
        };
        let msg = mismatch.to_string();
        assert!(msg.contains("'Quercus robur'"));
        assert!(msg.contains("species_to_leaf_arrangement.json"));
    }
}

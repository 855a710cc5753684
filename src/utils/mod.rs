//! Utility modules for metadata preparation
//!
//! - Label encoding: categorical integer codes
//! - Lazy helpers: validated column projection

pub mod label_encoding;
pub mod lazy_helpers;

pub use label_encoding::{encode_column, encode_labels, LabelEncoding, MISSING_LABEL};
pub use lazy_helpers::select_columns;

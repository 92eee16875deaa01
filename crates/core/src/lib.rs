//! # quire-core
//!
//! Runs a complete document pass over already-extracted records:
//! - **records**: the attributed records a loader hands in
//! - **paragraph**: computed paragraph properties and list membership
//! - **pass**: the staged pass producing the output tree
//! - **config**: pass settings
//! - **diagnostics**: recoverable findings
//! - **error**: the fatal error type

// Re-export foundation crates
pub use quire_idf as idf;
pub use quire_style as style;
pub use quire_types as types;

// Re-export algorithm crates
pub use quire_lists as lists;
pub use quire_nesting as nesting;
pub use quire_numbering as numbering;

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod paragraph;
pub mod pass;
pub mod records;

pub use config::PassConfig;
pub use diagnostics::{Diagnostic, DiagnosticSummary, Diagnostics};
pub use error::PassError;
pub use paragraph::{Classification, ParagraphClassifier};
pub use pass::{DocumentPass, PassOutput};
pub use records::{
    AbstractListRecord, DocumentRecords, LevelOverrideRecord, LevelRecord, ListInstanceRecord,
    ParagraphRecord, RunRecord, StyleRecord,
};

//! # quire
//!
//! Format-independent core of a document-to-markup converter. Given the
//! styles, list definitions and paragraphs a loader extracted from a source
//! document, one [`DocumentPass`] produces a tag-less tree of nested
//! formatting wrappers and list containers.
//!
//! ```no_run
//! use quire::{DocumentPass, DocumentRecords, PassConfig};
//!
//! # fn main() -> Result<(), quire::PassError> {
//! let records = DocumentRecords::from_json(r#"{ "paragraphs": [] }"#)?;
//! let config = PassConfig::default();
//! let output = DocumentPass::new(&records, &config).run()?;
//! println!("{}", output.nodes_to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! The building blocks are available on their own:
//! - [`style`]: the cascade resolver
//! - [`numbering`]: list definitions, markers and counters
//! - [`nesting`]: the range nesting engine
//! - [`lists`]: list structural inference
//! - [`idf`]: the output tree

pub use quire_core::{idf, lists, nesting, numbering, style, types};

pub use quire_core::{
    AbstractListRecord, Classification, Diagnostic, DiagnosticSummary, Diagnostics, DocumentPass,
    DocumentRecords, LevelOverrideRecord, LevelRecord, ListInstanceRecord, ParagraphClassifier,
    ParagraphRecord, PassConfig, PassError, PassOutput, RunRecord, StyleRecord,
};

pub use quire_idf::{ContainerKind, Node};

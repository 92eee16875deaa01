//! Defines the unified error type for a document pass.

use quire_numbering::NumberingError;
use quire_style::{CascadeError, StyleParseError};
use quire_types::PropertyError;
use thiserror::Error;

/// Every fatal condition of a pass. A pass that fails returns one of these
/// and no output.
#[derive(Error, Debug)]
pub enum PassError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Property declaration error: {0}")]
    Property(#[from] PropertyError),
    #[error("Style cascade error: {0}")]
    Cascade(#[from] CascadeError),
    #[error("Numbering error: {0}")]
    Numbering(#[from] NumberingError),
    #[error("Style value error: {0}")]
    Value(#[from] StyleParseError),
}

impl PassError {
    /// True for inheritance and alias cycles.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            PassError::Cascade(CascadeError::Cycle { .. })
                | PassError::Numbering(NumberingError::Cycle { .. })
        )
    }

    /// True for references to ids that are not defined.
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(
            self,
            PassError::Cascade(CascadeError::UnresolvedReference { .. })
                | PassError::Numbering(
                    NumberingError::UnresolvedDefinition { .. }
                        | NumberingError::UnresolvedInstance(_)
                        | NumberingError::UnresolvedStyle { .. }
                )
        )
    }
}

//! List numbering: abstract definitions, per-instance overrides, counters and
//! marker rendering.

use quire_types::{AbstractListId, ListInstanceId, StyleId};
use thiserror::Error;

pub mod counters;
pub mod definitions;
pub mod marker;
pub mod resolver;

pub use counters::{FirstUseReset, NumberingCounterState};
pub use definitions::{
    AbstractBody, AbstractListDefinition, LevelDefinition, LevelOverride, ListInstance,
    MAX_LEVELS, NumberFormat, NumberingSet, Suffix,
};
pub use marker::{MarkerTemplate, format_counter, is_recognized_marker, render_marker};
pub use resolver::{
    NumberingLookup, NumberingResolver, ResolvedInstance, ResolvedLevel, ResolvedNumbering,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumberingError {
    #[error("List definition alias cycle: {}", join_path(.path))]
    Cycle { path: Vec<AbstractListId> },
    #[error("List definition '{missing}' is referenced by '{from}' but not defined.")]
    UnresolvedDefinition {
        from: String,
        missing: AbstractListId,
    },
    #[error("List instance '{0}' is referenced but not defined.")]
    UnresolvedInstance(ListInstanceId),
    #[error("Level {level} of '{owner}' is based on undefined style '{missing}'.")]
    UnresolvedStyle {
        owner: String,
        level: usize,
        missing: StyleId,
    },
    #[error("Numbering entry '{0}' is defined more than once.")]
    DuplicateDefinition(String),
    #[error("'{owner}' declares {count} levels; at most {max} are allowed.", max = MAX_LEVELS)]
    TooManyLevels { owner: String, count: usize },
    #[error("Invalid marker template: {0:?}")]
    InvalidTemplate(String),
}

fn join_path(path: &[AbstractListId]) -> String {
    path.iter()
        .map(AbstractListId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

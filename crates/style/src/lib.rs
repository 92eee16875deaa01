use quire_types::StyleId;
use thiserror::Error;

pub mod cascade;
pub mod parsers;
pub mod stylesheet;

pub use cascade::{CascadeResolver, ResolvedStyle, ResolvedStyles};
pub use parsers::{StyleParseError, parse_length, parse_points};
pub use stylesheet::{StyleKind, StyleRule, StyleSet};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CascadeError {
    #[error("Style inheritance cycle: {}", join_path(.path))]
    Cycle { path: Vec<StyleId> },
    #[error("Style '{missing}' is referenced{} but not defined.", referenced_from(.from))]
    UnresolvedReference {
        from: Option<StyleId>,
        missing: StyleId,
    },
    #[error("Style '{0}' is defined more than once.")]
    DuplicateStyle(StyleId),
}

fn join_path(path: &[StyleId]) -> String {
    path.iter()
        .map(StyleId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn referenced_from(from: &Option<StyleId>) -> String {
    match from {
        Some(id) => format!(" by '{}'", id),
        None => String::new(),
    }
}

#[cfg(test)]
mod cascade_test;

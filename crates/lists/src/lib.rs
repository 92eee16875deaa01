//! List structural inference: rebuilds nested list containers from a flat
//! stream of paragraphs annotated with list level and physical indentation.

pub mod inference;

pub use inference::{Inferred, ListInference, infer};

use quire_idf::{BlockMeta, Node};
use quire_numbering::FirstUseReset;
use quire_types::ListInstanceId;
use serde::{Deserialize, Serialize};

/// Tunables of the inference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListConfig {
    /// Points subtracted from the indentation of non-list content before it
    /// is compared against open list thresholds.
    pub calibration_offset: f32,
    /// When a shared counter restarts for a newly seen list instance.
    pub first_use_reset: FirstUseReset,
    /// An ordered list opened more than this many points right of an
    /// enclosing ordered list, with `restart_marker` as its literal marker,
    /// starts a fresh primary list instead of a nested one.
    pub nested_restart_margin: f32,
    pub restart_marker: String,
    /// Compare rendered markers with the literal markers of the source.
    pub check_markers: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            calibration_offset: 36.0,
            first_use_reset: FirstUseReset::PerInstanceLevel,
            nested_restart_margin: 27.0,
            restart_marker: "1.\t".to_string(),
            check_markers: true,
        }
    }
}

/// One paragraph-level unit of the inference input.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub list_instance: Option<ListInstanceId>,
    pub level: Option<usize>,
    /// Physical indentation in points.
    pub indentation: f32,
    pub is_recognized_list_marker: bool,
    /// Marker text captured from the source, if any.
    pub literal_marker: Option<String>,
    /// Content that never closes open lists, such as figures.
    pub keeps_lists_open: bool,
    pub content: Node,
}

impl Item {
    pub fn passthrough(content: Node, indentation: f32) -> Self {
        Self {
            list_instance: None,
            level: None,
            indentation,
            is_recognized_list_marker: false,
            literal_marker: None,
            keeps_lists_open: false,
            content,
        }
    }

    pub fn list(
        instance: impl Into<ListInstanceId>,
        level: usize,
        indentation: f32,
        content: Node,
    ) -> Self {
        Self {
            list_instance: Some(instance.into()),
            level: Some(level),
            is_recognized_list_marker: true,
            ..Self::passthrough(content, indentation)
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.literal_marker = Some(marker.into());
        self
    }

    pub fn keeping_lists_open(mut self) -> Self {
        self.keeps_lists_open = true;
        self
    }

    /// Numbered with a real instance, at a known level, behind a marker the
    /// engine recognizes.
    pub fn is_list_item(&self) -> bool {
        self.is_recognized_list_marker
            && self.level.is_some()
            && self
                .list_instance
                .as_ref()
                .is_some_and(|id| !id.is_none_marker())
    }

    /// The content as a list item node.
    fn into_item_parts(self) -> (BlockMeta, Vec<Node>) {
        match self.content {
            Node::Block { meta, children } | Node::Item { meta, children } => (meta, children),
            other => (BlockMeta::default(), vec![other]),
        }
    }
}

/// A literal marker that disagrees with the marker rendered from the
/// resolved numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerMismatch {
    /// Index of the item in the input stream.
    pub position: usize,
    pub instance: ListInstanceId,
    pub level: usize,
    pub expected: String,
    pub found: String,
}

/// Counter value assigned to one list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedCounter {
    pub position: usize,
    pub instance: ListInstanceId,
    pub level: usize,
    pub value: u32,
}

#[cfg(test)]
mod inference_test;

//! Defines the closed set of style rules a document carries.

use crate::CascadeError;
use quire_types::{PropertyMap, StyleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of element a style rule applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum StyleKind {
    #[default]
    Paragraph,
    Character,
    Table,
    Numbering,
}

/// A single named style as declared by the document.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub id: StyleId,
    /// The style this one is based on, if any.
    pub parent: Option<StyleId>,
    pub kind: StyleKind,
    /// Properties declared directly on this rule.
    pub properties: PropertyMap,
}

impl StyleRule {
    pub fn new(id: impl Into<StyleId>, kind: StyleKind, properties: PropertyMap) -> Self {
        Self {
            id: id.into(),
            parent: None,
            kind,
            properties,
        }
    }

    pub fn based_on(mut self, parent: impl Into<StyleId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// The complete, immutable set of style rules for one document.
#[derive(Debug, Clone, Default)]
pub struct StyleSet {
    rules: Vec<StyleRule>,
    index: HashMap<StyleId, usize>,
}

impl StyleSet {
    /// Builds the set, rejecting two rules with the same id.
    pub fn new(rules: Vec<StyleRule>) -> Result<Self, CascadeError> {
        let mut index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            if index.insert(rule.id.clone(), i).is_some() {
                return Err(CascadeError::DuplicateStyle(rule.id.clone()));
            }
        }
        Ok(Self { rules, index })
    }

    /// Looks up a rule by its id.
    pub fn get(&self, id: &StyleId) -> Option<&StyleRule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    pub fn contains(&self, id: &StyleId) -> bool {
        self.index.contains_key(id)
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

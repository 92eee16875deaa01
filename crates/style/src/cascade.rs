//! Resolves the "based-on" graph of style rules into flattened property maps.
//!
//! Resolution is depth-first: a rule's parent is resolved first and the rule's
//! own properties are written over the parent's result. Results are memoized
//! per id for the lifetime of one [`CascadeResolver`], which the caller owns and
//! drops at the end of the pass.

use crate::stylesheet::{StyleKind, StyleRule, StyleSet};
use crate::CascadeError;
use quire_types::{PropertyMap, StyleId};
use std::collections::HashMap;
use std::sync::Arc;

/// A style rule with every inherited property folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub id: StyleId,
    pub kind: StyleKind,
    pub properties: PropertyMap,
}

pub struct CascadeResolver<'a> {
    styles: &'a StyleSet,
    memo: HashMap<StyleId, Arc<ResolvedStyle>>,
    // Ids whose resolution is on the current call path.
    in_progress: Vec<StyleId>,
}

impl<'a> CascadeResolver<'a> {
    pub fn new(styles: &'a StyleSet) -> Self {
        Self {
            styles,
            memo: HashMap::with_capacity(styles.len()),
            in_progress: Vec::new(),
        }
    }

    /// Resolves one style id.
    ///
    /// Resolving the same id twice returns the same shared value.
    pub fn resolve(&mut self, id: &StyleId) -> Result<Arc<ResolvedStyle>, CascadeError> {
        if let Some(done) = self.memo.get(id) {
            return Ok(done.clone());
        }
        let styles = self.styles;
        let rule = styles
            .get(id)
            .ok_or_else(|| CascadeError::UnresolvedReference {
                from: None,
                missing: id.clone(),
            })?;
        self.resolve_rule(rule)
    }

    fn resolve_rule(&mut self, rule: &'a StyleRule) -> Result<Arc<ResolvedStyle>, CascadeError> {
        if let Some(done) = self.memo.get(&rule.id) {
            return Ok(done.clone());
        }
        if let Some(pos) = self.in_progress.iter().position(|id| *id == rule.id) {
            let mut path = self.in_progress[pos..].to_vec();
            path.push(rule.id.clone());
            return Err(CascadeError::Cycle { path });
        }

        self.in_progress.push(rule.id.clone());
        let computed = self.compute(rule);
        self.in_progress.pop();

        let resolved = Arc::new(computed?);
        log::debug!(
            "resolved style '{}' ({} properties)",
            rule.id,
            resolved.properties.len()
        );
        self.memo.insert(rule.id.clone(), resolved.clone());
        Ok(resolved)
    }

    fn compute(&mut self, rule: &'a StyleRule) -> Result<ResolvedStyle, CascadeError> {
        let properties = match &rule.parent {
            None => rule.properties.clone(),
            Some(parent_id) => {
                let styles = self.styles;
                let parent = styles
                    .get(parent_id)
                    .ok_or_else(|| CascadeError::UnresolvedReference {
                        from: Some(rule.id.clone()),
                        missing: parent_id.clone(),
                    })?;
                let inherited = self.resolve_rule(parent)?;
                inherited.properties.overlay(&rule.properties)
            }
        };

        Ok(ResolvedStyle {
            id: rule.id.clone(),
            kind: rule.kind,
            properties,
        })
    }

    /// Resolves every rule in the set and freezes the results.
    ///
    /// Fails on the first cycle or dangling parent reference; no partial
    /// result escapes.
    pub fn resolve_all(mut self) -> Result<ResolvedStyles, CascadeError> {
        let styles = self.styles;
        for rule in styles.rules() {
            self.resolve_rule(rule)?;
        }
        Ok(ResolvedStyles { styles: self.memo })
    }
}

/// The frozen result of a cascade pass. Read-only, so it can be shared
/// freely between workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyles {
    styles: HashMap<StyleId, Arc<ResolvedStyle>>,
}

impl ResolvedStyles {
    pub fn get(&self, id: &StyleId) -> Option<&ResolvedStyle> {
        self.styles.get(id).map(Arc::as_ref)
    }

    /// Shortcut for the resolved property map of `id`.
    pub fn properties(&self, id: &StyleId) -> Option<&PropertyMap> {
        self.get(id).map(|s| &s.properties)
    }

    pub fn contains(&self, id: &StyleId) -> bool {
        self.styles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Resolved styles sorted by id.
    pub fn sorted(&self) -> Vec<&ResolvedStyle> {
        let mut all: Vec<&ResolvedStyle> = self.styles.values().map(Arc::as_ref).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

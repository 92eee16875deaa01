//! Resolves list instances to their effective per-level formatting.
//!
//! An instance points at an abstract definition, which may itself be an alias
//! of another definition. Aliases are followed to the canonical definition and
//! the instance's level overrides are laid over its levels. Everything is
//! memoized for the lifetime of one [`NumberingResolver`].

use crate::definitions::{
    AbstractBody, AbstractListDefinition, LevelDefinition, LevelOverride, NumberFormat,
    NumberingSet, Suffix,
};
use crate::marker::MarkerTemplate;
use crate::NumberingError;
use quire_style::ResolvedStyles;
use quire_types::{AbstractListId, ListInstanceId, PropertyMap, StyleId};
use std::collections::HashMap;
use std::sync::Arc;

/// One level with its template parsed and its base style folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLevel {
    pub index: usize,
    pub format: NumberFormat,
    pub template: MarkerTemplate,
    pub start: u32,
    pub suffix: Suffix,
    pub base_style: Option<StyleId>,
    /// The base style's resolved properties overlaid by the level's own.
    pub style: PropertyMap,
}

impl ResolvedLevel {
    pub fn new(
        index: usize,
        definition: &LevelDefinition,
        base: PropertyMap,
    ) -> Result<Self, NumberingError> {
        let template = MarkerTemplate::parse(&definition.template)?;
        // A marker can only show counters of its own level and the ones above.
        if template.deepest_placeholder().is_some_and(|deepest| deepest > index) {
            return Err(NumberingError::InvalidTemplate(definition.template.clone()));
        }
        Ok(Self {
            index,
            format: definition.format,
            template,
            start: definition.start,
            suffix: definition.suffix,
            base_style: definition.base_style.clone(),
            style: base.overlay(&definition.properties),
        })
    }

    pub fn is_bullet(&self) -> bool {
        self.format.is_bullet()
    }

    fn with_start(&self, start: u32) -> Self {
        Self {
            start,
            ..self.clone()
        }
    }
}

pub type LevelSlots = Vec<Option<Arc<ResolvedLevel>>>;

/// The effective levels of one list instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstance {
    pub id: ListInstanceId,
    /// The canonical definition after following aliases. Instances sharing it
    /// share counters.
    pub abstract_id: AbstractListId,
    pub levels: LevelSlots,
}

impl ResolvedInstance {
    pub fn level(&self, index: usize) -> Option<&ResolvedLevel> {
        self.levels.get(index)?.as_deref()
    }
}

#[derive(Debug, Clone)]
struct ResolvedAbstract {
    canonical: AbstractListId,
    levels: Arc<LevelSlots>,
}

pub struct NumberingResolver<'a> {
    set: &'a NumberingSet,
    styles: &'a ResolvedStyles,
    abstracts: HashMap<AbstractListId, ResolvedAbstract>,
    instances: HashMap<ListInstanceId, Arc<ResolvedInstance>>,
    // Definitions whose alias chain is on the current call path.
    in_progress: Vec<AbstractListId>,
}

impl<'a> NumberingResolver<'a> {
    pub fn new(set: &'a NumberingSet, styles: &'a ResolvedStyles) -> Self {
        Self {
            set,
            styles,
            abstracts: HashMap::new(),
            instances: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    /// Follows aliases from `id` to the definition that owns the levels.
    pub fn canonical_abstract(
        &mut self,
        id: &AbstractListId,
    ) -> Result<AbstractListId, NumberingError> {
        Ok(self.resolve_abstract(id, id.as_str())?.canonical)
    }

    /// The effective level table of an instance.
    pub fn levels_for(
        &mut self,
        id: &ListInstanceId,
    ) -> Result<Arc<ResolvedInstance>, NumberingError> {
        if let Some(done) = self.instances.get(id) {
            return Ok(done.clone());
        }
        let set = self.set;
        let instance = set
            .instance(id)
            .ok_or_else(|| NumberingError::UnresolvedInstance(id.clone()))?;
        let base = self.resolve_abstract(&instance.abstract_id, instance.id.as_str())?;

        let len = base.levels.len().max(instance.overrides.len());
        let mut levels = Vec::with_capacity(len);
        for index in 0..len {
            let inherited = base.levels.get(index).cloned().flatten();
            let slot = match instance.overrides.get(index).and_then(Option::as_ref) {
                Some(LevelOverride {
                    level: Some(replacement),
                    ..
                }) => Some(Arc::new(self.resolve_level(
                    instance.id.as_str(),
                    index,
                    replacement,
                )?)),
                Some(LevelOverride {
                    level: None,
                    start: Some(start),
                }) => {
                    if inherited.is_none() {
                        log::debug!(
                            "start override on undefined level {} of list '{}' ignored",
                            index,
                            instance.id
                        );
                    }
                    inherited.map(|l| Arc::new(l.with_start(*start)))
                }
                _ => inherited,
            };
            levels.push(slot);
        }

        let resolved = Arc::new(ResolvedInstance {
            id: instance.id.clone(),
            abstract_id: base.canonical,
            levels,
        });
        self.instances.insert(instance.id.clone(), resolved.clone());
        Ok(resolved)
    }

    /// The effective definition of one level of an instance, or `None` when
    /// the level is outside the defined range.
    pub fn format_at(
        &mut self,
        id: &ListInstanceId,
        level: usize,
    ) -> Result<Option<Arc<ResolvedLevel>>, NumberingError> {
        Ok(self.levels_for(id)?.levels.get(level).cloned().flatten())
    }

    /// Resolves every definition and instance and freezes the results.
    pub fn resolve_all(mut self) -> Result<ResolvedNumbering, NumberingError> {
        let set = self.set;
        for definition in set.abstract_definitions() {
            self.resolve_abstract(&definition.id, definition.id.as_str())?;
        }
        for instance in set.instances() {
            self.levels_for(&instance.id)?;
        }
        log::debug!(
            "resolved {} list definitions and {} list instances",
            self.abstracts.len(),
            self.instances.len()
        );
        Ok(ResolvedNumbering {
            instances: self.instances,
        })
    }

    fn resolve_abstract(
        &mut self,
        id: &AbstractListId,
        from: &str,
    ) -> Result<ResolvedAbstract, NumberingError> {
        if let Some(done) = self.abstracts.get(id) {
            return Ok(done.clone());
        }
        if let Some(pos) = self.in_progress.iter().position(|p| p == id) {
            let mut path = self.in_progress[pos..].to_vec();
            path.push(id.clone());
            return Err(NumberingError::Cycle { path });
        }
        let set = self.set;
        let definition =
            set.abstract_definition(id)
                .ok_or_else(|| NumberingError::UnresolvedDefinition {
                    from: from.to_string(),
                    missing: id.clone(),
                })?;

        self.in_progress.push(id.clone());
        let computed = self.compute_abstract(definition);
        self.in_progress.pop();

        let resolved = computed?;
        self.abstracts.insert(id.clone(), resolved.clone());
        Ok(resolved)
    }

    fn compute_abstract(
        &mut self,
        definition: &'a AbstractListDefinition,
    ) -> Result<ResolvedAbstract, NumberingError> {
        match &definition.body {
            AbstractBody::Alias(target) => {
                let resolved = self.resolve_abstract(target, definition.id.as_str())?;
                log::debug!(
                    "list definition '{}' aliases '{}'",
                    definition.id,
                    resolved.canonical
                );
                Ok(resolved)
            }
            AbstractBody::Levels(slots) => {
                let mut levels = Vec::with_capacity(slots.len());
                for (index, slot) in slots.iter().enumerate() {
                    let level = match slot {
                        Some(level) => Some(Arc::new(self.resolve_level(
                            definition.id.as_str(),
                            index,
                            level,
                        )?)),
                        None => None,
                    };
                    levels.push(level);
                }
                Ok(ResolvedAbstract {
                    canonical: definition.id.clone(),
                    levels: Arc::new(levels),
                })
            }
        }
    }

    fn resolve_level(
        &self,
        owner: &str,
        index: usize,
        level: &LevelDefinition,
    ) -> Result<ResolvedLevel, NumberingError> {
        let base = match &level.base_style {
            None => PropertyMap::new(),
            Some(style) => self
                .styles
                .properties(style)
                .cloned()
                .ok_or_else(|| NumberingError::UnresolvedStyle {
                    owner: owner.to_string(),
                    level: index,
                    missing: style.clone(),
                })?,
        };
        ResolvedLevel::new(index, level, base)
    }
}

/// Read access to resolved numbering, as needed by list inference.
pub trait NumberingLookup {
    fn instance(&self, id: &ListInstanceId) -> Option<&ResolvedInstance>;

    fn format_at(&self, id: &ListInstanceId, level: usize) -> Option<&ResolvedLevel> {
        self.instance(id)?.level(level)
    }

    /// The key the instance's counters are stored under.
    fn counter_key(&self, id: &ListInstanceId) -> Option<&AbstractListId> {
        self.instance(id).map(|i| &i.abstract_id)
    }
}

/// The frozen result of a numbering pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedNumbering {
    instances: HashMap<ListInstanceId, Arc<ResolvedInstance>>,
}

impl ResolvedNumbering {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl NumberingLookup for ResolvedNumbering {
    fn instance(&self, id: &ListInstanceId) -> Option<&ResolvedInstance> {
        self.instances.get(id).map(Arc::as_ref)
    }
}

//! Abstract list definitions, list instances and their per-level formatting.

use crate::NumberingError;
use quire_types::{AbstractListId, ListInstanceId, PropertyMap, StyleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of levels a list definition may declare.
pub const MAX_LEVELS: usize = 9;

/// How the counter of a level is rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    #[default]
    Decimal,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
    Bullet,
    None,
}

impl NumberFormat {
    pub fn is_bullet(self) -> bool {
        self == NumberFormat::Bullet
    }
}

/// What follows the rendered marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Suffix {
    #[default]
    Tab,
    Space,
    Nothing,
}

impl Suffix {
    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::Tab => "\t",
            Suffix::Space => " ",
            Suffix::Nothing => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelDefinition {
    pub format: NumberFormat,
    /// Literal marker text with `%1`..`%9` placeholders.
    pub template: String,
    pub start: u32,
    pub suffix: Suffix,
    /// Paragraph style the level's formatting is based on.
    pub base_style: Option<StyleId>,
    /// Properties declared on the level itself.
    pub properties: PropertyMap,
}

impl Default for LevelDefinition {
    fn default() -> Self {
        Self {
            format: NumberFormat::Decimal,
            template: "%1.".to_string(),
            start: 1,
            suffix: Suffix::Tab,
            base_style: None,
            properties: PropertyMap::new(),
        }
    }
}

impl LevelDefinition {
    pub fn new(format: NumberFormat, template: impl Into<String>, start: u32) -> Self {
        Self {
            format,
            template: template.into(),
            start,
            ..Default::default()
        }
    }

    pub fn bullet(glyph: impl Into<String>) -> Self {
        Self::new(NumberFormat::Bullet, glyph, 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbstractBody {
    /// Sparse level slots; `None` means "no level" at that index.
    Levels(Vec<Option<LevelDefinition>>),
    /// Borrows the levels of another definition.
    Alias(AbstractListId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbstractListDefinition {
    pub id: AbstractListId,
    pub body: AbstractBody,
}

impl AbstractListDefinition {
    pub fn with_levels(id: impl Into<AbstractListId>, levels: Vec<Option<LevelDefinition>>) -> Self {
        Self {
            id: id.into(),
            body: AbstractBody::Levels(levels),
        }
    }

    pub fn alias(id: impl Into<AbstractListId>, target: impl Into<AbstractListId>) -> Self {
        Self {
            id: id.into(),
            body: AbstractBody::Alias(target.into()),
        }
    }
}

/// A per-level patch applied by a list instance.
///
/// A full replacement level wins over a start-only override; an override
/// with neither leaves the abstract level untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelOverride {
    pub level: Option<LevelDefinition>,
    pub start: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListInstance {
    pub id: ListInstanceId,
    pub abstract_id: AbstractListId,
    pub overrides: Vec<Option<LevelOverride>>,
}

impl ListInstance {
    pub fn new(id: impl Into<ListInstanceId>, abstract_id: impl Into<AbstractListId>) -> Self {
        Self {
            id: id.into(),
            abstract_id: abstract_id.into(),
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, index: usize, patch: LevelOverride) -> Self {
        if self.overrides.len() <= index {
            self.overrides.resize(index + 1, None);
        }
        self.overrides[index] = Some(patch);
        self
    }
}

/// The complete, immutable numbering tables of one document.
#[derive(Debug, Clone, Default)]
pub struct NumberingSet {
    abstracts: HashMap<AbstractListId, AbstractListDefinition>,
    instances: HashMap<ListInstanceId, ListInstance>,
    // Declaration order, for deterministic iteration.
    abstract_order: Vec<AbstractListId>,
    instance_order: Vec<ListInstanceId>,
}

impl NumberingSet {
    pub fn new(
        abstracts: Vec<AbstractListDefinition>,
        instances: Vec<ListInstance>,
    ) -> Result<Self, NumberingError> {
        let mut set = NumberingSet::default();

        for definition in abstracts {
            if let AbstractBody::Levels(levels) = &definition.body
                && levels.len() > MAX_LEVELS
            {
                return Err(NumberingError::TooManyLevels {
                    owner: definition.id.to_string(),
                    count: levels.len(),
                });
            }
            if set.abstracts.contains_key(&definition.id) {
                return Err(NumberingError::DuplicateDefinition(definition.id.to_string()));
            }
            set.abstract_order.push(definition.id.clone());
            set.abstracts.insert(definition.id.clone(), definition);
        }

        for instance in instances {
            if instance.overrides.len() > MAX_LEVELS {
                return Err(NumberingError::TooManyLevels {
                    owner: instance.id.to_string(),
                    count: instance.overrides.len(),
                });
            }
            if set.instances.contains_key(&instance.id) {
                return Err(NumberingError::DuplicateDefinition(instance.id.to_string()));
            }
            set.instance_order.push(instance.id.clone());
            set.instances.insert(instance.id.clone(), instance);
        }

        Ok(set)
    }

    pub fn abstract_definition(&self, id: &AbstractListId) -> Option<&AbstractListDefinition> {
        self.abstracts.get(id)
    }

    /// Abstract definitions in declaration order.
    pub fn abstract_definitions(&self) -> impl Iterator<Item = &AbstractListDefinition> {
        self.abstract_order
            .iter()
            .filter_map(|id| self.abstracts.get(id))
    }

    pub fn instance(&self, id: &ListInstanceId) -> Option<&ListInstance> {
        self.instances.get(id)
    }

    /// Instances in declaration order.
    pub fn instances(&self) -> impl Iterator<Item = &ListInstance> {
        self.instance_order
            .iter()
            .filter_map(|id| self.instances.get(id))
    }
}

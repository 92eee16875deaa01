//! Attributed document records as delivered by a format-specific loader.
//!
//! Declarations are kept as ordered `[key, value]` pairs so that a property
//! declared twice on one element is still visible here and can be rejected
//! when the record is converted.

use crate::PassError;
use quire_numbering::{
    AbstractListDefinition, LevelDefinition, LevelOverride, ListInstance, NumberFormat,
    NumberingSet, Suffix,
};
use quire_style::{StyleKind, StyleRule, StyleSet};
use quire_types::{AbstractListId, ListInstanceId, PropertyMap, StyleId};
use serde::{Deserialize, Serialize};

pub type Declarations = Vec<(String, String)>;

pub(crate) fn to_properties(declarations: &Declarations) -> Result<PropertyMap, PassError> {
    Ok(PropertyMap::from_declarations(
        declarations.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub id: StyleId,
    #[serde(default)]
    pub parent: Option<StyleId>,
    #[serde(default)]
    pub kind: StyleKind,
    #[serde(default)]
    pub declarations: Declarations,
}

impl StyleRecord {
    pub fn to_rule(&self) -> Result<StyleRule, PassError> {
        Ok(StyleRule {
            id: self.id.clone(),
            parent: self.parent.clone(),
            kind: self.kind,
            properties: to_properties(&self.declarations)?,
        })
    }
}

fn default_start() -> u32 {
    1
}

fn default_template() -> String {
    "%1.".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    #[serde(default)]
    pub format: NumberFormat,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_start")]
    pub start: u32,
    #[serde(default)]
    pub suffix: Suffix,
    #[serde(default)]
    pub base_style: Option<StyleId>,
    #[serde(default)]
    pub declarations: Declarations,
}

impl LevelRecord {
    pub fn to_definition(&self) -> Result<LevelDefinition, PassError> {
        Ok(LevelDefinition {
            format: self.format,
            template: self.template.clone(),
            start: self.start,
            suffix: self.suffix,
            base_style: self.base_style.clone(),
            properties: to_properties(&self.declarations)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractListRecord {
    pub id: AbstractListId,
    #[serde(default)]
    pub levels: Vec<Option<LevelRecord>>,
    /// Borrow the levels of another definition instead of declaring any.
    #[serde(default)]
    pub alias: Option<AbstractListId>,
}

impl AbstractListRecord {
    pub fn to_definition(&self) -> Result<AbstractListDefinition, PassError> {
        match &self.alias {
            Some(target) if self.levels.is_empty() => {
                Ok(AbstractListDefinition::alias(self.id.clone(), target.clone()))
            }
            Some(_) => Err(PassError::Config(format!(
                "list definition '{}' declares both levels and an alias",
                self.id
            ))),
            None => {
                let levels = self
                    .levels
                    .iter()
                    .map(|slot| slot.as_ref().map(LevelRecord::to_definition).transpose())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(AbstractListDefinition::with_levels(self.id.clone(), levels))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelOverrideRecord {
    #[serde(default)]
    pub level: Option<LevelRecord>,
    #[serde(default)]
    pub start: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInstanceRecord {
    pub id: ListInstanceId,
    pub abstract_id: AbstractListId,
    #[serde(default)]
    pub overrides: Vec<Option<LevelOverrideRecord>>,
}

impl ListInstanceRecord {
    pub fn to_instance(&self) -> Result<ListInstance, PassError> {
        let overrides = self
            .overrides
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .map(|o| {
                        Ok::<_, PassError>(LevelOverride {
                            level: o.level.as_ref().map(LevelRecord::to_definition).transpose()?,
                            start: o.start,
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListInstance {
            id: self.id.clone(),
            abstract_id: self.abstract_id.clone(),
            overrides,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub text: String,
    /// Character style of the run.
    #[serde(default)]
    pub style: Option<StyleId>,
    #[serde(default)]
    pub declarations: Declarations,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphRecord {
    #[serde(default)]
    pub style: Option<StyleId>,
    #[serde(default)]
    pub declarations: Declarations,
    #[serde(default)]
    pub runs: Vec<RunRecord>,
    /// Marker text exactly as the source displays it, e.g. `"3.\t"`.
    #[serde(default)]
    pub marker: Option<String>,
    /// Figures and similar content that never ends an open list.
    #[serde(default)]
    pub keeps_lists_open: bool,
}

/// A complete, already-loaded document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentRecords {
    pub styles: Vec<StyleRecord>,
    pub abstract_lists: Vec<AbstractListRecord>,
    pub list_instances: Vec<ListInstanceRecord>,
    pub paragraphs: Vec<ParagraphRecord>,
}

impl DocumentRecords {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn style_set(&self) -> Result<StyleSet, PassError> {
        let rules = self
            .styles
            .iter()
            .map(StyleRecord::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StyleSet::new(rules)?)
    }

    pub fn numbering_set(&self) -> Result<NumberingSet, PassError> {
        let abstracts = self
            .abstract_lists
            .iter()
            .map(AbstractListRecord::to_definition)
            .collect::<Result<Vec<_>, _>>()?;
        let instances = self
            .list_instances
            .iter()
            .map(ListInstanceRecord::to_instance)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NumberingSet::new(abstracts, instances)?)
    }
}

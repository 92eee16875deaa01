use crate::PassError;
use quire_lists::ListConfig;
use quire_nesting::AmbientPolicy;
use quire_types::{LIST_INSTANCE_KEY, LIST_LEVEL_KEY, StyleId};
use serde::{Deserialize, Serialize};

/// Settings of one document pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PassConfig {
    /// Tunables of list structural inference.
    pub lists: ListConfig,
    /// Which run properties are considered inherited from their paragraph.
    pub nesting: AmbientPolicy,
    /// Paragraph styles that are never list items, even when numbered.
    ///
    /// Defaults to none.
    pub heading_styles: Vec<StyleId>,
    /// Property keys removed from every node of the output once lists have
    /// been inferred.
    ///
    /// Defaults to the indentation keys and the numbering reference keys,
    /// which only matter to inference.
    pub stripped_properties: Vec<String>,
    /// Drop trailing whitespace at the end of each paragraph.
    ///
    /// Defaults to `true`.
    pub trim_trailing_whitespace: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            lists: ListConfig::default(),
            nesting: AmbientPolicy::default(),
            heading_styles: Vec::new(),
            stripped_properties: vec![
                "margin-left".to_string(),
                "text-indent".to_string(),
                LIST_INSTANCE_KEY.to_string(),
                LIST_LEVEL_KEY.to_string(),
            ],
            trim_trailing_whitespace: true,
        }
    }
}

impl PassConfig {
    /// Loads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PassError> {
        let config: PassConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PassError> {
        let lists = &self.lists;
        if !lists.calibration_offset.is_finite() || !lists.nested_restart_margin.is_finite() {
            return Err(PassError::Config(
                "list offsets must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_heading(&self, style: Option<&StyleId>) -> bool {
        style.is_some_and(|s| self.heading_styles.contains(s))
    }
}

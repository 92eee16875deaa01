use crate::Token;
use quire_types::PropertyMap;
use serde::{Deserialize, Serialize};

/// Decides which properties of a block's tokens are inherited from the block
/// itself and so need no wrapper of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmbientPolicy {
    /// Keys treated as ambient when the first and last token of a block agree
    /// on their value.
    pub boundary_keys: Vec<String>,
    /// Key/value pairs that always keep their own wrapper.
    pub preserved: PropertyMap,
}

impl Default for AmbientPolicy {
    fn default() -> Self {
        Self {
            boundary_keys: vec!["font-family".to_string()],
            preserved: [("font-family", "monospace")].into_iter().collect(),
        }
    }
}

impl AmbientPolicy {
    /// No ambient properties beyond the block's own.
    pub fn none() -> Self {
        Self {
            boundary_keys: Vec::new(),
            preserved: PropertyMap::new(),
        }
    }

    pub fn ambient_for(&self, block: &PropertyMap, tokens: &[Token]) -> PropertyMap {
        let mut ambient = block.clone();
        if let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
            for key in &self.boundary_keys {
                if let Some(value) = first.properties.get(key)
                    && last.properties.get(key) == Some(value)
                {
                    ambient.insert(key.as_str(), value);
                }
            }
        }
        for (key, value) in &self.preserved {
            if ambient.get(key) == Some(value.as_str()) {
                ambient.remove(key);
            }
        }
        ambient
    }
}

//! Flat property maps as carried by style rules, runs and resolved styles.
//!
//! Keys are CSS-like property names (`font-weight`, `margin-left`, ...). The
//! map is ordered so that every derived map iterates, compares and serializes
//! the same way on every run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use thiserror::Error;

/// Property key carrying the list instance a paragraph (or paragraph style) is numbered with.
pub const LIST_INSTANCE_KEY: &str = "-list-instance";
/// Property key carrying the zero-based list level of a numbered paragraph.
pub const LIST_LEVEL_KEY: &str = "-list-level";

/// Raised when one element declares the same property twice with different values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("duplicate property '{key}' on the same element: '{first}' vs '{second}'")]
    Duplicate {
        key: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<String, String>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from declarations in source order.
    ///
    /// Repeating a declaration with the same value is harmless; repeating it
    /// with a different value is an error, since there is no way to tell which
    /// one the author meant.
    pub fn from_declarations<I, K, V>(declarations: I) -> Result<Self, PropertyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (key, value) in declarations {
            map.declare(key, value)?;
        }
        Ok(map)
    }

    /// Inserts a declaration, rejecting a conflicting redeclaration.
    pub fn declare(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), PropertyError> {
        let key = key.into();
        let value = value.into();
        match self.0.get(&key) {
            Some(existing) if *existing != value => Err(PropertyError::Duplicate {
                key,
                first: existing.clone(),
                second: value,
            }),
            Some(_) => Ok(()),
            None => {
                self.0.insert(key, value);
                Ok(())
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `self` with every entry of `top` written over it.
    pub fn overlay(&self, top: &PropertyMap) -> PropertyMap {
        let mut merged = self.clone();
        merged.extend_from(top);
        merged
    }

    /// Writes every entry of `top` into `self`; `top` wins on collisions.
    pub fn extend_from(&mut self, top: &PropertyMap) {
        for (k, v) in &top.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Drops every entry whose value equals the same key's value in `ambient`.
    pub fn difference_from(&self, ambient: &PropertyMap) -> PropertyMap {
        PropertyMap(
            self.0
                .iter()
                .filter(|(k, v)| ambient.0.get(*k) != Some(*v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Returns a copy without the listed keys.
    pub fn without<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> PropertyMap {
        let mut copy = self.clone();
        for key in keys {
            copy.0.remove(key);
        }
        copy
    }

    /// Returns a copy without the numbering reference keys.
    pub fn without_numbering(&self) -> PropertyMap {
        self.without([LIST_INSTANCE_KEY, LIST_LEVEL_KEY])
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropertyMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

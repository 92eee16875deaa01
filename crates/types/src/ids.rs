//! Newtype wrappers for the identifiers that link document records together.
//!
//! Style rules, abstract list definitions and list instances all use plain
//! strings as identifiers in the source format. Wrapping them keeps a style id
//! from ever being looked up in the numbering tables (and vice versa).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a style rule (paragraph, character, table or numbering style).
    StyleId
);

define_id!(
    /// Identifier of a reusable abstract list definition.
    AbstractListId
);

define_id!(
    /// Identifier of a concrete list instance. The id `"0"` is reserved by the
    /// source format to mean "not numbered".
    ListInstanceId
);

impl ListInstanceId {
    /// True for the reserved "no numbering" instance.
    pub fn is_none_marker(&self) -> bool {
        self.as_str() == "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_style_id_creation() {
        let a = StyleId::new("Heading1");
        let b = StyleId::from("Heading1");
        let c = StyleId::from(String::from("Heading1"));

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "Heading1");
        assert_eq!(a.to_string(), "Heading1");
    }

    #[test]
    fn test_reserved_instance_id() {
        assert!(ListInstanceId::from("0").is_none_marker());
        assert!(!ListInstanceId::from("12").is_none_marker());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = AbstractListId::new("7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7\"");
        let back: AbstractListId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_hash_map_usage() {
        let mut counters = HashMap::new();
        counters.insert(AbstractListId::new("1"), vec![1u32, 2]);
        assert_eq!(counters.get(&AbstractListId::new("1")), Some(&vec![1, 2]));
    }
}

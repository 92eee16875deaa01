//! Range nesting: rebuilds properly nested inline formatting from a flat
//! stream of tokens that each carry their full set of active properties.

pub mod ambient;
pub mod nest;
pub mod ranges;

pub use ambient::AmbientPolicy;
pub use nest::{Nested, RangeSplit, nest};
pub use ranges::{StyleRange, style_ranges};

use quire_idf::Node;
use quire_types::PropertyMap;

/// One unit of inline content with its fully merged properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub content: Node,
    pub properties: PropertyMap,
}

impl Token {
    pub fn new(content: Node, properties: PropertyMap) -> Self {
        Self {
            content,
            properties,
        }
    }

    pub fn text(text: impl Into<String>, properties: PropertyMap) -> Self {
        Self::new(Node::text(text), properties)
    }
}

/// Drops trailing whitespace-only text tokens and trims the end of the last
/// remaining text token.
pub fn trim_trailing_whitespace(tokens: &mut Vec<Token>) {
    while let Some(last) = tokens.last_mut() {
        let Node::Text { text } = &mut last.content else {
            break;
        };
        let kept = text.trim_end().len();
        if kept > 0 {
            text.truncate(kept);
            break;
        }
        tokens.pop();
    }
}

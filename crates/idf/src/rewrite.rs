//! Rule-based tree rewriting.
//!
//! A [`Rewrite`] rule first inspects a node and then, if it accepted the node,
//! produces its replacement. Rules are concrete types so that every rewrite a
//! pass performs is named and testable on its own.

use crate::Node;
use quire_types::PropertyMap;

/// The outcome of checking a node against a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Replace the node. The replacement is not visited again.
    Accept,
    /// Keep the node and continue into its children.
    Reject,
    /// Keep the node and leave its whole subtree alone.
    SkipSubtree,
}

pub trait Rewrite {
    fn check(&self, node: &Node) -> Match;

    /// Produces the nodes that take the place of an accepted node.
    fn replace(&self, node: Node) -> Vec<Node>;
}

/// Applies `rule` across a forest, returning the rewritten forest.
pub fn rewrite<R: Rewrite + ?Sized>(nodes: Vec<Node>, rule: &R) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match rule.check(&node) {
            Match::Accept => {
                for replacement in rule.replace(node) {
                    crate::push_merged(&mut out, replacement);
                }
            }
            Match::SkipSubtree => crate::push_merged(&mut out, node),
            Match::Reject => {
                let rebuilt = match node {
                    Node::Text { .. } => node,
                    other => {
                        let children = other.children().to_vec();
                        other.with_children(rewrite(children, rule))
                    }
                };
                crate::push_merged(&mut out, rebuilt);
            }
        }
    }
    out
}

/// Drops paragraphs (and list items) that contain no text.
#[derive(Debug, Default, Clone, Copy)]
pub struct StripEmptyBlocks;

impl Rewrite for StripEmptyBlocks {
    fn check(&self, node: &Node) -> Match {
        match node {
            Node::Block { .. } | Node::Item { .. } if node.is_empty() => Match::Accept,
            Node::Text { .. } => Match::SkipSubtree,
            _ => Match::Reject,
        }
    }

    fn replace(&self, _node: Node) -> Vec<Node> {
        Vec::new()
    }
}

/// Removes the listed property keys from every wrapper, block and item.
///
/// A wrapper left without properties is dissolved into its children.
#[derive(Debug, Clone, Default)]
pub struct StripProperties {
    keys: Vec<String>,
}

impl StripProperties {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    fn strip(&self, properties: &PropertyMap) -> PropertyMap {
        properties.without(self.keys.iter().map(String::as_str))
    }

    fn touches(&self, properties: &PropertyMap) -> bool {
        self.keys.iter().any(|k| properties.contains_key(k))
    }
}

impl Rewrite for StripProperties {
    fn check(&self, node: &Node) -> Match {
        match node {
            Node::Wrapper { properties, .. } if self.touches(properties) => Match::Accept,
            Node::Block { meta, .. } | Node::Item { meta, .. } if self.touches(&meta.properties) => {
                Match::Accept
            }
            Node::Text { .. } => Match::SkipSubtree,
            _ => Match::Reject,
        }
    }

    fn replace(&self, node: Node) -> Vec<Node> {
        match node {
            Node::Wrapper {
                properties,
                children,
            } => {
                let children = rewrite(children, self);
                let properties = self.strip(&properties);
                if properties.is_empty() {
                    children
                } else {
                    vec![Node::Wrapper {
                        properties,
                        children,
                    }]
                }
            }
            Node::Block { mut meta, children } => {
                meta.properties = self.strip(&meta.properties);
                vec![Node::Block {
                    meta,
                    children: rewrite(children, self),
                }]
            }
            Node::Item { mut meta, children } => {
                meta.properties = self.strip(&meta.properties);
                vec![Node::Item {
                    meta,
                    children: rewrite(children, self),
                }]
            }
            other => vec![other],
        }
    }
}

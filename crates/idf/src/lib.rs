//! Intermediate Document Format (IDF)
//!
//! The tag-less output tree shared by the nesting and list inference engines.
//! A downstream serializer decides which concrete markup each variant becomes.
//!
//! Trees are built bottom-up: children are complete before their parent node
//! is constructed, and "editing" a node produces a new node.

pub mod rewrite;

pub use rewrite::{Match, Rewrite, StripEmptyBlocks, StripProperties, rewrite};

use quire_types::{PropertyMap, StyleId};
use serde::Serialize;

/// A string type for text content.
pub type TextStr = String;

/// Metadata for block-level content (paragraphs and list items).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlockMeta {
    /// The paragraph style the content was declared with.
    pub style: Option<StyleId>,
    /// Properties declared directly on the block.
    pub properties: PropertyMap,
}

impl BlockMeta {
    pub fn new(style: Option<StyleId>, properties: PropertyMap) -> Self {
        Self { style, properties }
    }
}

/// The flavour of a list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    /// Bulleted list.
    Unordered,
    /// The outermost numbered list of a region.
    Ordered,
    /// A numbered list opened inside another numbered list.
    NestedOrdered,
}

impl ContainerKind {
    pub fn is_ordered(self) -> bool {
        !matches!(self, ContainerKind::Unordered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    /// A run of plain text.
    Text { text: TextStr },
    /// Inline formatting applied to its children.
    Wrapper {
        properties: PropertyMap,
        children: Vec<Node>,
    },
    /// Opaque block content passed through untouched, e.g. a paragraph.
    Block { meta: BlockMeta, children: Vec<Node> },
    /// A list container; `depth` counts the containers enclosing it.
    Container {
        kind: ContainerKind,
        depth: usize,
        children: Vec<Node>,
    },
    /// An item within a list container.
    Item { meta: BlockMeta, children: Vec<Node> },
}

impl Node {
    pub fn text(text: impl Into<TextStr>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn wrapper(properties: PropertyMap, children: Vec<Node>) -> Self {
        Node::Wrapper {
            properties,
            children,
        }
    }

    pub fn block(meta: BlockMeta, children: Vec<Node>) -> Self {
        Node::Block { meta, children }
    }

    pub fn container(kind: ContainerKind, depth: usize, children: Vec<Node>) -> Self {
        Node::Container {
            kind,
            depth,
            children,
        }
    }

    pub fn item(meta: BlockMeta, children: Vec<Node>) -> Self {
        Node::Item { meta, children }
    }

    /// Returns a string identifier for the node type.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text { .. } => "text",
            Node::Wrapper { .. } => "wrapper",
            Node::Block { .. } => "block",
            Node::Container { .. } => "container",
            Node::Item { .. } => "item",
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text { .. } => &[],
            Node::Wrapper { children, .. }
            | Node::Block { children, .. }
            | Node::Container { children, .. }
            | Node::Item { children, .. } => children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Returns the block metadata if the node type carries it.
    pub fn meta(&self) -> Option<&BlockMeta> {
        match self {
            Node::Block { meta, .. } | Node::Item { meta, .. } => Some(meta),
            _ => None,
        }
    }

    /// Rebuilds this node around a new child list. Text nodes have no
    /// children and come back unchanged.
    pub fn with_children(self, children: Vec<Node>) -> Node {
        match self {
            Node::Text { .. } => self,
            Node::Wrapper { properties, .. } => Node::Wrapper {
                properties,
                children,
            },
            Node::Block { meta, .. } => Node::Block { meta, children },
            Node::Container { kind, depth, .. } => Node::Container {
                kind,
                depth,
                children,
            },
            Node::Item { meta, .. } => Node::Item { meta, children },
        }
    }

    /// Returns a copy of this node with the child at `index` replaced by
    /// `replacement` (which may be empty, removing the child). An index past
    /// the end leaves the node unchanged.
    pub fn replace_child(&self, index: usize, replacement: Vec<Node>) -> Node {
        let current = self.children();
        if index >= current.len() {
            return self.clone();
        }
        let mut children = Vec::with_capacity(current.len() + replacement.len());
        children.extend_from_slice(&current[..index]);
        for node in replacement {
            push_merged(&mut children, node);
        }
        for node in &current[index + 1..] {
            push_merged(&mut children, node.clone());
        }
        self.clone().with_children(children)
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(text),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    /// True if the subtree holds no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Text { text } => text.is_empty(),
            _ => self.children().iter().all(Node::is_empty),
        }
    }
}

/// Appends `node`, merging it into a trailing text node when both are text.
pub fn push_merged(nodes: &mut Vec<Node>, node: Node) {
    if let Node::Text { text: incoming } = &node
        && let Some(Node::Text { text }) = nodes.last_mut()
    {
        text.push_str(incoming);
        return;
    }
    nodes.push(node);
}

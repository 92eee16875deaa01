//! The inference state machine.
//!
//! Open containers live on a stack of frames. Each frame owns the items it has
//! finished plus the item still receiving content; a container node is built
//! exactly once, when its frame closes, and handed to the item that encloses
//! it (or to the document root).

use crate::{Item, ListConfig, MarkerMismatch, ObservedCounter};
use quire_idf::{BlockMeta, ContainerKind, Node};
use quire_numbering::{NumberingCounterState, NumberingLookup, render_marker};
use quire_types::ListInstanceId;

struct OpenItem {
    meta: BlockMeta,
    children: Vec<Node>,
}

impl OpenItem {
    fn into_node(self) -> Node {
        Node::item(self.meta, self.children)
    }
}

struct Frame {
    threshold: f32,
    kind: ContainerKind,
    depth: usize,
    items: Vec<Node>,
    open: OpenItem,
}

impl Frame {
    fn into_node(mut self) -> Node {
        self.items.push(self.open.into_node());
        Node::container(self.kind, self.depth, self.items)
    }
}

/// The result of one inference pass.
#[derive(Debug)]
pub struct Inferred {
    pub nodes: Vec<Node>,
    pub counters: NumberingCounterState,
    pub counters_observed: Vec<ObservedCounter>,
    pub diagnostics: Vec<MarkerMismatch>,
}

pub struct ListInference<'a, L: NumberingLookup + ?Sized> {
    numbering: &'a L,
    config: &'a ListConfig,
    stack: Vec<Frame>,
    root: Vec<Node>,
    counters: NumberingCounterState,
    observed: Vec<ObservedCounter>,
    diagnostics: Vec<MarkerMismatch>,
    position: usize,
}

impl<'a, L: NumberingLookup + ?Sized> ListInference<'a, L> {
    /// Starts a pass with empty counters.
    pub fn new(numbering: &'a L, config: &'a ListConfig) -> Self {
        Self {
            numbering,
            config,
            stack: Vec::new(),
            root: Vec::new(),
            counters: NumberingCounterState::new(),
            observed: Vec::new(),
            diagnostics: Vec::new(),
            position: 0,
        }
    }

    pub fn push(&mut self, item: Item) {
        let position = self.position;
        self.position += 1;

        let is_list = item.is_list_item();
        let effective = if is_list {
            item.indentation
        } else {
            item.indentation - self.config.calibration_offset
        };

        if is_list || !item.keeps_lists_open {
            while self
                .stack
                .last()
                .is_some_and(|top| top.threshold > effective)
            {
                self.close_top();
            }
        }

        // Numbered paragraphs count whether or not they become list items.
        if let (Some(instance), Some(level)) = (&item.list_instance, item.level)
            && !instance.is_none_marker()
        {
            let checked = if is_list {
                item.literal_marker.as_deref()
            } else {
                None
            };
            self.advance_counters(position, instance, level, checked);
        }

        if is_list {
            self.push_list_item(effective, item);
        } else {
            self.append_content(item.content);
        }
    }

    /// Closes every open container and returns the finished tree.
    pub fn finish(mut self) -> Inferred {
        while !self.stack.is_empty() {
            self.close_top();
        }
        log::debug!(
            "list inference finished: {} top-level nodes, {} numbered items",
            self.root.len(),
            self.observed.len()
        );
        Inferred {
            nodes: self.root,
            counters: self.counters,
            counters_observed: self.observed,
            diagnostics: self.diagnostics,
        }
    }

    fn append_content(&mut self, content: Node) {
        match self.stack.last_mut() {
            Some(top) => top.open.children.push(content),
            None => self.root.push(content),
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        log::debug!(
            "closing {:?} container at depth {} (threshold {})",
            frame.kind,
            frame.depth,
            frame.threshold
        );
        let container = frame.into_node();
        self.append_content(container);
    }

    fn push_list_item(&mut self, indentation: f32, item: Item) {
        let bullet = match (&item.list_instance, item.level) {
            (Some(instance), Some(level)) => self
                .numbering
                .format_at(instance, level)
                .is_some_and(|l| l.is_bullet()),
            _ => false,
        };
        let literal_marker = item.literal_marker.clone();
        let (meta, children) = item.into_item_parts();
        let open = OpenItem { meta, children };

        let compatible = |frame: &Frame| (frame.kind == ContainerKind::Unordered) == bullet;
        let joins = match self.stack.last() {
            None => None,
            Some(top) if indentation > top.threshold => None,
            Some(top) if compatible(top) => Some(self.stack.len() - 1),
            // A kind change at the same indentation returns to an enclosing
            // list of this kind when there is one.
            Some(_) => self
                .stack
                .iter()
                .rposition(|frame| frame.threshold == indentation && compatible(frame)),
        };

        if let Some(index) = joins {
            while self.stack.len() > index + 1 {
                self.close_top();
            }
            if let Some(top) = self.stack.last_mut() {
                let finished = std::mem::replace(&mut top.open, open);
                top.items.push(finished.into_node());
            }
            return;
        }

        let kind = self.classify(bullet, indentation, literal_marker.as_deref());
        let depth = self.stack.len();
        log::debug!(
            "opening {:?} container at depth {} (threshold {})",
            kind,
            depth,
            indentation
        );
        self.stack.push(Frame {
            threshold: indentation,
            kind,
            depth,
            items: Vec::new(),
            open,
        });
    }

    fn classify(&self, bullet: bool, indentation: f32, literal_marker: Option<&str>) -> ContainerKind {
        if bullet {
            return ContainerKind::Unordered;
        }
        match self.stack.last() {
            None => ContainerKind::Ordered,
            Some(parent) if parent.kind == ContainerKind::Unordered => ContainerKind::Ordered,
            Some(parent) => {
                let restarts = indentation > parent.threshold + self.config.nested_restart_margin
                    && literal_marker == Some(self.config.restart_marker.as_str());
                if restarts {
                    ContainerKind::Ordered
                } else {
                    ContainerKind::NestedOrdered
                }
            }
        }
    }

    fn advance_counters(
        &mut self,
        position: usize,
        instance: &ListInstanceId,
        level: usize,
        literal_marker: Option<&str>,
    ) {
        let numbering = self.numbering;
        let (Some(key), Some(resolved)) = (
            numbering.counter_key(instance),
            numbering.instance(instance),
        ) else {
            log::warn!("list instance '{}' has no numbering; counters skipped", instance);
            return;
        };

        let stack = self.counters.advance(
            key,
            instance,
            level,
            self.config.first_use_reset,
            |l| match resolved.level(l) {
                Some(definition) => definition.start,
                None => {
                    log::debug!("list '{}' has no level {}; starting at 1", instance, l);
                    1
                }
            },
        );
        let value = stack.get(level).copied().unwrap_or(1);
        let expected = render_marker(&resolved.levels, stack);

        self.observed.push(ObservedCounter {
            position,
            instance: instance.clone(),
            level,
            value,
        });

        if !self.config.check_markers {
            return;
        }
        if let (Some(expected), Some(found)) = (expected, literal_marker)
            && expected != found
        {
            log::warn!(
                "marker mismatch at item {}: list '{}' level {} renders {:?}, source has {:?}",
                position,
                instance,
                level,
                expected,
                found
            );
            self.diagnostics.push(MarkerMismatch {
                position,
                instance: instance.clone(),
                level,
                expected,
                found: found.to_string(),
            });
        }
    }
}

/// Runs a complete inference pass over `items` with fresh counters.
pub fn infer<L: NumberingLookup + ?Sized>(
    items: impl IntoIterator<Item = Item>,
    numbering: &L,
    config: &ListConfig,
) -> Inferred {
    let mut inference = ListInference::new(numbering, config);
    for item in items {
        inference.push(item);
    }
    inference.finish()
}

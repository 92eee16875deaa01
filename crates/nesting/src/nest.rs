//! Turns flat per-token property maps into a tree of nested wrappers.
//!
//! Ranges are visited in (start ascending, end descending) order, so the first
//! remaining range of a region is never contained in another and becomes the
//! next outer wrapper. Ranges inside it are nested recursively. A range that
//! begins inside the wrapper and ends beyond it cannot be represented and is
//! cut in two at the wrapper's end.

use crate::ranges::style_ranges;
use crate::Token;
use quire_idf::{Node, push_merged};
use quire_types::PropertyMap;

/// A range that had to be cut at a wrapper boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSplit {
    pub properties: PropertyMap,
    pub start: usize,
    pub end: usize,
    /// Offset of the cut.
    pub at: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Nested {
    pub nodes: Vec<Node>,
    pub splits: Vec<RangeSplit>,
}

/// One or more ranges with the same extent, rendered as a single wrapper.
#[derive(Debug, Clone)]
struct Span {
    start: usize,
    end: usize,
    properties: PropertyMap,
}

fn coalesce(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(last) = out.last_mut()
            && last.start == span.start
            && last.end == span.end
        {
            last.properties.extend_from(&span.properties);
            continue;
        }
        out.push(span);
    }
    out
}

struct Builder {
    contents: Vec<Option<Node>>,
    splits: Vec<RangeSplit>,
}

impl Builder {
    fn emit(&mut self, out: &mut Vec<Node>, from: usize, to: usize) {
        for slot in &mut self.contents[from..to] {
            if let Some(node) = slot.take() {
                push_merged(out, node);
            }
        }
    }

    fn build(&mut self, spans: Vec<Span>, lo: usize, hi: usize) -> Vec<Node> {
        let mut out = Vec::new();
        let mut pos = lo;
        let mut pending = spans.into_iter();

        while let Some(outer) = pending.next() {
            let mut inside = Vec::new();
            let mut after = Vec::new();
            for span in pending {
                if span.start >= outer.end {
                    after.push(span);
                } else if span.end <= outer.end {
                    inside.push(span);
                } else {
                    log::warn!(
                        "range {:?} [{}, {}) straddles wrapper end {}; splitting",
                        span.properties,
                        span.start,
                        span.end,
                        outer.end
                    );
                    self.splits.push(RangeSplit {
                        properties: span.properties.clone(),
                        start: span.start,
                        end: span.end,
                        at: outer.end,
                    });
                    inside.push(Span {
                        start: span.start,
                        end: outer.end,
                        properties: span.properties.clone(),
                    });
                    after.push(Span {
                        start: outer.end,
                        ..span
                    });
                }
            }

            self.emit(&mut out, pos, outer.start);
            let children = self.build(coalesce(inside), outer.start, outer.end);
            out.push(Node::wrapper(outer.properties, children));
            pos = outer.end;
            pending = coalesce(after).into_iter();
        }

        self.emit(&mut out, pos, hi);
        out
    }
}

/// Nests `tokens` into wrappers such that the properties of the wrappers
/// enclosing each token, merged, equal that token's properties minus
/// `ambient`.
pub fn nest(tokens: Vec<Token>, ambient: &PropertyMap) -> Nested {
    let spans = style_ranges(&tokens, ambient)
        .into_iter()
        .map(|r| Span {
            start: r.start,
            end: r.end,
            properties: [(r.key, r.value)].into_iter().collect(),
        })
        .collect();

    let len = tokens.len();
    let mut builder = Builder {
        contents: tokens.into_iter().map(|t| Some(t.content)).collect(),
        splits: Vec::new(),
    };
    let nodes = builder.build(coalesce(spans), 0, len);
    Nested {
        nodes,
        splits: builder.splits,
    }
}

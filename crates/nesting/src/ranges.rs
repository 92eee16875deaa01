use crate::Token;
use quire_types::PropertyMap;
use std::collections::BTreeMap;

/// A half-open span `[start, end)` of token offsets over which one property
/// holds one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRange {
    pub start: usize,
    pub end: usize,
    pub key: String,
    pub value: String,
}

impl StyleRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Computes, for every property key, the maximal runs of consecutive tokens
/// sharing one value.
///
/// Entries equal to `ambient` are dropped first, so properties the enclosing
/// block already carries never produce a range.
pub fn style_ranges(tokens: &[Token], ambient: &PropertyMap) -> Vec<StyleRange> {
    let mut ranges = Vec::new();
    // key -> (start, value) of the range still being extended
    let mut open: BTreeMap<&str, (usize, &str)> = BTreeMap::new();

    for (offset, token) in tokens.iter().enumerate() {
        let active: BTreeMap<&str, &str> = token
            .properties
            .iter()
            .filter(|(k, v)| ambient.get(k) != Some(*v))
            .collect();

        open.retain(|key, (start, value)| {
            if active.get(key) == Some(&*value) {
                return true;
            }
            ranges.push(StyleRange {
                start: *start,
                end: offset,
                key: key.to_string(),
                value: value.to_string(),
            });
            false
        });

        for (key, value) in active {
            open.entry(key).or_insert((offset, value));
        }
    }

    for (key, (start, value)) in open {
        ranges.push(StyleRange {
            start,
            end: tokens.len(),
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    ranges.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.key.cmp(&b.key))
    });
    ranges
}

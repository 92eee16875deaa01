//! Per-definition counter stacks.

use quire_types::{AbstractListId, ListInstanceId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// When the counter of a level is reset to its start value instead of being
/// incremented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FirstUseReset {
    /// Never; shared counters always continue.
    Disabled,
    /// The first time an instance is used at any level.
    PerInstance,
    /// The first time an instance is used at each level.
    #[default]
    PerInstanceLevel,
}

/// Counter stacks keyed by abstract definition. Index `k` of a stack is the
/// current value at level `k`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberingCounterState {
    stacks: HashMap<AbstractListId, Vec<u32>>,
    seen_instances: HashSet<ListInstanceId>,
    seen_levels: HashSet<(ListInstanceId, usize)>,
}

impl NumberingCounterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter at `level` and returns the whole stack.
    ///
    /// A stack shorter than `level + 1` is extended with the start values of
    /// the missing levels. Otherwise deeper levels are discarded and the
    /// counter at `level` is incremented, or reset to its start value when
    /// `policy` says this is the instance's first use.
    pub fn advance(
        &mut self,
        key: &AbstractListId,
        instance: &ListInstanceId,
        level: usize,
        policy: FirstUseReset,
        start_of: impl Fn(usize) -> u32,
    ) -> &[u32] {
        let first_use = match policy {
            FirstUseReset::Disabled => false,
            FirstUseReset::PerInstance => !self.seen_instances.contains(instance),
            FirstUseReset::PerInstanceLevel => {
                !self.seen_levels.contains(&(instance.clone(), level))
            }
        };

        let stack = self.stacks.entry(key.clone()).or_default();
        if stack.len() <= level {
            while stack.len() <= level {
                stack.push(start_of(stack.len()));
            }
        } else {
            stack.truncate(level + 1);
            if first_use {
                log::debug!(
                    "list '{}' first used at level {}; counter reset",
                    instance,
                    level
                );
                stack[level] = start_of(level);
            } else {
                stack[level] = stack[level].saturating_add(1);
            }
        }

        self.seen_instances.insert(instance.clone());
        self.seen_levels.insert((instance.clone(), level));
        stack.as_slice()
    }

    /// The current stack for `key`, empty if the definition was never used.
    pub fn current(&self, key: &AbstractListId) -> &[u32] {
        self.stacks.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of definitions with a live counter stack.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

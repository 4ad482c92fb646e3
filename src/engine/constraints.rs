//! Per-source allow-lists of transition targets.

use crate::core::State;
use std::collections::{HashMap, HashSet};

/// Maps a source state to the set of states it may switch into.
///
/// The table itself has no notion of strict or free mode. A missing entry
/// is reported as `None` and the machine decides what that means.
#[derive(Debug, Clone)]
pub struct TransitionConstraintTable<S: State> {
    allowed: HashMap<S, HashSet<S>>,
}

impl<S: State> Default for TransitionConstraintTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionConstraintTable<S> {
    pub fn new() -> Self {
        Self {
            allowed: HashMap::new(),
        }
    }

    /// Replace the allowed targets for `source`.
    ///
    /// Returns the previous set if one was registered.
    pub fn set<I>(&mut self, source: S, targets: I) -> Option<HashSet<S>>
    where
        I: IntoIterator<Item = S>,
    {
        self.allowed.insert(source, targets.into_iter().collect())
    }

    /// Allowed targets for `source`, if the source has an entry.
    pub fn allowed_from(&self, source: &S) -> Option<&HashSet<S>> {
        self.allowed.get(source)
    }

    /// True only if `source` has an entry containing `target`.
    pub fn permits(&self, source: &S, target: &S) -> bool {
        self.allowed
            .get(source)
            .is_some_and(|targets| targets.contains(target))
    }

    pub fn contains_source(&self, source: &S) -> bool {
        self.allowed.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

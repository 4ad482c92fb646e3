//! State transition history tracking.
//!
//! A `StateHistory` is an ordered log of completed transitions. Either
//! endpoint of a transition may be `None`, which is the unset (stopped)
//! condition of the machine.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use statewise::core::StateTransition;
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Light { Red, Green }
/// }
///
/// let started = StateTransition::now(None, Some(Light::Red));
/// assert!(started.is_start());
/// assert!(!started.is_stop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S> {
    /// The state being left, `None` when the machine was starting
    pub from: Option<S>,
    /// The state being entered, `None` when the machine was stopping
    pub to: Option<S>,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Record a transition stamped with the current time.
    pub fn now(from: Option<S>, to: Option<S>) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    /// True if this transition started the machine from unset.
    pub fn is_start(&self) -> bool {
        self.from.is_none() && self.to.is_some()
    }

    /// True if this transition stopped the machine.
    pub fn is_stop(&self) -> bool {
        self.from.is_some() && self.to.is_none()
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use statewise::core::{StateHistory, StateTransition};
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Step { A, B }
/// }
///
/// let mut history = StateHistory::new();
/// history.push(StateTransition::now(None, Some(Step::A)));
/// history.push(StateTransition::now(Some(Step::A), Some(Step::B)));
///
/// assert_eq!(history.get_path(), vec![None, Some(&Step::A), Some(&Step::B)]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory<S> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the first transition, then the `to` of every
    /// transition, in order. `None` entries are the unset condition.
    pub fn get_path(&self) -> Vec<Option<&S>> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_ref());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_ref());
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Get all transitions in the order they completed.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

//! Per-state enter and leave handlers.

use crate::core::State;
use crate::engine::error::HandlerResult;
use crate::engine::machine::StateMachine;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Callback run when a state is entered or left.
///
/// The second argument is the other endpoint of the transition: the old
/// state for an enter-handler, the new target for a leave-handler. `None`
/// is the unset condition.
pub type StateHandler<S> = Rc<dyn Fn(&StateMachine<S>, Option<&S>) -> HandlerResult>;

/// An optional enter-handler and an optional leave-handler for one state.
pub struct StateHandlers<S: State> {
    pub(crate) enter: Option<StateHandler<S>>,
    pub(crate) leave: Option<StateHandler<S>>,
}

impl<S: State> StateHandlers<S> {
    /// A value with both slots empty.
    pub fn new() -> Self {
        Self {
            enter: None,
            leave: None,
        }
    }

    /// Set the enter-handler, called with the state being left.
    pub fn on_enter<F>(mut self, handler: F) -> Self
    where
        F: Fn(&StateMachine<S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.enter = Some(Rc::new(handler));
        self
    }

    /// Set the leave-handler, called with the state being entered.
    pub fn on_leave<F>(mut self, handler: F) -> Self
    where
        F: Fn(&StateMachine<S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.leave = Some(Rc::new(handler));
        self
    }

    pub fn has_enter(&self) -> bool {
        self.enter.is_some()
    }

    pub fn has_leave(&self) -> bool {
        self.leave.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.leave.is_none()
    }

    /// Fill slots from `other`; a populated slot in `other` wins.
    fn merge(&mut self, other: StateHandlers<S>) {
        if let Some(enter) = other.enter {
            self.enter = Some(enter);
        }
        if let Some(leave) = other.leave {
            self.leave = Some(leave);
        }
    }
}

impl<S: State> Default for StateHandlers<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> Clone for StateHandlers<S> {
    fn clone(&self) -> Self {
        Self {
            enter: self.enter.clone(),
            leave: self.leave.clone(),
        }
    }
}

impl<S: State> fmt::Debug for StateHandlers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHandlers")
            .field("enter", &self.enter.is_some())
            .field("leave", &self.leave.is_some())
            .finish()
    }
}

/// Maps each state to its registered handlers.
pub struct HandlerRegistry<S: State> {
    handlers: HashMap<S, StateHandlers<S>>,
}

impl<S: State> Default for HandlerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> HandlerRegistry<S> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register handlers for `state`, slot by slot.
    ///
    /// Empty slots in `handlers` leave earlier registrations in place.
    pub fn add(&mut self, state: S, handlers: StateHandlers<S>) {
        self.handlers.entry(state).or_default().merge(handlers);
    }

    /// Clone of the enter-handler for `state`.
    pub fn enter_handler(&self, state: &S) -> Option<StateHandler<S>> {
        self.handlers.get(state).and_then(|h| h.enter.clone())
    }

    /// Clone of the leave-handler for `state`.
    pub fn leave_handler(&self, state: &S) -> Option<StateHandler<S>> {
        self.handlers.get(state).and_then(|h| h.leave.clone())
    }

    pub fn get(&self, state: &S) -> Option<&StateHandlers<S>> {
        self.handlers.get(state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.handlers.get(state).is_some_and(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Strictness;
    use std::cell::RefCell;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Mode {
        One,
        Two,
    }

    impl State for Mode {
        fn name(&self) -> &str {
            match self {
                Self::One => "One",
                Self::Two => "Two",
            }
        }
    }

    fn tagged(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> StateHandlers<Mode> {
        let log = Rc::clone(log);
        StateHandlers::new().on_enter(move |_, _| {
            log.borrow_mut().push(tag);
            Ok(())
        })
    }

    #[test]
    fn omitted_slot_does_not_clear_existing_handler() {
        let mut registry = HandlerRegistry::new();
        registry.add(Mode::One, StateHandlers::new().on_enter(|_, _| Ok(())));
        registry.add(Mode::One, StateHandlers::new().on_leave(|_, _| Ok(())));

        let handlers = registry.get(&Mode::One).unwrap();
        assert!(handlers.has_enter());
        assert!(handlers.has_leave());
    }

    #[test]
    fn later_registration_wins_within_a_slot() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = HandlerRegistry::new();
        registry.add(Mode::One, tagged(&log, "first"));
        registry.add(Mode::One, tagged(&log, "second"));

        let machine = StateMachine::new(Strictness::Free);
        let enter = registry.enter_handler(&Mode::One).unwrap();
        enter(&machine, None).unwrap();

        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn empty_registration_does_not_count_as_handlers() {
        let mut registry: HandlerRegistry<Mode> = HandlerRegistry::new();
        registry.add(Mode::Two, StateHandlers::new());

        assert!(!registry.contains(&Mode::Two));
        assert!(registry.enter_handler(&Mode::Two).is_none());
        assert!(registry.leave_handler(&Mode::Two).is_none());
    }
}

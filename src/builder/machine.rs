//! Builder for constructing state machines.

use crate::builder::error::{BuildError, HandlerSlot};
use crate::core::State;
use crate::engine::{
    HandlerResult, ListenerSlot, StateHandlers, StateMachine, Strictness, TransitionListener,
};
use std::collections::HashMap;
use std::rc::Rc;

/// Builder for configuring a state machine with a fluent API.
///
/// The builder is the checked way to configure a machine: where the
/// machine's own setters silently let the last registration win, the
/// builder reports a second constraint for the same source, or a second
/// handler in the same slot, as a [`BuildError`].
///
/// # Example
///
/// ```rust
/// use statewise::builder::StateMachineBuilder;
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Phase { Setup, Run, Report }
/// }
///
/// let machine = StateMachineBuilder::strict()
///     .allow(Phase::Setup, [Phase::Run])
///     .allow(Phase::Run, [Phase::Report])
///     .on_enter(Phase::Run, |_, _| Ok(()))
///     .build()
///     .unwrap();
///
/// machine.switch_to(Phase::Setup).unwrap();
/// assert!(machine.can_switch_to(Some(&Phase::Run)));
/// assert!(!machine.can_switch_to(Some(&Phase::Report)));
/// ```
pub struct StateMachineBuilder<S: State> {
    strictness: Strictness,
    constraints: Vec<(S, Vec<S>)>,
    handlers: HashMap<S, StateHandlers<S>>,
    before: Vec<TransitionListener<S>>,
    after: Vec<TransitionListener<S>>,
    errors: Vec<BuildError>,
}

impl<S: State + 'static> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            constraints: Vec::new(),
            handlers: HashMap::new(),
            before: Vec::new(),
            after: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn strict() -> Self {
        Self::new(Strictness::Strict)
    }

    pub fn free() -> Self {
        Self::new(Strictness::Free)
    }

    /// Declare the targets reachable from `source`.
    pub fn allow<I>(mut self, source: S, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        if self.constraints.iter().any(|(existing, _)| *existing == source) {
            self.errors.push(BuildError::DuplicateConstraint {
                state: source.name().to_string(),
            });
            return self;
        }
        self.constraints.push((source, targets.into_iter().collect()));
        self
    }

    /// Add an enter-handler for `state`.
    pub fn on_enter<F>(self, state: S, handler: F) -> Self
    where
        F: Fn(&StateMachine<S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.handlers(state, StateHandlers::new().on_enter(handler))
    }

    /// Add a leave-handler for `state`.
    pub fn on_leave<F>(self, state: S, handler: F) -> Self
    where
        F: Fn(&StateMachine<S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.handlers(state, StateHandlers::new().on_leave(handler))
    }

    /// Add enter and/or leave handlers for `state`.
    pub fn handlers(mut self, state: S, handlers: StateHandlers<S>) -> Self {
        let existing = self.handlers.entry(state.clone()).or_default();
        if handlers.has_enter() && existing.has_enter() {
            self.errors.push(BuildError::DuplicateHandler {
                state: state.name().to_string(),
                slot: HandlerSlot::Enter,
            });
        }
        if handlers.has_leave() && existing.has_leave() {
            self.errors.push(BuildError::DuplicateHandler {
                state: state.name().to_string(),
                slot: HandlerSlot::Leave,
            });
        }
        if let Some(enter) = handlers.enter {
            existing.enter.get_or_insert(enter);
        }
        if let Some(leave) = handlers.leave {
            existing.leave.get_or_insert(leave);
        }
        self
    }

    /// Add a before-transition listener.
    pub fn before_transition<F>(mut self, listener: F) -> Self
    where
        F: Fn(&StateMachine<S>, Option<&S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.before.push(Rc::new(listener));
        self
    }

    /// Add an after-transition listener.
    pub fn after_transition<F>(mut self, listener: F) -> Self
    where
        F: Fn(&StateMachine<S>, Option<&S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.after.push(Rc::new(listener));
        self
    }

    /// Build the state machine, unset and ready to start.
    ///
    /// Returns the first configuration error recorded, if any.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let machine = StateMachine::new(self.strictness);
        for (source, targets) in self.constraints {
            machine.set_transition_constraint(source, targets);
        }
        for (state, handlers) in self.handlers {
            machine.add_state_handlers(state, handlers);
        }
        for listener in self.before {
            machine.subscribe(ListenerSlot::Before, listener);
        }
        for listener in self.after {
            machine.subscribe(ListenerSlot::After, listener);
        }
        Ok(machine)
    }
}

impl<S: State + 'static> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new(Strictness::default())
    }
}

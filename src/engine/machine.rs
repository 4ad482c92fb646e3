//! The state machine engine.

use crate::core::{display_name, State};
use crate::engine::constraints::TransitionConstraintTable;
use crate::engine::error::{HandlerError, HandlerPhase, HandlerResult, MachineError};
use crate::engine::handlers::{HandlerRegistry, StateHandlers};
use crate::engine::listeners::{
    ListenerId, ListenerSlot, TransitionListener, TransitionListeners,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Whether transitions are checked against the constraint table.
///
/// Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Only transitions listed in the constraint table are legal
    Strict,
    /// Every transition is legal
    #[default]
    Free,
}

impl Strictness {
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Free
        }
    }
}

/// What a successful call to [`StateMachine::set_state`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Target equalled the current state; nothing ran
    Unchanged,
    /// The full transition sequence ran
    Switched,
}

/// Synchronous state machine with an optional current state.
///
/// `None` is the unset condition: the machine starts there, may return
/// there at any time (stopping), and may start again from it.
///
/// Every method takes `&self`. Handlers and listeners receive the machine
/// that is dispatching them and may query, reconfigure, or drive it;
/// a transition requested from inside a callback runs to completion
/// before the outer transition continues.
///
/// # Example
///
/// ```rust
/// use statewise::engine::{StateMachine, Strictness};
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Tool { Select, Paint }
/// }
///
/// let machine = StateMachine::new(Strictness::Strict);
/// machine.set_transition_constraint(Tool::Select, [Tool::Paint]);
///
/// assert!(machine.switch_to(Tool::Select).is_ok());
/// assert!(machine.switch_to(Tool::Paint).is_ok());
/// // Paint has no entry, so nothing but stopping is legal from it.
/// assert!(machine.switch_to(Tool::Select).is_err());
/// assert!(machine.stop().is_ok());
/// assert_eq!(machine.current_state(), None);
/// ```
pub struct StateMachine<S: State> {
    strictness: Strictness,
    current: RefCell<Option<S>>,
    constraints: RefCell<TransitionConstraintTable<S>>,
    handlers: RefCell<HandlerRegistry<S>>,
    listeners: RefCell<TransitionListeners<S>>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine in the unset state.
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            current: RefCell::new(None),
            constraints: RefCell::new(TransitionConstraintTable::new()),
            handlers: RefCell::new(HandlerRegistry::new()),
            listeners: RefCell::new(TransitionListeners::new()),
        }
    }

    pub fn strict() -> Self {
        Self::new(Strictness::Strict)
    }

    pub fn free() -> Self {
        Self::new(Strictness::Free)
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Replace the set of states reachable from `source`.
    ///
    /// Only consulted in strict mode.
    pub fn set_transition_constraint<I>(&self, source: S, allowed: I)
    where
        I: IntoIterator<Item = S>,
    {
        let name = source.name().to_string();
        if self
            .constraints
            .borrow_mut()
            .set(source, allowed)
            .is_some()
        {
            trace!("Replaced transition constraint for {}", name);
        }
    }

    /// Register enter and/or leave handlers for `state`.
    ///
    /// Slots left empty keep whatever was registered before; a populated
    /// slot replaces the previous handler in that slot.
    pub fn add_state_handlers(&self, state: S, handlers: StateHandlers<S>) {
        self.handlers.borrow_mut().add(state, handlers);
    }

    /// Register an enter-handler, called with the state being left.
    pub fn on_enter<F>(&self, state: S, handler: F)
    where
        F: Fn(&StateMachine<S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.add_state_handlers(state, StateHandlers::new().on_enter(handler));
    }

    /// Register a leave-handler, called with the state being entered.
    pub fn on_leave<F>(&self, state: S, handler: F)
    where
        F: Fn(&StateMachine<S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.add_state_handlers(state, StateHandlers::new().on_leave(handler));
    }

    /// Subscribe a listener that runs before the state is written.
    pub fn on_before_transition<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StateMachine<S>, Option<&S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.listeners
            .borrow_mut()
            .subscribe(ListenerSlot::Before, Rc::new(listener))
    }

    /// Subscribe a listener that runs after the state is written and the
    /// enter-handler has finished.
    pub fn on_after_transition<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StateMachine<S>, Option<&S>, Option<&S>) -> HandlerResult + 'static,
    {
        self.listeners
            .borrow_mut()
            .subscribe(ListenerSlot::After, Rc::new(listener))
    }

    pub(crate) fn subscribe(
        &self,
        slot: ListenerSlot,
        listener: TransitionListener<S>,
    ) -> ListenerId {
        self.listeners.borrow_mut().subscribe(slot, listener)
    }

    /// Remove a listener. Returns `false` if the handle was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().unsubscribe(id)
    }

    /// Copy of the current state; `None` when unset.
    pub fn current_state(&self) -> Option<S> {
        self.current.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn is_in(&self, state: &S) -> bool {
        self.current.borrow().as_ref() == Some(state)
    }

    /// Whether assigning `target` now would pass validation.
    ///
    /// Free mode always answers `true`. Strict mode answers `true` for
    /// stopping (`None`) and for starting from unset; otherwise the current
    /// state's entry must list `target`.
    pub fn can_switch_to(&self, target: Option<&S>) -> bool {
        let current = self.current.borrow();
        self.permits(current.as_ref(), target)
    }

    /// Assign a new current state, running the full dispatch sequence.
    ///
    /// Order: before-listeners, the old state's leave-handler, the state
    /// write, the new state's enter-handler, after-listeners. Assigning the
    /// current state again returns [`TransitionOutcome::Unchanged`] without
    /// running anything.
    ///
    /// # Errors
    ///
    /// [`MachineError::IllegalTransition`] if strict mode rejects `target`;
    /// the state is untouched. [`MachineError::Handler`] if a callback
    /// fails; see [`MachineError::state_changed`] for whether the write
    /// already happened.
    pub fn set_state(&self, target: Option<S>) -> Result<TransitionOutcome, MachineError> {
        let from = self.current_state();
        if from == target {
            trace!(
                "Ignoring self-transition to {}",
                display_name(target.as_ref())
            );
            return Ok(TransitionOutcome::Unchanged);
        }

        let (from, to) = (from.as_ref(), target.as_ref());
        if !self.permits(from, to) {
            warn!(
                "Rejected transition from {} to {}",
                display_name(from),
                display_name(to)
            );
            return Err(MachineError::IllegalTransition {
                from: display_name(from),
                to: display_name(to),
            });
        }

        let before = self.listeners.borrow().snapshot(ListenerSlot::Before);
        for listener in before {
            listener(self, from, to)
                .map_err(|e| handler_failure(HandlerPhase::BeforeTransition, from, to, e))?;
        }

        if let Some(state) = from {
            let leave = self.handlers.borrow().leave_handler(state);
            if let Some(leave) = leave {
                trace!("Running leave handler for {}", state.name());
                leave(self, to).map_err(|e| handler_failure(HandlerPhase::Leave, from, to, e))?;
            }
        }

        *self.current.borrow_mut() = target.clone();

        if let Some(state) = to {
            let enter = self.handlers.borrow().enter_handler(state);
            if let Some(enter) = enter {
                trace!("Running enter handler for {}", state.name());
                enter(self, from).map_err(|e| handler_failure(HandlerPhase::Enter, from, to, e))?;
            }
        }

        let after = self.listeners.borrow().snapshot(ListenerSlot::After);
        for listener in after {
            listener(self, from, to)
                .map_err(|e| handler_failure(HandlerPhase::AfterTransition, from, to, e))?;
        }

        debug!(
            "State machine transitioned from {} to {}",
            display_name(from),
            display_name(to)
        );
        Ok(TransitionOutcome::Switched)
    }

    /// Shorthand for `set_state(Some(target))`.
    pub fn switch_to(&self, target: S) -> Result<TransitionOutcome, MachineError> {
        self.set_state(Some(target))
    }

    /// Return to unset, running the current state's leave-handler.
    pub fn stop(&self) -> Result<TransitionOutcome, MachineError> {
        self.set_state(None)
    }

    /// Allowed targets registered for `source`, in no particular order.
    pub fn allowed_targets(&self, source: &S) -> Option<Vec<S>> {
        self.constraints
            .borrow()
            .allowed_from(source)
            .map(|targets| targets.iter().cloned().collect())
    }

    pub fn has_handlers(&self, state: &S) -> bool {
        self.handlers.borrow().contains(state)
    }

    pub fn listener_count(&self, slot: ListenerSlot) -> usize {
        self.listeners.borrow().count(slot)
    }

    fn permits(&self, from: Option<&S>, to: Option<&S>) -> bool {
        match (self.strictness, from, to) {
            (Strictness::Free, _, _) => true,
            (Strictness::Strict, _, None) | (Strictness::Strict, None, _) => true,
            (Strictness::Strict, Some(from), Some(to)) => {
                self.constraints.borrow().permits(from, to)
            }
        }
    }
}

fn handler_failure<S: State>(
    phase: HandlerPhase,
    from: Option<&S>,
    to: Option<&S>,
    source: HandlerError,
) -> MachineError {
    warn!(
        "{} failed during transition from {} to {}: {}",
        phase,
        display_name(from),
        display_name(to),
        source
    );
    MachineError::Handler {
        phase,
        from: display_name(from),
        to: display_name(to),
        source,
    }
}

impl<S: State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(Strictness::default())
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_struct("StateMachine")
            .field("strictness", &self.strictness)
            .field("current", &*self.current.borrow())
            .field("constraints", &self.constraints.borrow().len())
            .field("before_listeners", &listeners.count(ListenerSlot::Before))
            .field("after_listeners", &listeners.count(ListenerSlot::After))
            .finish()
    }
}

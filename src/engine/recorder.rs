//! Listener that keeps a history of completed transitions.

use crate::core::{State, StateHistory, StateTransition};
use crate::engine::listeners::ListenerId;
use crate::engine::machine::StateMachine;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every transition of one machine into a [`StateHistory`].
///
/// Recording happens in an after-transition listener, so a transition
/// appears once its enter-handler has returned. Nested transitions started
/// from a handler complete first and are therefore recorded first.
pub struct HistoryRecorder<S: State> {
    history: Rc<RefCell<StateHistory<S>>>,
    listener: ListenerId,
}

impl<S: State + 'static> HistoryRecorder<S> {
    /// Subscribe a recorder to `machine`.
    pub fn attach(machine: &StateMachine<S>) -> Self {
        let history = Rc::new(RefCell::new(StateHistory::new()));
        let sink = Rc::clone(&history);
        let listener = machine.on_after_transition(move |_, from, to| {
            sink.borrow_mut()
                .push(StateTransition::now(from.cloned(), to.cloned()));
            Ok(())
        });
        Self { history, listener }
    }

    /// Copy of everything recorded so far.
    pub fn history(&self) -> StateHistory<S> {
        self.history.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.history.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.borrow().is_empty()
    }

    /// Stop recording and return what was captured.
    pub fn detach(self, machine: &StateMachine<S>) -> StateHistory<S> {
        machine.unsubscribe(self.listener);
        self.history()
    }
}

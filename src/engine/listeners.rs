//! Ordered before/after transition listener lists.

use crate::core::State;
use crate::engine::error::HandlerResult;
use crate::engine::machine::StateMachine;
use std::rc::Rc;

/// Callback run on every transition with `(from, to)`.
pub type TransitionListener<S> =
    Rc<dyn Fn(&StateMachine<S>, Option<&S>, Option<&S>) -> HandlerResult>;

/// Handle returned when subscribing a listener.
///
/// Unsubscribing goes through the handle, so the same closure registered
/// twice yields two independent subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Which list a listener belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerSlot {
    Before,
    After,
}

/// Both listener lists of a machine plus the id counter shared between them.
pub(crate) struct TransitionListeners<S: State> {
    before: Vec<(ListenerId, TransitionListener<S>)>,
    after: Vec<(ListenerId, TransitionListener<S>)>,
    next_id: u64,
}

impl<S: State> TransitionListeners<S> {
    pub(crate) fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        slot: ListenerSlot,
        listener: TransitionListener<S>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.list_mut(slot).push((id, listener));
        id
    }

    /// Remove a listener from whichever list holds it.
    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for slot in [ListenerSlot::Before, ListenerSlot::After] {
            let list = self.list_mut(slot);
            if let Some(index) = list.iter().position(|(existing, _)| *existing == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Copy of one list in registration order.
    ///
    /// Dispatch iterates the copy so listeners may subscribe or unsubscribe
    /// while a transition is running.
    pub(crate) fn snapshot(&self, slot: ListenerSlot) -> Vec<TransitionListener<S>> {
        self.list(slot)
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub(crate) fn count(&self, slot: ListenerSlot) -> usize {
        self.list(slot).len()
    }

    fn list(&self, slot: ListenerSlot) -> &Vec<(ListenerId, TransitionListener<S>)> {
        match slot {
            ListenerSlot::Before => &self.before,
            ListenerSlot::After => &self.after,
        }
    }

    fn list_mut(&mut self, slot: ListenerSlot) -> &mut Vec<(ListenerId, TransitionListener<S>)> {
        match slot {
            ListenerSlot::Before => &mut self.before,
            ListenerSlot::After => &mut self.after,
        }
    }
}

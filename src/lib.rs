//! Statewise: a synchronous finite state machine engine
//!
//! Statewise gives plug-in style components a disciplined way to model
//! their operating modes: an explicit table of legal transitions, per-state
//! setup and teardown, and global notifications around every transition.
//!
//! # Core Concepts
//!
//! - **State**: any caller-defined value implementing the `State` trait
//! - **Unset**: the machine starts with no state (`None`) and can always
//!   return there; that is how it is stopped
//! - **Strictness**: strict machines validate each transition against an
//!   allow-list per source state, free machines accept any transition
//! - **Handlers and listeners**: enter/leave callbacks per state, and
//!   before/after callbacks for every transition, dispatched in a fixed order
//!
//! Everything runs synchronously on the caller's thread. Callbacks receive
//! the machine and may drive it; nested transitions complete before the
//! outer one resumes.
//!
//! # Example
//!
//! ```rust
//! use statewise::engine::{StateMachine, Strictness};
//! use statewise::state_enum;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! state_enum! {
//!     enum Mode { One, Two, Three }
//! }
//!
//! let machine = StateMachine::new(Strictness::Strict);
//! machine.set_transition_constraint(Mode::One, [Mode::Two, Mode::Three]);
//! machine.set_transition_constraint(Mode::Two, [Mode::One]);
//! machine.set_transition_constraint(Mode::Three, [Mode::One]);
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! machine.on_after_transition(move |_, from, to| {
//!     sink.borrow_mut().push((from.copied(), to.copied()));
//!     Ok(())
//! });
//!
//! machine.switch_to(Mode::One).unwrap();
//! machine.switch_to(Mode::Two).unwrap();
//! assert!(machine.switch_to(Mode::Three).is_err());
//! assert_eq!(machine.current_state(), Some(Mode::Two));
//!
//! assert_eq!(
//!     *log.borrow(),
//!     vec![(None, Some(Mode::One)), (Some(Mode::One), Some(Mode::Two))]
//! );
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{State, StateHistory, StateTransition};
pub use engine::{
    HandlerError, HandlerPhase, HandlerResult, HistoryRecorder, ListenerId, MachineError,
    StateHandlers, StateMachine, Strictness, TransitionOutcome,
};
pub use snapshot::{Snapshot, SnapshotError};

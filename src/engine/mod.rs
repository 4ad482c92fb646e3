//! The synchronous state machine engine.
//!
//! # Key Concepts
//!
//! - **Strictness**: strict machines only follow transitions listed in the
//!   constraint table; free machines follow any transition
//! - **Handlers**: per-state enter/leave callbacks, given the other endpoint
//! - **Listeners**: global before/after callbacks, given both endpoints
//!
//! # Dispatch Order
//!
//! For a transition `A -> B`:
//!
//! 1. before-listeners see `(A, B)`; current state reads `A`
//! 2. `A`'s leave-handler sees `B`; current state reads `A`
//! 3. the current state becomes `B`
//! 4. `B`'s enter-handler sees `A`; current state reads `B`
//! 5. after-listeners see `(A, B)`; current state reads `B`
//!
//! Assigning the state the machine is already in runs none of this.

mod constraints;
mod error;
mod handlers;
mod listeners;
mod machine;
mod recorder;

pub use constraints::TransitionConstraintTable;
pub use error::{HandlerError, HandlerPhase, HandlerResult, MachineError};
pub use handlers::{HandlerRegistry, StateHandler, StateHandlers};
pub use listeners::{ListenerId, ListenerSlot, TransitionListener};
pub use machine::{StateMachine, Strictness, TransitionOutcome};
pub use recorder::HistoryRecorder;

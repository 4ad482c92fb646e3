//! Core state types.
//!
//! This module contains the value types the engine is generic over:
//! - State definitions via the `State` trait
//! - Transition history records

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::{display_name, State, UNSET_NAME};

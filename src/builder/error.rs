//! Build errors for the state machine builder.

use thiserror::Error;

/// Which handler slot a duplicate registration hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerSlot {
    Enter,
    Leave,
}

impl std::fmt::Display for HandlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Leave => f.write_str("leave"),
        }
    }
}

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Transition constraint for '{state}' declared more than once")]
    DuplicateConstraint { state: String },

    #[error("Duplicate {slot} handler for state '{state}'")]
    DuplicateHandler { state: String, slot: HandlerSlot },
}

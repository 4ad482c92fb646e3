//! Errors raised while driving a state machine.

use std::fmt;
use thiserror::Error;

/// Error type returned by user callbacks.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by enter/leave handlers and transition listeners.
pub type HandlerResult = Result<(), HandlerError>;

/// The dispatch step a failing callback belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPhase {
    /// A before-transition listener (state not yet written)
    BeforeTransition,
    /// The outgoing state's leave-handler (state not yet written)
    Leave,
    /// The incoming state's enter-handler (state already written)
    Enter,
    /// An after-transition listener (state already written)
    AfterTransition,
}

impl HandlerPhase {
    /// True if the current-state write had already happened when a
    /// callback in this phase ran.
    pub fn after_state_write(self) -> bool {
        matches!(self, Self::Enter | Self::AfterTransition)
    }
}

impl fmt::Display for HandlerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BeforeTransition => "before-transition listener",
            Self::Leave => "leave handler",
            Self::Enter => "enter handler",
            Self::AfterTransition => "after-transition listener",
        };
        f.write_str(label)
    }
}

/// Errors that can occur when assigning a new current state.
#[derive(Debug, Error)]
pub enum MachineError {
    /// Strict mode rejected the target. Nothing ran and the state is unchanged.
    #[error("Illegal transition from '{from}' to '{to}'")]
    IllegalTransition { from: String, to: String },

    /// A user callback failed. Callbacks after it in the same transition
    /// were skipped and nothing was rolled back.
    #[error("{phase} failed during transition from '{from}' to '{to}': {source}")]
    Handler {
        phase: HandlerPhase,
        from: String,
        to: String,
        #[source]
        source: HandlerError,
    },
}

impl MachineError {
    /// Whether the machine's current state was changed before the error.
    ///
    /// Always `false` for illegal transitions and for failures in
    /// before-listeners or leave-handlers.
    pub fn state_changed(&self) -> bool {
        match self {
            Self::IllegalTransition { .. } => false,
            Self::Handler { phase, .. } => phase.after_state_write(),
        }
    }

    /// The phase of a handler failure, if this is one.
    pub fn phase(&self) -> Option<HandlerPhase> {
        match self {
            Self::IllegalTransition { .. } => None,
            Self::Handler { phase, .. } => Some(*phase),
        }
    }
}

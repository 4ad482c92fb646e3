//! Core State trait for state machine states.
//!
//! States are plain values from a finite domain chosen by the caller,
//! usually a fieldless enum. The engine never invents states of its own:
//! "not running" is represented by `None`, not by a member of the domain.

use std::fmt::Debug;
use std::hash::Hash;

/// Display name used for the unset (stopped) condition in logs and errors.
pub const UNSET_NAME: &str = "<unset>";

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: the machine hands out copies of the current state
/// - `Eq` + `Hash`: states key the constraint and handler tables
/// - `Debug`: states must be debuggable for diagnostics
///
/// # Example
///
/// ```rust
/// use statewise::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum EditorMode {
///     Select,
///     Paint,
///     Erase,
/// }
///
/// impl State for EditorMode {
///     fn name(&self) -> &str {
///         match self {
///             Self::Select => "Select",
///             Self::Paint => "Paint",
///             Self::Erase => "Erase",
///         }
///     }
/// }
///
/// assert_eq!(EditorMode::Paint.name(), "Paint");
/// ```
pub trait State: Clone + Eq + Hash + Debug {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Render an optional state the way logs and errors show it.
pub fn display_name<S: State>(state: Option<&S>) -> String {
    state.map_or_else(|| UNSET_NAME.to_string(), |s| s.name().to_string())
}

//! Builder API for checked state machine construction.
//!
//! This module provides a fluent builder and a declaration macro for
//! setting up machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::{BuildError, HandlerSlot};
pub use machine::StateMachineBuilder;

use crate::core::State;
use crate::engine::StateMachine;

/// Build a strict machine from an adjacency list.
///
/// Each `(source, targets)` pair becomes one constraint. Listing the same
/// source twice is a [`BuildError::DuplicateConstraint`].
///
/// # Example
///
/// ```
/// use statewise::builder::strict_machine;
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Mode { One, Two, Three }
/// }
///
/// let machine = strict_machine([
///     (Mode::One, vec![Mode::Two, Mode::Three]),
///     (Mode::Two, vec![Mode::One]),
///     (Mode::Three, vec![Mode::One]),
/// ])
/// .unwrap();
///
/// machine.switch_to(Mode::Two).unwrap();
/// assert!(!machine.can_switch_to(Some(&Mode::Three)));
/// ```
pub fn strict_machine<S, I, T>(table: I) -> Result<StateMachine<S>, BuildError>
where
    S: State + 'static,
    I: IntoIterator<Item = (S, T)>,
    T: IntoIterator<Item = S>,
{
    table
        .into_iter()
        .fold(StateMachineBuilder::strict(), |builder, (source, targets)| {
            builder.allow(source, targets)
        })
        .build()
}

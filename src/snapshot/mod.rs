//! Snapshots of the active state for save/reload cycles.
//!
//! The engine never writes anything anywhere. A host that wants the active
//! state to survive a reload takes a [`Snapshot`] before teardown, stores
//! the encoded form however it likes, and restores it into the rebuilt
//! machine. Restoring is an ordinary transition, so on a fresh machine it
//! is a start transition and the saved state's enter-handler runs.
//!
//! Only the current state is captured. Constraints, handlers and listeners
//! are code and must be registered again by the host.

use crate::core::State;
use crate::engine::{StateMachine, Strictness, TransitionOutcome};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable record of a machine's active state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// Snapshot format version
    pub version: u32,

    /// Strictness of the machine the snapshot was taken from
    pub strictness: Strictness,

    /// Active state, `None` if the machine was stopped
    pub current: Option<S>,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl<S: State> StateMachine<S> {
    /// Capture the current state.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot {
            version: SNAPSHOT_VERSION,
            strictness: self.strictness(),
            current: self.current_state(),
            taken_at: Utc::now(),
        }
    }
}

impl<S: State> Snapshot<S> {
    /// Re-assign the saved state on `machine`.
    ///
    /// # Errors
    ///
    /// Fails without touching the machine if the version or strictness do
    /// not match. Otherwise any [`MachineError`](crate::engine::MachineError)
    /// from the transition is wrapped in [`SnapshotError::Restore`].
    pub fn restore_into(
        &self,
        machine: &StateMachine<S>,
    ) -> Result<TransitionOutcome, SnapshotError> {
        self.check_version()?;
        if self.strictness != machine.strictness() {
            return Err(SnapshotError::StrictnessMismatch {
                found: self.strictness,
                expected: machine.strictness(),
            });
        }
        Ok(machine.set_state(self.current.clone())?)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S: State + Serialize + DeserializeOwned> Snapshot<S> {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Mode {
        Browse,
        Edit,
    }

    impl State for Mode {
        fn name(&self) -> &str {
            match self {
                Self::Browse => "Browse",
                Self::Edit => "Edit",
            }
        }
    }

    #[test]
    fn snapshot_captures_current_state() {
        let machine = StateMachine::strict();
        machine.switch_to(Mode::Edit).unwrap();

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.strictness, Strictness::Strict);
        assert_eq!(snapshot.current, Some(Mode::Edit));
    }

    #[test]
    fn json_encoding_preserves_snapshot() {
        let machine = StateMachine::free();
        machine.switch_to(Mode::Browse).unwrap();
        let snapshot = machine.snapshot();

        let decoded = Snapshot::<Mode>::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn binary_encoding_preserves_snapshot() {
        let machine: StateMachine<Mode> = StateMachine::free();
        let snapshot = machine.snapshot();

        let decoded = Snapshot::<Mode>::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.current, None);
        assert_eq!(decoded.taken_at, snapshot.taken_at);
    }

    #[test]
    fn restore_runs_enter_handler_as_start() {
        let saved = {
            let machine = StateMachine::free();
            machine.switch_to(Mode::Edit).unwrap();
            machine.snapshot()
        };

        let entered = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&entered);
        let machine = StateMachine::free();
        machine.on_enter(Mode::Edit, move |_, from| {
            sink.borrow_mut().push(from.cloned());
            Ok(())
        });

        let outcome = saved.restore_into(&machine).unwrap();
        assert_eq!(outcome, TransitionOutcome::Switched);
        assert_eq!(machine.current_state(), Some(Mode::Edit));
        assert_eq!(*entered.borrow(), vec![None]);
    }

    #[test]
    fn restore_rejects_unknown_version() {
        let mut snapshot = StateMachine::<Mode>::free().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        let json = snapshot.to_json().unwrap();
        assert!(matches!(
            Snapshot::<Mode>::from_json(&json),
            Err(SnapshotError::UnsupportedVersion { found, .. }) if found == SNAPSHOT_VERSION + 1
        ));

        let machine = StateMachine::free();
        assert!(snapshot.restore_into(&machine).is_err());
        assert_eq!(machine.current_state(), None);
    }

    #[test]
    fn restore_rejects_strictness_mismatch() {
        let snapshot = StateMachine::<Mode>::strict().snapshot();
        let machine = StateMachine::free();

        assert!(matches!(
            snapshot.restore_into(&machine),
            Err(SnapshotError::StrictnessMismatch { .. })
        ));
    }

    #[test]
    fn restore_surfaces_illegal_transition() {
        let machine = StateMachine::strict();
        machine.set_transition_constraint(Mode::Browse, Vec::new());
        machine.switch_to(Mode::Browse).unwrap();

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            strictness: Strictness::Strict,
            current: Some(Mode::Edit),
            taken_at: Utc::now(),
        };

        assert!(matches!(
            snapshot.restore_into(&machine),
            Err(SnapshotError::Restore(_))
        ));
        assert_eq!(machine.current_state(), Some(Mode::Browse));
    }

    #[test]
    fn malformed_input_reports_deserialization_failure() {
        assert!(matches!(
            Snapshot::<Mode>::from_json("{not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}

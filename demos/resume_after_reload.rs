//! Resume After Reload
//!
//! This example keeps a plugin's active mode across a host reload.
//!
//! Key concepts:
//! - Taking a snapshot before teardown
//! - JSON for readability, binary for compactness
//! - Restoring is an ordinary start transition on the rebuilt machine
//!
//! Run with: cargo run --example resume_after_reload

use statewise::engine::StateMachine;
use statewise::snapshot::Snapshot;
use statewise::state_enum;

state_enum! {
    enum SessionMode {
        Idle,
        Recording,
        Playback,
    }
}

fn build_machine() -> StateMachine<SessionMode> {
    let machine = StateMachine::strict();
    machine.set_transition_constraint(SessionMode::Idle, [SessionMode::Recording, SessionMode::Playback]);
    machine.set_transition_constraint(SessionMode::Recording, [SessionMode::Idle]);
    machine.set_transition_constraint(SessionMode::Playback, [SessionMode::Idle]);
    machine.on_enter(SessionMode::Recording, |_, from| {
        println!("  [Recording] armed (previous mode: {:?})", from);
        Ok(())
    });
    machine.on_leave(SessionMode::Recording, |_, to| {
        println!("  [Recording] released (next mode: {:?})", to);
        Ok(())
    });
    machine
}

fn main() {
    println!("=== Resume After Reload Example ===\n");

    let machine = build_machine();
    machine.switch_to(SessionMode::Idle).expect("start");
    machine.switch_to(SessionMode::Recording).expect("Idle -> Recording");

    let snapshot = machine.snapshot();
    let json = snapshot.to_json().expect("snapshot encodes");
    let bytes = snapshot.to_bytes().expect("snapshot encodes");
    println!("\nSnapshot as JSON: {json}");
    println!("Snapshot as binary: {} bytes\n", bytes.len());

    println!("Tearing down:");
    machine.stop().expect("stopping is always allowed");
    drop(machine);

    println!("\nRebuilding and restoring:");
    let machine = build_machine();
    let restored = Snapshot::<SessionMode>::from_bytes(&bytes).expect("snapshot decodes");
    restored.restore_into(&machine).expect("restore");
    println!("Active mode after reload: {:?}", machine.current_state());

    println!("\n=== Example Complete ===");
}

//! Plugin Modes
//!
//! This example drives the operating modes of an editor plugin.
//!
//! Key concepts:
//! - Strict transition table with a hub mode
//! - Leave-handlers disable the menu items of the outgoing mode
//! - Enter-handlers enable the menu items of the incoming mode
//! - Checking `can_switch_to` before offering a mode in the UI
//!
//! Run with: cargo run --example plugin_modes

use statewise::builder::StateMachineBuilder;
use statewise::state_enum;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

state_enum! {
    enum PluginMode {
        Browse,
        Edit,
        Preview,
    }
}

fn menu_items(mode: PluginMode) -> &'static [&'static str] {
    match mode {
        PluginMode::Browse => &["Open", "Search"],
        PluginMode::Edit => &["Save", "Undo"],
        PluginMode::Preview => &["Export"],
    }
}

fn main() {
    println!("=== Plugin Modes Example ===\n");

    let enabled: Rc<RefCell<BTreeSet<&'static str>>> = Rc::default();

    let mut builder = StateMachineBuilder::strict()
        .allow(PluginMode::Browse, [PluginMode::Edit, PluginMode::Preview])
        .allow(PluginMode::Edit, [PluginMode::Browse])
        .allow(PluginMode::Preview, [PluginMode::Browse]);

    for mode in [PluginMode::Browse, PluginMode::Edit, PluginMode::Preview] {
        let (on, off) = (Rc::clone(&enabled), Rc::clone(&enabled));
        builder = builder
            .on_enter(mode, move |_, _| {
                on.borrow_mut().extend(menu_items(mode));
                Ok(())
            })
            .on_leave(mode, move |_, _| {
                for item in menu_items(mode) {
                    off.borrow_mut().remove(item);
                }
                Ok(())
            });
    }

    let machine = builder
        .after_transition(|_, from, to| {
            println!("  {:?} -> {:?}", from, to);
            Ok(())
        })
        .build()
        .expect("mode table is well formed");

    println!("Driving the plugin:");
    for mode in [PluginMode::Browse, PluginMode::Edit, PluginMode::Browse] {
        machine.switch_to(mode).expect("transition is allowed");
        println!("    menu: {:?}", enabled.borrow());
    }

    machine.switch_to(PluginMode::Edit).expect("transition is allowed");
    println!(
        "\nCan jump from Edit straight to Preview? {}",
        machine.can_switch_to(Some(&PluginMode::Preview))
    );
    if let Err(e) = machine.switch_to(PluginMode::Preview) {
        println!("Rejected: {e}");
    }

    println!("\nUnloading the plugin:");
    machine.stop().expect("stopping is always allowed");
    println!("    menu: {:?}", enabled.borrow());

    println!("\n=== Example Complete ===");
}

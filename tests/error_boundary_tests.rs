//! Failing callbacks and where they leave the machine.

use statewise::engine::{HandlerPhase, MachineError, StateMachine};
use statewise::state_enum;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

state_enum! {
    enum Mode {
        One,
        Two,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("resource for {0} unavailable")]
struct Unavailable(&'static str);

fn started() -> (StateMachine<Mode>, Rc<RefCell<Vec<&'static str>>>) {
    let machine = StateMachine::free();
    machine.switch_to(Mode::One).unwrap();
    (machine, Rc::new(RefCell::new(Vec::new())))
}

fn record(
    log: &Rc<RefCell<Vec<&'static str>>>,
    tag: &'static str,
) -> impl Fn(&StateMachine<Mode>, Option<&Mode>) -> statewise::HandlerResult {
    let log = Rc::clone(log);
    move |_, _| {
        log.borrow_mut().push(tag);
        Ok(())
    }
}

#[test]
fn before_listener_failure_leaves_state_unchanged() {
    let (machine, log) = started();
    machine.on_before_transition(|_, _, _| Err(Unavailable("before").into()));
    let sink = Rc::clone(&log);
    machine.on_before_transition(move |_, _, _| {
        sink.borrow_mut().push("second before");
        Ok(())
    });
    machine.on_leave(Mode::One, record(&log, "leave One"));

    let err = machine.switch_to(Mode::Two).unwrap_err();

    assert_eq!(err.phase(), Some(HandlerPhase::BeforeTransition));
    assert!(!err.state_changed());
    assert_eq!(machine.current_state(), Some(Mode::One));
    assert!(log.borrow().is_empty());
}

#[test]
fn leave_failure_leaves_state_unchanged() {
    let (machine, log) = started();
    machine.on_leave(Mode::One, |_, _| Err(Unavailable("One").into()));
    machine.on_enter(Mode::Two, record(&log, "enter Two"));
    let sink = Rc::clone(&log);
    machine.on_after_transition(move |_, _, _| {
        sink.borrow_mut().push("after");
        Ok(())
    });

    let err = machine.switch_to(Mode::Two).unwrap_err();

    assert_eq!(err.phase(), Some(HandlerPhase::Leave));
    assert!(!err.state_changed());
    assert_eq!(machine.current_state(), Some(Mode::One));
    assert!(log.borrow().is_empty());
}

#[test]
fn enter_failure_happens_after_state_write() {
    let (machine, log) = started();
    machine.on_enter(Mode::Two, |_, _| Err(Unavailable("Two").into()));
    let sink = Rc::clone(&log);
    machine.on_after_transition(move |_, _, _| {
        sink.borrow_mut().push("after");
        Ok(())
    });

    let err = machine.switch_to(Mode::Two).unwrap_err();

    assert_eq!(err.phase(), Some(HandlerPhase::Enter));
    assert!(err.state_changed());
    assert_eq!(machine.current_state(), Some(Mode::Two));
    assert!(log.borrow().is_empty());
}

#[test]
fn after_listener_failure_skips_remaining_listeners() {
    let (machine, log) = started();
    machine.on_after_transition(|_, _, _| Err(Unavailable("after").into()));
    let sink = Rc::clone(&log);
    machine.on_after_transition(move |_, _, _| {
        sink.borrow_mut().push("second after");
        Ok(())
    });

    let err = machine.stop().unwrap_err();

    assert_eq!(err.phase(), Some(HandlerPhase::AfterTransition));
    assert!(err.state_changed());
    assert_eq!(machine.current_state(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn handler_error_exposes_original_source() {
    let (machine, _) = started();
    machine.on_leave(Mode::One, |_, _| Err(Unavailable("One").into()));

    let err = machine.stop().unwrap_err();

    let MachineError::Handler {
        from, to, source, ..
    } = &err
    else {
        panic!("expected handler error, got {err:?}");
    };
    assert_eq!(from, "One");
    assert_eq!(to, "<unset>");
    assert!(source.downcast_ref::<Unavailable>().is_some());
    assert_eq!(source.to_string(), "resource for One unavailable");
}

#[test]
fn machine_recovers_after_failed_leave() {
    let (machine, _) = started();
    let fail = Rc::new(Cell::new(true));
    let flag = Rc::clone(&fail);
    machine.on_leave(Mode::One, move |_, _| {
        if flag.get() {
            Err(Unavailable("One").into())
        } else {
            Ok(())
        }
    });

    assert!(machine.switch_to(Mode::Two).is_err());
    fail.set(false);
    assert!(machine.switch_to(Mode::Two).is_ok());
    assert_eq!(machine.current_state(), Some(Mode::Two));
}

#[test]
fn panicking_handler_leaves_no_table_borrowed() {
    let (machine, _) = started();
    let armed = Rc::new(Cell::new(true));
    let trigger = Rc::clone(&armed);
    machine.on_enter(Mode::Two, move |_, _| {
        if trigger.replace(false) {
            panic!("enter handler exploded");
        }
        Ok(())
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| machine.switch_to(Mode::Two)));
    assert!(result.is_err());

    // the write happened before the panic and every table is usable again
    assert_eq!(machine.current_state(), Some(Mode::Two));
    machine.on_after_transition(|_, _, _| Ok(()));
    machine.set_transition_constraint(Mode::One, [Mode::Two]);
    assert!(machine.switch_to(Mode::One).is_ok());
    assert!(machine.switch_to(Mode::Two).is_ok());
}

//! End-to-end tests for observables driven by the tick scheduler.
//!
//! These tests exercise the public API only: registration, change
//! propagation, fault retirement and bulk disposal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tickscope_core::{
    DisposeBag, Fault, FaultResult, Observable, Observer, SchedulerConfig, TickScheduler,
    TickStatus,
};

struct Player {
    health: Cell<i32>,
    name: RefCell<String>,
}

fn player() -> Rc<Player> {
    Rc::new(Player {
        health: Cell::new(100),
        name: RefCell::new("Ada".to_string()),
    })
}

fn fault_log() -> (Rc<RefCell<Vec<Fault>>>, TickScheduler) {
    let faults = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&faults);
    let scheduler = TickScheduler::new(Box::new(move |fault: &Fault| {
        sink.borrow_mut().push(fault.clone())
    }));
    (faults, scheduler)
}

#[test]
fn test_multiple_selectors_on_one_target() {
    let mut scheduler = TickScheduler::default();
    let target = player();
    let health = Observable::every_value_changed(&mut scheduler, &target, |p| p.health.get()).unwrap();
    let name = Observable::every_value_changed(&mut scheduler, &target, |p| p.name.borrow().clone()).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bag = DisposeBag::new();
    let sink = Rc::clone(&log);
    bag.add(health.subscribe(move |h| sink.borrow_mut().push(format!("health={h}"))));
    let sink = Rc::clone(&log);
    bag.add(name.subscribe(move |n| sink.borrow_mut().push(format!("name={n}"))));

    target.health.set(90);
    scheduler.run_once();
    *target.name.borrow_mut() = "Grace".to_string();
    scheduler.run_once();
    scheduler.run_once();

    assert_eq!(*log.borrow(), vec!["health=90", "name=Grace"]);
    assert_eq!(scheduler.len(), 2);

    assert_eq!(bag.dispose(), 2);
    scheduler.run_once();
    assert!(scheduler.is_empty());
}

#[test]
fn test_dropped_target_reports_fault_to_sink() {
    let (faults, mut scheduler) = fault_log();
    let target = player();
    let health = Observable::every_value_changed(&mut scheduler, &target, |p| p.health.get()).unwrap();

    let errors = Rc::new(Cell::new(0));
    let count = Rc::clone(&errors);
    let _subscription = health.subscribe_observer(
        Observer::new(|_: &i32| {}).on_error(move |_| count.set(count.get() + 1)),
    );

    drop(target);
    scheduler.run_once();
    scheduler.run_once();

    assert_eq!(errors.get(), 1);
    assert_eq!(*faults.borrow(), vec![Fault::TargetDropped]);
    assert_eq!(scheduler.stats().faults, 1);
    assert!(scheduler.is_empty());
}

#[test]
fn test_subscribe_after_retirement_is_inert() {
    let mut scheduler = TickScheduler::default();
    let target = player();
    let health = Observable::every_value_changed(&mut scheduler, &target, |p| p.health.get()).unwrap();
    let first = health.subscribe(|_| {});

    drop(target);
    scheduler.run_once();
    assert!(health.is_retired());

    let late = health.subscribe(|_| panic!("retired observable must stay silent"));
    assert!(!late.is_active());
    assert!(late.id().is_none());
    assert!(!first.dispose());
    scheduler.run_once();
}

#[test]
fn test_observables_share_scheduler_with_plain_tasks() {
    let config = SchedulerConfig {
        initial_capacity: 1,
        ..Default::default()
    };
    let mut scheduler = TickScheduler::with_config(config, Box::new(|_: &Fault| {}));
    let remaining = Rc::new(Cell::new(2));
    let countdown = Rc::clone(&remaining);
    scheduler.register(move || -> FaultResult<TickStatus> {
        countdown.set(countdown.get() - 1);
        Ok(if countdown.get() == 0 {
            TickStatus::Done
        } else {
            TickStatus::Continue
        })
    });

    let counter = Rc::new(Cell::new(0));
    let source = Rc::clone(&counter);
    let observable = Observable::from_fn(&mut scheduler, move || source.get()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _subscription = observable.subscribe(move |v| sink.borrow_mut().push(*v));

    assert_eq!(scheduler.capacity(), 2);
    for step in 1..=3 {
        counter.set(step);
        scheduler.run_once();
    }

    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    assert_eq!(remaining.get(), 0);
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.tail(), 1);
}

#[test]
fn test_independent_observables_with_one_fault() {
    let (faults, mut scheduler) = fault_log();
    let b_value = Rc::new(Cell::new(2));
    let c_fails = Rc::new(Cell::new(false));

    let a = Observable::from_fn(&mut scheduler, || 1).unwrap();
    let b_source = Rc::clone(&b_value);
    let b = Observable::from_fn(&mut scheduler, move || b_source.get()).unwrap();
    let c_flag = Rc::clone(&c_fails);
    let c = Observable::try_from_fn(&mut scheduler, move || {
        if c_flag.get() {
            Err(Fault::accessor("c is gone"))
        } else {
            Ok(3)
        }
    })
    .unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bag = DisposeBag::new();
    for (name, observable) in [("a", &a), ("b", &b), ("c", &c)] {
        let on_next = Rc::clone(&log);
        let on_error = Rc::clone(&log);
        bag.add(observable.subscribe_observer(
            Observer::new(move |v: &i32| on_next.borrow_mut().push(format!("{name}={v}")))
                .on_error(move |_| on_error.borrow_mut().push(format!("{name} failed"))),
        ));
    }

    for _ in 0..3 {
        scheduler.run_once();
    }
    assert!(log.borrow().is_empty());

    b_value.set(5);
    scheduler.run_once();
    assert_eq!(*log.borrow(), vec!["b=5"]);

    c_fails.set(true);
    scheduler.run_once();
    scheduler.run_once();
    assert_eq!(*log.borrow(), vec!["b=5", "c failed"]);
    assert_eq!(faults.borrow().len(), 1);
    assert_eq!(scheduler.len(), 2);
    assert!(c.is_retired());

    b_value.set(6);
    scheduler.run_once();
    assert_eq!(*log.borrow(), vec!["b=5", "c failed", "b=6"]);
    assert_eq!(bag.dispose(), 2);
}

use std::cell::RefCell;
use std::rc::Rc;

use taskloop::{
    ManualClock, ManualDefer, Priority, Scheduler, SchedulerConfig, SortPolicy, TimeoutMap,
};

fn logger(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> impl FnOnce() + 'static {
    let log = log.clone();
    move || log.borrow_mut().push(name)
}

#[test]
fn static_priority_runs_urgent_first() {
    let defer = ManualDefer::new();
    let scheduler =
        Scheduler::new(SchedulerConfig::deferred(defer.clone()).with_policy(SortPolicy::Static));
    let log = Rc::new(RefCell::new(Vec::new()));

    scheduler.schedule(logger(&log, "a"), Priority::LOW);
    scheduler.schedule(logger(&log, "b"), Priority::HIGH);
    scheduler.schedule(logger(&log, "c"), Priority::HIGH);

    defer.run_all();

    // 0 before 1; b before c by id tie-break.
    assert_eq!(*log.borrow(), vec!["b", "c", "a"]);
}

#[test]
fn static_priority_orders_across_levels() {
    let defer = ManualDefer::new();
    let scheduler =
        Scheduler::new(SchedulerConfig::deferred(defer.clone()).with_policy(SortPolicy::Static));
    let log = Rc::new(RefCell::new(Vec::new()));

    scheduler.schedule(logger(&log, "p3"), Priority(3));
    scheduler.schedule(logger(&log, "p0"), Priority(0));
    scheduler.schedule(logger(&log, "p2"), Priority(2));
    scheduler.schedule(logger(&log, "p1"), Priority(1));

    defer.run_all();

    assert_eq!(*log.borrow(), vec!["p0", "p1", "p2", "p3"]);
}

#[test]
fn equal_priority_is_fifo() {
    let defer = ManualDefer::new();
    let scheduler =
        Scheduler::new(SchedulerConfig::deferred(defer.clone()).with_policy(SortPolicy::Static));
    let log = Rc::new(RefCell::new(Vec::new()));

    for name in ["first", "second", "third", "fourth"] {
        scheduler.schedule(logger(&log, name), Priority::LOW);
    }

    defer.run_all();

    assert_eq!(*log.borrow(), vec!["first", "second", "third", "fourth"]);
}

#[test]
fn expiration_orders_by_expiry_then_id() {
    // Default timeouts: HIGH expires immediately, LOW within 100ms.
    let clock = ManualClock::new();
    let defer = ManualDefer::new();
    let scheduler = Scheduler::with_clock(
        SchedulerConfig::deferred(defer.clone()),
        Rc::new(clock.clone()),
    );
    let log = Rc::new(RefCell::new(Vec::new()));

    // L scheduled at t=0 expires at t=100; h1..h5 at t=1..5 expire at t=1..5.
    scheduler.schedule(logger(&log, "L"), Priority::LOW);
    for (i, name) in ["h1", "h2", "h3", "h4", "h5"].into_iter().enumerate() {
        clock.set(i as u64 + 1);
        scheduler.schedule(logger(&log, name), Priority::HIGH);
    }

    defer.run_all();

    assert_eq!(*log.borrow(), vec!["h1", "h2", "h3", "h4", "h5", "L"]);
}

#[test]
fn aged_low_priority_outranks_fresh_urgent_work() {
    let clock = ManualClock::new();
    let defer = ManualDefer::new();
    let scheduler = Scheduler::with_clock(
        SchedulerConfig::deferred(defer.clone()),
        Rc::new(clock.clone()),
    );
    let log = Rc::new(RefCell::new(Vec::new()));

    // L expires at t=100; an urgent task arriving at t=150 expires at t=150,
    // so the aged task goes first.
    scheduler.schedule(logger(&log, "L"), Priority::LOW);
    clock.set(150);
    scheduler.schedule(logger(&log, "late-urgent"), Priority::HIGH);

    defer.run_all();

    assert_eq!(*log.borrow(), vec!["L", "late-urgent"]);
}

#[test]
fn wait_is_bounded_by_timeout_under_urgent_stream() {
    let clock = ManualClock::new();
    let defer = ManualDefer::new();
    let scheduler = Scheduler::with_clock(
        SchedulerConfig::deferred(defer.clone()),
        Rc::new(clock.clone()),
    );
    let log = Rc::new(RefCell::new(Vec::new()));

    // L expires at t=100. Urgent arrivals before that expiry outrank it;
    // an arrival at exactly t=100 ties on expiry and loses on id; later
    // arrivals rank strictly behind.
    scheduler.schedule(logger(&log, "L"), Priority::LOW);
    for (t, name) in [(10, "u10"), (50, "u50"), (99, "u99")] {
        clock.set(t);
        scheduler.schedule(logger(&log, name), Priority::HIGH);
    }
    clock.set(100);
    scheduler.schedule(logger(&log, "u100"), Priority::HIGH);
    clock.set(120);
    scheduler.schedule(logger(&log, "u120"), Priority::HIGH);

    defer.run_all();

    assert_eq!(
        *log.borrow(),
        vec!["u10", "u50", "u99", "L", "u100", "u120"]
    );
}

#[test]
fn custom_timeout_map_controls_aging() {
    let clock = ManualClock::new();
    let defer = ManualDefer::new();
    let policy = SortPolicy::Expiration(TimeoutMap::new(|p| u64::from(p.0) * 10));
    let scheduler = Scheduler::with_clock(
        SchedulerConfig::deferred(defer.clone()).with_policy(policy),
        Rc::new(clock.clone()),
    );
    let log = Rc::new(RefCell::new(Vec::new()));

    // Expiries: a -> 0 + 30, b -> 5 + 10, c -> 20 + 0.
    scheduler.schedule(logger(&log, "a"), Priority(3));
    clock.set(5);
    scheduler.schedule(logger(&log, "b"), Priority(1));
    clock.set(20);
    scheduler.schedule(logger(&log, "c"), Priority(0));

    defer.run_all();

    assert_eq!(*log.borrow(), vec!["b", "c", "a"]);
}

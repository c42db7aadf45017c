// Host-side tests for loop scheduling and scene ownership.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod schedule {
        include!("../src/core/schedule.rs");
    }
    pub mod slot {
        include!("../src/core/slot.rs");
    }
}

use crate::core::schedule::*;
use crate::core::slot::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[test]
fn manual_clock_sets_and_advances() {
    let clock = ManualClock::new(1.5);
    assert_eq!(clock.now_secs(), 1.5);
    clock.advance(0.25);
    assert_eq!(clock.now_secs(), 1.75);
    clock.set(10.0);
    assert_eq!(clock.now_secs(), 10.0);
}

#[test]
fn cadence_interval_in_ms() {
    assert_eq!(Cadence::EveryFrame.interval_ms(), None);
    assert_eq!(
        Cadence::Interval(Duration::from_millis(50)).interval_ms(),
        Some(50)
    );
}

#[test]
fn idle_ticker_does_not_tick() {
    let mut ticker = Ticker::new(Cadence::EveryFrame);
    assert_eq!(ticker.phase(), LoopPhase::Idle);
    assert!(ticker.tick(1.0).is_none());
}

#[test]
fn ticks_report_index_elapsed_and_delta() {
    let mut ticker = Ticker::new(Cadence::EveryFrame);
    assert!(ticker.start(10.0));
    assert_eq!(ticker.phase(), LoopPhase::Running { started_at: 10.0 });

    let first = ticker.tick(10.0).expect("tick");
    assert_eq!(first.index, 0);
    assert_eq!(first.elapsed, 0.0);
    assert_eq!(first.delta, 0.0);

    let second = ticker.tick(10.5).expect("tick");
    assert_eq!(second.index, 1);
    assert_eq!(second.elapsed, 0.5);
    assert_eq!(second.delta, 0.5);

    let third = ticker.tick(12.0).expect("tick");
    assert_eq!(third.index, 2);
    assert_eq!(third.elapsed, 2.0);
    assert_eq!(third.delta, 1.5);
}

#[test]
fn clock_going_backwards_clamps_to_zero() {
    let mut ticker = Ticker::new(Cadence::EveryFrame);
    ticker.start(5.0);
    let t = ticker.tick(4.0).expect("tick");
    assert_eq!(t.elapsed, 0.0);
    assert_eq!(t.delta, 0.0);
}

#[test]
fn start_twice_is_rejected() {
    let mut ticker = Ticker::new(Cadence::EveryFrame);
    assert!(ticker.start(0.0));
    assert!(!ticker.start(3.0));
    assert_eq!(ticker.tick(1.0).map(|t| t.elapsed), Some(1.0));
}

#[test]
fn cancel_stops_ticks_and_is_idempotent() {
    let mut ticker = Ticker::new(Cadence::Interval(Duration::from_millis(50)));
    ticker.start(0.0);
    assert!(ticker.tick(0.05).is_some());
    assert!(ticker.cancel());
    assert_eq!(ticker.phase(), LoopPhase::Cancelled);
    assert!(ticker.tick(0.10).is_none());
    assert!(!ticker.cancel());
}

#[test]
fn restart_after_cancel_resets_count() {
    let mut ticker = Ticker::new(Cadence::EveryFrame);
    ticker.start(0.0);
    ticker.tick(0.1);
    ticker.tick(0.2);
    ticker.cancel();
    assert!(ticker.start(5.0));
    let t = ticker.tick(5.25).expect("tick");
    assert_eq!(t.index, 0);
    assert_eq!(t.elapsed, 0.25);
}

struct Tracked {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
    torn: Rc<Cell<u32>>,
}

impl Teardown for Tracked {
    fn teardown(&mut self) {
        self.torn.set(self.torn.get() + 1);
        self.log.borrow_mut().push(self.name);
    }
}

fn tracked(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> (Tracked, Rc<Cell<u32>>) {
    let torn = Rc::new(Cell::new(0));
    (
        Tracked {
            name,
            log: log.clone(),
            torn: torn.clone(),
        },
        torn,
    )
}

#[test]
fn empty_slot_clear_reports_nothing() {
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    assert!(slot.is_empty());
    assert_eq!(slot.generation(), 0);
    assert!(!slot.clear());
}

#[test]
fn install_tears_down_previous_scene_first() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    let (a, a_torn) = tracked("a", &log);
    let (b, b_torn) = tracked("b", &log);

    assert_eq!(slot.install(a), 1);
    assert_eq!(slot.active().map(|p| p.name), Some("a"));
    assert_eq!(slot.install(b), 2);
    assert_eq!(a_torn.get(), 1);
    assert_eq!(b_torn.get(), 0);
    assert_eq!(slot.active().map(|p| p.name), Some("b"));
    assert_eq!(*log.borrow(), vec!["a"]);
}

#[test]
fn clear_tears_down_exactly_once() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    let (a, a_torn) = tracked("a", &log);
    slot.install(a);
    assert!(slot.clear());
    assert!(!slot.clear());
    assert!(slot.is_empty());
    assert_eq!(a_torn.get(), 1);
    assert_eq!(slot.generation(), 1);
}

#[test]
fn dropping_the_slot_tears_down_live_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (a, a_torn) = tracked("a", &log);
    {
        let mut slot = SceneSlot::default();
        slot.install(a);
    }
    assert_eq!(a_torn.get(), 1);
}

#[test]
fn rapid_rebuilds_leave_one_live_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    let mut counters = Vec::new();
    for name in ["a", "b", "c", "d"] {
        let (p, torn) = tracked(name, &log);
        slot.install(p);
        counters.push(torn);
    }
    let live: Vec<u32> = counters.iter().map(|c| c.get()).collect();
    assert_eq!(live, vec![1, 1, 1, 0]);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    if let Some(p) = slot.active_mut() {
        p.name = "d2";
    }
    assert_eq!(slot.active().map(|p| p.name), Some("d2"));
}

#[test]
fn request_build_tears_down_the_live_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    let (a, a_torn) = tracked("a", &log);
    let first = slot.request_build();
    assert_eq!(slot.install_if_latest(first, a), Some(1));

    let second = slot.request_build();
    assert_eq!(a_torn.get(), 1);
    assert!(slot.is_empty());
    assert!(!slot.is_latest(first));
    assert!(slot.is_latest(second));
}

#[test]
fn stale_build_finishing_last_is_discarded() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    let older = slot.request_build();
    let newer = slot.request_build();

    // The newer build resolves first, then the older one.
    let (b, b_torn) = tracked("b", &log);
    assert_eq!(slot.install_if_latest(newer, b), Some(1));
    let (a, a_torn) = tracked("a", &log);
    assert_eq!(slot.install_if_latest(older, a), None);

    assert_eq!(a_torn.get(), 1);
    assert_eq!(b_torn.get(), 0);
    assert_eq!(slot.active().map(|s| s.name), Some("b"));
    assert_eq!(slot.generation(), 1);
    assert_eq!(*log.borrow(), vec!["a"]);
}

#[test]
fn stale_build_finishing_first_never_installs() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    let older = slot.request_build();
    let newer = slot.request_build();

    let (a, a_torn) = tracked("a", &log);
    assert_eq!(slot.install_if_latest(older, a), None);
    assert!(slot.is_empty());
    let (b, _) = tracked("b", &log);
    assert_eq!(slot.install_if_latest(newer, b), Some(1));

    assert_eq!(a_torn.get(), 1);
    assert_eq!(slot.active().map(|s| s.name), Some("b"));
}

#[test]
fn generation_marks_a_slot_that_was_ever_filled() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot: SceneSlot<Tracked> = SceneSlot::new();
    assert_eq!(slot.generation(), 0);

    let (a, _) = tracked("a", &log);
    slot.install(a);
    slot.clear();
    // Emptied again, but a one-time builder still sees it was used.
    assert!(slot.is_empty());
    assert_eq!(slot.generation(), 1);
}

use std::{cell::RefCell, rc::Rc};

use cueline::{Behavior, FadeSpec, SyncMarker, TimeMs, TimeRange, TimelineEngine};

#[derive(Clone, Default)]
struct Log {
    events: Rc<RefCell<Vec<String>>>,
}

impl Log {
    fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn markers(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix("marker:").map(str::to_owned))
            .collect()
    }
}

struct Probe {
    log: Log,
}

impl Behavior for Probe {
    fn update(&mut self, _dt: f64, _time: TimeMs, _strength: f64) {
        self.log.events.borrow_mut().push("update".into());
    }

    fn on_marker(&mut self, name: &str) {
        self.log.events.borrow_mut().push(format!("marker:{name}"));
    }

    fn on_register(&mut self) {
        self.log.events.borrow_mut().push("register".into());
    }

    fn on_remove(&mut self) {
        self.log.events.borrow_mut().push("remove".into());
    }
}

fn probe() -> (Box<dyn Behavior>, Log) {
    let log = Log::default();
    (Box::new(Probe { log: log.clone() }), log)
}

fn window(start: f64, end: f64) -> TimeRange {
    TimeRange::new(TimeMs(start), TimeMs(end)).unwrap()
}

#[test]
fn markers_fire_in_time_order_exactly_once() {
    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(700.0), "c");
    engine.add_sync_marker(TimeMs(200.0), "a");
    engine.add_sync_marker(TimeMs(500.0), "b1");
    engine.add_sync_marker(TimeMs(500.0), "b2"); // same time, added later
    engine
        .add_behavior(behavior, window(0.0, 2000.0), FadeSpec::none(), 0)
        .unwrap();

    for _ in 0..8 {
        engine.update(250.0);
    }

    assert_eq!(log.markers(), vec!["a", "b1", "b2", "c"]);
}

#[test]
fn markers_precede_register_and_update() {
    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(100.0), "m");
    engine
        .add_behavior(behavior, window(0.0, 1000.0), FadeSpec::none(), 0)
        .unwrap();

    engine.update(200.0);

    // Due markers replay before the instance's own frame update, which is
    // also where first-time registration happens.
    assert_eq!(log.events(), vec!["marker:m", "register", "update"]);
}

#[test]
fn every_active_instance_receives_every_due_marker() {
    let (first, first_log) = probe();
    let (second, second_log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(300.0), "m");
    engine
        .add_behavior(first, window(0.0, 1000.0), FadeSpec::none(), 0)
        .unwrap();
    engine
        .add_behavior(second, window(0.0, 1000.0), FadeSpec::none(), 1)
        .unwrap();

    engine.update(400.0);

    assert_eq!(first_log.markers(), vec!["m"]);
    assert_eq!(second_log.markers(), vec!["m"]);
}

#[test]
fn late_starter_catches_up_on_unconsumed_markers() {
    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(100.0), "early");
    engine.add_sync_marker(TimeMs(550.0), "mid");
    engine
        .add_behavior(behavior, window(600.0, 1000.0), FadeSpec::none(), 0)
        .unwrap();

    engine.update(300.0);
    assert!(log.markers().is_empty());

    engine.update(300.0); // playhead 600, window opens
    assert_eq!(log.markers(), vec!["early", "mid"]);
}

#[test]
fn late_starter_misses_markers_already_consumed() {
    let (first, first_log) = probe();
    let (late, late_log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(100.0), "m");
    engine
        .add_behavior(first, window(0.0, 2000.0), FadeSpec::none(), 0)
        .unwrap();
    engine
        .add_behavior(late, window(600.0, 2000.0), FadeSpec::none(), 1)
        .unwrap();

    engine.update(300.0); // "m" consumed by the running instance
    engine.update(300.0); // late instance activates afterwards

    assert_eq!(first_log.markers(), vec!["m"]);
    assert!(late_log.markers().is_empty());
}

#[test]
fn retiring_pass_does_not_deliver_markers() {
    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(1000.0), "end");
    engine
        .add_behavior(behavior, window(0.0, 1000.0), FadeSpec::none(), 0)
        .unwrap();

    engine.update(0.0);
    engine.update(1000.0); // expiry check runs before marker replay

    assert!(log.markers().is_empty());
    assert_eq!(log.events().last().map(String::as_str), Some("remove"));
}

#[test]
fn scrub_catch_up_burst_fires_crossed_markers_once() {
    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    engine
        .add_behavior(behavior, window(0.0, 2000.0), FadeSpec::none(), 0)
        .unwrap();
    engine.scrub(TimeMs(600.0));
    engine.add_sync_marker(TimeMs(500.0), "drop");

    engine.update(0.0);
    assert_eq!(log.markers(), vec!["drop"]);

    engine.update(0.0);
    engine.update(100.0);
    assert_eq!(log.markers(), vec!["drop"]);
}

#[test]
fn backward_scrub_replays_markers_crossed_again() {
    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    engine.add_sync_marker(TimeMs(500.0), "drop");
    engine
        .add_behavior(behavior, window(0.0, 2000.0), FadeSpec::none(), 0)
        .unwrap();

    engine.update(600.0);
    assert_eq!(log.markers(), vec!["drop"]);

    engine.scrub(TimeMs(250.0));
    engine.update(0.0); // marker lies ahead of the new playhead
    assert_eq!(log.markers(), vec!["drop"]);

    engine.update(300.0); // crossed again -> replays
    assert_eq!(log.markers(), vec!["drop", "drop"]);
}

#[test]
fn marker_fixture_loads_and_fires_in_order() {
    let markers: Vec<SyncMarker> =
        serde_json::from_str(include_str!("data/markers.json")).unwrap();

    let (behavior, log) = probe();
    let mut engine = TimelineEngine::new();
    for marker in &markers {
        engine.add_sync_marker(marker.time, marker.name.clone());
    }
    engine
        .add_behavior(behavior, window(0.0, 3000.0), FadeSpec::none(), 0)
        .unwrap();

    for _ in 0..12 {
        engine.update(250.0);
    }

    assert_eq!(log.markers(), vec!["intro", "drop", "breakdown", "outro"]);
}

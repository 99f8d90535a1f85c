use crate::core::TimeMs;

/// A unit of timed effect logic driven by the timeline engine.
///
/// Behaviors can spawn objects into a scene, toggle post-processing, trigger
/// audio, or animate properties per frame. Every hook has a default no-op
/// implementation; concrete behaviors override only what they need.
///
/// The `strength` value in `[0, 1]` carries the fade envelope computed from
/// the behavior's scheduled window: use it as an alpha for fade-ins, as a
/// particle-count scale, or anything else that should ramp smoothly in and
/// out.
pub trait Behavior {
    /// Called once per frame while the behavior's window is active.
    ///
    /// `dt` is the milliseconds elapsed since the previous frame, `time` the
    /// absolute playhead position, and `strength` the current fade envelope
    /// value.
    fn update(&mut self, _dt: f64, _time: TimeMs, _strength: f64) {}

    /// Called when the playhead crosses a sync marker while this behavior is
    /// active.
    fn on_marker(&mut self, _name: &str) {}

    /// Called on the first frame the behavior becomes active. Set up the
    /// effect here.
    fn on_register(&mut self) {}

    /// Called when the behavior's window expires. Generally, if
    /// `on_register` is implemented, `on_remove` should be as well, to clean
    /// up its effects.
    fn on_remove(&mut self) {}

    /// External strength push, bypassing the scheduled fade envelope.
    ///
    /// The engine never calls this; per-frame strength arrives through
    /// `update`. Composition logic that drives a behavior's strength from
    /// outside the timeline can use this hook instead.
    fn set_strength(&mut self, _strength: f64) {}
}

/// A behavior that forwards every hook to a fixed list of children, in list
/// order.
pub struct CompoundBehavior {
    children: Vec<Box<dyn Behavior>>,
}

impl CompoundBehavior {
    pub fn new(children: Vec<Box<dyn Behavior>>) -> Self {
        Self { children }
    }
}

impl Behavior for CompoundBehavior {
    fn update(&mut self, dt: f64, time: TimeMs, strength: f64) {
        for child in &mut self.children {
            child.update(dt, time, strength);
        }
    }

    fn on_marker(&mut self, name: &str) {
        for child in &mut self.children {
            child.on_marker(name);
        }
    }

    fn on_register(&mut self) {
        for child in &mut self.children {
            child.on_register();
        }
    }

    fn on_remove(&mut self) {
        for child in &mut self.children {
            child.on_remove();
        }
    }

    fn set_strength(&mut self, strength: f64) {
        for child in &mut self.children {
            child.set_strength(strength);
        }
    }
}

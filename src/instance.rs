use crate::{
    behavior::Behavior,
    core::{FadeSpec, TimeMs, TimeRange},
    error::CuelineResult,
};

/// A scheduled occurrence of a behavior: one behavior bound to a time
/// window, a layer, and a fade profile.
///
/// Normally created and driven by `TimelineEngine::add_behavior`.
pub struct BehaviorInstance {
    behavior: Box<dyn Behavior>,
    layer: i32,
    window: TimeRange,
    fade: FadeSpec,
    is_running: bool,
}

impl BehaviorInstance {
    /// Bind `behavior` to a validated window and fade profile.
    pub fn new(
        behavior: Box<dyn Behavior>,
        window: TimeRange,
        fade: FadeSpec,
        layer: i32,
    ) -> CuelineResult<Self> {
        window.validate()?;
        fade.validate()?;
        Ok(Self {
            behavior,
            layer,
            window,
            fade,
            is_running: false,
        })
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn window(&self) -> TimeRange {
        self.window
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Fade envelope value at `time`.
    ///
    /// Pure in the instance's window and fade profile. Meaningful for `time`
    /// inside the window; the fade-in ramp wins when both fades would
    /// overlap.
    pub fn strength_at(&self, time: TimeMs) -> f64 {
        let relative = time.0 - self.window.start.0;

        if self.fade.fade_in_ms > 0.0 && relative < self.fade.fade_in_ms {
            return relative / self.fade.fade_in_ms;
        }

        let remaining = self.window.end.0 - time.0;
        if self.fade.fade_out_ms > 0.0 && remaining < self.fade.fade_out_ms {
            return remaining / self.fade.fade_out_ms;
        }

        1.0
    }

    /// Per-frame advance at playhead position `time`. Called by the engine.
    ///
    /// The first invocation fires the behavior's registration hook before
    /// anything else.
    pub fn update(&mut self, dt: f64, time: TimeMs) {
        if !self.is_running {
            self.behavior.on_register();
            self.is_running = true;
        }

        let strength = self.strength_at(time);
        self.behavior.update(dt, time, strength);
    }

    /// Forward a sync marker notification to the behavior.
    pub fn on_marker(&mut self, name: &str) {
        self.behavior.on_marker(name);
    }

    /// Fire the behavior's teardown hook.
    ///
    /// Unconditional: runs even when the registration hook never did, as
    /// for a window the playhead jumped over in a single large step.
    pub fn retire(&mut self) {
        self.behavior.on_remove();
    }
}

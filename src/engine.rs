use crate::{
    behavior::Behavior,
    core::{FadeSpec, TimeMs, TimeRange},
    error::CuelineResult,
    instance::BehaviorInstance,
};

/// A named timestamp the engine fires notifications for as the playhead
/// crosses it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SyncMarker {
    pub time: TimeMs,
    pub name: String,
}

/// The timeline scheduler: owns every scheduled behavior instance and sync
/// marker, advances the playhead once per frame, and dispatches updates and
/// marker notifications to the instances active at the current position.
///
/// Mutations (`add_behavior`, `add_sync_marker`, `scrub`) invalidate the
/// derived state; the next `update` rebuilds it. The rebuild is a full
/// re-sort, so scrubbing during playback is not cheap.
pub struct TimelineEngine {
    playhead: TimeMs,
    /// Every registered instance, in insertion order. Indices are stable
    /// handles; retired instances stay in place so a backward scrub can
    /// re-admit them.
    instances: Vec<BehaviorInstance>,
    markers: Vec<SyncMarker>,
    sorted_markers: Vec<SyncMarker>,
    /// Indices of instances whose windows have not yet expired, in ascending
    /// layer order (insertion order on ties).
    active: Vec<usize>,
    /// Index into `sorted_markers` of the next marker not yet fired.
    marker_cursor: usize,
    initialized: bool,
}

impl TimelineEngine {
    pub fn new() -> Self {
        Self {
            playhead: TimeMs(0.0),
            instances: Vec::new(),
            markers: Vec::new(),
            sorted_markers: Vec::new(),
            active: Vec::new(),
            marker_cursor: 0,
            initialized: false,
        }
    }

    /// Current playhead position.
    pub fn playhead(&self) -> TimeMs {
        self.playhead
    }

    /// Add a sync marker. Markers sharing a time fire in insertion order.
    pub fn add_sync_marker(&mut self, time: TimeMs, name: impl Into<String>) {
        self.initialized = false;
        self.markers.push(SyncMarker {
            time,
            name: name.into(),
        });
    }

    /// Schedule a behavior inside `window` with the given fade profile.
    ///
    /// Lower layers run first among concurrently active instances; equal
    /// layers keep insertion order.
    pub fn add_behavior(
        &mut self,
        behavior: Box<dyn Behavior>,
        window: TimeRange,
        fade: FadeSpec,
        layer: i32,
    ) -> CuelineResult<()> {
        let instance = BehaviorInstance::new(behavior, window, fade, layer)?;
        self.initialized = false;
        self.instances.push(instance);
        Ok(())
    }

    /// Jump the playhead to an arbitrary position.
    ///
    /// Forces a full rebuild on the next `update`. Markers already crossed
    /// at the new position replay as a catch-up burst; teardown hooks that
    /// already ran are not undone.
    pub fn scrub(&mut self, time: TimeMs) {
        tracing::debug!(playhead_ms = time.0, "scrubbing playhead");
        self.playhead = time;
        self.initialized = false;
    }

    /// Advance the playhead by `dt` milliseconds and dispatch one frame.
    ///
    /// `dt = 0` is permitted (and expected on the first call). With nothing
    /// active this is a no-op.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, dt: f64) {
        if !self.initialized {
            self.initialize();
        }

        self.playhead.0 += dt;

        if self.active.is_empty() {
            return;
        }

        let playhead = self.playhead;
        let mut reached = self.marker_cursor;

        // Single forward pass; expired instances are unlinked in place and
        // never revisited.
        let mut i = 0;
        while i < self.active.len() {
            let idx = self.active[i];

            if self.instances[idx].window().end.0 <= playhead.0 {
                self.active.remove(i);
                tracing::trace!(instance = idx, "retiring expired instance");
                self.instances[idx].retire();
                continue;
            }

            if self.instances[idx].window().start.0 <= playhead.0 {
                // Replay every marker due since the last pass into this
                // instance, oldest first, before its own frame update.
                let mut cursor = self.marker_cursor;
                while cursor < self.sorted_markers.len()
                    && self.sorted_markers[cursor].time.0 <= playhead.0
                {
                    let marker = &self.sorted_markers[cursor];
                    tracing::trace!(name = %marker.name, instance = idx, "firing sync marker");
                    self.instances[idx].on_marker(&marker.name);
                    cursor += 1;
                }
                reached = reached.max(cursor);

                self.instances[idx].update(dt, playhead);
            }

            i += 1;
        }

        self.marker_cursor = reached;
    }

    fn initialize(&mut self) {
        self.initialized = true;

        self.sorted_markers = self.markers.clone();
        self.sorted_markers
            .sort_by(|a, b| a.time.0.total_cmp(&b.time.0));
        self.marker_cursor = 0;

        self.active = (0..self.instances.len())
            .filter(|&i| self.instances[i].window().end.0 > self.playhead.0)
            .collect();
        self.active.sort_by_key(|&i| self.instances[i].layer());

        tracing::debug!(
            active = self.active.len(),
            markers = self.sorted_markers.len(),
            playhead_ms = self.playhead.0,
            "rebuilt active set"
        );
    }
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self::new()
    }
}

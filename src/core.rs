use crate::error::{CuelineError, CuelineResult};

/// Absolute position on the timeline, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct TimeMs(pub f64);

/// Half-open time window `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Inclusive window start.
    pub start: TimeMs,
    /// Exclusive window end.
    pub end: TimeMs, // exclusive
}

impl TimeRange {
    /// Create a validated window with finite bounds and `start <= end`.
    pub fn new(start: TimeMs, end: TimeMs) -> CuelineResult<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(self) -> CuelineResult<()> {
        if !self.start.0.is_finite() || !self.end.0.is_finite() {
            return Err(CuelineError::validation("TimeRange bounds must be finite"));
        }
        if self.start.0 > self.end.0 {
            return Err(CuelineError::validation("TimeRange start must be <= end"));
        }
        Ok(())
    }

    /// Milliseconds contained in the window.
    pub fn len_ms(self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Return `true` when the window has zero length.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `t` is inside `[start, end)`.
    pub fn contains(self, t: TimeMs) -> bool {
        self.start.0 <= t.0 && t.0 < self.end.0
    }
}

/// Fade envelope durations for a scheduled behavior, in milliseconds.
///
/// Both fades live inside the behavior's window: the fade-in ramp starts at
/// the window start, the fade-out ramp ends at the window end. A zero
/// duration disables that ramp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeSpec {
    pub fade_in_ms: f64,
    pub fade_out_ms: f64,
}

impl FadeSpec {
    /// Create validated fade durations (finite and non-negative).
    pub fn new(fade_in_ms: f64, fade_out_ms: f64) -> CuelineResult<Self> {
        let fade = Self {
            fade_in_ms,
            fade_out_ms,
        };
        fade.validate()?;
        Ok(fade)
    }

    /// No fades: full strength for the whole window.
    pub fn none() -> Self {
        Self {
            fade_in_ms: 0.0,
            fade_out_ms: 0.0,
        }
    }

    pub fn validate(self) -> CuelineResult<()> {
        if !self.fade_in_ms.is_finite() || !self.fade_out_ms.is_finite() {
            return Err(CuelineError::validation("fade durations must be finite"));
        }
        if self.fade_in_ms < 0.0 || self.fade_out_ms < 0.0 {
            return Err(CuelineError::validation(
                "fade durations must be non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for FadeSpec {
    fn default() -> Self {
        Self::none()
    }
}

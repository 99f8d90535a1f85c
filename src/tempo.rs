use crate::{
    core::TimeMs,
    error::{CuelineError, CuelineResult},
};

/// Musical time signature, e.g. 4/4 or 6/8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeSignature {
    /// Beats per bar.
    pub numerator: u32,
    /// Note value of one beat (4 = quarter, 8 = eighth).
    pub denominator: u32,
}

impl TimeSignature {
    /// Create a validated time signature with both parts > 0.
    pub fn new(numerator: u32, denominator: u32) -> CuelineResult<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(CuelineError::validation(
                "TimeSignature parts must be > 0",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

/// Converts note counts and bars to milliseconds at a fixed tempo.
///
/// Pure and stateless after construction. Time-signature or tempo changes
/// mid-timeline are not supported.
#[derive(Clone, Copy, Debug)]
pub struct TempoClock {
    bpm: f64,
    signature: TimeSignature,
    ms_per_16th: f64,
}

impl TempoClock {
    /// Create a converter for the given tempo; `bpm` must be finite and > 0.
    pub fn new(bpm: f64, signature: TimeSignature) -> CuelineResult<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(CuelineError::validation("bpm must be finite and > 0"));
        }
        Ok(Self {
            bpm,
            signature,
            ms_per_16th: 15000.0 / bpm,
        })
    }

    pub fn bpm(self) -> f64 {
        self.bpm
    }

    pub fn signature(self) -> TimeSignature {
        self.signature
    }

    /// Duration of one sixteenth note in milliseconds.
    pub fn ms_per_16th(self) -> f64 {
        self.ms_per_16th
    }

    pub fn from_sixteenths(self, count: f64) -> TimeMs {
        TimeMs(count * self.ms_per_16th)
    }

    pub fn from_eighths(self, count: f64) -> TimeMs {
        self.from_sixteenths(count * 2.0)
    }

    pub fn from_quarters(self, count: f64) -> TimeMs {
        self.from_sixteenths(count * 4.0)
    }

    pub fn from_halves(self, count: f64) -> TimeMs {
        self.from_sixteenths(count * 8.0)
    }

    pub fn from_wholes(self, count: f64) -> TimeMs {
        self.from_sixteenths(count * 16.0)
    }

    /// Bars to milliseconds, honoring the time signature.
    pub fn from_bars(self, count: f64) -> TimeMs {
        let sixteenths =
            count * 16.0 / f64::from(self.signature.denominator) * f64::from(self.signature.numerator);
        self.from_sixteenths(sixteenths)
    }
}

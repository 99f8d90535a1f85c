#![forbid(unsafe_code)]

pub mod behavior;
pub mod core;
pub mod engine;
pub mod error;
pub mod fps;
pub mod instance;
pub mod tempo;

pub use behavior::{Behavior, CompoundBehavior};
pub use core::{FadeSpec, TimeMs, TimeRange};
pub use engine::{SyncMarker, TimelineEngine};
pub use error::{CuelineError, CuelineResult};
pub use fps::FrameRateCounter;
pub use instance::BehaviorInstance;
pub use tempo::{TempoClock, TimeSignature};

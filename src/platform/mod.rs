//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key presses → movement intents)
//! - Frame pacing (sleep-based limiter natively, fixed-step accumulator on web)

pub mod input;
pub mod time;

pub use input::{Autopilot, Intent, Key, KeyEvent, translate};
pub use time::{FixedStep, FpsCounter};

#[cfg(not(target_arch = "wasm32"))]
pub use time::FrameLimiter;

//! Frame pacing
//!
//! The simulation counts frames, never seconds. These helpers decide how
//! many frames to run and keep the native loop from spinning.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Fixed-step accumulator for variable-rate hosts (requestAnimationFrame)
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog we refused to simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the slot we will overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Sleep-based frame cap for the native loop
#[cfg(not(target_arch = "wasm32"))]
pub struct FrameLimiter {
    frame: std::time::Duration,
    last: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameLimiter {
    /// `fps == 0` disables the cap
    pub fn new(fps: u32) -> Self {
        let frame = if fps == 0 {
            std::time::Duration::ZERO
        } else {
            std::time::Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self {
            frame,
            last: std::time::Instant::now(),
        }
    }

    /// Block until a full frame has elapsed since the previous call
    pub fn wait(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.last = std::time::Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_accumulates() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
        assert_eq!(step.advance(SIM_DT * 0.6), 1);
        assert_eq!(step.advance(SIM_DT * 2.0), 2);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(1.0), MAX_SUBSTEPS);
        // Backlog is dropped instead of replayed
        assert!(step.advance(0.0) <= 1);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_frame_limiter_sleeps() {
        let mut limiter = FrameLimiter::new(100);
        let start = std::time::Instant::now();
        limiter.wait();
        limiter.wait();
        assert!(start.elapsed() >= std::time::Duration::from_millis(15));
    }
}

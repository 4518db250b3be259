//! PacMac - A single-maze Pac-Man style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, session state)
//! - `session`: Session controller (owns state + RNG, input dispatch, reset)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input translation and frame pacing
//! - `assets`: Ghost sprite loading with placeholder fallback
//! - `hud`: Score and end-of-run overlay text

pub mod assets;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 420;
    pub const SCREEN_HEIGHT: i32 = 360;

    /// Fixed simulation timestep (one frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Default frame cap for the native loop
    pub const TARGET_FPS: u32 = 60;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 20;
    pub const PLAYER_SPEED: i32 = 3;
    /// Frames between mouth open/closed toggles
    pub const MOUTH_INTERVAL: u32 = 10;

    /// Ghost defaults
    pub const GHOST_SIZE: i32 = 24;
    pub const GHOST_SPEED: i32 = 2;
    /// Wander budget range (frames, inclusive)
    pub const WANDER_MIN_STEPS: i32 = 15;
    pub const WANDER_MAX_STEPS: i32 = 60;
    /// Ghost teleports once stuck for more than this many frames
    pub const STUCK_LIMIT: u32 = 60;
    pub const TELEPORT_ATTEMPTS: u32 = 30;
    /// Inset from the screen edges for teleport targets
    pub const TELEPORT_MARGIN: i32 = 20;

    /// Pellets
    pub const PELLET_SIZE: i32 = 5;
    pub const POWER_PELLET_SIZE: i32 = 12;
    pub const PELLET_SPACING: i32 = 20;
    pub const PELLET_MARGIN: i32 = 20;

    /// Power mode length (10 seconds at 60 fps)
    pub const POWER_DURATION: u32 = 600;

    /// Scoring
    pub const PELLET_SCORE: u64 = 1;
    pub const POWER_PELLET_SCORE: u64 = 5;
    pub const GHOST_SCORE: u64 = 10;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, frame counters instead of wall-clock timers
//! - Randomness only from the injected RNG
//! - Stable iteration order (vector order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod ghost;
pub mod maze;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use entity::{DrawItem, Entity, Visual};
pub use ghost::Ghost;
pub use player::Player;
pub use rect::{Bounded, Rect, collide_all, collide_any};
pub use state::{
    Direction, GameEvent, GamePhase, GameState, Pellet, PowerMode, PowerPellet, Wall,
};
pub use tick::tick;

//! Shared capability of everything that is drawn and collided
//!
//! The simulation only needs a bounding rectangle for collisions and a
//! visual handle for drawing, so entities expose exactly those two things.

use serde::{Deserialize, Serialize};

use super::rect::{Bounded, Rect};
use super::state::Direction;

/// What the renderer should draw inside an entity's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    Wall,
    Pellet,
    PowerPellet,
    /// Filled circle with a wedge cut toward `facing` when the mouth is open
    Player { facing: Direction, mouth_open: bool },
    /// Ghost sprite by identity index, tinted when edible
    Ghost { identity: usize, edible: bool },
}

/// A drawable, collidable entity
pub trait Entity: Bounded {
    fn visual(&self) -> Visual;
}

/// One entry of the per-frame draw pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawItem {
    pub bounds: Rect,
    pub visual: Visual,
}

impl DrawItem {
    pub fn of(entity: &impl Entity) -> Self {
        Self {
            bounds: entity.bounds(),
            visual: entity.visual(),
        }
    }
}

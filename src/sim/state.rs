//! Game state and core simulation types
//!
//! Everything a frame of the game needs lives in [`GameState`]. A reset
//! builds a fresh value rather than patching this one in place.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{DrawItem, Entity, Visual};
use super::ghost::Ghost;
use super::maze;
use super::player::Player;
use super::rect::{Bounded, Rect};
use crate::consts::*;

/// Cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step (screen coordinates, y down)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }

    /// Direction implied by a velocity, x axis first
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        if delta.x < 0 {
            Some(Direction::Left)
        } else if delta.x > 0 {
            Some(Direction::Right)
        } else if delta.y < 0 {
            Some(Direction::Up)
        } else if delta.y > 0 {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Static maze obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall(pub Rect);

impl Bounded for Wall {
    fn bounds(&self) -> Rect {
        self.0
    }
}

impl Entity for Wall {
    fn visual(&self) -> Visual {
        Visual::Wall
    }
}

/// Regular pellet, centred on its grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pellet {
    pub center: IVec2,
}

impl Bounded for Pellet {
    fn bounds(&self) -> Rect {
        Rect::centered(self.center, PELLET_SIZE)
    }
}

impl Entity for Pellet {
    fn visual(&self) -> Visual {
        Visual::Pellet
    }
}

/// Power pellet: bigger, worth more, and makes ghosts edible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerPellet {
    pub center: IVec2,
}

impl Bounded for PowerPellet {
    fn bounds(&self) -> Rect {
        Rect::centered(self.center, POWER_PELLET_SIZE)
    }
}

impl Entity for PowerPellet {
    fn visual(&self) -> Visual {
        Visual::PowerPellet
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Player touched a ghost outside power mode
    GameOver,
    /// All pellets collected or all ghosts eaten
    Won,
}

/// Session-wide power mode countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerMode {
    pub remaining_frames: u32,
}

/// Notable things that happened during a tick (drained by the host for logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    PowerModeEnded,
    GhostEaten { identity: usize },
    PlayerCaught { identity: usize },
    Won,
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub phase: GamePhase,
    pub power: Option<PowerMode>,
    /// Simulation frames advanced while playing
    pub frame: u64,
    pub walls: Vec<Wall>,
    pub pellets: Vec<Pellet>,
    pub power_pellets: Vec<PowerPellet>,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the initial layout with one ghost per visual identity
    pub fn new(ghost_count: usize, rng: &mut impl Rng) -> Self {
        let walls = maze::walls();
        let pellets = maze::pellets(&walls);
        let power_pellets = maze::power_pellets(&walls);
        let ghosts = (0..ghost_count)
            .map(|i| Ghost::new(i, maze::ghost_spawn(i), rng))
            .collect();

        Self {
            score: 0,
            phase: GamePhase::Playing,
            power: None,
            frame: 0,
            walls,
            pellets,
            power_pellets,
            player: Player::new(maze::PLAYER_SPAWN),
            ghosts,
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn power_active(&self) -> bool {
        self.power.is_some()
    }

    /// Set every live ghost's edible flag
    pub fn set_ghosts_edible(&mut self, edible: bool) {
        for ghost in &mut self.ghosts {
            ghost.set_edible(edible);
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything to draw this frame, in paint order
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items = Vec::with_capacity(
            self.walls.len() + self.pellets.len() + self.power_pellets.len() + 1 + self.ghosts.len(),
        );
        items.extend(self.walls.iter().map(DrawItem::of));
        items.extend(self.pellets.iter().map(DrawItem::of));
        items.extend(self.power_pellets.iter().map(DrawItem::of));
        items.push(DrawItem::of(&self.player));
        items.extend(self.ghosts.iter().map(DrawItem::of));
        items
    }
}

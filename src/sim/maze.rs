//! The single hardcoded level: walls, pellet grid and spawn points

use glam::IVec2;

use super::rect::{Rect, collide_any};
use super::state::{Pellet, PowerPellet, Wall};
use crate::consts::*;

const W: i32 = SCREEN_WIDTH;
const H: i32 = SCREEN_HEIGHT;

/// Wall rectangles (x, y, w, h)
const WALL_LAYOUT: [(i32, i32, i32, i32); 16] = [
    // Outer boundary
    (0, 0, 10, H),
    (W - 10, 0, 10, H),
    (0, 0, W, 10),
    (0, H - 10, W, 10),
    // Second ring, gap in the top middle
    (40, 40, 140, 10),
    (220, 40, W - 260, 10),
    (40, 40, 10, H - 80),
    (W - 50, 40, 10, H - 80),
    // Third ring
    (80, 80, W - 160, 10),
    (80, 120, 10, H - 160),
    (W - 90, 120, 10, H - 160),
    // Inner walls
    (140, 160, W - 280, 10),
    (140, 200, 10, 60),
    (220, 200, W - 360, 10),
    (220, 240, 10, 40),
    (280, 120, 10, H - 200),
];

/// Power pellet centres, before wall filtering
pub const POWER_PELLET_SEEDS: [IVec2; 2] = [IVec2::new(140, 60), IVec2::new(180, 60)];

pub const PLAYER_SPAWN: IVec2 = IVec2::new(30, 30);

pub const GHOST_SPAWNS: [IVec2; 4] = [
    IVec2::new(60, 260),
    IVec2::new(340, 260),
    IVec2::new(340, 140),
    IVec2::new(200, 200),
];

pub fn walls() -> Vec<Wall> {
    WALL_LAYOUT
        .iter()
        .map(|&(x, y, w, h)| Wall(Rect::new(x, y, w, h)))
        .collect()
}

/// One pellet per grid point that does not overlap a wall
pub fn pellets(walls: &[Wall]) -> Vec<Pellet> {
    let mut pellets = Vec::new();
    for x in (PELLET_MARGIN..W - PELLET_MARGIN).step_by(PELLET_SPACING as usize) {
        for y in (PELLET_MARGIN..H - PELLET_MARGIN).step_by(PELLET_SPACING as usize) {
            let pellet = Pellet {
                center: IVec2::new(x, y),
            };
            if !collide_any(&Rect::centered(pellet.center, PELLET_SIZE), walls) {
                pellets.push(pellet);
            }
        }
    }
    pellets
}

pub fn power_pellets(walls: &[Wall]) -> Vec<PowerPellet> {
    POWER_PELLET_SEEDS
        .iter()
        .map(|&center| PowerPellet { center })
        .filter(|p| !collide_any(&Rect::centered(p.center, POWER_PELLET_SIZE), walls))
        .collect()
}

/// Spawn point for the `index`-th ghost (wraps around)
pub fn ghost_spawn(index: usize) -> IVec2 {
    GHOST_SPAWNS[index % GHOST_SPAWNS.len()]
}

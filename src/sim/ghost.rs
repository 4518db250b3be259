//! Ghost wander state machine
//!
//! Ghosts have no pathfinding. Each one commits to a direction for a random
//! number of frames, re-rolls when that budget runs out or a wall is ahead,
//! and teleports to a free spot if it fails to move for too long.

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Visual};
use super::rect::{Bounded, Rect, collide_any};
use super::state::{Direction, Wall};
use crate::consts::*;

/// A wandering enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    /// Index of the visual identity this ghost was created from
    pub identity: usize,
    /// Top-left corner
    pub pos: IVec2,
    pub direction: Direction,
    /// Frames left before the direction is re-rolled
    pub steps_remaining: i32,
    pub edible: bool,
    /// Consecutive frames without a position change
    pub stuck_frames: u32,
}

impl Ghost {
    pub fn new(identity: usize, pos: IVec2, rng: &mut impl Rng) -> Self {
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        Self {
            identity,
            pos,
            direction,
            steps_remaining: rng.random_range(WANDER_MIN_STEPS..=WANDER_MAX_STEPS),
            edible: false,
            stuck_frames: 0,
        }
    }

    fn delta(direction: Direction) -> IVec2 {
        direction.delta() * GHOST_SPEED
    }

    /// Probe whether one step in `direction` stays clear of every wall
    pub fn can_move(&self, direction: Direction, walls: &[Wall]) -> bool {
        let probe = Rect::at(self.pos + Self::delta(direction), GHOST_SIZE);
        !collide_any(&probe, walls)
    }

    /// Pick the first unblocked direction from a random permutation
    fn choose_new_direction(&mut self, walls: &[Wall], rng: &mut impl Rng) {
        let mut order = Direction::ALL;
        order.shuffle(rng);
        match order.into_iter().find(|&d| self.can_move(d, walls)) {
            Some(direction) => {
                self.direction = direction;
                self.steps_remaining = rng.random_range(WANDER_MIN_STEPS..=WANDER_MAX_STEPS);
            }
            None => self.steps_remaining = 0,
        }
    }

    /// Advance one frame
    pub fn step(&mut self, walls: &[Wall], rng: &mut impl Rng) {
        if self.steps_remaining <= 0 || !self.can_move(self.direction, walls) {
            self.choose_new_direction(walls, rng);
        }

        let old_pos = self.pos;
        self.pos += Self::delta(self.direction);

        if collide_any(&self.bounds(), walls) {
            self.pos = old_pos;
            self.steps_remaining = 0;
            self.stuck_frames += 1;
        } else {
            self.steps_remaining -= 1;
            if self.pos != old_pos {
                self.stuck_frames = 0;
            } else {
                self.stuck_frames += 1;
            }
        }

        if self.stuck_frames > STUCK_LIMIT {
            if self.teleport(walls, rng) {
                log::debug!("Ghost {} teleported to {:?}", self.identity, self.pos);
            } else {
                log::debug!("Ghost {} found no free spot to teleport to", self.identity);
            }
            self.stuck_frames = 0;
        }
    }

    /// Relocate to a random wall-free spot inside the playable bounds.
    /// Returns false (leaving the ghost in place) if every attempt collides.
    pub fn teleport(&mut self, walls: &[Wall], rng: &mut impl Rng) -> bool {
        let max_x = SCREEN_WIDTH - GHOST_SIZE - TELEPORT_MARGIN;
        let max_y = SCREEN_HEIGHT - GHOST_SIZE - TELEPORT_MARGIN;
        for _ in 0..TELEPORT_ATTEMPTS {
            let candidate = IVec2::new(
                rng.random_range(TELEPORT_MARGIN..=max_x),
                rng.random_range(TELEPORT_MARGIN..=max_y),
            );
            if !collide_any(&Rect::at(candidate, GHOST_SIZE), walls) {
                self.pos = candidate;
                return true;
            }
        }
        false
    }

    pub fn set_edible(&mut self, edible: bool) {
        self.edible = edible;
    }
}

impl Bounded for Ghost {
    fn bounds(&self) -> Rect {
        Rect::at(self.pos, GHOST_SIZE)
    }
}

impl Entity for Ghost {
    fn visual(&self) -> Visual {
        Visual::Ghost {
            identity: self.identity,
            edible: self.edible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn boxed_in(pos: IVec2) -> Vec<Wall> {
        // Four walls flush against each side: touching but not overlapping
        vec![
            Wall(Rect::new(pos.x - 10, pos.y - 10, GHOST_SIZE + 20, 10)),
            Wall(Rect::new(pos.x - 10, pos.y + GHOST_SIZE, GHOST_SIZE + 20, 10)),
            Wall(Rect::new(pos.x - 10, pos.y, 10, GHOST_SIZE)),
            Wall(Rect::new(pos.x + GHOST_SIZE, pos.y, 10, GHOST_SIZE)),
        ]
    }

    #[test]
    fn test_new_ghost_budget_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 0..50 {
            let g = Ghost::new(i, IVec2::new(100, 100), &mut rng);
            assert!((WANDER_MIN_STEPS..=WANDER_MAX_STEPS).contains(&g.steps_remaining));
            assert!(!g.edible);
            assert_eq!(g.stuck_frames, 0);
        }
    }

    #[test]
    fn test_moves_in_open_space() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut g = Ghost::new(0, IVec2::new(200, 200), &mut rng);
        let before = g.pos;
        let budget = g.steps_remaining;
        g.step(&[], &mut rng);
        assert_eq!(g.pos, before + g.direction.delta() * GHOST_SPEED);
        assert_eq!(g.steps_remaining, budget - 1);
        assert_eq!(g.stuck_frames, 0);
    }

    #[test]
    fn test_all_directions_blocked_stays_put() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = IVec2::new(100, 100);
        let walls = boxed_in(pos);
        let mut g = Ghost::new(0, pos, &mut rng);
        assert!(!collide_any(&g.bounds(), &walls));

        for frame in 1..=10 {
            g.step(&walls, &mut rng);
            assert_eq!(g.pos, pos);
            assert_eq!(g.steps_remaining, 0);
            assert_eq!(g.stuck_frames, frame);
        }
    }

    #[test]
    fn test_redirects_when_blocked_ahead() {
        let mut rng = Pcg32::seed_from_u64(11);
        let pos = IVec2::new(100, 100);
        // Wall flush to the right only
        let walls = vec![Wall(Rect::new(pos.x + GHOST_SIZE, 0, 10, 360))];
        let mut g = Ghost::new(0, pos, &mut rng);
        g.direction = Direction::Right;
        g.steps_remaining = 30;
        g.step(&walls, &mut rng);
        assert_ne!(g.direction, Direction::Right);
        assert_ne!(g.pos, pos);
        assert!(!collide_any(&g.bounds(), &walls));
    }

    #[test]
    fn test_expired_budget_rerolls() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut g = Ghost::new(0, IVec2::new(200, 150), &mut rng);
        g.steps_remaining = 0;
        g.step(&[], &mut rng);
        // Fresh budget minus the step just taken
        assert!(g.steps_remaining >= WANDER_MIN_STEPS - 1);
        assert!(g.steps_remaining < WANDER_MAX_STEPS);
    }

    #[test]
    fn test_stuck_ghost_teleports_to_free_spot() {
        let mut rng = Pcg32::seed_from_u64(42);
        let pos = IVec2::new(100, 100);
        let walls = boxed_in(pos);
        let mut g = Ghost::new(0, pos, &mut rng);

        for _ in 0..=STUCK_LIMIT {
            g.step(&walls, &mut rng);
        }
        // Only four small walls: the first attempt essentially always lands clear
        assert_ne!(g.pos, pos);
        assert!(!collide_any(&g.bounds(), &walls));
        assert_eq!(g.stuck_frames, 0);
        assert!(g.pos.x >= TELEPORT_MARGIN && g.pos.x <= SCREEN_WIDTH - GHOST_SIZE - TELEPORT_MARGIN);
        assert!(g.pos.y >= TELEPORT_MARGIN && g.pos.y <= SCREEN_HEIGHT - GHOST_SIZE - TELEPORT_MARGIN);
    }

    #[test]
    fn test_ghost_spawned_inside_maze_wall_recovers() {
        let walls = maze::walls();
        let mut rng = Pcg32::seed_from_u64(2024);
        let spawn = IVec2::new(200, 200);
        let mut g = Ghost::new(3, spawn, &mut rng);
        assert!(collide_any(&g.bounds(), &walls));

        // Teleport retries every STUCK_LIMIT + 1 frames until a free spot is found
        let mut frames = 0;
        while collide_any(&g.bounds(), &walls) && frames < 20 * (STUCK_LIMIT + 1) {
            g.step(&walls, &mut rng);
            frames += 1;
        }
        assert!(!collide_any(&g.bounds(), &walls));
        assert!(frames >= STUCK_LIMIT + 1);
    }

    #[test]
    fn test_wandering_never_enters_walls() {
        let walls = maze::walls();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut g = Ghost::new(1, IVec2::new(340, 260), &mut rng);
        assert!(!collide_any(&g.bounds(), &walls));
        for _ in 0..2000 {
            g.step(&walls, &mut rng);
            assert!(!collide_any(&g.bounds(), &walls));
        }
    }

    #[test]
    fn test_set_edible_changes_visual() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut g = Ghost::new(2, IVec2::new(100, 100), &mut rng);
        g.set_edible(true);
        assert_eq!(g.visual(), Visual::Ghost { identity: 2, edible: true });
        g.set_edible(false);
        assert_eq!(g.visual(), Visual::Ghost { identity: 2, edible: false });
    }
}

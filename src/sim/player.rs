//! The player-controlled character

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Visual};
use super::rect::{Bounded, Rect, collide_all};
use super::state::{Direction, Wall};
use crate::consts::*;

/// Player position, velocity and mouth animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: IVec2,
    /// Per-frame displacement
    pub vel: IVec2,
    /// Last nonzero input direction
    pub facing: Direction,
    pub mouth_open: bool,
    mouth_timer: u32,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            vel: IVec2::ZERO,
            facing: Direction::Right,
            mouth_open: true,
            mouth_timer: 0,
        }
    }

    /// Set velocity; facing follows x first, then y, and is kept when both are zero
    pub fn set_velocity(&mut self, dx: i32, dy: i32) {
        self.vel = IVec2::new(dx, dy);
        if let Some(dir) = Direction::from_delta(self.vel) {
            self.facing = dir;
        }
    }

    /// Move one frame with axis-separated wall resolution, then animate
    pub fn step(&mut self, walls: &[Wall]) {
        self.pos.x += self.vel.x;
        let hits: Vec<Rect> = collide_all(&self.bounds(), walls)
            .into_iter()
            .map(|w| w.bounds())
            .collect();
        for wall in hits {
            if self.vel.x > 0 {
                self.pos.x = wall.left() - PLAYER_SIZE;
            } else {
                self.pos.x = wall.right();
            }
        }

        self.pos.y += self.vel.y;
        let hits: Vec<Rect> = collide_all(&self.bounds(), walls)
            .into_iter()
            .map(|w| w.bounds())
            .collect();
        for wall in hits {
            if self.vel.y > 0 {
                self.pos.y = wall.top() - PLAYER_SIZE;
            } else {
                self.pos.y = wall.bottom();
            }
        }

        self.mouth_timer += 1;
        if self.mouth_timer >= MOUTH_INTERVAL {
            self.mouth_timer = 0;
            self.mouth_open = !self.mouth_open;
        }
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::at(self.pos, PLAYER_SIZE)
    }
}

impl Entity for Player {
    fn visual(&self) -> Visual {
        Visual::Player {
            facing: self.facing,
            mouth_open: self.mouth_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wall(x: i32, y: i32, w: i32, h: i32) -> Wall {
        Wall(Rect::new(x, y, w, h))
    }

    #[test]
    fn test_facing_follows_input() {
        let mut p = Player::new(IVec2::new(30, 30));
        assert_eq!(p.facing, Direction::Right);
        p.set_velocity(-PLAYER_SPEED, 0);
        assert_eq!(p.facing, Direction::Left);
        p.set_velocity(0, PLAYER_SPEED);
        assert_eq!(p.facing, Direction::Down);
        p.set_velocity(0, 0);
        assert_eq!(p.facing, Direction::Down);
        p.set_velocity(0, -PLAYER_SPEED);
        assert_eq!(p.facing, Direction::Up);
    }

    #[test]
    fn test_free_movement() {
        let mut p = Player::new(IVec2::new(30, 30));
        p.set_velocity(PLAYER_SPEED, 0);
        p.step(&[]);
        assert_eq!(p.pos, IVec2::new(33, 30));
    }

    #[test]
    fn test_snaps_flush_moving_right() {
        let walls = [wall(52, 0, 10, 100)];
        let mut p = Player::new(IVec2::new(30, 30));
        p.set_velocity(PLAYER_SPEED, 0);
        p.step(&walls);
        // 30 + 3 = 33, right edge 53 overlaps wall at 52
        assert_eq!(p.pos.x, 32);
        assert!(!p.bounds().intersects(&walls[0].0));
    }

    #[test]
    fn test_snaps_flush_moving_left_and_up() {
        let walls = [wall(0, 0, 10, 360), wall(0, 0, 420, 10)];
        let mut p = Player::new(IVec2::new(11, 40));
        p.set_velocity(-PLAYER_SPEED, 0);
        p.step(&walls);
        assert_eq!(p.pos.x, 10);

        let mut p = Player::new(IVec2::new(40, 12));
        p.set_velocity(0, -PLAYER_SPEED);
        p.step(&walls);
        assert_eq!(p.pos.y, 10);
    }

    #[test]
    fn test_mouth_toggles_every_interval() {
        let mut p = Player::new(IVec2::new(30, 30));
        assert!(p.mouth_open);
        for _ in 0..MOUTH_INTERVAL - 1 {
            p.step(&[]);
        }
        assert!(p.mouth_open);
        p.step(&[]);
        assert!(!p.mouth_open);
        for _ in 0..MOUTH_INTERVAL {
            p.step(&[]);
        }
        assert!(p.mouth_open);
    }

    proptest! {
        #[test]
        fn prop_step_never_ends_inside_wall(
            start_x in 10i32..200,
            start_y in 10i32..200,
            dir in 0usize..4,
            wx in 0i32..300,
            wy in 0i32..300,
            ww in 5i32..80,
            wh in 5i32..80,
        ) {
            let walls = [wall(wx, wy, ww, wh)];
            let mut p = Player::new(IVec2::new(start_x, start_y));
            prop_assume!(!p.bounds().intersects(&walls[0].0));

            let delta = Direction::ALL[dir].delta() * PLAYER_SPEED;
            p.set_velocity(delta.x, delta.y);
            for _ in 0..20 {
                p.step(&walls);
                prop_assert!(!p.bounds().intersects(&walls[0].0));
            }
        }
    }
}

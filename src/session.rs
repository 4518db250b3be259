//! Session controller
//!
//! Owns the one live [`GameState`] plus the RNG that drives ghost
//! behaviour. All mutation goes through [`Session::tick`],
//! [`Session::handle_key`] or [`Session::reset`]; renderers only borrow.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::PLAYER_SPEED;
use crate::platform::input::{Intent, KeyEvent, translate};
use crate::sim::{GameState, tick};

/// Whether the host loop should keep going after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    state: GameState,
    rng: Pcg32,
    ghost_count: usize,
    /// Completed runs (game over or win) since start
    runs: u32,
}

impl Session {
    /// Start a session with one ghost per visual identity
    pub fn new(seed: u64, ghost_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(ghost_count, &mut rng);
        log::info!("Session started (seed {}, {} ghosts)", seed, ghost_count);
        Self {
            state,
            rng,
            ghost_count,
            runs: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts that need to drain events
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Advance one frame (no-op once the run has ended)
    pub fn tick(&mut self) {
        let was_playing = self.state.is_playing();
        tick(&mut self.state, &mut self.rng);
        if was_playing && !self.state.is_playing() {
            self.runs += 1;
        }
    }

    /// Replace the whole world with a fresh layout
    pub fn reset(&mut self) {
        self.state = GameState::new(self.ghost_count, &mut self.rng);
        log::info!("Session reset");
    }

    /// Apply one key event
    pub fn handle_key(&mut self, event: KeyEvent) -> Flow {
        let Some(intent) = translate(event) else {
            return Flow::Continue;
        };

        if intent == Intent::Quit {
            return Flow::Quit;
        }

        if !self.state.is_playing() {
            if intent == Intent::Restart {
                self.reset();
            }
            return Flow::Continue;
        }

        let player = &mut self.state.player;
        match intent {
            Intent::Steer(direction) => {
                let v = direction.delta() * PLAYER_SPEED;
                player.set_velocity(v.x, v.y);
            }
            Intent::ReleaseHorizontal => player.set_velocity(0, player.vel.y),
            Intent::ReleaseVertical => player.set_velocity(player.vel.x, 0),
            Intent::Restart | Intent::Quit => {}
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::Key;
    use crate::sim::{GamePhase, maze};
    use glam::IVec2;

    fn finish_with_game_over(session: &mut Session) {
        let pos = session.state().player.pos;
        let state = session.state_mut();
        state.ghosts[0].pos = pos;
        state.power = None;
        session.tick();
        assert!(session.state().is_game_over());
    }

    #[test]
    fn test_steering_and_release() {
        let mut session = Session::new(1, 4);
        session.handle_key(KeyEvent::Pressed(Key::Left));
        assert_eq!(session.state().player.vel, IVec2::new(-PLAYER_SPEED, 0));

        session.handle_key(KeyEvent::Pressed(Key::Down));
        assert_eq!(session.state().player.vel, IVec2::new(0, PLAYER_SPEED));

        // Releasing a horizontal key keeps the vertical channel
        session.handle_key(KeyEvent::Released(Key::Left));
        assert_eq!(session.state().player.vel, IVec2::new(0, PLAYER_SPEED));

        session.handle_key(KeyEvent::Released(Key::Down));
        assert_eq!(session.state().player.vel, IVec2::ZERO);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = Session::new(2, 4);
        session.tick();
        let score = session.state().score;
        session.handle_key(KeyEvent::Pressed(Key::Restart));
        assert_eq!(session.state().score, score);
        assert_eq!(session.state().frame, 1);
    }

    #[test]
    fn test_quit_is_reported() {
        let mut session = Session::new(3, 4);
        assert_eq!(session.handle_key(KeyEvent::Pressed(Key::Quit)), Flow::Quit);
        assert_eq!(
            session.handle_key(KeyEvent::Pressed(Key::Other)),
            Flow::Continue
        );
    }

    #[test]
    fn test_movement_ignored_after_game_over() {
        let mut session = Session::new(4, 4);
        finish_with_game_over(&mut session);
        session.handle_key(KeyEvent::Pressed(Key::Right));
        assert_eq!(session.state().player.vel, IVec2::ZERO);
        assert_eq!(session.runs(), 1);
    }

    #[test]
    fn test_reset_restores_initial_layout_from_any_phase() {
        let mut session = Session::new(5, 4);
        let initial = session.state().clone();

        // Mid-game
        session.handle_key(KeyEvent::Pressed(Key::Down));
        for _ in 0..30 {
            session.tick();
        }
        session.reset();
        assert_same_layout(session.state(), &initial);

        // After game over, via the restart key
        finish_with_game_over(&mut session);
        session.handle_key(KeyEvent::Pressed(Key::Restart));
        assert_same_layout(session.state(), &initial);

        // After a win
        session.state_mut().ghosts.clear();
        session.tick();
        assert!(session.state().is_won());
        session.handle_key(KeyEvent::Pressed(Key::Restart));
        assert_same_layout(session.state(), &initial);
    }

    fn assert_same_layout(state: &GameState, initial: &GameState) {
        assert_eq!(state.walls, initial.walls);
        assert_eq!(state.pellets, initial.pellets);
        assert_eq!(state.power_pellets, initial.power_pellets);
        assert_eq!(state.player.pos, maze::PLAYER_SPAWN);
        assert_eq!(state.player.vel, IVec2::ZERO);
        let spawns: Vec<IVec2> = state.ghosts.iter().map(|g| g.pos).collect();
        let initial_spawns: Vec<IVec2> = initial.ghosts.iter().map(|g| g.pos).collect();
        assert_eq!(spawns, initial_spawns);
        assert!(state.ghosts.iter().all(|g| !g.edible));
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.is_game_over());
        assert!(!state.is_won());
        assert!(state.power.is_none());
        assert_eq!(state.frame, 0);
    }
}

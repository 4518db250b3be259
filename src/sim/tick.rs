//! Fixed timestep simulation tick
//!
//! Advances one frame: movement, pellet pickups, power mode countdown,
//! ghost contact and the win check. Terminal phases freeze the world.

use rand::Rng;

use super::rect::{Bounded, remove_colliding};
use super::state::{GameEvent, GamePhase, GameState, PowerMode};
use crate::consts::*;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, rng: &mut impl Rng) {
    if !state.is_playing() {
        return;
    }
    state.frame += 1;

    // Movement (ghost order is irrelevant, they never collide with each other)
    state.player.step(&state.walls);
    for ghost in &mut state.ghosts {
        ghost.step(&state.walls, rng);
    }

    let player_rect = state.player.bounds();

    // Pellets
    let eaten = remove_colliding(&player_rect, &mut state.pellets);
    for _ in 0..eaten {
        state.score += PELLET_SCORE;
        state.events.push(GameEvent::PelletEaten);
    }

    // Power pellets restart the countdown
    let power_eaten = remove_colliding(&player_rect, &mut state.power_pellets);
    if power_eaten > 0 {
        for _ in 0..power_eaten {
            state.score += POWER_PELLET_SCORE;
            state.events.push(GameEvent::PowerPelletEaten);
        }
        state.power = Some(PowerMode {
            remaining_frames: POWER_DURATION,
        });
        state.set_ghosts_edible(true);
        log::debug!("Power mode on for {} frames", POWER_DURATION);
    }

    // Countdown runs every frame, including the activating one
    let expired = match state.power.as_mut() {
        Some(power) => {
            power.remaining_frames = power.remaining_frames.saturating_sub(1);
            power.remaining_frames == 0
        }
        None => false,
    };
    if expired {
        state.power = None;
        state.set_ghosts_edible(false);
        state.events.push(GameEvent::PowerModeEnded);
        log::debug!("Power mode over");
    }

    // Ghost contact
    if state.power_active() {
        let mut eaten_ghosts = Vec::new();
        state.ghosts.retain(|ghost| {
            if player_rect.intersects(&ghost.bounds()) {
                eaten_ghosts.push(ghost.identity);
                false
            } else {
                true
            }
        });
        for identity in eaten_ghosts {
            state.score += GHOST_SCORE;
            state.events.push(GameEvent::GhostEaten { identity });
        }
    } else if let Some(ghost) = state
        .ghosts
        .iter()
        .find(|ghost| player_rect.intersects(&ghost.bounds()))
    {
        let identity = ghost.identity;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerCaught { identity });
        log::info!("Game over: caught by ghost {} (score {})", identity, state.score);
        return;
    }

    // Win: board cleared, or every ghost eaten
    let board_cleared = state.pellets.is_empty() && state.power_pellets.is_empty();
    if board_cleared || state.ghosts.is_empty() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Won with score {}", state.score);
    }
}

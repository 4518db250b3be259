//! Keyboard input translation
//!
//! Raw key events become intents. Velocity behaves as two channels: a
//! press sets one axis (zeroing the other), a release clears only the axis
//! its key belongs to.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::sim::Direction;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Restart,
    Quit,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "r" | "R" => Key::Restart,
            "Escape" => Key::Quit,
            _ => Key::Other,
        }
    }

    fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// What a key event asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move in a direction at full speed, replacing the current velocity
    Steer(Direction),
    /// Zero the horizontal velocity, keep vertical
    ReleaseHorizontal,
    /// Zero the vertical velocity, keep horizontal
    ReleaseVertical,
    Restart,
    Quit,
}

pub fn translate(event: KeyEvent) -> Option<Intent> {
    match event {
        KeyEvent::Pressed(Key::Restart) => Some(Intent::Restart),
        KeyEvent::Pressed(Key::Quit) => Some(Intent::Quit),
        KeyEvent::Pressed(key) => key.direction().map(Intent::Steer),
        KeyEvent::Released(Key::Left | Key::Right) => Some(Intent::ReleaseHorizontal),
        KeyEvent::Released(Key::Up | Key::Down) => Some(Intent::ReleaseVertical),
        KeyEvent::Released(_) => None,
    }
}

/// Scripted key source for unattended runs
///
/// Holds a random arrow key for a random number of frames, then releases
/// it and picks another. Restart is pressed once a run has ended.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    held: Option<Key>,
    frames_left: u32,
}

impl Autopilot {
    const ARROWS: [Key; 4] = [Key::Left, Key::Right, Key::Up, Key::Down];
    const MIN_HOLD: u32 = 10;
    const MAX_HOLD: u32 = 90;

    pub fn new() -> Self {
        Self::default()
    }

    /// Key events for this frame
    pub fn next_events(&mut self, playing: bool, rng: &mut impl Rng) -> Vec<KeyEvent> {
        if !playing {
            self.held = None;
            self.frames_left = 0;
            return vec![KeyEvent::Pressed(Key::Restart)];
        }

        if self.frames_left > 0 {
            self.frames_left -= 1;
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(key) = self.held.take() {
            events.push(KeyEvent::Released(key));
        }
        if let Some(&key) = Self::ARROWS.choose(rng) {
            events.push(KeyEvent::Pressed(key));
            self.held = Some(key);
        }
        self.frames_left = rng.random_range(Self::MIN_HOLD..=Self::MAX_HOLD);
        events
    }
}

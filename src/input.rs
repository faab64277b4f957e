use std::time::{Duration, Instant};

use crate::dir::Dir;

/// Which direction keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionInput {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl DirectionInput {
    pub const NONE: DirectionInput = DirectionInput {
        up: false,
        right: false,
        down: false,
        left: false,
    };

    pub fn only(dir: Dir) -> Self {
        let mut input = Self::NONE;
        input.set(dir, true);
        input
    }

    pub fn held(&self, dir: Dir) -> bool {
        match dir {
            Dir::Up => self.up,
            Dir::Right => self.right,
            Dir::Down => self.down,
            Dir::Left => self.left,
        }
    }

    pub fn set(&mut self, dir: Dir, held: bool) {
        match dir {
            Dir::Up => self.up = held,
            Dir::Right => self.right = held,
            Dir::Down => self.down = held,
            Dir::Left => self.left = held,
        }
    }

    pub fn any(&self) -> bool {
        Dir::ALL.iter().any(|d| self.held(*d))
    }
}

/// Terminals deliver key presses and repeats, not key state. A direction
/// counts as held until `hold` has passed since its last event.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    last_seen: [Option<Instant>; 4],
    hold: Duration,
}

impl HeldKeys {
    pub fn new(hold: Duration) -> Self {
        Self {
            last_seen: [None; 4],
            hold,
        }
    }

    pub fn press(&mut self, dir: Dir, now: Instant) {
        self.last_seen[dir.wall_index()] = Some(now);
    }

    pub fn release(&mut self, dir: Dir) {
        self.last_seen[dir.wall_index()] = None;
    }

    pub fn snapshot(&self, now: Instant) -> DirectionInput {
        let mut input = DirectionInput::NONE;
        for dir in Dir::ALL {
            if let Some(t) = self.last_seen[dir.wall_index()] {
                if now.duration_since(t) <= self.hold {
                    input.set(dir, true);
                }
            }
        }
        input
    }
}

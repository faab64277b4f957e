use crate::dir::{Dir, Pos};
use crate::grid::Grid;
use crate::input::DirectionInput;
use crate::random::RandomSource;

/// Opaque visual handle; the presentation layer decides what each looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub pos: Pos,
    pub sprite: Sprite,
}

impl Agent {
    pub fn new(pos: Pos, sprite: Sprite) -> Self {
        Self { pos, sprite }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player(pub Agent);

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self(Agent::new(pos, Sprite::Player))
    }

    pub fn pos(&self) -> Pos {
        self.0.pos
    }

    pub fn reset(&mut self) {
        self.0.pos = Pos::ORIGIN;
    }

    /// Applies every held direction in up, right, down, left order. Each
    /// check reads the walls of the cell the player is in at that moment, so
    /// holding two keys can move two cells in one frame.
    pub fn steer(&mut self, grid: &Grid, input: DirectionInput) -> bool {
        let start = self.0.pos;
        for dir in Dir::ALL {
            if !input.held(dir) || !grid.is_open(self.0.pos, dir) {
                continue;
            }
            if let Some(next) = self.0.pos.step(dir, grid.rows(), grid.cols()) {
                self.0.pos = next;
            }
        }
        self.0.pos != start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy(pub Agent);

impl Enemy {
    pub fn new(pos: Pos) -> Self {
        Self(Agent::new(pos, Sprite::Enemy))
    }

    /// Anywhere on the grid, overlaps allowed.
    pub fn spawn(grid: &Grid, rng: &mut impl RandomSource) -> Self {
        let row = rng.next_index(grid.rows());
        let col = rng.next_index(grid.cols());
        Self::new(Pos::new(row, col))
    }

    pub fn pos(&self) -> Pos {
        self.0.pos
    }

    /// One random-walk attempt. The drawn index doubles as the wall index.
    /// A blocked draw leaves the enemy in place for this frame.
    pub fn wander(&mut self, grid: &Grid, rng: &mut impl RandomSource) -> bool {
        let idx = rng.next_index(Dir::ALL.len());
        let dir = Dir::ALL[idx];
        let here = self.0.pos;
        match here.step(dir, grid.rows(), grid.cols()) {
            Some(next) if !grid.cell_at(here).walls[idx] => {
                self.0.pos = next;
                true
            }
            _ => false,
        }
    }
}

/// The character the player is trying to reach. Never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal(pub Agent);

impl Goal {
    pub fn new(pos: Pos) -> Self {
        Self(Agent::new(pos, Sprite::Goal))
    }

    pub fn pos(&self) -> Pos {
        self.0.pos
    }
}

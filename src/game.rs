//! One level session: grid, carver, agents and the penalty countdown.

use tracing::{debug, info};

use crate::agent::{Enemy, Goal, Player};
use crate::config::Config;
use crate::dir::Pos;
use crate::error::GameResult;
use crate::grid::Grid;
use crate::input::DirectionInput;
use crate::maze::{MazeGenerator, Phase};
use crate::random::RandomSource;

/// Something the presentation side should react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    MazeCompleted { steps: usize },
    /// Play the collision sound and pause the music.
    Collision { enemy: usize, at: Pos },
    MusicResumed,
    Won,
}

/// Music stays paused while this is active.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Penalty {
    active: bool,
    remaining: f32,
}

impl Penalty {
    pub fn arm(&mut self, secs: f32) {
        self.active = true;
        self.remaining = secs;
    }

    /// Returns true on the frame the countdown runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> Option<f32> {
        self.active.then_some(self.remaining)
    }
}

pub struct Game {
    grid: Grid,
    carver: MazeGenerator,
    player: Player,
    enemies: Vec<Enemy>,
    goal: Goal,
    won: bool,
    penalty: Penalty,
    penalty_secs: f32,
    collisions: u32,
}

impl Game {
    /// Builds the level: closed grid, carver at (0,0), player at the origin,
    /// goal fixed, enemies dropped on random cells.
    pub fn new(config: &Config, rng: &mut impl RandomSource) -> GameResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols);
        let enemies: Vec<Enemy> = (0..config.enemies)
            .map(|_| Enemy::spawn(&grid, rng))
            .collect();
        for (idx, enemy) in enemies.iter().enumerate() {
            debug!(enemy = idx, row = enemy.pos().row, col = enemy.pos().col, "enemy spawned");
        }
        let goal = Goal::new(config.goal());
        debug!(
            rows = config.rows,
            cols = config.cols,
            goal_row = goal.pos().row,
            goal_col = goal.pos().col,
            "level created"
        );
        Ok(Self {
            grid,
            carver: MazeGenerator::new(),
            player: Player::new(Pos::ORIGIN),
            enemies,
            goal,
            won: false,
            penalty: Penalty::default(),
            penalty_secs: config.penalty_secs,
            collisions: 0,
        })
    }

    /// One frame of game logic. While the maze is being carved only the
    /// carver moves; afterwards the player and enemies do.
    pub fn tick(
        &mut self,
        dt: f32,
        input: DirectionInput,
        rng: &mut impl RandomSource,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut hit = false;

        if self.carver.phase() == Phase::Generating {
            if self.carver.step(&mut self.grid, rng) == Phase::Done {
                events.push(GameEvent::MazeCompleted {
                    steps: self.carver.steps(),
                });
            }
        } else {
            self.move_player(input, &mut events);
            hit = self.move_enemies(rng, &mut events);
        }

        // The frame that armed the countdown does not count toward it.
        if !hit && self.penalty.tick(dt) {
            debug!("penalty over, music resumes");
            events.push(GameEvent::MusicResumed);
        }
        events
    }

    fn move_player(&mut self, input: DirectionInput, events: &mut Vec<GameEvent>) {
        self.player.steer(&self.grid, input);
        if !self.won && self.player.pos() == self.goal.pos() {
            self.won = true;
            info!(row = self.goal.pos().row, col = self.goal.pos().col, "goal reached");
            events.push(GameEvent::Won);
        }
    }

    fn move_enemies(&mut self, rng: &mut impl RandomSource, events: &mut Vec<GameEvent>) -> bool {
        let mut hit = false;
        for (idx, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.wander(&self.grid, rng);
            if enemy.pos() == self.player.pos() {
                let at = enemy.pos();
                self.player.reset();
                self.penalty.arm(self.penalty_secs);
                self.collisions += 1;
                hit = true;
                info!(enemy = idx, row = at.row, col = at.col, collisions = self.collisions, "caught by enemy");
                events.push(GameEvent::Collision { enemy: idx, at });
            }
        }
        hit
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.carver.phase()
    }

    pub fn carver(&self) -> &MazeGenerator {
        &self.carver
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn penalty(&self) -> &Penalty {
        &self.penalty
    }

    pub fn collisions(&self) -> u32 {
        self.collisions
    }
}

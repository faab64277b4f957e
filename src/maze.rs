//! Randomized depth-first maze carving, one step per call.

use tracing::info;

use crate::grid::Grid;
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generating,
    Done,
}

/// Cursor state of the carver. Works on a grid it does not own.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    current: usize,
    stack: Vec<usize>,
    phase: Phase,
    steps: usize,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeGenerator {
    /// Starts at cell (0,0).
    pub fn new() -> Self {
        Self {
            current: 0,
            stack: Vec::new(),
            phase: Phase::Generating,
            steps: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Advances the carver once. A step either carves one passage, backtracks
    /// to the nearest stacked cell that still has unvisited neighbors, or
    /// finishes.
    pub fn step(&mut self, grid: &mut Grid, rng: &mut impl RandomSource) -> Phase {
        if self.phase == Phase::Done || grid.is_empty() {
            self.phase = Phase::Done;
            return self.phase;
        }
        self.steps += 1;

        if grid.mark_visited(self.current) {
            self.stack.push(self.current);
        }

        let options = grid.unvisited_neighbors(self.current);
        if !options.is_empty() {
            let next = options[rng.next_index(options.len())];
            grid.carve(self.current, next);
            self.current = next;
            return self.phase;
        }

        // Dead end: drop exhausted cells until one with work left is on top.
        while let Some(&top) = self.stack.last() {
            if !grid.unvisited_neighbors(top).is_empty() {
                self.current = top;
                return self.phase;
            }
            self.stack.pop();
        }

        self.phase = Phase::Done;
        info!(
            steps = self.steps,
            rows = grid.rows(),
            cols = grid.cols(),
            "maze generation complete"
        );
        self.phase
    }

    /// Runs to completion and returns the number of steps taken.
    pub fn finish(&mut self, grid: &mut Grid, rng: &mut impl RandomSource) -> usize {
        while self.step(grid, rng) == Phase::Generating {}
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::{Dir, Pos};
    use crate::random::{RngSource, ScriptedSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_spanning_tree(grid: &Grid) {
        assert!(grid.cells().iter().all(|c| c.visited));
        assert_eq!(grid.open_passages(), grid.len() - 1);
        assert!(grid.reachable_from(Pos::ORIGIN).iter().all(|r| *r));
        assert!(grid.walls_consistent());
    }

    #[test]
    fn single_cell_finishes_on_first_step() {
        let mut grid = Grid::new(1, 1);
        let mut carver = MazeGenerator::new();
        let mut rng = ScriptedSource::default();
        assert_eq!(carver.step(&mut grid, &mut rng), Phase::Done);
        assert_eq!(carver.steps(), 1);
        assert_eq!(grid.open_passages(), 0);
        assert!(grid.cell(0).visited);
        assert_eq!(grid.cell(0).walls, [true; 4]);
    }

    #[test]
    fn two_rows_one_col_carves_one_pair() {
        let mut grid = Grid::new(2, 1);
        let mut carver = MazeGenerator::new();
        let mut rng = ScriptedSource::default();
        let steps = carver.finish(&mut grid, &mut rng);
        assert!(steps <= 2);
        assert_eq!(grid.open_passages(), 1);
        assert!(grid.is_open(Pos::new(0, 0), Dir::Down));
        assert!(grid.is_open(Pos::new(1, 0), Dir::Up));
        assert!(!grid.is_open(Pos::new(0, 0), Dir::Right));
        assert!(!grid.is_open(Pos::new(1, 0), Dir::Left));
    }

    #[test]
    fn spanning_tree_for_many_sizes() {
        for (rows, cols) in [(1, 1), (1, 5), (5, 1), (2, 2), (3, 7), (20, 36)] {
            for seed in 0..4 {
                let mut grid = Grid::new(rows, cols);
                let mut carver = MazeGenerator::new();
                let mut rng = RngSource(StdRng::seed_from_u64(seed));
                carver.finish(&mut grid, &mut rng);
                assert!(carver.is_done());
                assert!(carver.stack().is_empty());
                assert_spanning_tree(&grid);
            }
        }
    }

    #[test]
    fn walls_stay_symmetric_every_step() {
        let mut grid = Grid::new(6, 6);
        let mut carver = MazeGenerator::new();
        let mut rng = RngSource(StdRng::seed_from_u64(3));
        while carver.step(&mut grid, &mut rng) == Phase::Generating {
            assert!(grid.walls_consistent());
        }
        assert_spanning_tree(&grid);
    }

    #[test]
    fn scripted_choices_give_exact_maze() {
        // 2x2, always taking the first unvisited neighbor: (0,0) -> right
        // (0,1) -> down (1,1) -> left (1,0).
        let mut grid = Grid::new(2, 2);
        let mut carver = MazeGenerator::new();
        let mut rng = ScriptedSource::new([0, 0, 0]);
        carver.finish(&mut grid, &mut rng);
        assert!(grid.is_open(Pos::new(0, 0), Dir::Right));
        assert!(grid.is_open(Pos::new(0, 1), Dir::Down));
        assert!(grid.is_open(Pos::new(1, 1), Dir::Left));
        assert!(!grid.is_open(Pos::new(0, 0), Dir::Down));
        assert_spanning_tree(&grid);
    }

    #[test]
    fn same_seed_same_maze() {
        let build = |seed| {
            let mut grid = Grid::new(8, 8);
            let mut rng = RngSource(StdRng::seed_from_u64(seed));
            MazeGenerator::new().finish(&mut grid, &mut rng);
            grid.cells().iter().map(|c| c.walls).collect::<Vec<_>>()
        };
        assert_eq!(build(11), build(11));
    }

    #[test]
    fn stack_never_holds_a_cell_twice() {
        let mut grid = Grid::new(4, 5);
        let mut carver = MazeGenerator::new();
        let mut rng = RngSource(StdRng::seed_from_u64(5));
        while carver.step(&mut grid, &mut rng) == Phase::Generating {
            let mut seen = carver.stack().to_vec();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), carver.stack().len());
            assert!(carver.stack().iter().all(|idx| grid.cell(*idx).visited));
        }
    }

    #[test]
    fn step_after_done_is_noop() {
        let mut grid = Grid::new(2, 3);
        let mut carver = MazeGenerator::new();
        let mut rng = RngSource(StdRng::seed_from_u64(1));
        let steps = carver.finish(&mut grid, &mut rng);
        let walls: Vec<_> = grid.cells().iter().map(|c| c.walls).collect();
        assert_eq!(carver.step(&mut grid, &mut rng), Phase::Done);
        assert_eq!(carver.steps(), steps);
        assert_eq!(walls, grid.cells().iter().map(|c| c.walls).collect::<Vec<_>>());
    }
}

use crate::dir::{Dir, Pos};

/// One maze cell. Walls are indexed top, right, bottom, left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub visited: bool,
    pub walls: [bool; 4],
    /// Flat indices of the in-bounds orthogonal neighbors.
    pub neighbors: Vec<usize>,
}

impl Cell {
    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }

    pub fn has_wall(&self, dir: Dir) -> bool {
        self.walls[dir.wall_index()]
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a `rows` x `cols` lattice with every wall closed.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let here = Pos::new(row, col);
                let neighbors = Dir::ALL
                    .iter()
                    .filter_map(|dir| here.step(*dir, rows, cols))
                    .map(|p| p.row * cols + p.col)
                    .collect();
                cells.push(Cell {
                    row,
                    col,
                    visited: false,
                    walls: [true; 4],
                    neighbors,
                });
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub fn cell_at(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when the wall on the `dir` side of `pos` has been carved away.
    pub fn is_open(&self, pos: Pos, dir: Dir) -> bool {
        !self.cell_at(pos).has_wall(dir)
    }

    pub fn mark_visited(&mut self, idx: usize) -> bool {
        let cell = &mut self.cells[idx];
        let fresh = !cell.visited;
        cell.visited = true;
        fresh
    }

    pub fn unvisited_neighbors(&self, idx: usize) -> Vec<usize> {
        self.cells[idx]
            .neighbors
            .iter()
            .copied()
            .filter(|n| !self.cells[*n].visited)
            .collect()
    }

    /// Opens the wall pair between two adjacent cells. Returns the direction
    /// carved from `a`, or `None` if the cells are not adjacent.
    pub fn carve(&mut self, a: usize, b: usize) -> Option<Dir> {
        let dir = Dir::between(self.cells[a].pos(), self.cells[b].pos())?;
        self.cells[a].walls[dir.wall_index()] = false;
        self.cells[b].walls[dir.opposite().wall_index()] = false;
        Some(dir)
    }

    /// Number of carved wall pairs. Only right and bottom walls are counted
    /// so each passage is seen once.
    pub fn open_passages(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                let right = c.col + 1 < self.cols && !c.has_wall(Dir::Right);
                let down = c.row + 1 < self.rows && !c.has_wall(Dir::Down);
                right as usize + down as usize
            })
            .sum()
    }

    /// Cells reachable from `start` through carved passages.
    pub fn reachable_from(&self, start: Pos) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.contains(start) {
            return seen;
        }
        let mut stack = vec![self.index(start)];
        seen[self.index(start)] = true;
        while let Some(idx) = stack.pop() {
            let here = self.cells[idx].pos();
            for dir in Dir::ALL {
                if !self.is_open(here, dir) {
                    continue;
                }
                if let Some(next) = here.step(dir, self.rows, self.cols) {
                    let n = self.index(next);
                    if !seen[n] {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
        }
        seen
    }

    /// Every adjacent pair agrees on the wall between them.
    pub fn walls_consistent(&self) -> bool {
        self.cells.iter().all(|c| {
            let here = c.pos();
            Dir::ALL.iter().all(|dir| match here.step(*dir, self.rows, self.cols) {
                Some(next) => c.has_wall(*dir) == self.cell_at(next).has_wall(dir.opposite()),
                None => c.has_wall(*dir),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_bounds_checked() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.cell_at(Pos::new(0, 0)).neighbors, vec![1, 4]);
        assert_eq!(grid.cell_at(Pos::new(1, 1)).neighbors, vec![1, 6, 9, 4]);
        assert_eq!(grid.cell_at(Pos::new(2, 3)).neighbors, vec![7, 10]);
        assert!(grid.cells().iter().all(|c| c.walls == [true; 4] && !c.visited));
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let grid = Grid::new(1, 1);
        assert!(grid.cell(0).neighbors.is_empty());
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn carve_opens_both_sides() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.carve(0, 1), Some(Dir::Right));
        assert!(grid.is_open(Pos::new(0, 0), Dir::Right));
        assert!(grid.is_open(Pos::new(0, 1), Dir::Left));

        assert_eq!(grid.carve(3, 1), Some(Dir::Up));
        assert!(grid.is_open(Pos::new(1, 1), Dir::Up));
        assert!(grid.is_open(Pos::new(0, 1), Dir::Down));

        assert_eq!(grid.open_passages(), 2);
        assert!(grid.walls_consistent());
    }

    #[test]
    fn carve_rejects_non_adjacent() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.carve(0, 3), None);
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn reachability_follows_passages() {
        let mut grid = Grid::new(1, 3);
        grid.carve(0, 1);
        let seen = grid.reachable_from(Pos::ORIGIN);
        assert_eq!(seen, vec![true, true, false]);
    }
}

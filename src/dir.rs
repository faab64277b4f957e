/// A cell coordinate on the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring coordinate in `dir`, or `None` when it would leave a
    /// `rows` x `cols` grid.
    pub fn step(self, dir: Dir, rows: usize, cols: usize) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let nr = self.row as isize + dr;
        let nc = self.col as isize + dc;
        if nr < 0 || nc < 0 {
            return None;
        }
        let (nr, nc) = (nr as usize, nc as usize);
        if nr >= rows || nc >= cols {
            return None;
        }
        Some(Pos { row: nr, col: nc })
    }
}

/// The four movement directions. The discriminant order is also the order
/// of a cell's wall array (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    /// `(row, col)` offset of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    pub fn wall_index(self) -> usize {
        match self {
            Dir::Up => 0,
            Dir::Right => 1,
            Dir::Down => 2,
            Dir::Left => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Dir> {
        Dir::ALL.get(idx).copied()
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    /// Direction leading from `from` to an orthogonally adjacent `to`.
    pub fn between(from: Pos, to: Pos) -> Option<Dir> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        Dir::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }
}

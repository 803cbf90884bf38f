//! Falling pair: head + satellite, orientation, movement and rotation rules.

use crate::grid::{Grid, PuyoColor};
use rand::Rng;

/// Satellite position relative to the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// One step in the fixed rotation cycle Up → Right → Down → Left → Up.
    pub fn next(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// (dcol, drow) offset of the satellite from the head.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// One falling cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: PuyoColor,
    pub col: usize,
    pub row: usize,
}

/// The player-controlled two-cell unit.
///
/// Invariant while falling: the two cells never overlap and never sit on an
/// occupied grid cell. The satellite's position always equals head +
/// `orientation.offset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub head: Piece,
    pub satellite: Piece,
    pub orientation: Orientation,
}

impl Pair {
    /// New pair at the spawn position: head on row 0 of the middle column,
    /// satellite directly below it (orientation Down). Colours are drawn
    /// independently and uniformly from the palette. Collision with existing
    /// cells is the controller's job, not spawn's.
    pub fn spawn<R: Rng>(cols: usize, rng: &mut R) -> Self {
        let col = cols / 2;
        Self::at(random_color(rng), random_color(rng), col)
    }

    /// Pair with given colours at the spawn rows of `col`, orientation Down.
    pub fn at(head_color: PuyoColor, satellite_color: PuyoColor, col: usize) -> Self {
        Self {
            head: Piece {
                color: head_color,
                col,
                row: 0,
            },
            satellite: Piece {
                color: satellite_color,
                col,
                row: 1,
            },
            orientation: Orientation::Down,
        }
    }

    pub fn cells(&self) -> [Piece; 2] {
        [self.head, self.satellite]
    }

    /// Rotate one step in the fixed cycle. The candidate satellite cell is
    /// head + new offset; the rotation is applied iff that cell is in bounds
    /// and empty. On failure the pair is left entirely unchanged (no wall
    /// kick, no alternate offset). Returns whether it succeeded.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let orientation = self.orientation.next();
        let (dc, dr) = orientation.offset();
        let col = self.head.col as i32 + dc;
        let row = self.head.row as i32 + dr;
        if !cell_free(grid, col, row) {
            return false;
        }
        self.satellite.col = col as usize;
        self.satellite.row = row as usize;
        self.orientation = orientation;
        true
    }

    /// Shift the whole pair one column sideways. Both cells move or neither.
    pub fn try_shift(&mut self, grid: &Grid, dx: i32) -> bool {
        self.try_move(grid, dx, 0)
    }

    /// Descend the whole pair one row. Both cells move or neither.
    pub fn try_fall(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, 0, 1)
    }

    fn try_move(&mut self, grid: &Grid, dc: i32, dr: i32) -> bool {
        // The pair is not in the grid while falling, so a cell vacated by the
        // other half reads as empty, which is what atomic movement wants.
        for p in self.cells() {
            if !cell_free(grid, p.col as i32 + dc, p.row as i32 + dr) {
                return false;
            }
        }
        self.head.col = (self.head.col as i32 + dc) as usize;
        self.head.row = (self.head.row as i32 + dr) as usize;
        self.satellite.col = (self.satellite.col as i32 + dc) as usize;
        self.satellite.row = (self.satellite.row as i32 + dr) as usize;
        true
    }
}

fn random_color<R: Rng>(rng: &mut R) -> PuyoColor {
    PuyoColor::ALL[rng.gen_range(0..PuyoColor::ALL.len())]
}

fn cell_free(grid: &Grid, col: i32, row: i32) -> bool {
    col >= 0 && row >= 0 && grid.is_empty(col as usize, row as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::COLS;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_position_and_orientation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let pair = Pair::spawn(COLS, &mut rng);
        assert_eq!(pair.head.col, COLS / 2);
        assert_eq!(pair.head.row, 0);
        assert_eq!(pair.satellite.col, COLS / 2);
        assert_eq!(pair.satellite.row, 1);
        assert_eq!(pair.orientation, Orientation::Down);
    }

    #[test]
    fn test_rotation_cycle() {
        assert_eq!(Orientation::Up.next(), Orientation::Right);
        assert_eq!(Orientation::Right.next(), Orientation::Down);
        assert_eq!(Orientation::Down.next(), Orientation::Left);
        assert_eq!(Orientation::Left.next(), Orientation::Up);
    }

    #[test]
    fn test_rotate_from_down_moves_satellite_left() {
        let grid = Grid::default();
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 2);
        pair.head.row = 2;
        pair.satellite.row = 3;
        assert!(pair.try_rotate(&grid));
        assert_eq!(pair.orientation, Orientation::Left);
        assert_eq!((pair.satellite.col, pair.satellite.row), (1, 2));
    }

    #[test]
    fn test_rotate_blocked_leaves_pair_unchanged() {
        let mut grid = Grid::default();
        // Down -> Left: candidate is (1, 2); block it.
        grid.occupy(1, 2, PuyoColor::Green);
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 2);
        pair.head.row = 2;
        pair.satellite.row = 3;
        let before = pair;
        assert!(!pair.try_rotate(&grid));
        assert_eq!(pair, before);
    }

    #[test]
    fn test_rotate_against_wall_fails() {
        let grid = Grid::default();
        // Head on column 0; Down -> Left candidate is off the left edge.
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 0);
        let before = pair;
        assert!(!pair.try_rotate(&grid));
        assert_eq!(pair, before);
    }

    #[test]
    fn test_shift_moves_both_cells() {
        let grid = Grid::default();
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 3);
        assert!(pair.try_shift(&grid, -1));
        assert_eq!(pair.head.col, 2);
        assert_eq!(pair.satellite.col, 2);
    }

    #[test]
    fn test_shift_blocked_by_one_cell_moves_neither() {
        let mut grid = Grid::default();
        // Only the satellite's destination is occupied.
        grid.occupy(2, 1, PuyoColor::Green);
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 3);
        let before = pair;
        assert!(!pair.try_shift(&grid, -1));
        assert_eq!(pair, before);
    }

    #[test]
    fn test_shift_into_wall_fails() {
        let grid = Grid::default();
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 0);
        assert!(!pair.try_shift(&grid, -1));
        assert_eq!(pair.head.col, 0);
    }

    #[test]
    fn test_horizontal_pair_shifts_through_its_own_cell() {
        let grid = Grid::default();
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 2);
        pair.head.row = 5;
        pair.satellite.row = 5;
        pair.satellite.col = 3;
        pair.orientation = Orientation::Right;
        // Head moves into the satellite's old column; legal because the pair
        // is not part of the grid.
        assert!(pair.try_shift(&grid, 1));
        assert_eq!((pair.head.col, pair.satellite.col), (3, 4));
    }

    #[test]
    fn test_fall_stops_at_floor() {
        let grid = Grid::default();
        let mut pair = Pair::at(PuyoColor::Red, PuyoColor::Blue, 2);
        pair.head.row = grid.rows() - 2;
        pair.satellite.row = grid.rows() - 1;
        let before = pair;
        assert!(!pair.try_fall(&grid));
        assert_eq!(pair, before);
    }
}

//! Playfield grid: value-type cells, occupancy queries and mutation.

/// Default playfield width in columns.
pub const COLS: usize = 6;
/// Default playfield height in rows. Row 0 is the spawn row, row `ROWS - 1` the floor.
pub const ROWS: usize = 12;

/// Puyo colours; fixed palette of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuyoColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl PuyoColor {
    pub const ALL: [Self; 5] = [Self::Red, Self::Green, Self::Blue, Self::Yellow, Self::Purple];

    /// Palette index for theme lookup.
    pub fn index(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Yellow => 3,
            Self::Purple => 4,
        }
    }
}

/// Single cell: empty or one puyo of a given colour. No identity beyond colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Puyo(PuyoColor),
}

/// Rectangular grid of cells, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols * rows],
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn idx(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Cell at (col, row), or `None` out of bounds.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[self.idx(col, row)])
    }

    /// True iff (col, row) is in bounds and empty. Out-of-bounds counts as
    /// blocked, so movement legality checks can call this directly.
    #[inline]
    pub fn is_empty(&self, col: usize, row: usize) -> bool {
        matches!(self.get(col, row), Some(Cell::Empty))
    }

    /// Colour at (col, row); `None` when empty or out of bounds.
    #[inline]
    pub fn color_at(&self, col: usize, row: usize) -> Option<PuyoColor> {
        match self.get(col, row) {
            Some(Cell::Puyo(color)) => Some(color),
            _ => None,
        }
    }

    /// Write a colour into the target cell. Out-of-bounds writes are ignored.
    pub fn occupy(&mut self, col: usize, row: usize, color: PuyoColor) {
        if col < self.cols && row < self.rows {
            let i = self.idx(col, row);
            self.cells[i] = Cell::Puyo(color);
        }
    }

    /// Empty the target cell. Out-of-bounds writes are ignored.
    pub fn clear(&mut self, col: usize, row: usize) {
        if col < self.cols && row < self.rows {
            let i = self.idx(col, row);
            self.cells[i] = Cell::Empty;
        }
    }

    /// All occupied cells as (col, row, colour), row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, PuyoColor)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| match cell {
            Cell::Puyo(color) => Some((i % self.cols, i / self.cols, *color)),
            Cell::Empty => None,
        })
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| matches!(c, Cell::Puyo(_))).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(COLS, ROWS)
    }
}

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// Persisted value: 1 for player one, -1 for player two, 0 for empty.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => -1,
        }
    }

    pub fn from_value(value: i8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::One),
            -1 => Some(Cell::Two),
            _ => None,
        }
    }
}

/// Fixed-size grid stored row-major. Row 0 is the top, the last row is the
/// bottom where tokens land first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i8>>", into = "Vec<Vec<i8>>")]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `(row, col)` lies on the board. Takes signed coordinates so
    /// directional walks can step past the edge.
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.filled_count() == self.rows * self.cols
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// First filled cell resting on an empty one, scanning each column from
    /// the bottom up. `None` when every column obeys gravity.
    pub fn floating_cell(&self) -> Option<(usize, usize)> {
        (0..self.cols).find_map(|col| {
            let mut gap = false;
            for row in (0..self.rows).rev() {
                match self.get(row, col) {
                    Cell::Empty => gap = true,
                    _ if gap => return Some((row, col)),
                    _ => {}
                }
            }
            None
        })
    }

    /// Iterate over rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl From<Board> for Vec<Vec<i8>> {
    fn from(board: Board) -> Self {
        board
            .iter_rows()
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<i8>>> for Board {
    type Error = SnapshotError;

    fn try_from(grid: Vec<Vec<i8>>) -> Result<Self, Self::Error> {
        let rows = grid.len();
        let cols = grid.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(SnapshotError::EmptyBoard);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, values) in grid.into_iter().enumerate() {
            if values.len() != cols {
                return Err(SnapshotError::RaggedBoard {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for value in values {
                cells.push(Cell::from_value(value).ok_or(SnapshotError::InvalidCell(value))?);
            }
        }

        Ok(Board { rows, cols, cells })
    }
}

use std::{fmt, iter};

use serde::{Deserialize, Serialize};

/// State of a single board cell.
///
/// The settled grid only ever stores [`Cell::Empty`] and [`Cell::Settled`];
/// [`Cell::Filled`] appears in rendered snapshots, where it marks cells
/// covered by the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
    Settled,
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_settled(self) -> bool {
        self == Cell::Settled
    }

    const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled => '@',
            Cell::Settled => '#',
        }
    }
}

/// A single row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width],
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether every cell of the row is settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|c| c.is_settled())
    }
}

/// Fixed-size matrix of cells, addressed as `(x, y)` with `(0, 0)` at the
/// top-left.
///
/// The dimensions never change: [`Grid::remove_rows`] refills the top with
/// empty rows so the row count is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Row>,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: iter::repeat_n(Row::empty(width), height).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.cells.get(x).copied()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].cells[x] = cell;
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.cells.iter().all(|c| c.is_empty()))
    }

    /// Indices of fully settled rows, top to bottom.
    #[must_use]
    pub fn settled_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(y, row)| row.is_settled().then_some(y))
            .collect()
    }

    /// Removes the rows at `indices` and pushes empty rows in at the top.
    ///
    /// Indices refer to the grid before removal. Duplicate or out-of-range
    /// indices are ignored. Returns the number of rows removed.
    pub fn remove_rows(&mut self, indices: &[usize]) -> usize {
        if indices.is_empty() {
            return 0;
        }
        let mut y = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&y);
            y += 1;
            keep
        });
        let removed = self.height - self.rows.len();
        self.rows
            .splice(0..0, iter::repeat_n(Row::empty(self.width), removed));
        removed
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in &row.cells {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Grid rooms
//!
//! A grid is an immutable rectangle of [`Cell`]s. Column 0 holds the
//! entrances and the last column holds the exits, one of each per row.
//! Identity is a [`GridId`] handed out at construction and kept by
//! `clone()`, so a copied grid stays interchangeable with its source.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{
    DungeonError, DungeonResult, EMPTY_AREA, MISSING_DUNGEON, RAGGED_AREA, ROW_MISMATCH_COMPARE,
};

use super::Cell;

static NEXT_GRID_ID: AtomicUsize = AtomicUsize::new(1);

/// Opaque identity token of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(usize);

impl GridId {
    fn fresh() -> Self {
        Self(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid#{}", self.0)
    }
}

/// Rectangular room of ground and air cells
///
/// Equality and hashing use the identity token only.
#[derive(Clone)]
pub struct Grid {
    id: GridId,
    /// Row-major cell storage
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Build a grid from rows of cells, copying them in.
    ///
    /// Fails with [`DungeonError::InvalidInput`] when there are no rows, the
    /// first row is empty, or the rows differ in length.
    pub fn new<R: AsRef<[Cell]>>(rows: &[R]) -> DungeonResult<Self> {
        let first = rows.first().ok_or(DungeonError::InvalidInput(EMPTY_AREA))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(DungeonError::InvalidInput(EMPTY_AREA));
        }
        if rows.iter().any(|row| row.as_ref().len() != cols) {
            return Err(DungeonError::InvalidInput(RAGGED_AREA));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            cells.extend_from_slice(row.as_ref());
        }

        Ok(Self {
            id: GridId::fresh(),
            cells,
            rows: rows.len(),
            cols,
        })
    }

    /// Identity token shared by this grid and all of its clones
    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col), if in bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Copy the content out as owned rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }

    /// Entrance cell of a row (column 0)
    pub fn entrance_at(&self, row: usize) -> Option<Cell> {
        self.cell(row, 0)
    }

    /// Exit cell of a row (last column)
    pub fn exit_at(&self, row: usize) -> Option<Cell> {
        self.cell(row, self.cols - 1)
    }

    /// Row indices whose entrance is open
    pub fn open_entrances(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter(move |&r| self.is_entrance_free_at(r))
    }

    /// Row indices whose exit is open
    pub fn open_exits(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter(move |&r| self.is_exit_free_at(r))
    }

    /// A grid is passable when some entrance and some exit are open.
    /// The two rows need not be the same.
    pub fn is_passable(&self) -> bool {
        self.open_entrances().next().is_some() && self.open_exits().next().is_some()
    }

    /// Check whether `other` can follow this grid in a chain.
    ///
    /// True when some row has this grid's exit and `other`'s entrance both
    /// open. The relation is directional. Fails with
    /// [`DungeonError::ShapeMismatch`] if the row counts differ.
    pub fn is_compatible_with(&self, other: &Grid) -> DungeonResult<bool> {
        if other.rows != self.rows {
            return Err(DungeonError::ShapeMismatch {
                message: ROW_MISMATCH_COMPARE,
                expected: self.rows,
                found: other.rows,
            });
        }
        Ok((0..self.rows).any(|r| self.is_exit_free_at(r) && other.is_entrance_free_at(r)))
    }

    /// Same as [`Grid::is_compatible_with`] for callers holding an optional
    /// neighbour; `None` is [`DungeonError::InvalidInput`].
    pub fn is_compatible_with_opt(&self, other: Option<&Grid>) -> DungeonResult<bool> {
        let other = other.ok_or(DungeonError::InvalidInput(MISSING_DUNGEON))?;
        self.is_compatible_with(other)
    }

    fn is_entrance_free_at(&self, row: usize) -> bool {
        self.cells[row * self.cols].is_open()
    }

    fn is_exit_free_at(&self, row: usize) -> bool {
        self.cells[row * self.cols + self.cols - 1].is_open()
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Grid {}

impl Hash for Grid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

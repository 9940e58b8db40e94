//! Grid cell types

use strum::{Display, EnumIter};

/// Cell/terrain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Ground = 0,
    Air = 1,
}

impl Cell {
    /// Check if a walker can pass through this cell
    pub const fn is_open(&self) -> bool {
        matches!(self, Cell::Air)
    }
}

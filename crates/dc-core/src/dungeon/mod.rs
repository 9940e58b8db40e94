//! Dungeon system
//!
//! Contains grid rooms, their cells, the compatibility pool and the
//! sequence search over it.

mod cell;
mod grid;
mod pool;
mod search;

pub use cell::Cell;
pub use grid::{Grid, GridId};
pub use pool::DungeonPool;
pub use search::{SearchLimits, SearchOrder};

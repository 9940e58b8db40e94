//! Errors raised while building grids, pooling them, or searching for sequences

use thiserror::Error;

/// Result alias used across the crate
pub type DungeonResult<T> = Result<T, DungeonError>;

/// Everything that can go wrong with grids and pools
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DungeonError {
    /// Absent or malformed construction argument
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Grids compared or pooled together have different row counts
    #[error("{message} (expected {expected} rows, found {found})")]
    ShapeMismatch {
        message: &'static str,
        expected: usize,
        found: usize,
    },

    /// A pooled grid has no open entrance or no open exit
    #[error("Dungeon list contains non-passable dungeon (index {index})")]
    NonPassable { index: usize },

    /// No simple path of the requested length exists
    #[error("{message} (requested {requested}, pool holds {available})")]
    SearchInfeasible {
        message: &'static str,
        requested: usize,
        available: usize,
    },

    /// The search stopped on its budget or cancellation flag
    #[error("Sequence search aborted after {expansions} expansions")]
    SearchAborted { expansions: u64 },
}

pub(crate) const EMPTY_AREA: &str = "Area must have at least one element.";
pub(crate) const RAGGED_AREA: &str = "Area must be a rectangle.";
pub(crate) const MISSING_DUNGEON: &str = "Compatible dungeon must not be absent.";
pub(crate) const EMPTY_POOL: &str = "Dungeons list must have at least one element.";
pub(crate) const MISSING_POOL_ENTRY: &str = "Dungeons list contains absent dungeon.";
pub(crate) const DUPLICATE_POOL_ENTRY: &str = "Dungeons list contains duplicate dungeon.";
pub(crate) const ROW_MISMATCH_COMPARE: &str =
    "Compatible dungeon must have the same amount of rows.";
pub(crate) const ROW_MISMATCH_POOL: &str =
    "Dungeons must have same number of rows to be compatible.";
pub(crate) const LENGTH_EXCEEDS_POOL: &str =
    "Expected sequence length is greater than number of available dungeons.";
pub(crate) const NO_SEQUENCE: &str =
    "It is not possible to build dungeon sequence with provided length.";

impl DungeonError {
    /// True for the two search failure kinds
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            DungeonError::SearchInfeasible { .. } | DungeonError::SearchAborted { .. }
        )
    }
}

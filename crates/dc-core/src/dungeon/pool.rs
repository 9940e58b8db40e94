//! Dungeon pool: validated grids plus their compatibility graph
//!
//! The graph is built once, when the pool is created. Every call to
//! [`DungeonPool::create_x_sequence`] shuffles a private copy of it, so the
//! pool itself is never mutated by a search and can be shared freely.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use hashbrown::HashSet;

use crate::error::{
    DUPLICATE_POOL_ENTRY, DungeonError, DungeonResult, EMPTY_POOL, LENGTH_EXCEEDS_POOL,
    MISSING_POOL_ENTRY, NO_SEQUENCE, ROW_MISMATCH_POOL,
};
use crate::rng::DungeonRng;

use super::Grid;
use super::search::{SearchLimits, SearchOrder, SearchOutcome, find_simple_path};

/// A set of equally tall, passable grids and the directed "can follow" graph
/// between them
#[derive(Debug, Clone)]
pub struct DungeonPool {
    /// Pool-owned copies, identity preserved
    grids: Vec<Grid>,
    /// adjacency[i] lists every j with grids[i] compatible with grids[j], i != j
    adjacency: Vec<Vec<usize>>,
    row_count: usize,
}

impl DungeonPool {
    /// Validate `grids`, copy them and build the compatibility graph.
    ///
    /// Checks run in this order: non-empty list, every grid passable, all row
    /// counts equal, no identity pooled twice.
    pub fn new(grids: &[Grid]) -> DungeonResult<Self> {
        if grids.is_empty() {
            return Err(DungeonError::InvalidInput(EMPTY_POOL));
        }
        for (index, grid) in grids.iter().enumerate() {
            if !grid.is_passable() {
                return Err(DungeonError::NonPassable { index });
            }
        }
        Self::from_validated(grids.to_vec())
    }

    /// Like [`DungeonPool::new`], for callers whose list may have holes.
    /// A `None` slot is [`DungeonError::InvalidInput`].
    pub fn from_slots(slots: &[Option<Grid>]) -> DungeonResult<Self> {
        if slots.is_empty() {
            return Err(DungeonError::InvalidInput(EMPTY_POOL));
        }
        let mut grids = Vec::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            let grid = slot
                .as_ref()
                .ok_or(DungeonError::InvalidInput(MISSING_POOL_ENTRY))?;
            if !grid.is_passable() {
                return Err(DungeonError::NonPassable { index });
            }
            grids.push(grid.clone());
        }
        Self::from_validated(grids)
    }

    fn from_validated(grids: Vec<Grid>) -> DungeonResult<Self> {
        let row_count = grids[0].row_count();
        if let Some(other) = grids.iter().find(|g| g.row_count() != row_count) {
            return Err(DungeonError::ShapeMismatch {
                message: ROW_MISMATCH_POOL,
                expected: row_count,
                found: other.row_count(),
            });
        }

        let mut ids = HashSet::with_capacity(grids.len());
        if !grids.iter().all(|g| ids.insert(g.id())) {
            return Err(DungeonError::InvalidInput(DUPLICATE_POOL_ENTRY));
        }

        let adjacency = build_compatibility_graph(&grids)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            grids = grids.len(),
            edges = adjacency.iter().map(Vec::len).sum::<usize>(),
            row_count,
            "built dungeon pool"
        );

        Ok(Self {
            grids,
            adjacency,
            row_count,
        })
    }

    /// Number of pooled grids
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Always false for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Row count shared by every pooled grid
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Pooled grids in insertion order
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Number of directed edges in the compatibility graph
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, grid: &Grid) -> bool {
        self.index_of(grid).is_some()
    }

    /// Grids that may directly follow `grid`, or `None` if it is not pooled
    pub fn successors(&self, grid: &Grid) -> Option<Vec<&Grid>> {
        let index = self.index_of(grid)?;
        Some(self.adjacency[index].iter().map(|&j| &self.grids[j]).collect())
    }

    /// Check that `sequence` is a chain this pool could have produced: pooled
    /// grids, no repeats, each one compatible with the next.
    pub fn is_valid_sequence(&self, sequence: &[Grid]) -> bool {
        let mut seen = HashSet::with_capacity(sequence.len());
        let mut indices = Vec::with_capacity(sequence.len());
        for grid in sequence {
            match self.index_of(grid) {
                Some(index) if seen.insert(index) => indices.push(index),
                _ => return false,
            }
        }
        indices
            .windows(2)
            .all(|pair| self.adjacency[pair[0]].contains(&pair[1]))
    }

    /// Fresh shuffled copy of the node order and adjacency lists
    pub fn shuffled_order(&self, rng: &mut DungeonRng) -> SearchOrder {
        SearchOrder::shuffled(&self.adjacency, rng)
    }

    /// Find `length` distinct grids where each is compatible with the next.
    ///
    /// `length == 0` returns an empty chain without touching `rng`. A length
    /// above [`DungeonPool::len`] fails straight away with
    /// [`DungeonError::SearchInfeasible`]. Otherwise the first chain found
    /// under a random order is returned; it is not necessarily the only one.
    pub fn create_x_sequence(
        &self,
        length: usize,
        rng: &mut DungeonRng,
    ) -> DungeonResult<Vec<Grid>> {
        self.create_x_sequence_with(length, rng, &SearchLimits::unlimited())
    }

    /// [`DungeonPool::create_x_sequence`] with a budget or cancellation flag.
    /// Tripping either fails with [`DungeonError::SearchAborted`].
    pub fn create_x_sequence_with(
        &self,
        length: usize,
        rng: &mut DungeonRng,
        limits: &SearchLimits,
    ) -> DungeonResult<Vec<Grid>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        if length > self.grids.len() {
            return Err(DungeonError::SearchInfeasible {
                message: LENGTH_EXCEEDS_POOL,
                requested: length,
                available: self.grids.len(),
            });
        }

        let order = self.shuffled_order(rng);
        let outcome = find_simple_path(&order, length, limits);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            length,
            outcome = outcome.label(),
            expansions = outcome.expansions(),
            "dungeon sequence search finished"
        );

        match outcome {
            SearchOutcome::Found { path, .. } => {
                Ok(path.into_iter().map(|i| self.grids[i].clone()).collect())
            }
            SearchOutcome::Exhausted { .. } => Err(DungeonError::SearchInfeasible {
                message: NO_SEQUENCE,
                requested: length,
                available: self.grids.len(),
            }),
            SearchOutcome::Aborted { expansions } => {
                Err(DungeonError::SearchAborted { expansions })
            }
        }
    }

    fn index_of(&self, grid: &Grid) -> Option<usize> {
        self.grids.iter().position(|g| g == grid)
    }
}

/// Edge i -> j for every ordered pair with i != j and grids[i] compatible
/// with grids[j]. Identities are unique by now, so i != j means distinct grids.
fn build_compatibility_graph(grids: &[Grid]) -> DungeonResult<Vec<Vec<usize>>> {
    let mut adjacency = Vec::with_capacity(grids.len());
    for from in grids {
        let mut successors = Vec::new();
        for (j, to) in grids.iter().enumerate() {
            if from != to && from.is_compatible_with(to)? {
                successors.push(j);
            }
        }
        adjacency.push(successors);
    }
    Ok(adjacency)
}

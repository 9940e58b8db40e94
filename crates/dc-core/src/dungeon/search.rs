//! Simple-path search over the compatibility graph
//!
//! Each call works on its own [`SearchOrder`]: a shuffled copy of the start
//! nodes and of every adjacency list. The search is an iterative
//! backtracking DFS over an explicit stack of (path, used set) entries, so
//! stack depth stays flat and the limits can be checked between pops.

#[cfg(not(feature = "std"))]
use crate::compat::*;

#[cfg(feature = "std")]
use std::sync::Arc;

use core::sync::atomic::{AtomicBool, Ordering};

use hashbrown::HashSet;

use crate::rng::DungeonRng;

/// Caller-imposed bounds on one search call
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Maximum number of stack pops before giving up
    pub max_expansions: Option<u64>,
    /// Set to true from elsewhere to stop the search at the next pop
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No budget and no cancellation flag
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn should_stop(&self, expansions: u64) -> bool {
        if self.max_expansions.is_some_and(|max| expansions >= max) {
            return true;
        }
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Per-call shuffled snapshot of the compatibility graph
///
/// Node numbers are indices into [`DungeonPool::grids`](super::DungeonPool::grids).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOrder {
    starts: Vec<usize>,
    adjacency: Vec<Vec<usize>>,
}

impl SearchOrder {
    /// Shuffle the node order, then each adjacency list independently.
    pub(crate) fn shuffled(adjacency: &[Vec<usize>], rng: &mut DungeonRng) -> Self {
        let mut starts: Vec<usize> = (0..adjacency.len()).collect();
        rng.shuffle(&mut starts);

        let mut adjacency = adjacency.to_vec();
        for successors in &mut adjacency {
            rng.shuffle(successors);
        }

        Self { starts, adjacency }
    }

    /// Start nodes in the order they will be tried
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Successors of a node in the order they will be pushed
    pub fn successors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

/// How a search call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    Found { path: Vec<usize>, expansions: u64 },
    Exhausted { expansions: u64 },
    Aborted { expansions: u64 },
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
impl SearchOutcome {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Found { .. } => "found",
            SearchOutcome::Exhausted { .. } => "exhausted",
            SearchOutcome::Aborted { .. } => "aborted",
        }
    }

    pub(crate) fn expansions(&self) -> u64 {
        match self {
            SearchOutcome::Found { expansions, .. }
            | SearchOutcome::Exhausted { expansions }
            | SearchOutcome::Aborted { expansions } => *expansions,
        }
    }
}

/// One stack entry: a partial path and the nodes it already uses
struct PartialPath {
    path: Vec<usize>,
    used: HashSet<usize>,
}

impl PartialPath {
    fn start(node: usize) -> Self {
        let mut used = HashSet::new();
        used.insert(node);
        Self {
            path: vec![node],
            used,
        }
    }

    fn extended(&self, node: usize) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(node);
        let mut used = self.used.clone();
        used.insert(node);
        Self { path, used }
    }

    fn last(&self) -> usize {
        self.path[self.path.len() - 1]
    }
}

/// Find the first simple path of exactly `length` nodes.
///
/// Start nodes are tried in `order.starts()` order, each with a fresh stack.
/// `length` must be at least 1.
pub(crate) fn find_simple_path(
    order: &SearchOrder,
    length: usize,
    limits: &SearchLimits,
) -> SearchOutcome {
    debug_assert!(length >= 1);
    let mut expansions: u64 = 0;

    for &start in &order.starts {
        #[cfg(feature = "tracing")]
        tracing::trace!(start, expansions, "searching from start node");

        let mut stack = vec![PartialPath::start(start)];

        while let Some(entry) = stack.pop() {
            if limits.should_stop(expansions) {
                return SearchOutcome::Aborted { expansions };
            }
            expansions += 1;

            if entry.path.len() == length {
                return SearchOutcome::Found {
                    path: entry.path,
                    expansions,
                };
            }

            for &next in order.successors(entry.last()) {
                if !entry.used.contains(&next) {
                    stack.push(entry.extended(next));
                }
            }
        }
    }

    SearchOutcome::Exhausted { expansions }
}

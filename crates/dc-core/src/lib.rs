//! dc-core: grid rooms and compatible room sequences
//!
//! A [`Grid`] is a rectangular room of ground and air cells. Its leftmost
//! column holds the entrances and its rightmost column the exits. A
//! [`DungeonPool`] links grids whose exits line up with other grids'
//! entrances and searches that graph for chains of distinct rooms.
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! Entropy-seeded randomness is only available with `std`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::sync::Arc;
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod dungeon;

mod error;
mod rng;

pub use dungeon::{Cell, DungeonPool, Grid, GridId, SearchLimits, SearchOrder};
pub use error::{DungeonError, DungeonResult};
pub use rng::DungeonRng;

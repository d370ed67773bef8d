//! Tile world: fixed-size 2D grid with file persistence.
//!
//! # Invariants
//! - Out-of-bounds writes are rejected without mutating the grid.
//! - `save` replaces the world file atomically: readers observe either the
//!   previous complete file or the new one, never a partial write.
//! - `load` fails closed on schema mismatch or content corruption.

pub mod grid;
pub mod store;

pub use grid::{Tile, TileGrid};
pub use store::WorldError;

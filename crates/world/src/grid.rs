use crate::store::{self, WorldError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kinds of tile a world cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Air,
    Grass,
    Stone,
}

/// A square 2D tile grid bound to a save file.
///
/// The grid is row-major with `dimension * dimension` cells. Screen-space
/// queries use normalized device coordinates in `[-1, 1]` on both axes,
/// matching what the cursor reports.
#[derive(Debug, Clone)]
pub struct TileGrid {
    dimension: usize,
    tiles: Vec<Tile>,
    path: PathBuf,
}

impl TileGrid {
    /// Create an all-`Air` grid bound to `path`. Nothing is written until
    /// [`TileGrid::save`].
    pub fn create(dimension: usize, path: impl AsRef<Path>) -> Self {
        Self {
            dimension,
            tiles: vec![Tile::Air; dimension * dimension],
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load a grid from an existing world file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let (dimension, tiles) = store::read_world_file(path)?;
        tracing::info!(path = %path.display(), dimension, "loaded world");
        Ok(Self {
            dimension,
            tiles,
            path: path.to_path_buf(),
        })
    }

    /// Load `path` if it exists, otherwise create a fresh grid bound to it.
    pub fn load_or_create(dimension: usize, path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), dimension, "no world file, creating empty world");
            Ok(Self::create(dimension, path))
        }
    }

    /// Write the grid to its bound file, replacing any previous content
    /// atomically (temp file + rename).
    pub fn save(&self) -> Result<(), WorldError> {
        store::write_world_file(&self.path, self.dimension, &self.tiles)?;
        tracing::info!(path = %self.path.display(), "saved world");
        Ok(())
    }

    /// Edge length of the grid in tiles.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Path of the bound save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tile at `(x, y)`, or `None` when out of bounds.
    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        Some(self.tiles[y * self.dimension + x])
    }

    /// Set the tile at `(x, y)`. Out-of-bounds coordinates are rejected
    /// without touching the grid.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) -> Result<(), WorldError> {
        if x >= self.dimension || y >= self.dimension {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                dimension: self.dimension,
            });
        }
        self.tiles[y * self.dimension + x] = tile;
        Ok(())
    }

    /// Map normalized screen coordinates to the tile under them.
    ///
    /// Returns `None` outside `[-1, 1]` on either axis and on the trailing
    /// edge (`sx == 1.0` is past the last column, not on it).
    pub fn tile_at_screen(&self, sx: f64, sy: f64) -> Option<(usize, usize)> {
        if !(-1.0..=1.0).contains(&sx) || !(-1.0..=1.0).contains(&sy) {
            return None;
        }
        let cell = 2.0 / self.dimension as f64;
        let x = ((sx + 1.0) / cell).floor() as usize;
        let y = ((sy + 1.0) / cell).floor() as usize;
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        Some((x, y))
    }

    /// All tiles in row-major order. Used by renderers and persistence.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

//! World file encoding.
//!
//! Layout: a zstd-compressed CBOR document
//! ```text
//! WorldFile { schema_version, dimension, tiles, hash }
//! ```
//! The hash is FNV-1a over the tile contents and dimension, verified on
//! load. Saves go through a sibling temp file and a rename so a crash
//! mid-write cannot leave a truncated world file behind.

use crate::grid::Tile;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Current world file schema version.
const WORLD_SCHEMA_VERSION: u32 = 1;

/// Errors from world grid and persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CBOR serialization error: {0}")]
    CborEncode(String),
    #[error("CBOR deserialization error: {0}")]
    CborDecode(String),
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error("world file corrupt: content hash mismatch")]
    Corrupt,
    #[error("tile ({x}, {y}) out of bounds for dimension {dimension}")]
    OutOfBounds {
        x: usize,
        y: usize,
        dimension: usize,
    },
    #[error("tile count {count} does not match dimension {dimension}")]
    Malformed { count: usize, dimension: usize },
}

/// On-disk document.
#[derive(Debug, Serialize, Deserialize)]
struct WorldFile {
    schema_version: u32,
    dimension: u32,
    tiles: Vec<Tile>,
    hash: u64,
}

pub(crate) fn write_world_file(
    path: &Path,
    dimension: usize,
    tiles: &[Tile],
) -> Result<(), WorldError> {
    let doc = WorldFile {
        schema_version: WORLD_SCHEMA_VERSION,
        dimension: dimension as u32,
        tiles: tiles.to_vec(),
        hash: content_hash(dimension, tiles),
    };

    let mut cbor = Vec::new();
    ciborium::into_writer(&doc, &mut cbor).map_err(|e| WorldError::CborEncode(e.to_string()))?;
    let compressed = zstd_compress(&cbor)?;

    // Atomic replace: write a sibling temp file, then rename over the
    // destination. Rename within one directory does not tear.
    let tmp = path.with_extension("dat.tmp");
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&tmp, &compressed)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn read_world_file(path: &Path) -> Result<(usize, Vec<Tile>), WorldError> {
    let compressed = std::fs::read(path)?;
    let cbor = zstd_decompress(&compressed)?;
    let doc: WorldFile =
        ciborium::from_reader(cbor.as_slice()).map_err(|e| WorldError::CborDecode(e.to_string()))?;

    if doc.schema_version != WORLD_SCHEMA_VERSION {
        return Err(WorldError::SchemaMismatch {
            file_version: doc.schema_version,
            expected_version: WORLD_SCHEMA_VERSION,
        });
    }
    let dimension = doc.dimension as usize;
    if doc.tiles.len() != dimension * dimension {
        return Err(WorldError::Malformed {
            count: doc.tiles.len(),
            dimension,
        });
    }
    if doc.hash != content_hash(dimension, &doc.tiles) {
        return Err(WorldError::Corrupt);
    }
    Ok((dimension, doc.tiles))
}

/// FNV-1a over dimension and tile contents, for corruption detection.
fn content_hash(dimension: usize, tiles: &[Tile]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let mut mix = |byte: u8| {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    };
    for b in (dimension as u64).to_le_bytes() {
        mix(b);
    }
    for tile in tiles {
        mix(match tile {
            Tile::Air => 0,
            Tile::Grass => 1,
            Tile::Stone => 2,
        });
    }
    hash
}

fn zstd_compress(data: &[u8]) -> Result<Vec<u8>, WorldError> {
    let mut encoder = zstd::Encoder::new(Vec::new(), 3)?;
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn zstd_decompress(data: &[u8]) -> Result<Vec<u8>, WorldError> {
    let mut decoder = zstd::Decoder::new(data)?;
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf)?;
    Ok(buf)
}

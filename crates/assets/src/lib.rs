//! Asset catalog: models and textures registered by path, addressed by
//! content hash.
//!
//! File formats are opaque to this layer. The catalog reads bytes only to
//! compute the content hash; decoding is the renderer backend's concern.
//! Renderables refer to assets by [`AssetId`], never by raw path.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Content-addressed asset ID: the first 8 bytes of the SHA-256 of the
/// asset's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// What an asset entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Model,
    Texture,
}

/// One registered asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub byte_len: u64,
    pub sha256: String,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset file not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset not found: {0:?}")]
    NotFound(AssetId),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content-addressed asset catalog.
///
/// Registering the same file twice yields the same id. The catalog can be
/// persisted to disk as JSON for inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    entries: BTreeMap<AssetId, AssetEntry>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model file and return its id. The file must exist.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        self.register(AssetKind::Model, path.as_ref())
    }

    /// Register a texture file and return its id. The file must exist.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        self.register(AssetKind::Texture, path.as_ref())
    }

    fn register(&mut self, kind: AssetKind, path: &Path) -> Result<AssetId, AssetError> {
        if !path.exists() {
            return Err(AssetError::Missing(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hasher.finalize();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let id = AssetId(u64::from_le_bytes(prefix));

        tracing::debug!(?kind, path = %path.display(), id = id.0, "registered asset");
        self.entries.insert(
            id,
            AssetEntry {
                kind,
                path: path.to_path_buf(),
                byte_len: bytes.len() as u64,
                sha256: format!("{digest:x}"),
            },
        );
        Ok(id)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: AssetId) -> Result<&AssetEntry, AssetError> {
        self.entries.get(&id).ok_or(AssetError::NotFound(id))
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = (&AssetId, &AssetEntry)> {
        self.entries.iter()
    }

    /// Persist the catalog as JSON for inspection.
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        serde_json::to_writer_pretty(std::fs::File::create(path.as_ref())?, self)?;
        Ok(())
    }

    /// Load a catalog manifest previously written by `save_manifest`.
    pub fn load_manifest(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        Ok(serde_json::from_reader(std::fs::File::open(
            path.as_ref(),
        )?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut catalog = AssetCatalog::new();
        let err = catalog.load_model(tmp.path().join("absent.obj"));
        assert!(matches!(err, Err(AssetError::Missing(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn same_content_same_id() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_file(tmp.path(), "a.obj", b"cube mesh data");
        let b = write_file(tmp.path(), "b.obj", b"cube mesh data");

        let mut catalog = AssetCatalog::new();
        let id_a = catalog.load_model(&a).unwrap();
        let id_b = catalog.load_model(&b).unwrap();
        assert_eq!(id_a, id_b);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn different_content_different_id() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_file(tmp.path(), "a.obj", b"cube");
        let b = write_file(tmp.path(), "b.png", b"texture");

        let mut catalog = AssetCatalog::new();
        let id_a = catalog.load_model(&a).unwrap();
        let id_b = catalog.load_texture(&b).unwrap();
        assert_ne!(id_a, id_b);

        assert_eq!(catalog.get(id_a).unwrap().kind, AssetKind::Model);
        assert_eq!(catalog.get(id_b).unwrap().kind, AssetKind::Texture);
    }

    #[test]
    fn get_unknown_id_errors() {
        let catalog = AssetCatalog::new();
        assert!(matches!(
            catalog.get(AssetId(42)),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn manifest_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let obj = write_file(tmp.path(), "body.obj", b"vertices");
        let manifest = tmp.path().join("catalog.json");

        let mut catalog = AssetCatalog::new();
        let id = catalog.load_model(&obj).unwrap();
        catalog.save_manifest(&manifest).unwrap();

        let loaded = AssetCatalog::load_manifest(&manifest).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(id).unwrap().byte_len, 8);
    }
}

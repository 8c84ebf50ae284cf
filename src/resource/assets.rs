//! Asset sources - read-only byte providers keyed by logical path
//!
//! The sound registry fetches `resources/sound/<file>` from an `AssetSource`.
//! `DirAssets` reads from a content directory on disk; `MemoryAssets` serves
//! bytes compiled into the binary or built up in tests.
//!
//! # Example
//! ```ignore
//! let assets = DirAssets::new("/path/to/content");
//! let bytes = assets.fetch("resources/sound/jump.wav")?;
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Error type for asset lookups
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AssetError>;

/// Read-only provider of asset bytes.
pub trait AssetSource {
    /// Fetch the full contents of the asset at `path`.
    fn fetch(&self, path: &str) -> Result<Arc<[u8]>>;

    fn contains(&self, path: &str) -> bool {
        self.fetch(path).is_ok()
    }
}

/// Reject absolute paths and any `..` component.
fn validate_path(path: &str) -> Result<()> {
    if path.is_empty()
        || path.starts_with('/')
        || path.starts_with('\\')
        || path.split(['/', '\\']).any(|part| part == "..")
    {
        return Err(AssetError::InvalidPath(path.to_string()));
    }
    Ok(())
}

// ============================================================================
// DirAssets
// ============================================================================

/// Assets read from a content directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    base_path: PathBuf,
}

impl DirAssets {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a logical path to a file under the content directory.
    fn resolve_path(&self, path: &str) -> Result<PathBuf> {
        validate_path(path)?;
        let full_path = self.base_path.join(path);

        // Symlinks may still point outside the content directory
        if let (Ok(base), Ok(full)) = (self.base_path.canonicalize(), full_path.canonicalize()) {
            if !full.starts_with(&base) {
                return Err(AssetError::InvalidPath(path.to_string()));
            }
        }

        Ok(full_path)
    }
}

impl AssetSource for DirAssets {
    fn fetch(&self, path: &str) -> Result<Arc<[u8]>> {
        let full_path = self.resolve_path(path)?;
        match fs::read(&full_path) {
            Ok(bytes) => Ok(bytes.into()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(path.to_string()))
            }
            Err(source) => Err(AssetError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.resolve_path(path).is_ok_and(|p| p.is_file())
    }
}

// ============================================================================
// MemoryAssets
// ============================================================================

/// Assets held in memory, e.g. from `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Arc<[u8]>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a static table of `(path, bytes)` pairs.
    pub fn from_static(table: &[(&str, &'static [u8])]) -> Self {
        let mut assets = Self::new();
        for (path, bytes) in table {
            assets.insert(*path, *bytes);
        }
        assets
    }

    /// Add or replace an asset.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<Arc<[u8]>> {
        self.entries.remove(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl AssetSource for MemoryAssets {
    fn fetch(&self, path: &str) -> Result<Arc<[u8]>> {
        validate_path(path)?;
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}

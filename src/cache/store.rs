//! Cache store persisting API responses to a single JSON file
//!
//! The whole mapping is read at the start of a search cycle and rewritten in
//! full after every cache miss.

use directories::ProjectDirs;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the cache file inside the cache directory
pub const CACHE_FILENAME: &str = "yelp_cache.json";

/// Mapping from request key to the decoded response body
pub type CacheMap = BTreeMap<String, Value>;

/// Errors that can occur when persisting the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Creating the cache directory or writing the file failed
    #[error("Failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping could not be serialized
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads and writes the persisted request cache
///
/// No file handle is held between calls; each `load` and `save` opens and
/// closes the file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the cache file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a CacheStore in the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/foodfinder/yelp_cache.json` on Linux, or the equivalent
    /// path on other platforms. Returns `None` if no home directory is known.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "foodfinder")?;
        Some(Self::at(project_dirs.cache_dir().join(CACHE_FILENAME)))
    }

    /// Creates a CacheStore backed by a specific file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted mapping
    ///
    /// A missing, unreadable or malformed file, or one that does not hold a
    /// JSON object, yields an empty mapping.
    pub fn load(&self) -> CacheMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("no cache at {}: {}", self.path.display(), e);
                return CacheMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                log::debug!("ignoring unreadable cache {}: {}", self.path.display(), e);
                CacheMap::new()
            }
        }
    }

    /// Overwrites the cache file with the full mapping
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CacheError)` if serialization, directory creation or writing fails
    pub fn save(&self, map: &CacheMap) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(map)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| CacheError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| CacheError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

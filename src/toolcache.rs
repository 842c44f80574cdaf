//! Runner tool cache
//!
//! Entries live at `<root>/<tool>/<version>/<arch>/` with a sibling
//! `<arch>.complete` marker. An entry only counts once its marker exists,
//! so a crash halfway through a copy reads as a miss on the next run.
//!
//! | State | Marker | Lookup |
//! |-------|--------|--------|
//! | Missing | no | miss |
//! | Partial | no | miss, overwritten on register |
//! | Complete | yes | hit, never re-verified |

use crate::error::{SetupError, SetupResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Key of a cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey<'a> {
    pub tool: &'a str,
    pub version: &'a str,
    pub arch: &'a str,
}

/// Host-persistent store of installed tools
#[async_trait]
pub trait ToolCache: Send + Sync {
    /// Look up a complete entry, without side effects
    async fn find(&self, key: &CacheKey<'_>) -> SetupResult<Option<PathBuf>>;

    /// Copy `source` into the entry for `key` as `file_name` and return the entry directory
    async fn cache_file(
        &self,
        source: &Path,
        file_name: &str,
        key: &CacheKey<'_>,
    ) -> SetupResult<PathBuf>;
}

/// Tool cache rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
}

impl DirToolCache {
    /// Create a cache rooted at `root`; nothing is touched until a write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the entry for `key`
    pub fn entry_dir(&self, key: &CacheKey<'_>) -> PathBuf {
        self.root.join(key.tool).join(key.version).join(key.arch)
    }

    fn marker_path(&self, key: &CacheKey<'_>) -> PathBuf {
        self.root
            .join(key.tool)
            .join(key.version)
            .join(format!("{}.complete", key.arch))
    }
}

/// Reject key components that would escape the cache root
fn check_component(value: &str, what: &str) -> SetupResult<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\');
    if invalid {
        return Err(SetupError::Io {
            context: format!("invalid tool cache {}: {:?}", what, value),
            source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
        });
    }
    Ok(())
}

/// Existence check that surfaces anything other than not-found
async fn exists(path: &Path) -> SetupResult<bool> {
    fs::try_exists(path)
        .await
        .map_err(|e| SetupError::io(format!("checking tool cache entry {}", path.display()), e))
}

fn check_key(key: &CacheKey<'_>) -> SetupResult<()> {
    check_component(key.tool, "tool name")?;
    check_component(key.version, "version")?;
    check_component(key.arch, "architecture")
}

#[async_trait]
impl ToolCache for DirToolCache {
    async fn find(&self, key: &CacheKey<'_>) -> SetupResult<Option<PathBuf>> {
        if check_key(key).is_err() {
            debug!(?key, "Key cannot name a cache entry");
            return Ok(None);
        }

        let dir = self.entry_dir(key);
        let marker = self.marker_path(key);
        let complete = exists(&marker).await? && exists(&dir).await?;

        if complete {
            debug!("Tool cache hit: {}", dir.display());
            Ok(Some(dir))
        } else {
            debug!("Tool cache miss: {}", dir.display());
            Ok(None)
        }
    }

    async fn cache_file(
        &self,
        source: &Path,
        file_name: &str,
        key: &CacheKey<'_>,
    ) -> SetupResult<PathBuf> {
        check_key(key)?;
        check_component(file_name, "file name")?;

        let dir = self.entry_dir(key);
        let marker = self.marker_path(key);

        // Stale marker first, so an interrupted rewrite never looks complete
        let stale_marker = fs::try_exists(&marker)
            .await
            .map_err(|e| SetupError::cache_write(&marker, e))?;
        if stale_marker {
            fs::remove_file(&marker)
                .await
                .map_err(|e| SetupError::cache_write(&marker, e))?;
        }
        let stale_dir = fs::try_exists(&dir)
            .await
            .map_err(|e| SetupError::cache_write(&dir, e))?;
        if stale_dir {
            fs::remove_dir_all(&dir)
                .await
                .map_err(|e| SetupError::cache_write(&dir, e))?;
        }
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| SetupError::cache_write(&dir, e))?;

        let target = dir.join(file_name);
        fs::copy(source, &target)
            .await
            .map_err(|e| SetupError::cache_write(&target, e))?;

        fs::write(&marker, b"")
            .await
            .map_err(|e| SetupError::cache_write(&marker, e))?;

        debug!("Cached {} at {}", source.display(), dir.display());
        Ok(dir)
    }
}

//! On-disk cache of archives downloaded from URLs.
//!
//! Layout under the cache root:
//!
//! ```text
//! README.txt
//! cached_data.json    URL -> { subdir, url, cached_at }
//! <uuid>/...          extracted archive contents
//! ```
//!
//! The cache assumes a single writer; concurrent processes updating the
//! manifest can lose entries.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ReaderError;

/// Directory name of the default cache under the home directory.
pub const CACHE_DIR_NAME: &str = ".pylangacq";

const MANIFEST_FILE: &str = "cached_data.json";

const README: &str = "The contents of this directory are automatically managed by \
                      the CHAT reader. Please do not edit anything on your own.\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Directory under the cache root holding the extracted archive.
    pub subdir: String,
    pub url: String,
    /// RFC 3339 timestamp of the download.
    pub cached_at: String,
}

type Manifest = IndexMap<String, CacheEntry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    /// The cache at `<home>/.pylangacq`.
    pub fn default_location() -> Result<Self, ReaderError> {
        let home = dirs::home_dir().ok_or_else(|| {
            ReaderError::io(
                CACHE_DIR_NAME,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory"),
            )
        })?;
        Ok(Cache::at(home.join(CACHE_DIR_NAME)))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Cache { root: root.into() }
    }

    /// `Cache::at(dir)` when a directory is given, else the default.
    pub fn resolve(dir: Option<&Path>) -> Result<Self, ReaderError> {
        match dir {
            Some(dir) => Ok(Cache::at(dir)),
            None => Cache::default_location(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Reset the cache directory to an empty manifest and a README.
    pub fn initialize(&self) -> Result<(), ReaderError> {
        if self.root.is_dir() {
            std::fs::remove_dir_all(&self.root).map_err(|e| ReaderError::io(&self.root, e))?;
        }
        std::fs::create_dir_all(&self.root).map_err(|e| ReaderError::io(&self.root, e))?;
        let readme = self.root.join("README.txt");
        std::fs::write(&readme, README).map_err(|e| ReaderError::io(&readme, e))?;
        self.write_manifest(&Manifest::new())
    }

    fn load(&self) -> Result<Option<Manifest>, ReaderError> {
        let path = self.manifest_path();
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ReaderError::io(&path, e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| ReaderError::CacheManifest { path, source })
    }

    fn write_manifest(&self, manifest: &Manifest) -> Result<(), ReaderError> {
        let path = self.manifest_path();
        let text = serde_json::to_string_pretty(manifest).map_err(|source| {
            ReaderError::CacheManifest {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(&path, text).map_err(|e| ReaderError::io(&path, e))
    }

    /// URLs with a cached extraction.
    pub fn cached_urls(&self) -> Result<BTreeSet<String>, ReaderError> {
        Ok(self
            .load()?
            .map(|manifest| manifest.into_keys().collect())
            .unwrap_or_default())
    }

    /// Extraction directory of `url`, if cached.
    pub fn lookup(&self, url: &str) -> Result<Option<PathBuf>, ReaderError> {
        let entry = self.load()?.and_then(|mut m| m.shift_remove(url));
        match entry {
            Some(entry) => {
                tracing::debug!(url, subdir = %entry.subdir, "cache hit");
                Ok(Some(self.root.join(entry.subdir)))
            }
            None => {
                tracing::debug!(url, "cache miss");
                Ok(None)
            }
        }
    }

    /// Register `url` and create an empty extraction directory for it.
    pub fn create_entry(&self, url: &str) -> Result<PathBuf, ReaderError> {
        if !self.root.is_dir() {
            self.initialize()?;
        }
        let subdir = uuid::Uuid::new_v4().to_string();
        let dir = self.root.join(&subdir);
        std::fs::create_dir_all(&dir).map_err(|e| ReaderError::io(&dir, e))?;

        let cached_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let mut manifest = self.load()?.unwrap_or_default();
        manifest.insert(
            url.to_string(),
            CacheEntry {
                subdir,
                url: url.to_string(),
                cached_at,
            },
        );
        self.write_manifest(&manifest)?;
        Ok(dir)
    }

    /// Remove the entry of `url`, or everything when `url` is `None`.
    pub fn remove(&self, url: Option<&str>) -> Result<(), ReaderError> {
        let Some(mut manifest) = self.load()? else {
            return match url {
                Some(url) => Err(ReaderError::NotCached(url.to_string())),
                None => self.initialize(),
            };
        };
        match url {
            None => self.initialize(),
            Some(url) => {
                let entry = manifest
                    .shift_remove(url)
                    .ok_or_else(|| ReaderError::NotCached(url.to_string()))?;
                self.write_manifest(&manifest)?;
                let dir = self.root.join(&entry.subdir);
                if dir.is_dir() {
                    std::fs::remove_dir_all(&dir).map_err(|e| ReaderError::io(&dir, e))?;
                }
                tracing::debug!(url, "removed cached data");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://childes.talkbank.org/data/Eng-NA/Brown.zip";

    #[test]
    fn empty_cache_has_no_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::at(tmp.path().join("cache"));
        assert!(cache.cached_urls().unwrap().is_empty());
        assert_eq!(cache.lookup(URL).unwrap(), None);
    }

    #[test]
    fn initialize_writes_readme_and_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::at(tmp.path().join("cache"));
        cache.initialize().unwrap();
        assert!(cache.root().join("README.txt").is_file());
        let manifest = std::fs::read_to_string(cache.root().join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.trim(), "{}");
    }

    #[test]
    fn create_lookup_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::at(tmp.path().join("cache"));
        let dir = cache.create_entry(URL).unwrap();
        assert!(dir.is_dir());
        assert_eq!(cache.lookup(URL).unwrap(), Some(dir.clone()));
        assert_eq!(
            cache.cached_urls().unwrap().into_iter().collect::<Vec<_>>(),
            vec![URL.to_string()]
        );

        cache.remove(Some(URL)).unwrap();
        assert!(!dir.exists());
        assert!(cache.cached_urls().unwrap().is_empty());
    }

    #[test]
    fn removing_unknown_url_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::at(tmp.path().join("cache"));
        cache.initialize().unwrap();
        let err = cache.remove(Some(URL)).unwrap_err();
        assert!(matches!(err, ReaderError::NotCached(_)));
    }

    #[test]
    fn remove_all_wipes_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::at(tmp.path().join("cache"));
        let a = cache.create_entry(URL).unwrap();
        let b = cache.create_entry("https://example.org/b.zip").unwrap();
        cache.remove(None).unwrap();
        assert!(!a.exists() && !b.exists());
        assert!(cache.cached_urls().unwrap().is_empty());
        assert!(cache.root().join("README.txt").is_file());
    }

    #[test]
    fn corrupt_manifest_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::at(tmp.path());
        std::fs::write(tmp.path().join(MANIFEST_FILE), "not json").unwrap();
        assert!(matches!(
            cache.cached_urls(),
            Err(ReaderError::CacheManifest { .. })
        ));
    }
}

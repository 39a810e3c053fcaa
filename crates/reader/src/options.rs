//! ReadOptions -- how files are selected and read.

use std::path::PathBuf;

use regex::Regex;

use crate::download::DownloadConfig;
use crate::error::ReaderError;

/// File extension of CHAT transcripts.
pub const CHAT_EXTENSION: &str = ".cha";

#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Keep only file paths this regex matches.
    pub match_pattern: Option<String>,
    /// Drop file paths this regex matches.
    pub exclude_pattern: Option<String>,
    /// Files walked in a directory or archive must end with this.
    pub extension: String,
    /// Read and parse files on worker threads.
    pub parallel: bool,
    /// Reuse a cached extraction of a remote archive.
    pub use_cached: bool,
    /// Cache root; `None` for the default under the home directory.
    pub cache_dir: Option<PathBuf>,
    pub download: DownloadConfig,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            match_pattern: None,
            exclude_pattern: None,
            extension: CHAT_EXTENSION.to_string(),
            parallel: true,
            use_cached: true,
            cache_dir: None,
            download: DownloadConfig::default(),
        }
    }
}

impl ReadOptions {
    pub fn matching(mut self, pattern: impl Into<String>) -> Self {
        self.match_pattern = Some(pattern.into());
        self
    }

    pub fn excluding(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = Some(pattern.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn use_cached(mut self, use_cached: bool) -> Self {
        self.use_cached = use_cached;
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }
}

fn compile(pattern: &str) -> Result<Regex, ReaderError> {
    Regex::new(pattern).map_err(|source| ReaderError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Keep the paths `match_pattern` finds and `exclude_pattern` does not.
/// Either pattern may be absent; order is preserved.
pub fn filter_paths(
    paths: Vec<String>,
    match_pattern: Option<&str>,
    exclude_pattern: Option<&str>,
) -> Result<Vec<String>, ReaderError> {
    let keep = match_pattern.filter(|p| !p.is_empty()).map(compile).transpose()?;
    let drop = exclude_pattern.filter(|p| !p.is_empty()).map(compile).transpose()?;
    Ok(paths
        .into_iter()
        .filter(|p| keep.as_ref().map_or(true, |re| re.is_match(p)))
        .filter(|p| drop.as_ref().map_or(true, |re| !re.is_match(p)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Vec<String> {
        ["Eve/010600a.cha", "Eve/010600b.cha", "Adam/020304.cha"]
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn defaults() {
        let options = ReadOptions::default();
        assert_eq!(options.extension, ".cha");
        assert!(options.parallel);
        assert!(options.use_cached);
    }

    #[test]
    fn match_then_exclude() {
        let kept = filter_paths(paths(), Some("Eve"), Some("b\\.cha$")).unwrap();
        assert_eq!(kept, vec!["Eve/010600a.cha"]);
        assert_eq!(filter_paths(paths(), None, None).unwrap().len(), 3);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let err = filter_paths(paths(), Some("("), None).unwrap_err();
        assert!(matches!(err, ReaderError::Pattern { .. }));
    }
}

use std::path::PathBuf;

use childes_core::ParseError;

/// Everything that can go wrong building, querying or exporting a
/// [`Reader`](crate::Reader).
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("download of {url} failed after {attempts} attempt(s): {message}")]
    Download {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("{}: invalid zip archive: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{}: unreadable cache manifest: {source}", .path.display())]
    CacheManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("url not found among the cached data: {0}")]
    NotCached(String),

    #[error("invalid file path pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("participants and exclude cannot be specified at the same time")]
    ConflictingParticipants,

    #[error("n must be a positive integer: {0}")]
    InvalidNgram(usize),

    #[error(
        "path is not one of the accepted choices of {{.zip file, local directory, {extension} file}}: {path}"
    )]
    UnsupportedSource { path: String, extension: String },

    #[error("at least one of {{match, exclude}} must be specified")]
    EmptyFilter,

    #[error(
        "the data is in {0} files; write to a directory to export more than one file"
    )]
    MultipleFiles(usize),

    #[error("{0:?} does not look like a path to a file")]
    NotAFilePath(String),

    #[error("there are {files} CHAT files to create, but {filenames} filenames were given")]
    FilenameCount { files: usize, filenames: usize },

    #[error("strs and ids must have the same size: {strs} and {ids}")]
    IdCount { strs: usize, ids: usize },
}

impl ReaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReaderError::Io {
            path: path.into(),
            source,
        }
    }

    /// Machine-readable form for JSON output.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ReaderError::Parse(e) => e.to_json_value(),
            other => serde_json::json!({
                "kind": other.kind(),
                "message": other.to_string(),
            }),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ReaderError::Io { .. } => "io",
            ReaderError::Parse(_) => "parse",
            ReaderError::Download { .. } => "download",
            ReaderError::Archive { .. } => "archive",
            ReaderError::CacheManifest { .. } => "cache_manifest",
            ReaderError::NotCached(_) => "not_cached",
            ReaderError::Pattern { .. } => "pattern",
            ReaderError::ConflictingParticipants => "conflicting_participants",
            ReaderError::InvalidNgram(_) => "invalid_ngram",
            ReaderError::UnsupportedSource { .. } => "unsupported_source",
            ReaderError::EmptyFilter => "empty_filter",
            ReaderError::MultipleFiles(_) => "multiple_files",
            ReaderError::NotAFilePath(_) => "not_a_file_path",
            ReaderError::FilenameCount { .. } => "filename_count",
            ReaderError::IdCount { .. } => "id_count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = ReaderError::io(
            "corpus/eve.cha",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "corpus/eve.cha: missing");
        assert_eq!(err.to_json_value()["kind"], "io");
    }

    #[test]
    fn unsupported_source_message() {
        let err = ReaderError::UnsupportedSource {
            path: "notes.txt".into(),
            extension: ".cha".into(),
        };
        assert_eq!(
            err.to_string(),
            "path is not one of the accepted choices of {.zip file, local directory, .cha file}: notes.txt"
        );
    }
}

//! Building a Reader from strings, local files, directories, zip archives
//! and URLs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use childes_core::{parse_chat, ChatFile};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use crate::cache::Cache;
use crate::download::download;
use crate::error::ReaderError;
use crate::options::{filter_paths, ReadOptions};
use crate::reader::Reader;

static TALKBANK_PAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://\S+\.talkbank\.org/access/\S+\.html").expect("valid talkbank regex")
});

/// Run `f` over `items`, on the rayon pool when `parallel`.
/// Results come back in input order.
fn map_ordered<T, R, F>(items: Vec<T>, parallel: bool, f: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync + Send,
{
    if !parallel || items.len() < 2 {
        return items.into_iter().map(f).collect();
    }
    items.into_par_iter().map(f).collect()
}

fn parse_one(text: &str, id: &str) -> Result<ChatFile, ReaderError> {
    let start = Instant::now();
    let file = parse_chat(text, id)?;
    tracing::debug!(
        file = id,
        utterances = file.utterances.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "parsed"
    );
    Ok(file)
}

impl Reader {
    /// Parse in-memory CHAT text. Without `ids`, each text gets a random
    /// UUID as its file path.
    pub fn from_strs<S: AsRef<str>>(
        strs: &[S],
        ids: Option<Vec<String>>,
        parallel: bool,
    ) -> Result<Reader, ReaderError> {
        let ids = match ids {
            Some(ids) if ids.len() != strs.len() => {
                return Err(ReaderError::IdCount {
                    strs: strs.len(),
                    ids: ids.len(),
                })
            }
            Some(ids) => ids,
            None => strs
                .iter()
                .map(|_| uuid::Uuid::new_v4().to_string())
                .collect(),
        };
        let jobs: Vec<(&str, String)> = strs.iter().map(|s| s.as_ref()).zip(ids).collect();
        map_ordered(jobs, parallel, |(text, id)| parse_one(text, &id))
            .into_iter()
            .collect()
    }

    /// Read and parse local files in the given order, after applying the
    /// path patterns of `options`.
    pub fn from_files<P: AsRef<Path>>(
        paths: &[P],
        options: &ReadOptions,
    ) -> Result<Reader, ReaderError> {
        let paths: Vec<String> = paths
            .iter()
            .map(|p| p.as_ref().to_string_lossy().into_owned())
            .collect();
        let paths = filter_paths(
            paths,
            options.match_pattern.as_deref(),
            options.exclude_pattern.as_deref(),
        )?;

        let texts = map_ordered(paths.clone(), options.parallel, |path| {
            std::fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))
        })
        .into_iter()
        .collect::<Result<Vec<String>, ReaderError>>()?;

        Reader::from_strs(&texts, Some(paths), options.parallel)
    }

    /// Read every file under `dir`, recursively, whose name ends with the
    /// extension of `options`. Paths are sorted before reading.
    pub fn from_dir(dir: impl AsRef<Path>, options: &ReadOptions) -> Result<Reader, ReaderError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        walk(dir, &options.extension, &mut paths)?;
        paths.sort();
        tracing::debug!(dir = %dir.display(), files = paths.len(), "walked directory");
        Reader::from_files(&paths, options)
    }

    /// Read a local zip archive, or one at an `http(s)://` URL. Downloads
    /// are extracted into the cache and reused while `use_cached` is set.
    ///
    /// File paths are relative to the archive root.
    pub fn from_zip(source: &str, options: &ReadOptions) -> Result<Reader, ReaderError> {
        let is_url = source.starts_with("https://") || source.starts_with("http://");
        if is_url {
            return from_remote_zip(source, options);
        }
        let tmp = tempfile::tempdir().map_err(|e| ReaderError::io(std::env::temp_dir(), e))?;
        extract(Path::new(source), tmp.path())?;
        let reader = Reader::from_dir(tmp.path(), options)?;
        Ok(strip_prefix(reader, tmp.path()))
    }
}

fn from_remote_zip(url: &str, options: &ReadOptions) -> Result<Reader, ReaderError> {
    let cache = Cache::resolve(options.cache_dir.as_deref())?;
    let cached = cache.lookup(url)?;

    let unzip_dir = match cached {
        Some(dir) if options.use_cached => dir,
        cached => {
            if cached.is_some() {
                cache.remove(Some(url))?;
            }
            let tmp =
                tempfile::tempdir().map_err(|e| ReaderError::io(std::env::temp_dir(), e))?;
            let name = url.rsplit('/').next().filter(|n| !n.is_empty()).unwrap_or("data.zip");
            let zip_path = tmp.path().join(name);
            download(url, &zip_path, &options.download)?;
            let dir = cache.create_entry(url)?;
            extract(&zip_path, &dir)?;
            dir
        }
    };

    let reader = Reader::from_dir(&unzip_dir, options)?;
    Ok(strip_prefix(reader, &unzip_dir))
}

fn extract(zip_path: &Path, dest: &Path) -> Result<(), ReaderError> {
    let file = std::fs::File::open(zip_path).map_err(|e| ReaderError::io(zip_path, e))?;
    let archive_error = |source| ReaderError::Archive {
        path: zip_path.to_path_buf(),
        source,
    };
    let mut archive = zip::ZipArchive::new(file).map_err(archive_error)?;
    archive.extract(dest).map_err(archive_error)?;
    tracing::info!(
        archive = %zip_path.display(),
        entries = archive.len(),
        dest = %dest.display(),
        "extracted"
    );
    Ok(())
}

/// Make file paths relative to `root`.
fn strip_prefix(reader: Reader, root: &Path) -> Reader {
    let root = root.to_string_lossy();
    reader
        .into_files()
        .map(|mut file| {
            if let Some(rest) = file.file_path.strip_prefix(root.as_ref()) {
                file.file_path = rest.trim_start_matches(std::path::MAIN_SEPARATOR).to_string();
            }
            file
        })
        .collect()
}

fn walk(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) -> Result<(), ReaderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ReaderError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ReaderError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, extension, out)?;
        } else if path.is_file()
            && entry.file_name().to_string_lossy().ends_with(extension)
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Read CHAT data from whatever `source` names: a zip file or URL, a
/// directory, or a single CHAT file.
///
/// A TalkBank corpus page such as
/// `https://childes.talkbank.org/access/Eng-NA/Brown.html` is read from
/// its zip download.
pub fn read_chat(source: &str, options: &ReadOptions) -> Result<Reader, ReaderError> {
    let source = if TALKBANK_PAGE.is_match(source) {
        source.replace("/access/", "/data/").replace(".html", ".zip")
    } else {
        source.to_string()
    };

    let lower = source.to_lowercase();
    if lower.ends_with(".zip") {
        Reader::from_zip(&source, options)
    } else if Path::new(&source).is_dir() {
        Reader::from_dir(&source, options)
    } else if lower.ends_with(&options.extension.to_lowercase()) {
        Reader::from_files(&[&source], options)
    } else {
        Err(ReaderError::UnsupportedSource {
            path: source,
            extension: options.extension.clone(),
        })
    }
}

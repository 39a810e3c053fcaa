//! Writing a Reader back out as CHAT.

use std::path::Path;

use childes_core::to_chat_string;

use crate::error::ReaderError;
use crate::reader::Reader;

impl Reader {
    /// One CHAT string per file, in order.
    ///
    /// Only the earliest `@Date` of a file is written, and for other header
    /// fields used more than once, only the last value.
    pub fn to_strs(&self, tabular: bool) -> Vec<String> {
        self.files()
            .map(|file| to_chat_string(file, tabular))
            .collect()
    }

    /// Write CHAT files.
    ///
    /// With `is_dir` unset, `path` is one file and the reader must hold at
    /// most one file. Otherwise `path` is a directory that receives
    /// `0001.cha`, `0002.cha`, ... or the given `filenames`, one per file.
    pub fn to_chat(
        &self,
        path: impl AsRef<Path>,
        is_dir: bool,
        filenames: Option<Vec<String>>,
        tabular: bool,
    ) -> Result<(), ReaderError> {
        let path = path.as_ref();
        let (dir, filenames) = if is_dir {
            let filenames = match filenames {
                Some(names) if names.len() != self.n_files() => {
                    return Err(ReaderError::FilenameCount {
                        files: self.n_files(),
                        filenames: names.len(),
                    })
                }
                Some(names) => names,
                None => (1..=self.n_files()).map(|i| format!("{:04}.cha", i)).collect(),
            };
            (path.to_path_buf(), filenames)
        } else {
            if self.n_files() > 1 {
                return Err(ReaderError::MultipleFiles(self.n_files()));
            }
            let text = path.to_string_lossy();
            let looks_like_dir = text.ends_with(std::path::MAIN_SEPARATOR) || text.ends_with('/');
            let name = match path.file_name() {
                Some(name) if !looks_like_dir => name.to_string_lossy().into_owned(),
                _ => return Err(ReaderError::NotAFilePath(text.into_owned())),
            };
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (dir, vec![name])
        };

        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&dir).map_err(|e| ReaderError::io(&dir, e))?;
        }
        for (name, text) in filenames.iter().zip(self.to_strs(tabular)) {
            let target = dir.join(name);
            std::fs::write(&target, text).map_err(|e| ReaderError::io(&target, e))?;
            tracing::debug!(path = %target.display(), "wrote CHAT file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "@Begin\n@Languages:\teng\n*CHI:\tmore cookie .\n@End\n";

    fn reader(n: usize) -> Reader {
        let texts = vec![TEXT; n];
        let ids = (0..n).map(|i| format!("f{}.cha", i)).collect();
        Reader::from_strs(&texts, Some(ids), false).unwrap()
    }

    #[test]
    fn single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("sub/out.cha");
        reader(1).to_chat(&target, false, None, true).unwrap();
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("@Languages:\teng\n"));
        assert!(written.contains("*CHI:\tmore cookie ."));
    }

    #[test]
    fn several_files_need_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = reader(2)
            .to_chat(tmp.path().join("out.cha"), false, None, true)
            .unwrap_err();
        assert!(matches!(err, ReaderError::MultipleFiles(2)));
    }

    #[test]
    fn directory_looking_path_is_rejected() {
        let err = reader(1).to_chat("out/", false, None, true).unwrap_err();
        assert!(matches!(err, ReaderError::NotAFilePath(_)));
    }

    #[test]
    fn numbered_files_in_directory() {
        let tmp = tempfile::tempdir().unwrap();
        reader(2).to_chat(tmp.path(), true, None, false).unwrap();
        assert!(tmp.path().join("0001.cha").is_file());
        assert!(tmp.path().join("0002.cha").is_file());
    }

    #[test]
    fn filenames_must_match_file_count() {
        let tmp = tempfile::tempdir().unwrap();
        let err = reader(2)
            .to_chat(tmp.path(), true, Some(vec!["a.cha".into()]), true)
            .unwrap_err();
        assert!(matches!(
            err,
            ReaderError::FilenameCount {
                files: 2,
                filenames: 1
            }
        ));
        reader(2)
            .to_chat(tmp.path(), true, Some(vec!["a.cha".into(), "b.cha".into()]), true)
            .unwrap();
        assert!(tmp.path().join("b.cha").is_file());
    }
}

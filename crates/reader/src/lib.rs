//! childes-reader: collections of CHAT files.
//!
//! A [`Reader`] holds parsed files in order and answers queries over them:
//! headers, utterances, words, counts and developmental measures, either
//! per file or across all files. Readers are built from in-memory text,
//! local files, directories, zip archives and remote corpora; remote
//! archives are kept in an on-disk [`Cache`].
//!
//! ```no_run
//! use childes_reader::{read_chat, ReadOptions};
//!
//! let eve = read_chat("Brown/Eve", &ReadOptions::default().matching("0106"))?;
//! println!("{}", eve.info(false));
//! # Ok::<(), childes_reader::ReaderError>(())
//! ```

pub mod cache;
pub mod download;
pub mod error;
pub mod export;
pub mod filter;
pub mod options;
pub mod reader;
pub mod source;

pub use cache::{Cache, CacheEntry, CACHE_DIR_NAME};
pub use download::DownloadConfig;
pub use error::ReaderError;
pub use filter::ParticipantFilter;
pub use options::{ReadOptions, CHAT_EXTENSION};
pub use reader::{Age, FileInfo, Grouped, Grouping, Info, Reader, DEFAULT_PARTICIPANT};
pub use source::read_chat;

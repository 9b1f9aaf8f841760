//! Metadata for a single filesystem path, parsed once at construction, plus
//! small permission-aware wrappers over touching and opening the file.
//!
//! The entry point is [`File`]. Parsing is purely lexical: nothing on disk is
//! checked until one of the filesystem operations is called.
//!
//! ```
//! use fyle::File;
//!
//! let report = File::new("data/report.csv");
//! assert_eq!(report.dir(), "data");
//! assert_eq!(report.basename(), "report");
//! assert_eq!(report.ext(), Some("csv"));
//! assert_eq!(report.with_ext("txt"), "data/report.txt");
//! assert_eq!(report.with_suffix("_v2"), "data/report_v2.csv");
//! ```
//!
//! [`File`] caches its MIME type lazily on first read, which makes instances
//! `!Sync`. Use external synchronization if one instance must be shared
//! across threads.

mod error;
mod file;
pub mod filetype;
pub mod permissions;

pub use error::{Error, Result};
pub use file::File;

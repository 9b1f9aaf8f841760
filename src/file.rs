//! The [`File`] value object.

use std::{cell::OnceCell, path::Path};

use filetime_creation as ft;
use fs_err::{self as fs, PathExt};
use log::debug;

use crate::{filetype, permissions, Error};

/// A filesystem path with its name metadata parsed out once at construction.
///
/// Construction is purely lexical and never touches the disk. The extension
/// is stored lowercased, so `file.filename()` equals
/// `format!("{}.{}", file.basename(), file.ext().unwrap())` only up to the
/// extension's original casing.
///
/// The MIME type is resolved lazily on the first call to [`File::mime`] and
/// cached for the lifetime of the instance, which makes `File` `!Sync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: String,
    dir: String,
    filename: String,
    basename: String,
    ext: Option<String>,
    mime: OnceCell<String>,
}

impl File {
    /// Parse `path` into its name components.
    pub fn new(path: impl Into<String>) -> Self {
        Self::build(path.into(), None)
    }

    /// Like [`File::new`], but with a known MIME type, skipping content
    /// sniffing later on. An empty `mime` counts as not supplied.
    pub fn with_mime(path: impl Into<String>, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        Self::build(path.into(), (!mime.is_empty()).then_some(mime))
    }

    fn build(path: String, mime: Option<String>) -> Self {
        let parsed = Path::new(&path);

        // `parent` yields "." for relative bare filenames ("./a") and "" for
        // plain ones ("a"), both meaning there is no directory portion.
        let dir = match parsed.parent().and_then(Path::to_str) {
            None | Some(".") | Some("") => String::new(),
            Some(dir) => dir.to_owned(),
        };
        let filename = parsed
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_owned();

        let (basename, ext) = match filename.rfind('.') {
            Some(dot) => (
                filename[..dot].to_owned(),
                Some(filename[dot + 1..].to_lowercase()),
            ),
            None => (filename.clone(), None),
        };

        Self {
            path,
            dir,
            filename,
            basename,
            ext,
            mime: mime.map_or_else(OnceCell::new, OnceCell::from),
        }
    }

    /// The path as originally given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The directory containing the file, without a trailing separator.
    /// Empty when the path is a bare filename.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// The filename without the directory.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The filename without its extension.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// The lowercased extension, if the filename has one.
    pub fn ext(&self) -> Option<&str> {
        self.ext.as_deref()
    }

    /// Build a sibling path with the extension swapped for `ext`.
    ///
    /// This is string construction only, no file is renamed.
    pub fn with_ext(&self, ext: &str) -> String {
        if self.dir.is_empty() {
            format!("{}.{}", self.basename, ext)
        } else {
            format!("{}/{}.{}", self.dir, self.basename, ext)
        }
    }

    /// Build a sibling path with `suffix` inserted before the extension.
    ///
    /// This is string construction only, no file is renamed.
    pub fn with_suffix(&self, suffix: &str) -> String {
        let mut file = format!("{}{suffix}", self.basename);
        if let Some(ext) = self.ext.as_deref().filter(|ext| !ext.is_empty()) {
            file.push('.');
            file.push_str(ext);
        }

        if self.dir.is_empty() {
            file
        } else {
            format!("{}/{file}", self.dir)
        }
    }

    /// The MIME type for this file.
    ///
    /// Resolved by content sniffing on the first call unless a type was
    /// supplied at construction; either way the result is cached and later
    /// calls return it without touching the filesystem.
    pub fn mime(&self) -> crate::Result<&str> {
        if let Some(mime) = self.mime.get() {
            return Ok(mime.as_str());
        }

        let sniffed = filetype::get_from_file(Path::new(&self.path))?;
        Ok(self.mime.get_or_init(|| sniffed.mime_type().to_owned()).as_str())
    }

    /// Create the file or update its modification time, fixing up
    /// permissions along the way.
    ///
    /// An existing read-only file is made writable first; afterwards the
    /// default permission bits are applied.
    pub fn touch(&self) -> crate::Result<()> {
        let path = Path::new(&self.path);

        if path.fs_err_try_exists()? {
            if !permissions::is_writable(path) {
                permissions::make_writable(path)?;
            }
        } else {
            debug!("touch creating {}", self.path);
        }

        fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.path.as_str())?;
        ft::set_file_mtime(path, ft::FileTime::now())?;
        permissions::set_permissions(path)?;

        Ok(())
    }

    /// Apply the default permission bits to the file.
    pub fn set_permissions(&self) -> crate::Result<()> {
        permissions::set_permissions(Path::new(&self.path))
    }

    /// Open the file in the given `fopen`-style mode (`r`, `w`, `a`, `x`,
    /// `c`, with an optional `+`), returning the handle on success.
    ///
    /// The caller owns the handle and its lifecycle. When opening fails, the
    /// failure is diagnosed into a specific error, checked in this order:
    /// exclusive-create on an existing file, write on a non-writable file,
    /// read on a non-readable file, and lastly a catch-all invalid mode.
    pub fn open(&self, mode: &str) -> crate::Result<fs::File> {
        let flags = OpenMode::parse(mode);

        if let Some(options) = open_options(mode) {
            if let Ok(handle) = options.open(self.path.as_str()) {
                return Ok(handle);
            }
        }

        let path = Path::new(&self.path);
        if flags.exclusive && path.exists() {
            return Err(Error::AlreadyExists(self.path.clone()));
        }
        if flags.write && !permissions::is_writable(path) {
            return Err(Error::NotWritable(self.path.clone()));
        }
        if flags.read && !permissions::is_readable(path) {
            return Err(Error::NotReadable(self.path.clone()));
        }
        Err(Error::InvalidMode(mode.to_owned()))
    }
}

/// Capability flags scanned from anywhere in the mode string, used for
/// failure diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenMode {
    read: bool,
    write: bool,
    exclusive: bool,
}

impl OpenMode {
    fn parse(mode: &str) -> Self {
        Self {
            read: mode.contains(['r', '+']),
            write: mode.contains(['w', 'a', 'x', 'c', '+']),
            exclusive: mode.contains('x'),
        }
    }
}

/// Translate a mode string into open options, driven by the first character.
/// Modifiers like `b` and `t` are accepted and ignored.
fn open_options(mode: &str) -> Option<fs::OpenOptions> {
    let mut options = fs::OpenOptions::new();
    let update = mode.contains('+');

    match mode.chars().next()? {
        'r' => {
            options.read(true);
            if update {
                options.write(true);
            }
        }
        'w' => {
            options.write(true).create(true).truncate(true);
            if update {
                options.read(true);
            }
        }
        'a' => {
            options.append(true).create(true);
            if update {
                options.read(true);
            }
        }
        'x' => {
            options.write(true).create_new(true);
            if update {
                options.read(true);
            }
        }
        'c' => {
            options.write(true).create(true);
            if update {
                options.read(true);
            }
        }
        _ => return None,
    }

    Some(options)
}

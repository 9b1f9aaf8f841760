//! MIME type detection for files on disk.
//!
//! Detection looks for known magic numbers at the start of the file first,
//! then falls back to the file extension, and finally to
//! `application/octet-stream`.
//! Magic number source: <https://en.wikipedia.org/wiki/List_of_file_signatures>

use std::{io::Read, path::Path};

use fs_err as fs;

/// MIME type reported when neither content nor extension match anything known.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Resolved type information for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTypeInfo {
    mime: &'static str,
}

impl FileTypeInfo {
    /// The detected MIME type.
    pub fn mime_type(&self) -> &'static str {
        self.mime
    }
}

/// Detect the MIME type of the file at `path` by sniffing its content.
///
/// Fails only if the file cannot be read; unknown content is reported as
/// [`FALLBACK_MIME`].
pub fn get_from_file(path: &Path) -> crate::Result<FileTypeInfo> {
    // 270 bytes is enough for every signature below, including the tar
    // magic at offset 257.
    let mut buf = [0; 270];
    let mut file = fs::File::open(path)?;
    let len = file.read(&mut buf)?;

    let mime = sniff(&buf[..len])
        .or_else(|| {
            let ext = path.extension()?.to_str()?;
            from_extension(ext)
        })
        .unwrap_or(FALLBACK_MIME);

    Ok(FileTypeInfo { mime })
}

fn sniff(buf: &[u8]) -> Option<&'static str> {
    fn is_png(buf: &[u8]) -> bool {
        buf.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
    }
    fn is_jpeg(buf: &[u8]) -> bool {
        buf.starts_with(&[0xFF, 0xD8, 0xFF])
    }
    fn is_gif(buf: &[u8]) -> bool {
        buf.starts_with(b"GIF8")
    }
    fn is_pdf(buf: &[u8]) -> bool {
        buf.starts_with(b"%PDF-")
    }
    fn is_zip(buf: &[u8]) -> bool {
        buf.len() >= 4
            && buf[..=1] == [0x50, 0x4B]
            && (buf[2..=3] == [0x3, 0x4] || buf[2..=3] == [0x5, 0x6] || buf[2..=3] == [0x7, 0x8])
    }
    fn is_gz(buf: &[u8]) -> bool {
        buf.starts_with(&[0x1F, 0x8B, 0x8])
    }
    fn is_bz2(buf: &[u8]) -> bool {
        buf.starts_with(&[0x42, 0x5A, 0x68])
    }
    fn is_xz(buf: &[u8]) -> bool {
        buf.starts_with(&[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00])
    }
    fn is_zst(buf: &[u8]) -> bool {
        buf.starts_with(&[0x28, 0xB5, 0x2F, 0xFD])
    }
    fn is_tar(buf: &[u8]) -> bool {
        buf.len() > 261 && buf[257..=261] == [0x75, 0x73, 0x74, 0x61, 0x72]
    }
    fn is_sevenz(buf: &[u8]) -> bool {
        buf.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C])
    }

    if is_png(buf) {
        Some("image/png")
    } else if is_jpeg(buf) {
        Some("image/jpeg")
    } else if is_gif(buf) {
        Some("image/gif")
    } else if is_pdf(buf) {
        Some("application/pdf")
    } else if is_zip(buf) {
        Some("application/zip")
    } else if is_gz(buf) {
        Some("application/gzip")
    } else if is_bz2(buf) {
        Some("application/x-bzip2")
    } else if is_xz(buf) {
        Some("application/x-xz")
    } else if is_zst(buf) {
        Some("application/zstd")
    } else if is_tar(buf) {
        Some("application/x-tar")
    } else if is_sevenz(buf) {
        Some("application/x-7z-compressed")
    } else {
        None
    }
}

fn from_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_signatures() {
        assert_eq!(
            sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00]),
            Some("image/png")
        );
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff(b"GIF89a"), Some("image/gif"));
        assert_eq!(sniff(b"%PDF-1.7"), Some("application/pdf"));
        assert_eq!(sniff(&[0x50, 0x4B, 0x03, 0x04]), Some("application/zip"));
        assert_eq!(sniff(&[0x1F, 0x8B, 0x08, 0x00]), Some("application/gzip"));
        assert_eq!(sniff(b"BZh91AY"), Some("application/x-bzip2"));
        assert_eq!(
            sniff(&[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]),
            Some("application/x-xz")
        );
        assert_eq!(sniff(&[0x28, 0xB5, 0x2F, 0xFD]), Some("application/zstd"));
    }

    #[test]
    fn sniffs_tar_magic_at_offset() {
        let mut buf = [0u8; 270];
        buf[257..262].copy_from_slice(b"ustar");
        assert_eq!(sniff(&buf), Some("application/x-tar"));
    }

    #[test]
    fn unknown_content_does_not_sniff() {
        assert_eq!(sniff(b"just some plain bytes"), None);
        assert_eq!(sniff(&[]), None);
    }

    #[test]
    fn extension_fallback_is_case_insensitive() {
        assert_eq!(from_extension("txt"), Some("text/plain"));
        assert_eq!(from_extension("JSON"), Some("application/json"));
        assert_eq!(from_extension("weird"), None);
    }
}

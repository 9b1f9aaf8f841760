//! Permission probes and fixups for paths.

use std::path::Path;

use fs_err as fs;
use log::debug;

/// Mode bits applied to regular files by [`set_permissions`].
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Mode bits applied to directories by [`set_permissions`].
pub const DEFAULT_DIR_MODE: u32 = 0o755;

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};

    let Ok(path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(path.as_ptr(), mode) == 0 }
}

/// Whether the current process may write to `path`. False for missing paths.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    access(path, libc::W_OK)
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}

/// Whether the current process may read `path`. False for missing paths.
#[cfg(unix)]
pub fn is_readable(path: &Path) -> bool {
    access(path, libc::R_OK)
}

#[cfg(not(unix))]
pub fn is_readable(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Make an existing path writable by its owner.
#[cfg(unix)]
pub fn make_writable(path: &Path) -> crate::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    let mode = permissions.mode() | 0o200;
    debug!("making {path:?} writable (mode {mode:o})");
    permissions.set_mode(mode);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_writable(path: &Path) -> crate::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

/// Apply the default permission bits to `path`: [`DEFAULT_FILE_MODE`] for
/// files, [`DEFAULT_DIR_MODE`] for directories.
#[cfg(unix)]
pub fn set_permissions(path: &Path) -> crate::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if fs::metadata(path)?.is_dir() {
        DEFAULT_DIR_MODE
    } else {
        DEFAULT_FILE_MODE
    };
    fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn set_permissions(_path: &Path) -> crate::Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o7777
    }

    #[test]
    fn make_writable_adds_the_owner_write_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.txt");
        fs::write(&path, "contents").unwrap();
        fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

        make_writable(&path).unwrap();

        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    fn set_permissions_normalizes_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "contents").unwrap();
        fs::set_permissions(&path, std::fs::Permissions::from_mode(0o777)).unwrap();

        set_permissions(&path).unwrap();
        assert_eq!(mode_of(&path), DEFAULT_FILE_MODE);

        let subdir = dir.path().join("sub");
        fs::create_dir(&subdir).unwrap();
        set_permissions(&subdir).unwrap();
        assert_eq!(mode_of(&subdir), DEFAULT_DIR_MODE);
    }

    #[test]
    fn probes_are_false_for_missing_paths() {
        assert!(!is_writable(Path::new("/definitely/not/a/real/path")));
        assert!(!is_readable(Path::new("/definitely/not/a/real/path")));
    }
}

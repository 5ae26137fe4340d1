//! Filesystem helpers for snapshot and restore
//!
//! Everything here is synchronous and works on whole directory trees.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Copy every top-level entry of `src` into `dst`, recursively
///
/// `dst` must already exist. Stops at the first failure, leaving whatever was
/// copied so far in place.
pub fn copy_entries(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        copy_tree(&entry.path(), &dst.join(entry.file_name()))?;
    }
    Ok(())
}

/// Copy a file or directory tree from `src` to `dst`
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(src)?;

    if metadata.is_dir() {
        fs::create_dir_all(dst)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dst.join(entry.file_name()))?;
        }
        return Ok(());
    }

    #[cfg(unix)]
    if metadata.file_type().is_symlink() {
        let target = fs::read_link(src)?;
        return std::os::unix::fs::symlink(target, dst);
    }

    fs::copy(src, dst).map(|_| ())
}

/// Total size in bytes of all files under `path`
///
/// Returns `None` if any part of the tree cannot be read.
pub fn dir_size(path: &Path) -> Option<u64> {
    let mut total = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.ok()?;
        if entry.file_type().is_file() {
            total += entry.metadata().ok()?.len();
        }
    }
    Some(total)
}

/// Absolute, symlink-free form of `path`, which need not exist yet
///
/// The longest existing ancestor is canonicalized and the missing tail is
/// appended as is.
pub fn resolve(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut tail: Vec<OsString> = Vec::new();

    loop {
        let candidate = if existing.as_os_str().is_empty() {
            Path::new(".")
        } else {
            existing
        };
        if let Ok(canonical) = candidate.canonicalize() {
            return tail.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Whether either path is the other or lies inside it
pub fn nested(a: &Path, b: &Path) -> bool {
    let (a, b) = (resolve(a), resolve(b));
    a.starts_with(&b) || b.starts_with(&a)
}

/// Names of the immediate children of `path`, sorted
#[cfg(test)]
pub fn entry_names(path: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_entries_preserves_structure() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("a/b/c")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("a/b/c/deep.txt"), "deep").unwrap();
        fs::create_dir_all(&dst).unwrap();

        copy_entries(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
        assert_eq!(fs::read_to_string(dst.join("a/b/c/deep.txt")).unwrap(), "deep");
    }

    #[test]
    fn test_copy_entries_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_entries(&temp.path().join("missing"), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_dir_size() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("a.txt"), vec![0u8; 100]).unwrap();
        fs::write(temp.path().join("nested/b.txt"), vec![0u8; 24]).unwrap();

        assert_eq!(dir_size(temp.path()), Some(124));
        assert_eq!(dir_size(&temp.path().join("missing")), None);
    }

    #[test]
    fn test_entry_names_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.lua"), "").unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();

        assert_eq!(entry_names(temp.path()).unwrap(), vec!["a", "b.lua"]);
    }

    #[test]
    fn test_nested_detects_either_direction() {
        let temp = TempDir::new().unwrap();
        let live = temp.path().join("WTF");
        fs::create_dir_all(&live).unwrap();

        assert!(nested(&live, &live.join("backups/Mage")));
        assert!(nested(&live.join("not-yet/x"), &live));
        assert!(nested(&temp.path().join("WTF/../WTF"), &live));
        assert!(!nested(&live, &temp.path().join("Swapper Backups")));
    }

    #[cfg(unix)]
    #[test]
    fn test_nested_sees_through_symlinks() {
        let temp = TempDir::new().unwrap();
        let live = temp.path().join("WTF");
        fs::create_dir_all(&live).unwrap();
        std::os::unix::fs::symlink(&live, temp.path().join("alias")).unwrap();

        assert!(nested(&temp.path().join("alias/backups"), &live));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}

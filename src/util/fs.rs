//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy all files under `src` matching a glob pattern into `dst`, creating
/// `dst` as needed. Existing destination files are overwritten; nothing is
/// ever deleted. Returns the destination paths of the copied files, sorted.
pub fn copy_matching(pattern: &str, src: &Path, dst: &Path) -> io::Result<Vec<PathBuf>> {
    let full_pattern = src.join(pattern);
    let matcher = glob::glob(&full_pattern.to_string_lossy())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut copied = Vec::new();
    for entry in matcher {
        let path = entry?;
        if !path.is_file() {
            continue;
        }

        // First match creates the destination tree.
        if copied.is_empty() {
            fs::create_dir_all(dst)?;
        }

        let file_name = path.file_name().unwrap_or_default();
        let dst_path = dst.join(file_name);
        fs::copy(&path, &dst_path)?;
        copied.push(dst_path);
    }

    copied.sort();
    Ok(copied)
}

/// Recursively list all regular files under a directory, sorted.
pub fn file_inventory(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Make a path absolute against the current directory, without requiring
/// it to exist. Already-absolute paths pass through unchanged.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_matching_copies_only_matches() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("headers");
        let dst = tmp.path().join("out").join("include");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("thread.h"), "#pragma once").unwrap();
        fs::write(src.join("mutex.h"), "#pragma once").unwrap();
        fs::write(src.join("notes.txt"), "not a header").unwrap();

        let copied = copy_matching("*.h", &src, &dst).unwrap();

        assert_eq!(copied.len(), 2);
        assert!(dst.join("thread.h").exists());
        assert!(dst.join("mutex.h").exists());
        assert!(!dst.join("notes.txt").exists());
    }

    #[test]
    fn test_copy_matching_no_matches_is_empty() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("empty");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();

        let copied = copy_matching("*.h", &src, &dst).unwrap();

        assert!(copied.is_empty());
        // Destination tree is only created once something matches.
        assert!(!dst.exists());
    }

    #[test]
    fn test_copy_matching_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("cond.h"), "new content").unwrap();
        fs::write(dst.join("cond.h"), "old content").unwrap();

        copy_matching("*.h", &src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("cond.h")).unwrap(),
            "new content"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_matching_surfaces_unreadable_directories() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("cond.h"), "#pragma once").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind privileged users. If the folder is
        // still readable there is nothing to assert here.
        if fs::read_dir(&src).is_ok() {
            fs::set_permissions(&src, fs::Permissions::from_mode(0o700)).unwrap();
            return;
        }

        let result = copy_matching("src/*.h", tmp.path(), &tmp.path().join("dst"));

        fs::set_permissions(&src, fs::Permissions::from_mode(0o700)).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_file_inventory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("lib")).unwrap();
        fs::write(tmp.path().join("lib/libdemo.a"), "ar").unwrap();
        fs::write(tmp.path().join("top.txt"), "x").unwrap();

        let files = file_inventory(tmp.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_absolutize() {
        let absolute = Path::new("/work/package");
        assert_eq!(absolutize(absolute), absolute);

        let relative = absolutize(Path::new("package"));
        assert!(relative.is_absolute());
        assert!(relative.ends_with("package"));
    }

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/file.ini");

        write_string(&path, "[binaries]\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[binaries]\n");
    }
}

//! # System functions
//!
//! Convenience wrappers around file system and environment queries that take an
//! opinionated stance on how to interpret errors.
use std::env;
use std::path::{Path, PathBuf};

pub trait AsString {
    fn as_string(&self) -> String;
}

impl AsString for PathBuf {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

impl AsString for Path {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

/// Returns the `HOME` path as derived from the environment, or `"."` if `HOME` is
/// not set.
pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `true` if `path` is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Returns a lexicographically-sorted list of files and directories contained
/// in `dir`, quietly discarding any I/O errors when reading the directory.
pub fn list_dir<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut entries = match dir.as_ref().read_dir() {
        Ok(entries) => entries
            .flat_map(|entry| entry.ok().map(|e| e.path()))
            .collect(),
        Err(_) => vec![],
    };
    entries.sort();
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process;

    #[test]
    fn list_dir_is_sorted() {
        let dir = env::temp_dir().join(format!("hed-sys-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.toml", "a.toml", "c.txt"] {
            fs::write(dir.join(name), "").unwrap();
        }
        assert!(is_dir(&dir));
        let names = list_dir(&dir)
            .iter()
            .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a.toml", "b.toml", "c.txt"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn list_missing_dir() {
        let dir = env::temp_dir().join(format!("hed-sys-missing-{}", process::id()));
        assert!(!is_dir(&dir));
        assert!(list_dir(&dir).is_empty());
    }
}

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Append bytes to a file, creating it (and its parent) on first write.
/// Existing bytes are never touched.
pub fn append_bytes(path: &Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(bytes)?;
    file.flush()
}

/// Write a file only if it does not exist yet. Returns true when written.
pub fn write_if_missing(path: &Path, content: &str) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    ensure_parent(path)?;
    fs::write(path, content)?;
    Ok(true)
}

/// Remove a file, treating "already gone" as success. Returns true when removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_bytes_creates_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/file.md");

        append_bytes(&path, b"first\n").unwrap();
        append_bytes(&path, b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_write_if_missing_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");

        assert!(write_if_missing(&path, "one").unwrap());
        assert!(!write_if_missing(&path, "two").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one");
    }

    #[test]
    fn test_remove_if_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "x").unwrap();

        assert!(remove_if_exists(&path).unwrap());
        assert!(!remove_if_exists(&path).unwrap());
    }
}

//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. Every
//! handle opened here is dropped before the function returns.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

/// Open an existing file for buffered reading
///
/// A missing file is reported as [`LedgerError::SourceNotFound`] so callers
/// can tell it apart from other I/O faults.
pub fn open_required<P: AsRef<Path>>(path: P) -> LedgerResult<BufReader<File>> {
    let path = path.as_ref();

    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(LedgerError::SourceNotFound(path.to_path_buf()))
        }
        Err(e) => Err(LedgerError::Io(format!(
            "Failed to open {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Path of the staging file used while rewriting `path`
pub fn temp_path_for(path: &Path) -> LedgerResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        LedgerError::Storage(format!("Not a file path: {}", path.display()))
    })?;

    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Rewrite a file atomically (write to temp, then rename)
///
/// The closure receives a buffered writer over the temp file. The target is
/// either completely replaced or left untouched.
pub fn write_atomic<P, F>(path: P, write: F) -> LedgerResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = temp_path_for(path)?;

    let result = write_and_sync(&temp_path, write).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| LedgerError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync<F>(temp_path: &Path, write: F) -> LedgerResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
{
    let file = File::create(temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    write(&mut writer)?;

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.csv");

        let err = open_required(&path).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");

        write_atomic(&path, |w| {
            w.write_all(b"header\n")?;
            Ok(())
        })
        .unwrap();

        let mut contents = String::new();
        open_required(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "header\n");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");

        write_atomic(&path, |w| {
            w.write_all(b"x\n")?;
            Ok(())
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("ledger.csv.tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_target_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");
        fs::write(&path, "original\n").unwrap();

        let result = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(LedgerError::Storage("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original\n");
        assert!(!temp_dir.path().join("ledger.csv.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("ledger.csv");

        write_atomic(&path, |_| Ok(())).unwrap();
        assert!(path.exists());
    }
}

//! Snapshot file reading and writing
//!
//! A snapshot is written to `<path>.tmp` and then renamed over `<path>`, so a
//! crash mid-write leaves the previous snapshot in place.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::{format_line, parse_snapshot, parse_snapshot_prefix, SnapshotRecord};

/// Default snapshot file name, relative to the working directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "cache_data.txt";

/// Records recovered from a snapshot that may end in a malformed line
#[derive(Debug)]
pub struct PartialSnapshot {
    /// Records before the first malformed line, in file order
    pub records: Vec<SnapshotRecord>,
    /// Parse error of the first malformed line, if any
    pub error: Option<Error>,
}

/// Read a snapshot file
///
/// # Arguments
/// * `path` - Snapshot file path
///
/// # Returns
/// * `Ok(None)` if the file does not exist
/// * `Ok(Some(records))` in file order (most-recently-used first)
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Option<Vec<SnapshotRecord>>> {
    let path = path.as_ref();
    let bytes = match read_bytes(path)? {
        Some(bytes) => bytes,
        None => return Ok(None),
    };

    let records = parse_snapshot(&bytes)?;
    debug!("Read {} records from {:?}", records.len(), path);
    Ok(Some(records))
}

/// Read a snapshot file, keeping the records before the first malformed line
///
/// Only I/O failures are returned as `Err`; a parse failure is reported in
/// [`PartialSnapshot::error`].
pub fn read_snapshot_prefix<P: AsRef<Path>>(path: P) -> Result<Option<PartialSnapshot>> {
    let path = path.as_ref();
    let bytes = match read_bytes(path)? {
        Some(bytes) => bytes,
        None => return Ok(None),
    };

    let (records, error) = parse_snapshot_prefix(&bytes);
    debug!(
        "Read {} records from {:?} (complete: {})",
        records.len(),
        path,
        error.is_none()
    );
    Ok(Some(PartialSnapshot { records, error }))
}

fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No snapshot at {:?}", path);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Write a snapshot file, replacing any previous one
///
/// On failure the temporary file is removed and any previous snapshot is
/// left untouched.
///
/// # Arguments
/// * `path` - Snapshot file path
/// * `records` - Entries in most-recently-used-first order
///
/// # Returns
/// * `Result<usize>` - Number of records written
pub fn write_snapshot<P, I>(path: P, records: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = SnapshotRecord>,
{
    let path = path.as_ref();
    let tmp_path = temp_path(path);

    let written = write_temp(&tmp_path, records).and_then(|count| {
        fs::rename(&tmp_path, path)?;
        Ok(count)
    });
    match written {
        Ok(count) => {
            debug!("Wrote {} records to {:?}", count, path);
            Ok(count)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    debug!("Could not remove {:?}: {}", tmp_path, cleanup);
                }
            }
            Err(e)
        }
    }
}

fn write_temp<I>(tmp_path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = SnapshotRecord>,
{
    let mut writer = BufWriter::new(File::create(tmp_path)?);
    let mut count = 0;
    for record in records {
        writer.write_all(format_line(&record).as_bytes())?;
        count += 1;
    }
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(count)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rec(key: i32, value: i32, priority: i32) -> SnapshotRecord {
        SnapshotRecord {
            key,
            value,
            priority,
        }
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_snapshot(dir.path().join("absent.txt")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILE);
        let records = vec![rec(3, 30, 1), rec(2, 20, 3), rec(1, 10, 2)];

        let written = write_snapshot(&path, records.clone()).unwrap();
        assert_eq!(written, 3);

        let read = read_snapshot(&path).unwrap().unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn test_write_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");

        write_snapshot(&path, vec![rec(2, 20, 1), rec(-1, 5, 3)]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "2 20 1\n-1 5 3\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_replaces_previous() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");

        write_snapshot(&path, vec![rec(1, 1, 1), rec(2, 2, 2)]).unwrap();
        write_snapshot(&path, vec![rec(9, 9, 9)]).unwrap();

        let read = read_snapshot(&path).unwrap().unwrap();
        assert_eq!(read, vec![rec(9, 9, 9)]);
    }

    #[test]
    fn test_write_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");

        assert_eq!(write_snapshot(&path, Vec::new()).unwrap(), 0);
        assert_eq!(read_snapshot(&path).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");
        fs::write(&path, "1 10 1\nnot a record\n").unwrap();

        assert!(read_snapshot(&path).is_err());
    }

    #[test]
    fn test_read_prefix_keeps_valid_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.txt");
        fs::write(&path, "1 10 1\n2 20 2\n3 30 3\ngarbage\n").unwrap();

        let partial = read_snapshot_prefix(&path).unwrap().unwrap();
        assert_eq!(partial.records, vec![rec(1, 10, 1), rec(2, 20, 2), rec(3, 30, 3)]);
        assert!(partial.error.unwrap().to_string().contains("line 4"));

        assert!(read_snapshot_prefix(dir.path().join("absent.txt"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the final rename fail
        let path = dir.path().join("snap");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(write_snapshot(&path, vec![rec(1, 10, 1)]).is_err());
        assert!(!temp_path(&path).exists());
        assert!(path.join("keep").exists());
    }
}

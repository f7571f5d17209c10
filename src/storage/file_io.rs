//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. Whole-file
//! rewrites go to a temp file in the same directory and are renamed over the
//! original.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BankError;

/// Read a text file as lines, returning an empty list if the file doesn't exist
///
/// Line terminators are removed; no other trimming happens.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, BankError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| BankError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BankError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Replace a text file with `lines`, one per line, atomically
pub fn write_lines_atomic<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<(), BankError> {
    let path = path.as_ref();
    write_atomic(path, |writer| {
        for line in lines {
            writeln!(writer, "{}", line)
                .map_err(|e| BankError::Storage(format!("Failed to write data: {}", e)))?;
        }
        Ok(())
    })
}

/// Append a single line to a text file, creating it if needed
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), BankError> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BankError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    writeln!(file, "{}", line)
        .map_err(|e| BankError::Io(format!("Failed to append to {}: {}", path.display(), e)))?;

    file.flush()
        .map_err(|e| BankError::Io(format!("Failed to flush {}: {}", path.display(), e)))
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, BankError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| BankError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| BankError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BankError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| BankError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

fn ensure_parent(path: &Path) -> Result<(), BankError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                BankError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic<F>(path: &Path, fill: F) -> Result<(), BankError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), BankError>,
{
    ensure_parent(path)?;

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| BankError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = fill(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| BankError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| BankError::Storage(format!("Failed to sync data: {}", e)))
    });

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BankError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let lines = read_lines(temp_dir.path().join("missing.txt")).unwrap();
        assert!(lines.is_empty());

        let data: TestData = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");

        let lines = vec!["first".to_string(), "second".to_string()];
        write_lines_atomic(&path, &lines).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert_eq!(read_lines(&path).unwrap(), lines);
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");

        write_lines_atomic(&path, &["a".to_string(), "b".to_string()]).unwrap();
        write_lines_atomic(&path, &["c".to_string()]).unwrap();

        assert_eq!(read_lines(&path).unwrap(), vec!["c".to_string()]);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");

        write_lines_atomic(&path, &["x".to_string()]).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("ledger.txt.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_append_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.txt");

        append_line(&path, "one").unwrap();
        append_line(&path, "two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_read_json_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let result: Result<TestData, _> = read_json(&path);
        assert!(matches!(result, Err(BankError::Storage(_))));
    }
}

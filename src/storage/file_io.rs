//! File I/O utilities with atomic writes
//!
//! A write either replaces the whole file or leaves the previous contents
//! untouched.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

/// Map an I/O failure on `path` into a storage error naming the step
fn failed<'a>(step: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> FinanceError + 'a {
    move |e| FinanceError::Storage(format!("Failed to {} {}: {}", step, path.display(), e))
}

/// Read a JSON document, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(failed("open", path)(e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| FinanceError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace `path` with the JSON form of `data`
///
/// The document is serialized in memory, written and synced to a sibling
/// temp file, then renamed over the target. Any failure leaves the target as
/// it was and removes the temp file.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(data).map_err(|e| {
        FinanceError::Storage(format!("Failed to serialize {}: {}", path.display(), e))
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(failed("create directory for", path))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let written = write_synced(&temp_path, &bytes)
        .map_err(failed("write", &temp_path))
        .and_then(|()| fs::rename(&temp_path, path).map_err(failed("replace", path)));

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
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
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: TestData = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
        assert!(!temp_dir.path().join("nested").join("test.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    #[test]
    fn test_failed_serialization_keeps_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let data = TestData {
            name: "kept".to_string(),
            value: 7,
        };
        write_json_atomic(&path, &data).unwrap();

        let err = write_json_atomic(&path, &Unserializable).unwrap_err();

        assert!(matches!(err, FinanceError::Storage(_)));
        assert_eq!(read_json::<TestData, _>(&path).unwrap(), data);
        assert!(!temp_dir.path().join("ledger.json.tmp").exists());
    }

    #[test]
    fn test_failed_replace_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in the way makes the final rename fail
        let path = temp_dir.path().join("ledger.json");
        fs::create_dir(&path).unwrap();

        let err = write_json_atomic(&path, &TestData::default()).unwrap_err();

        assert!(err.to_string().contains("Failed to replace"));
        assert!(path.is_dir());
        assert!(!temp_dir.path().join("ledger.json.tmp").exists());
    }
}

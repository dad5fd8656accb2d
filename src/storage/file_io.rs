//! File I/O helpers
//!
//! Dataset files are only ever read. The one thing finboard writes is its
//! own settings file, and that write is atomic (temp file, then rename).

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinboardError;

/// On-disk format of a dataset, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Csv,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self, FinboardError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("csv") => Ok(Self::Csv),
            _ => Err(FinboardError::Storage(format!(
                "Unsupported dataset format for {} (expected .json, .yaml, .yml or .csv)",
                path.display()
            ))),
        }
    }
}

/// Open a file for buffered reading, failing if it doesn't exist
pub fn open_required(path: &Path) -> Result<BufReader<File>, FinboardError> {
    if !path.exists() {
        return Err(FinboardError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)
        .map_err(|e| FinboardError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    Ok(BufReader::new(file))
}

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, FinboardError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    read_json_required(path)
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, FinboardError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = open_required(path)?;
    serde_json::from_reader(reader).map_err(|e| {
        FinboardError::Json(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Read YAML from a file that must exist
pub fn read_yaml_required<T, P>(path: P) -> Result<T, FinboardError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = open_required(path)?;
    serde_yaml::from_reader(reader).map_err(|e| {
        FinboardError::Yaml(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinboardError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinboardError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinboardError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinboardError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(&PathBuf::from("a.json")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(&PathBuf::from("a.YML")).unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(&PathBuf::from("a.csv")).unwrap(), DataFormat::Csv);
        assert!(DataFormat::from_path(&PathBuf::from("a.txt")).is_err());
        assert!(DataFormat::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Sample::default());
        assert!(read_json_required::<Sample, _>(temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");
        let data = Sample {
            name: "test".into(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("test.json.tmp").exists());

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_read_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.yaml");
        fs::write(&path, "name: test\nvalue: 7\n").unwrap();

        let loaded: Sample = read_yaml_required(&path).unwrap();
        assert_eq!(loaded.value, 7);
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json_required::<Sample, _>(&path).unwrap_err();
        assert!(matches!(err, FinboardError::Json(_)));
    }
}

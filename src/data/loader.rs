//! Reading log files from disk

use crate::core::error::{LogPulseError, Result};
use crate::data::dataset::Dataset;
use rustc_hash::FxHasher;
use std::fs;
use std::hash::Hasher;
use std::path::Path;

/// Read a log file, mapping a missing path to `FileNotFound`
pub fn read_log_file(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(LogPulseError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read(path)?)
}

/// Content fingerprint used to key the dataset cache
pub fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_usize(bytes.len());
    hasher.write(bytes);
    hasher.finish()
}

/// Parse already-read CSV bytes into a dataset named after the file
pub fn parse_log_bytes(path: &Path, bytes: &[u8]) -> Result<Dataset> {
    Dataset::from_reader(dataset_name(path), bytes)
}

/// Read and parse a CSV log file
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let bytes = read_log_file(path)?;
    parse_log_bytes(path, &bytes)
}

fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_load_csv_from_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"event_type,blocked\nDOS_ATTACK,True\nNORMAL,False\n")?;

        let dataset = load_csv(file.path())?;
        assert_eq!(dataset.row_count(), 2);
        assert!(dataset.has_column("blocked"));

        let expected_name = file.path().file_name().unwrap().to_string_lossy();
        assert_eq!(dataset.name(), expected_name);
        Ok(())
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv(Path::new("definitely_missing_log_file.csv"));
        match result {
            Err(LogPulseError::FileNotFound(path)) => {
                assert!(path.contains("definitely_missing_log_file.csv"))
            }
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_not_a_log_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_log_file(dir.path()),
            Err(LogPulseError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        assert_eq!(fingerprint(b"a,b\n1,2\n"), fingerprint(b"a,b\n1,2\n"));
        assert_ne!(fingerprint(b"a,b\n1,2\n"), fingerprint(b"a,b\n1,3\n"));
        assert_ne!(fingerprint(b""), fingerprint(b"\0"));
    }
}

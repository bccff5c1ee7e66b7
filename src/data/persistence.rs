use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --data-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load/save operations.
pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

pub fn get_file_path(name: &str) -> Result<PathBuf> {
    let dir = get_data_dir()?;
    Ok(dir.join(name))
}

/// JSON-backed whole-file persistence. Loading fails closed: a missing or
/// unparsable file yields `Default` rather than an error, so a corrupt data
/// file can never prevent startup. Saving overwrites the full file.
pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;

    fn load() -> Self {
        match get_file_path(Self::filename()) {
            Ok(path) => load_path(&path),
            Err(_) => Self::default(),
        }
    }

    fn save(&self) -> Result<()> {
        let path = get_file_path(Self::filename())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("failed to serialize JSON")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Load from an explicit directory, bypassing the global `DATA_DIR`.
    fn load_from(dir: &Path) -> Self {
        load_path(&dir.join(Self::filename()))
    }

    /// Save to an explicit directory, bypassing the global `DATA_DIR`.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = serde_json::to_string_pretty(self).context("failed to serialize JSON")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

fn load_path<T: Persistable>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestData {
        value: String,
    }

    impl Persistable for TestData {
        fn filename() -> &'static str {
            "test_data.json"
        }
    }

    #[test]
    fn test_get_data_dir_returns_a_path() {
        // When DATA_DIR is unset the fallback is cwd/config.
        // When it IS set (by a prior test run), it returns that value.
        // Either way a valid PathBuf should be returned.
        let result = get_data_dir();
        assert!(result.is_ok());
    }

    #[test]
    fn test_get_file_path_appends_filename() {
        let path = get_file_path("my_file.json").unwrap();
        assert!(path.ends_with("my_file.json"));
    }

    #[test]
    fn test_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let data = TestData {
            value: "round-trip".to_string(),
        };
        data.save_to(tmp.path()).unwrap();
        let loaded = TestData::load_from(tmp.path());
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result = TestData::load_from(tmp.path());
        assert_eq!(result, TestData::default());
    }

    #[test]
    fn test_load_from_returns_default_for_malformed_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test_data.json"), "{not json at all").unwrap();
        let result = TestData::load_from(tmp.path());
        assert_eq!(result, TestData::default());
    }

    #[test]
    fn test_load_from_returns_default_for_wrong_shape() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test_data.json"), r#"[1, 2, 3]"#).unwrap();
        let result = TestData::load_from(tmp.path());
        assert_eq!(result, TestData::default());
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let data = TestData {
            value: "nested".to_string(),
        };
        data.save_to(&nested).unwrap();
        let loaded = TestData::load_from(&nested);
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_to_overwrites_previous_content() {
        let tmp = TempDir::new().unwrap();
        let first = TestData {
            value: "first".to_string(),
        };
        first.save_to(tmp.path()).unwrap();
        let second = TestData {
            value: "second".to_string(),
        };
        second.save_to(tmp.path()).unwrap();
        let loaded = TestData::load_from(tmp.path());
        assert_eq!(loaded, second);
    }

    #[test]
    fn test_event_store_save_to_load_from() {
        use crate::data::event::{Event, EventStore};
        let tmp = TempDir::new().unwrap();
        let mut store = EventStore::default();
        store.add(
            "2025-06-01",
            Event {
                name: "Conference".to_string(),
                time: Some("9:00 AM".to_string()),
            },
        );
        store.save_to(tmp.path()).unwrap();
        let loaded = EventStore::load_from(tmp.path());
        assert_eq!(loaded, store);
    }
}

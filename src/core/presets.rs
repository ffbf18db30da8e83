/*
 * Persistence for named filter specifications ("presets"). A preset is one
 * JSON file under `<app config dir>/filters/`, wrapping the specification
 * together with the time it was saved. The filter dialog uses presets to
 * offer previously saved filter sets.
 *
 * A trait (`FilterPresetManagerOperations`) abstracts the storage so the
 * dialog and the tests can inject alternatives; `CoreFilterPresetManager` is
 * the file-backed implementation.
 */
use super::filter_spec::FilterSpecification;
use super::path_utils;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use time::OffsetDateTime;

pub const PRESET_FILE_EXTENSION: &str = "json";
const PRESETS_SUBFOLDER_NAME: &str = "filters";

#[derive(Debug)]
pub enum PresetError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoConfigDirectory,
    PresetNotFound(String),
    InvalidPresetName(String),
}

impl From<io::Error> for PresetError {
    fn from(err: io::Error) -> Self {
        PresetError::Io(err)
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        PresetError::Serde(err)
    }
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetError::Io(e) => write!(f, "I/O error: {e}"),
            PresetError::Serde(e) => write!(f, "Serialization/Deserialization error: {e}"),
            PresetError::NoConfigDirectory => {
                write!(f, "Could not determine config directory for filter presets")
            }
            PresetError::PresetNotFound(name) => write!(f, "Filter preset not found: {name}"),
            PresetError::InvalidPresetName(name) => write!(
                f,
                "Invalid filter preset name: {name}. Contains invalid characters or is empty."
            ),
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::Io(e) => Some(e),
            PresetError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PresetError>;

// Preset names become file names; strip everything that is not safe there.
pub fn sanitize_preset_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

// The on-disk shape of one preset file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreset {
    #[serde(with = "time::serde::rfc3339")]
    saved_at: OffsetDateTime,
    specification: FilterSpecification,
}

pub trait FilterPresetManagerOperations: Send + Sync {
    /*
     * Saves a specification under the given preset name, overwriting any
     * existing preset of that name.
     */
    fn save_preset(
        &self,
        name: &str,
        specification: &FilterSpecification,
        app_name: &str,
    ) -> Result<()>;

    /*
     * Loads the preset with the given name. The returned specification
     * always carries the preset name it was stored under.
     */
    fn load_preset(&self, name: &str, app_name: &str) -> Result<FilterSpecification>;

    // Lists the names of all stored presets, sorted alphabetically.
    fn list_presets(&self, app_name: &str) -> Result<Vec<String>>;

    fn delete_preset(&self, name: &str, app_name: &str) -> Result<()>;

    // The directory presets are stored in, if it can be determined.
    fn get_preset_dir_path(&self, app_name: &str) -> Option<PathBuf>;
}

pub struct CoreFilterPresetManager {
    // Tests (and portable installs) can pin storage to an explicit directory
    // instead of the per-user config location.
    storage_override: Option<PathBuf>,
}

impl CoreFilterPresetManager {
    pub fn new() -> Self {
        CoreFilterPresetManager {
            storage_override: None,
        }
    }

    pub fn with_storage_dir(dir: PathBuf) -> Self {
        CoreFilterPresetManager {
            storage_override: Some(dir),
        }
    }

    fn preset_storage_dir(&self, app_name: &str) -> Option<PathBuf> {
        let base = match &self.storage_override {
            Some(dir) => dir.clone(),
            None => path_utils::get_base_app_config_local_dir(app_name)?,
        };
        let presets_path = base.join(PRESETS_SUBFOLDER_NAME);
        if !presets_path.exists() {
            if let Err(e) = fs::create_dir_all(&presets_path) {
                log::error!(
                    "CoreFilterPresetManager: Failed to create preset directory {presets_path:?}: {e}"
                );
                return None;
            }
            log::debug!("CoreFilterPresetManager: Created preset directory: {presets_path:?}");
        }
        Some(presets_path)
    }

    fn preset_file_path(&self, name: &str, app_name: &str) -> Result<PathBuf> {
        let sanitized = sanitize_preset_name(name);
        if sanitized.is_empty() {
            return Err(PresetError::InvalidPresetName(name.to_string()));
        }
        let dir = self
            .preset_storage_dir(app_name)
            .ok_or(PresetError::NoConfigDirectory)?;
        Ok(dir.join(format!("{sanitized}.{PRESET_FILE_EXTENSION}")))
    }
}

impl Default for CoreFilterPresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPresetManagerOperations for CoreFilterPresetManager {
    fn save_preset(
        &self,
        name: &str,
        specification: &FilterSpecification,
        app_name: &str,
    ) -> Result<()> {
        log::trace!("CoreFilterPresetManager: Saving preset '{name}' for app '{app_name}'");
        let file_path = self.preset_file_path(name, app_name)?;

        let stored = StoredPreset {
            saved_at: OffsetDateTime::now_utc(),
            specification: specification.with_name(name),
        };

        let file = File::create(&file_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &stored)?;
        log::debug!("CoreFilterPresetManager: Saved preset '{name}' to {file_path:?}");
        Ok(())
    }

    fn load_preset(&self, name: &str, app_name: &str) -> Result<FilterSpecification> {
        log::trace!("CoreFilterPresetManager: Loading preset '{name}' for app '{app_name}'");
        let file_path = self.preset_file_path(name, app_name)?;
        if !file_path.exists() {
            return Err(PresetError::PresetNotFound(name.to_string()));
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let stored: StoredPreset = serde_json::from_reader(reader)?;
        log::debug!(
            "CoreFilterPresetManager: Loaded preset '{name}' (saved at {})",
            stored.saved_at
        );
        Ok(stored.specification.with_name(name))
    }

    fn list_presets(&self, app_name: &str) -> Result<Vec<String>> {
        let dir = self
            .preset_storage_dir(app_name)
            .ok_or(PresetError::NoConfigDirectory)?;

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(PRESET_FILE_EXTENSION)
            {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_preset(&self, name: &str, app_name: &str) -> Result<()> {
        let file_path = self.preset_file_path(name, app_name)?;
        if !file_path.exists() {
            return Err(PresetError::PresetNotFound(name.to_string()));
        }
        fs::remove_file(&file_path)?;
        log::debug!("CoreFilterPresetManager: Deleted preset '{name}' at {file_path:?}");
        Ok(())
    }

    fn get_preset_dir_path(&self, app_name: &str) -> Option<PathBuf> {
        self.preset_storage_dir(app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{ComparisonMode, Filter, FrameField, StringFilter};
    use tempfile::tempdir;

    const TEST_APP_NAME: &str = "FrameFilterPresetTests";

    fn sample_spec() -> FilterSpecification {
        FilterSpecification::new(vec![Filter::String(StringFilter::new(
            ComparisonMode::Contains,
            FrameField::FullName,
            "com.foo",
        ))])
    }

    #[test]
    fn test_save_and_load_round_trip() {
        crate::initialize_logging();
        let dir = tempdir().unwrap();
        let manager = CoreFilterPresetManager::with_storage_dir(dir.path().to_path_buf());

        manager
            .save_preset("hot-paths", &sample_spec(), TEST_APP_NAME)
            .expect("save should succeed");

        let loaded = manager
            .load_preset("hot-paths", TEST_APP_NAME)
            .expect("load should succeed");
        assert_eq!(loaded.name(), Some("hot-paths"));
        assert_eq!(loaded.filters(), sample_spec().filters());
        assert!(loaded.is_filtering());
    }

    #[test]
    fn test_saved_file_records_timestamp() {
        let dir = tempdir().unwrap();
        let manager = CoreFilterPresetManager::with_storage_dir(dir.path().to_path_buf());
        manager
            .save_preset("stamped", &sample_spec(), TEST_APP_NAME)
            .unwrap();

        let file_path = manager
            .get_preset_dir_path(TEST_APP_NAME)
            .unwrap()
            .join("stamped.json");
        let raw = std::fs::read_to_string(file_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(
            value.get("saved_at").and_then(|v| v.as_str()).is_some(),
            "preset file should carry an RFC 3339 saved_at field"
        );
    }

    #[test]
    fn test_list_presets_sorted() {
        let dir = tempdir().unwrap();
        let manager = CoreFilterPresetManager::with_storage_dir(dir.path().to_path_buf());
        manager
            .save_preset("zeta", &sample_spec(), TEST_APP_NAME)
            .unwrap();
        manager
            .save_preset("alpha", &sample_spec(), TEST_APP_NAME)
            .unwrap();

        let names = manager.list_presets(TEST_APP_NAME).unwrap();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_load_missing_preset_fails() {
        let dir = tempdir().unwrap();
        let manager = CoreFilterPresetManager::with_storage_dir(dir.path().to_path_buf());
        match manager.load_preset("nope", TEST_APP_NAME) {
            Err(PresetError::PresetNotFound(name)) => assert_eq!(name, "nope"),
            other => panic!("Expected PresetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_preset_removes_it() {
        let dir = tempdir().unwrap();
        let manager = CoreFilterPresetManager::with_storage_dir(dir.path().to_path_buf());
        manager
            .save_preset("ephemeral", &sample_spec(), TEST_APP_NAME)
            .unwrap();
        manager.delete_preset("ephemeral", TEST_APP_NAME).unwrap();

        assert!(manager.list_presets(TEST_APP_NAME).unwrap().is_empty());
        match manager.delete_preset("ephemeral", TEST_APP_NAME) {
            Err(PresetError::PresetNotFound(_)) => {}
            other => panic!("Expected PresetNotFound on second delete, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_preset_name_is_rejected() {
        let dir = tempdir().unwrap();
        let manager = CoreFilterPresetManager::with_storage_dir(dir.path().to_path_buf());
        match manager.save_preset("///", &sample_spec(), TEST_APP_NAME) {
            Err(PresetError::InvalidPresetName(_)) => {}
            other => panic!("Expected InvalidPresetName, got {other:?}"),
        }
    }

    #[test]
    fn test_sanitize_preset_name() {
        assert_eq!(sanitize_preset_name("hot paths!"), "hotpaths");
        assert_eq!(sanitize_preset_name("a_b-c.json"), "a_b-cjson");
        assert_eq!(sanitize_preset_name("  "), "");
    }
}

//! Per-user configuration store
//!
//! Resolves `<home>/jsdr.config`, loads it or seeds sentinel defaults on
//! first run, and writes the whole document back on request.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::common::types::{Position, Size};
use crate::config::ConfigDocument;

/// Error type for configuration store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory is known, so no config path can be built.
    #[error("no user home directory in the environment")]
    NoUserContext,

    /// `store` was called before a config path was resolved.
    #[error("config path has not been resolved")]
    Unresolved,

    /// Geometry was requested before a document was loaded or seeded.
    #[error("config document has not been loaded")]
    NotLoaded,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file content is not a valid config document.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Successful outcome of [`ConfigStore::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Document read from an existing file
    Loaded,
    /// No file yet; defaults seeded in memory, nothing written
    Initialized,
}

/// Where the config file lives
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigPath {
    #[default]
    Unresolved,
    Resolved(PathBuf),
}

/// Snapshot of the main window geometry. Mutating it does not touch the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayProperties {
    pub position: Position,
    pub size: Size,
}

impl DisplayProperties {
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }
}

/// Owner of the configuration document and its file location
#[derive(Debug, Default)]
pub struct ConfigStore {
    path: ConfigPath,
    document: Option<ConfigDocument>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Home directory from a raw environment value; empty counts as absent
    pub fn home_from(value: Option<OsString>) -> Option<PathBuf> {
        value.filter(|value| !value.is_empty()).map(PathBuf::from)
    }

    /// Load the document using the home directory from the environment
    pub fn load(&mut self) -> Result<LoadStatus, ConfigError> {
        let home = Self::home_from(std::env::var_os(crate::constants::config::HOME_ENV_VAR));
        self.load_with_home(home)
    }

    /// Load the document relative to `home`.
    ///
    /// The path is resolved on the first call that has a home directory and
    /// is reused by every later call, whatever `home` is passed then.
    pub fn load_with_home(&mut self, home: Option<PathBuf>) -> Result<LoadStatus, ConfigError> {
        let config_path = self.resolve(home)?;

        let exists = config_path.try_exists().map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;

        if !exists {
            warn!(
                "Config file not found at {:?}, using default display values",
                config_path
            );
            self.set_default_config_values();
            return Ok(LoadStatus::Initialized);
        }

        let contents = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;

        let document =
            ConfigDocument::from_json(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;

        info!("Loaded config from {:?}", config_path);
        self.document = Some(document);
        Ok(LoadStatus::Loaded)
    }

    fn resolve(&mut self, home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let ConfigPath::Resolved(path) = &self.path {
            return Ok(path.clone());
        }

        let Some(home) = home else {
            warn!("No user home directory available, config will not be persisted");
            return Err(ConfigError::NoUserContext);
        };

        let path = home.join(crate::constants::config::FILENAME);
        debug!("Resolved config path {:?}", path);
        self.path = ConfigPath::Resolved(path.clone());
        Ok(path)
    }

    /// Write the whole in-memory document to the config file
    pub fn store(&self) -> Result<(), ConfigError> {
        let ConfigPath::Resolved(config_path) = &self.path else {
            return Err(ConfigError::Unresolved);
        };
        let document = self.document.as_ref().ok_or(ConfigError::NotLoaded)?;

        let json_string = document.to_json().map_err(ConfigError::Serialize)?;

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(config_path, json_string).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;

        info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Seed every known setting with its default
    pub fn set_default_config_values(&mut self) {
        self.set_default_display_values();
    }

    /// Seed the main window geometry with the toolkit sentinels
    pub fn set_default_display_values(&mut self) {
        self.document
            .get_or_insert_with(ConfigDocument::default)
            .set_default_display_values();
    }

    /// Copy of the stored main window geometry
    pub fn display_properties(&self) -> Result<DisplayProperties, ConfigError> {
        let document = self.document.as_ref().ok_or(ConfigError::NotLoaded)?;
        let frame = &document.main_frame;
        Ok(DisplayProperties::new(frame.position, frame.size))
    }

    /// Record new main window geometry in the document (not yet on disk)
    pub fn set_display_properties(&mut self, props: DisplayProperties) -> Result<(), ConfigError> {
        let document = self.document.as_mut().ok_or(ConfigError::NotLoaded)?;
        document.main_frame.position = props.position;
        document.main_frame.size = props.size;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.path {
            ConfigPath::Resolved(path) => Some(path),
            ConfigPath::Unresolved => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    #[cfg(test)]
    pub fn document(&self) -> Option<&ConfigDocument> {
        self.document.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "mainFrame": {
    "position": { "x": 120, "y": 45 },
    "size": { "width": 800, "height": 600 }
  }
}"#;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("jsdr.config");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), SAMPLE);

        let mut store = ConfigStore::new();
        let status = store.load_with_home(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(status, LoadStatus::Loaded);
        let props = store.display_properties().unwrap();
        assert_eq!(props.position, Position::new(120, 45));
        assert_eq!(props.size, Size::new(800, 600));
    }

    #[test]
    fn test_height_is_read_from_height_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), SAMPLE);

        let mut store = ConfigStore::new();
        store.load_with_home(Some(temp_dir.path().to_path_buf())).unwrap();

        let props = store.display_properties().unwrap();
        assert_eq!(props.size.width, 800);
        assert_eq!(props.size.height, 600);
    }

    #[test]
    fn test_missing_file_initializes_without_writing() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut store = ConfigStore::new();
        let status = store.load_with_home(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(status, LoadStatus::Initialized);
        assert!(!temp_dir.path().join("jsdr.config").exists());
        let props = store.display_properties().unwrap();
        assert_eq!(props.position, Position::UNSPECIFIED);
        assert_eq!(props.size, Size::UNSPECIFIED);
    }

    #[test]
    fn test_no_home_leaves_store_empty() {
        let mut store = ConfigStore::new();
        let result = store.load_with_home(None);

        assert!(matches!(result, Err(ConfigError::NoUserContext)));
        assert!(store.path().is_none());
        assert!(!store.is_loaded());
        assert!(matches!(
            store.display_properties(),
            Err(ConfigError::NotLoaded)
        ));
    }

    #[test]
    fn test_store_before_load_fails_without_side_effects() {
        let store = ConfigStore::new();
        assert!(matches!(store.store(), Err(ConfigError::Unresolved)));
    }

    #[test]
    fn test_store_after_no_user_context_fails() {
        let mut store = ConfigStore::new();
        let _ = store.load_with_home(None);
        store.set_default_config_values();
        assert!(matches!(store.store(), Err(ConfigError::Unresolved)));
    }

    #[test]
    fn test_store_round_trips_initialized_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let home = temp_dir.path().to_path_buf();

        let mut store = ConfigStore::new();
        store.load_with_home(Some(home.clone())).unwrap();
        store.store().unwrap();

        let mut reloaded = ConfigStore::new();
        assert_eq!(
            reloaded.load_with_home(Some(home)).unwrap(),
            LoadStatus::Loaded
        );
        assert_eq!(reloaded.document(), store.document());
    }

    #[test]
    fn test_store_round_trips_updated_geometry() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), r#"{"radio": {"device": "rtlsdr"}}"#);
        let home = temp_dir.path().to_path_buf();

        let mut store = ConfigStore::new();
        store.load_with_home(Some(home.clone())).unwrap();
        let updated = DisplayProperties::new(Position::new(10, 20), Size::new(1024, 768));
        store.set_display_properties(updated).unwrap();
        store.store().unwrap();

        let mut reloaded = ConfigStore::new();
        reloaded.load_with_home(Some(home)).unwrap();
        assert_eq!(reloaded.display_properties().unwrap(), updated);
        let extra = &reloaded.document().unwrap().extra;
        assert_eq!(extra["radio"]["device"], "rtlsdr");
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), SAMPLE);

        let mut store = ConfigStore::new();
        store.load_with_home(Some(temp_dir.path().to_path_buf())).unwrap();

        let mut props = store.display_properties().unwrap();
        props.size.height = 1;
        assert_eq!(store.display_properties().unwrap().size.height, 600);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), "not valid json!!!");

        let mut store = ConfigStore::new();
        let result = store.load_with_home(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        assert!(!store.is_loaded());
        assert!(store.path().is_some());
        assert!(matches!(store.store(), Err(ConfigError::NotLoaded)));
    }

    #[test]
    fn test_malformed_file_can_be_repaired() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "{ broken");

        let mut store = ConfigStore::new();
        assert!(store.load_with_home(Some(temp_dir.path().to_path_buf())).is_err());
        store.set_default_config_values();
        store.store().unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert!(ConfigDocument::from_json(&contents).is_ok());
    }

    #[test]
    fn test_path_is_joined_and_fixed_after_resolution() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let mut store = ConfigStore::new();
        store.load_with_home(Some(first.path().to_path_buf())).unwrap();
        assert_eq!(store.path(), Some(first.path().join("jsdr.config").as_path()));

        store.load_with_home(Some(second.path().to_path_buf())).unwrap();
        store.load_with_home(None).unwrap();
        assert_eq!(store.path(), Some(first.path().join("jsdr.config").as_path()));
    }

    #[test]
    fn test_set_display_properties_requires_document() {
        let mut store = ConfigStore::new();
        let result = store.set_display_properties(DisplayProperties::default());
        assert!(matches!(result, Err(ConfigError::NotLoaded)));
    }

    #[test]
    fn test_set_default_display_values_resets_geometry() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_config(temp_dir.path(), SAMPLE);

        let mut store = ConfigStore::new();
        store.load_with_home(Some(temp_dir.path().to_path_buf())).unwrap();
        store.set_default_display_values();

        let props = store.display_properties().unwrap();
        assert_eq!(props, DisplayProperties::default());
    }

    #[test]
    fn test_home_from_treats_empty_as_absent() {
        assert_eq!(ConfigStore::home_from(None), None);
        assert_eq!(ConfigStore::home_from(Some(OsString::new())), None);
        assert_eq!(
            ConfigStore::home_from(Some(OsString::from("/home/radio"))),
            Some(PathBuf::from("/home/radio"))
        );
    }

    #[test]
    fn test_load_reads_home_from_environment() {
        let expected = ConfigStore::home_from(std::env::var_os(
            crate::constants::config::HOME_ENV_VAR,
        ));

        let mut store = ConfigStore::new();
        let result = store.load();

        match expected {
            Some(home) => {
                assert!(!matches!(result, Err(ConfigError::NoUserContext)));
                assert_eq!(store.path(), Some(home.join("jsdr.config").as_path()));
            }
            None => {
                assert!(matches!(result, Err(ConfigError::NoUserContext)));
                assert!(store.path().is_none());
            }
        }
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("jsdr.config")).unwrap();

        let mut store = ConfigStore::new();
        let result = store.load_with_home(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_failed_reload_keeps_earlier_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let home = temp_dir.path().to_path_buf();
        let path = write_config(&home, SAMPLE);

        let mut store = ConfigStore::new();
        store.load_with_home(Some(home.clone())).unwrap();
        let loaded = store.display_properties().unwrap();

        fs::write(&path, "{ broken").unwrap();
        let result = store.load_with_home(Some(home.clone()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        assert_eq!(store.display_properties().unwrap(), loaded);

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        let result = store.load_with_home(Some(home));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert_eq!(store.display_properties().unwrap(), loaded);
    }

    #[cfg(unix)]
    #[test]
    fn test_home_that_is_a_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let not_a_dir = temp_dir.path().join("home");
        fs::write(&not_a_dir, "").unwrap();

        let mut store = ConfigStore::new();
        let result = store.load_with_home(Some(not_a_dir));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert!(!store.is_loaded());
    }
}

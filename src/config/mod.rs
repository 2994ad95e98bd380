//! Configuration management
//!
//! Loads and persists the per-user JSON document holding the main window
//! geometry.

pub mod document;
pub mod store;

pub use document::ConfigDocument;
pub use store::{ConfigError, ConfigStore, DisplayProperties, LoadStatus};

//! In-memory mirror of the JSON configuration document
//!
//! The document is an order-irrelevant mapping. Only the main window
//! geometry is typed; any other keys found on disk are carried through
//! untouched so a store never drops foreign content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::types::{Position, Size};

/// Geometry of the application's main window as stored on disk
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MainFrameSection {
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whole configuration document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(rename = "mainFrame", default)]
    pub main_frame: MainFrameSection,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Pretty-printed JSON with a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Reset the display geometry to the toolkit sentinels
    pub fn set_default_display_values(&mut self) {
        self.main_frame.position = Position::UNSPECIFIED;
        self.main_frame.size = Size::UNSPECIFIED;
    }
}

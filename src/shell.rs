//! Application shell
//!
//! Owns the config store for the lifetime of the application: loads the
//! stored geometry at startup to place the main window and writes the
//! window's geometry back when it closes.

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::common::types::{Position, Size};
use crate::config::{ConfigError, ConfigStore, DisplayProperties, LoadStatus};
use crate::constants::frame::{FALLBACK_HEIGHT, FALLBACK_WIDTH, TITLE};

/// Geometry of the single main window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainFrame {
    pub title: &'static str,
    pub position: Position,
    pub size: Size,
}

impl MainFrame {
    /// Place a frame from stored geometry; unspecified extents use the fallback size
    pub fn from_display_properties(props: DisplayProperties) -> Self {
        if !props.size.is_specified() {
            debug!("Stored size {:?} incomplete, using fallback", props.size.as_tuple());
        }
        Self {
            title: TITLE,
            position: props.position,
            size: props
                .size
                .or_fallback(Size::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)),
        }
    }

    pub fn display_properties(&self) -> DisplayProperties {
        DisplayProperties::new(self.position, self.size)
    }
}

pub struct Shell {
    store: ConfigStore,
    frame: MainFrame,
    load_status: Result<LoadStatus, ConfigError>,
}

impl Shell {
    /// Load the config from the user's home directory and build the main frame
    pub fn startup(mut store: ConfigStore) -> Self {
        let load_status = store.load();
        Self::open(store, load_status)
    }

    /// Build the main frame from a store and the outcome of loading it.
    ///
    /// Config problems never stop startup: the frame falls back to default
    /// geometry and the failure is logged.
    pub fn open(store: ConfigStore, load_status: Result<LoadStatus, ConfigError>) -> Self {
        match &load_status {
            Ok(LoadStatus::Loaded) => {}
            Ok(LoadStatus::Initialized) => {
                info!("First run, main window uses default geometry");
            }
            Err(ConfigError::NoUserContext) => {
                warn!("No user context, main window geometry will not be saved");
            }
            Err(e) => {
                error!("Failed to load config: {}", e);
            }
        }

        let props = store.display_properties().unwrap_or_default();
        let frame = MainFrame::from_display_properties(props);
        info!(
            "Main window \"{}\" at {:?} size {:?}",
            frame.title,
            frame.position.as_tuple(),
            frame.size.as_tuple()
        );

        Self {
            store,
            frame,
            load_status,
        }
    }

    pub fn main_frame(&self) -> &MainFrame {
        &self.frame
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Outcome of the startup load
    pub fn load_status(&self) -> Result<LoadStatus, &ConfigError> {
        self.load_status.as_ref().copied()
    }

    pub fn move_to(&mut self, position: Position) {
        self.frame.position = position;
    }

    pub fn resize(&mut self, size: Size) {
        self.frame.size = size;
    }

    /// Window-close handler: persist the frame's current geometry.
    ///
    /// A file that could not be read or parsed at startup is left alone;
    /// only an explicit reset overwrites it.
    pub fn shutdown(mut self) -> Result<()> {
        if let Err(e @ (ConfigError::Parse { .. } | ConfigError::Io { .. })) = self.load_status {
            return Err(anyhow::Error::new(e)
                .context("Config file was not loaded at startup, geometry not saved"));
        }
        self.store
            .set_display_properties(self.frame.display_properties())
            .context("Failed to record main window geometry")?;
        self.store
            .store()
            .context("Failed to save main window geometry")?;
        info!("Main window geometry saved");
        Ok(())
    }
}

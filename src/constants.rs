//! Application-wide constants
//!
//! File names, environment variable names and geometry sentinels used by
//! the configuration store and the application shell.

/// Configuration file constants
pub mod config {
    /// Name of the configuration file inside the user's home directory
    pub const FILENAME: &str = "jsdr.config";

    /// Environment variable holding the user's home directory
    #[cfg(windows)]
    pub const HOME_ENV_VAR: &str = "USERPROFILE";
    #[cfg(not(windows))]
    pub const HOME_ENV_VAR: &str = "HOME";
}

/// Toolkit "let the window system decide" values
pub mod sentinel {
    /// Unspecified coordinate or extent
    pub const UNSPECIFIED: i32 = -1;
}

/// Main window defaults used by the shell
pub mod frame {
    /// Title of the single main window
    pub const TITLE: &str = "jSDR";

    /// Width used when the stored width is unspecified
    pub const FALLBACK_WIDTH: i32 = 800;

    /// Height used when the stored height is unspecified
    pub const FALLBACK_HEIGHT: i32 = 400;
}

/// Logging defaults
pub mod logging {
    /// Log file created in the user's home directory when `--out` is not given
    pub const FILENAME: &str = "jsdr.log";
}

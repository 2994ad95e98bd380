//! Geometric types for window placement
//!
//! Provides type-safe wrappers for positions and sizes to avoid
//! common integer confusion (e.g., swapping width/height or x/y).

use serde::{Deserialize, Serialize};

use crate::constants::sentinel::UNSPECIFIED;

/// A window position in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    #[serde(default = "unspecified")]
    pub x: i32,
    #[serde(default = "unspecified")]
    pub y: i32,
}

impl Position {
    /// Position that leaves placement to the window system
    pub const UNSPECIFIED: Position = Position {
        x: UNSPECIFIED,
        y: UNSPECIFIED,
    };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when neither coordinate is the sentinel
    pub fn is_specified(&self) -> bool {
        self.x != UNSPECIFIED && self.y != UNSPECIFIED
    }

    pub fn as_tuple(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        pos.as_tuple()
    }
}

/// Window extent (width × height)
/// Using a newtype prevents accidentally swapping width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    #[serde(default = "unspecified")]
    pub width: i32,
    #[serde(default = "unspecified")]
    pub height: i32,
}

impl Size {
    /// Size that leaves the extent to the window system
    pub const UNSPECIFIED: Size = Size {
        width: UNSPECIFIED,
        height: UNSPECIFIED,
    };

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when neither extent is the sentinel
    pub fn is_specified(&self) -> bool {
        self.width != UNSPECIFIED && self.height != UNSPECIFIED
    }

    /// Replace each unspecified extent with the matching one from `fallback`
    pub fn or_fallback(self, fallback: Size) -> Self {
        Self {
            width: if self.width == UNSPECIFIED {
                fallback.width
            } else {
                self.width
            },
            height: if self.height == UNSPECIFIED {
                fallback.height
            } else {
                self.height
            },
        }
    }

    pub fn as_tuple(self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

impl From<Size> for (i32, i32) {
    fn from(size: Size) -> Self {
        size.as_tuple()
    }
}

fn unspecified() -> i32 {
    UNSPECIFIED
}

//! Display preferences
//!
//! The host owns the window; these settings only decide which screen size the
//! simulation should lay the arena out for.

use serde::{Deserialize, Serialize};

use crate::consts::{WINDOWED_HEIGHT, WINDOWED_WIDTH};

/// Window mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    #[default]
    Fullscreen,
    Windowed,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Fullscreen => "Fullscreen",
            DisplayMode::Windowed => "Windowed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fullscreen" | "full" => Some(DisplayMode::Fullscreen),
            "windowed" | "window" => Some(DisplayMode::Windowed),
            _ => None,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub mode: DisplayMode,
    /// Desktop resolution reported by the host (used in fullscreen)
    pub fullscreen_size: (u32, u32),
    /// Fixed window size
    pub windowed_size: (u32, u32),
    /// Draw the HP text and health bar
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Fullscreen,
            fullscreen_size: (1920, 1080),
            windowed_size: (WINDOWED_WIDTH, WINDOWED_HEIGHT),
            show_hud: true,
        }
    }
}

impl Settings {
    /// Settings for a host whose desktop is `width` x `height`
    pub fn with_desktop(width: u32, height: u32) -> Self {
        Self {
            fullscreen_size: (width, height),
            ..Self::default()
        }
    }

    /// Screen size for the current mode
    pub fn screen_size(&self) -> (u32, u32) {
        match self.mode {
            DisplayMode::Fullscreen => self.fullscreen_size,
            DisplayMode::Windowed => self.windowed_size,
        }
    }

    /// Flip between fullscreen and windowed, returning the new screen size
    pub fn toggle_fullscreen(&mut self) -> (u32, u32) {
        self.mode = match self.mode {
            DisplayMode::Fullscreen => DisplayMode::Windowed,
            DisplayMode::Windowed => DisplayMode::Fullscreen,
        };
        log::info!("Display mode: {}", self.mode.as_str());
        self.screen_size()
    }
}

//! Configuration system
//!
//! Font atlases are data-driven: a [`FontConfig`] names the source image
//! and the construction strategy, and can live in a RON or TOML file next
//! to the art it describes.

pub use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Atlas construction strategy named by a font descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AtlasStrategy {
    /// Uniform grid of fixed-size cells
    Grid {
        /// Cell width in pixels
        cell_width: u32,
        /// Cell height in pixels; defaults to the full texture height
        cell_height: Option<u32>,
        /// Characters in grid order
        chars: String,
    },
    /// Column scan for a sentinel background color
    ColorScan {
        /// Trusted glyph height in pixels
        glyph_height: u32,
        /// Sentinel background color, RGBA
        background: [u8; 4],
        /// Characters in scan order
        chars: String,
    },
    /// Glyph rectangles from an external metrics file
    Metrics {
        /// Path to the metrics description
        file: PathBuf,
        /// Vertical normalization divisor, normally the image height
        glyph_height: u32,
        /// Kept for parity with the color-scan strategy
        background: [u8; 4],
    },
}

impl Default for AtlasStrategy {
    fn default() -> Self {
        Self::Grid {
            cell_width: 0,
            cell_height: None,
            chars: String::new(),
        }
    }
}

/// Data-driven description of one bitmap font
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FontConfig {
    /// Path to the font texture image
    pub image: PathBuf,
    /// How to carve the image into glyphs
    pub strategy: AtlasStrategy,
    /// Inter-glyph tracking in pixels
    #[serde(default)]
    pub tracking: f32,
}

impl Config for FontConfig {}

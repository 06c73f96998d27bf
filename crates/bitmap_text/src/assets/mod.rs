//! Asset loading for font textures and glyph metrics

pub mod image_loader;
pub mod metrics_loader;

pub use image_loader::{ImageData, Rgba8};
pub use metrics_loader::{GlyphMetric, MetricsError};

use thiserror::Error;

/// Errors that can occur while loading assets
#[derive(Debug, Error)]
pub enum AssetError {
    /// Failed to load an asset from disk or memory
    #[error("failed to load asset: {0}")]
    LoadFailed(String),
}

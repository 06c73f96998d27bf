//! # Bitmap Text
//!
//! Bitmap-font text rendering for 2D real-time scenes.
//!
//! Short runs of text are drawn from a pre-rasterized glyph atlas rather
//! than a live font shaper: a marked-up texture image is turned into a
//! character-to-region mapping once, and each frame a string plus that
//! mapping becomes a batch of textured quads for the GPU. Re-layout only
//! happens after a text or font mutation (the dirty protocol), so an
//! unchanged label costs nothing beyond its draw call.
//!
//! ## Features
//!
//! - **Three atlas construction strategies**: uniform grid slicing,
//!   color-scan boundary detection, and external glyph-metrics files
//! - **Cached quad batches**: layout runs at most once per mutation
//! - **Localization overlay**: translated strings hand off to an external
//!   pre-rendered font engine at a discrete set of scale tiers
//! - **Data-driven fonts**: atlas descriptors loadable from RON or TOML
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bitmap_text::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut textures = TextureManager::new();
//!     let image = ImageData::from_file("resources/fonts/pixel.png")?;
//!     let texture = textures.register(&image, TextureParams::default(), Some("pixel.png"));
//!     let font = Arc::new(GlyphAtlas::from_grid(&image, texture, 8, None, charsets::LATIN_UPPER));
//!
//!     let mut label = BitmapText::new("HELLO", Arc::clone(&font));
//!     label.measure()?;
//!     assert!(label.width() > 0.0);
//!     Ok(())
//! }
//! ```
//!
//! The GPU command layer, translation dictionary sourcing, and texture
//! upload are external collaborators expressed as traits; see
//! [`render::QuadRenderer`], [`locale::TranslationTable`], and
//! [`locale::FontEngineBank`].

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod locale;
pub mod render;
pub mod text;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{GlyphMetric, ImageData},
        config::{AtlasStrategy, Config, FontConfig},
        foundation::math::{Color, Mat4, Vec2},
        locale::{FontEngine, FontEngineBank, LocaleContext, ScaleTier, TranslationTable},
        render::{
            DrawParams, ForeignDrawScope, QuadRenderer, TextureHandle, TextureManager,
            TextureParams,
        },
        text::{
            charsets, BitmapText, FontError, GlyphAtlas, GlyphQuad, GlyphRegion, TextError,
            TextKind, TextLayout, TextSize, TextVertex,
        },
    };
}

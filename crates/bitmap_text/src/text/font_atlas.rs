//! Glyph atlas construction and lookup
//!
//! A [`GlyphAtlas`] maps characters to normalized regions of a single
//! font texture, plus the metrics the layout engine needs (tracking,
//! baseline, line height). An atlas is built once by one of three
//! strategies and never mutated afterwards, so any number of text
//! instances can share one through an `Arc` without synchronization.

use crate::assets::image_loader::{ImageData, Rgba8};
use crate::assets::metrics_loader::{self, GlyphMetric};
use crate::assets::{AssetError, MetricsError};
use crate::config::{AtlasStrategy, FontConfig};
use crate::render::{TextureHandle, TextureManager, TextureParams};
use std::collections::HashMap;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during atlas construction or glyph lookup
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to load the font image
    #[error("failed to load font image: {0}")]
    Image(#[from] AssetError),

    /// Failed to read or parse the glyph metrics file
    #[error("failed to read glyph metrics: {0}")]
    Metrics(#[from] MetricsError),

    /// Construction was given nothing to map
    #[error("font atlas has no glyphs ({0})")]
    EmptyCharset(&'static str),

    /// The requested glyph height does not fit the source image
    #[error("glyph height {requested} exceeds image height {actual}")]
    InvalidGlyphHeight {
        /// Requested scan height in pixels
        requested: u32,
        /// Actual image height in pixels
        actual: u32,
    },

    /// Requested character was not found in the atlas
    #[error("glyph '{0}' not found in atlas")]
    GlyphNotFound(char),
}

/// Well-known character sets for atlas construction
pub mod charsets {
    /// Uppercase-only set: space, punctuation, digits, A-Z
    ///
    /// Building an atlas from exactly this set enables automatic
    /// lowercase-to-uppercase folding on lookup.
    pub const LATIN_UPPER: &str =
        " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    /// Full printable Latin set, both cases
    pub const LATIN_FULL: &str =
        " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~\u{7f}";
}

/// Normalized texture-space rectangle of one glyph
///
/// Coordinates are in `[0, 1]` relative to the atlas texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRegion {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl GlyphRegion {
    /// Normalized width of the region
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Normalized height of the region
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Immutable character-to-region mapping for one bitmap font
pub struct GlyphAtlas {
    texture: TextureHandle,
    texture_width: u32,
    texture_height: u32,
    regions: HashMap<char, GlyphRegion>,
    tracking: f32,
    baseline: f32,
    line_height: f32,
    auto_uppercase: bool,
}

impl GlyphAtlas {
    /// Slice a texture into uniform grid cells, one per character
    ///
    /// Cells are assigned to `chars` in declared order, left to right,
    /// wrapping to the next row once the running left edge reaches the
    /// right side of the texture. `cell_height` defaults to the full
    /// texture height.
    ///
    /// Automatic uppercase folding is enabled iff `chars` is exactly
    /// [`charsets::LATIN_UPPER`]; that convention marks an atlas as
    /// upper-case-only.
    pub fn from_grid(
        image: &ImageData,
        texture: TextureHandle,
        cell_width: u32,
        cell_height: Option<u32>,
        chars: &str,
    ) -> Self {
        let cell_height = cell_height.unwrap_or(image.height);

        let uw = cell_width as f32 / image.width as f32;
        let vh = cell_height as f32 / image.height as f32;

        let mut regions = HashMap::new();
        let mut left = 0.0f32;
        let mut top = 0.0f32;
        let mut bottom = vh;

        for ch in chars.chars() {
            regions.insert(
                ch,
                GlyphRegion {
                    left,
                    top,
                    right: left + uw,
                    bottom,
                },
            );
            left += uw;
            if left >= 1.0 {
                left = 0.0;
                top = bottom;
                bottom += vh;
            }
        }

        log::info!(
            "Built grid atlas: {} glyphs, {}x{} cells",
            regions.len(),
            cell_width,
            cell_height
        );

        Self {
            texture,
            texture_width: image.width,
            texture_height: image.height,
            regions,
            tracking: 0.0,
            baseline: cell_height as f32,
            line_height: cell_height as f32,
            auto_uppercase: chars == charsets::LATIN_UPPER,
        }
    }

    /// Detect glyph boundaries by scanning for a background color
    ///
    /// The image is walked column by column. Columns whose every pixel in
    /// `[0, glyph_height)` matches `background` are separators; runs of
    /// non-background columns are glyphs, assigned to `chars` in declared
    /// order (the space character is skipped; its width is the run of
    /// background columns at the left edge of the image). A glyph that
    /// reaches the right edge without a separator extends to the edge.
    ///
    /// A pixel with a zero alpha channel matches a background whose alpha
    /// is also zero, regardless of its RGB; otherwise matching is exact.
    pub fn from_color_scan(
        image: &ImageData,
        texture: TextureHandle,
        glyph_height: u32,
        background: Rgba8,
        chars: &str,
    ) -> FontResult<Self> {
        if chars.is_empty() {
            return Err(FontError::EmptyCharset("character set"));
        }
        if glyph_height > image.height {
            return Err(FontError::InvalidGlyphHeight {
                requested: glyph_height,
                actual: image.height,
            });
        }

        let width = image.width;
        let v_height = glyph_height as f32 / image.height as f32;

        let column_is_background = |x: u32| {
            (0..glyph_height).all(|y| pixel_matches_background(image.pixel(x, y), background))
        };

        // Space width: the run of background columns at the left edge
        let mut pos = 0u32;
        while pos < width && column_is_background(pos) {
            pos += 1;
        }

        let mut regions = HashMap::new();
        regions.insert(
            ' ',
            GlyphRegion {
                left: 0.0,
                top: 0.0,
                right: pos as f32 / width as f32,
                bottom: v_height,
            },
        );

        for ch in chars.chars() {
            if ch == ' ' {
                continue;
            }

            let mut separator = pos;
            loop {
                separator += 1;
                if separator >= width || column_is_background(separator) {
                    break;
                }
            }

            regions.insert(
                ch,
                GlyphRegion {
                    left: pos as f32 / width as f32,
                    top: 0.0,
                    right: separator as f32 / width as f32,
                    bottom: v_height,
                },
            );
            pos = separator + 1;
        }

        // Line metrics come from the first declared character
        let reference = chars
            .chars()
            .next()
            .and_then(|ch| regions.get(&ch))
            .copied()
            .ok_or(FontError::EmptyCharset("character set"))?;
        let line_height = reference.height() * image.height as f32;

        log::info!(
            "Built color-scan atlas: {} glyphs, line height {}",
            regions.len(),
            line_height
        );

        Ok(Self {
            texture,
            texture_width: image.width,
            texture_height: image.height,
            regions,
            tracking: 0.0,
            baseline: line_height,
            line_height,
            auto_uppercase: chars == charsets::LATIN_UPPER,
        })
    }

    /// Map glyph rectangles read from an external metrics description
    ///
    /// Each record's pixel box is translated directly into a normalized
    /// region; `glyph_height` is the vertical normalization divisor and is
    /// normally the image height. A record for the space character is not
    /// trusted (metrics files tend to give space a zero-width box);
    /// instead a rectangle half the record height wide is synthesized in
    /// the bottom-right corner of the texture, which atlas images leave
    /// blank.
    ///
    /// `background` is accepted for parity with [`Self::from_color_scan`];
    /// metrics fonts do not scan pixels.
    pub fn from_metrics(
        image: &ImageData,
        texture: TextureHandle,
        metrics: &[GlyphMetric],
        glyph_height: u32,
        _background: Rgba8,
    ) -> FontResult<Self> {
        let first = metrics.first().ok_or(FontError::EmptyCharset("glyph metrics"))?;

        let w = image.width as f32;
        let h = glyph_height as f32;

        let mut regions = HashMap::new();
        for record in metrics {
            let region = if record.ch == ' ' {
                GlyphRegion {
                    left: 1.0 - (record.height as f32 / 2.0) / w,
                    top: 1.0 - record.height as f32 / h,
                    right: 1.0,
                    bottom: 1.0,
                }
            } else {
                GlyphRegion {
                    left: record.x as f32 / w,
                    top: record.y as f32 / h,
                    right: (record.x + record.width) as f32 / w,
                    bottom: (record.y + record.height) as f32 / h,
                }
            };
            regions.insert(record.ch, region);
        }

        let line_height = first.height as f32;

        log::info!(
            "Built metrics atlas: {} glyphs, line height {}",
            regions.len(),
            line_height
        );

        Ok(Self {
            texture,
            texture_width: image.width,
            texture_height: image.height,
            regions,
            tracking: 0.0,
            baseline: line_height,
            line_height,
            auto_uppercase: false,
        })
    }

    /// Build an atlas from a [`FontConfig`] descriptor
    ///
    /// Loads the font image, registers it with the texture manager, and
    /// dispatches to the strategy the descriptor names.
    pub fn from_config(config: &FontConfig, textures: &mut TextureManager) -> FontResult<Self> {
        let image = ImageData::from_file(&config.image)?;
        let name = config.image.file_name().and_then(|n| n.to_str());
        let texture = textures.register(&image, TextureParams::default(), name);

        let atlas = match &config.strategy {
            AtlasStrategy::Grid {
                cell_width,
                cell_height,
                chars,
            } => Self::from_grid(&image, texture, *cell_width, *cell_height, chars),
            AtlasStrategy::ColorScan {
                glyph_height,
                background,
                chars,
            } => Self::from_color_scan(&image, texture, *glyph_height, *background, chars)?,
            AtlasStrategy::Metrics {
                file,
                glyph_height,
                background,
            } => {
                let metrics = metrics_loader::load_metrics(file)?;
                Self::from_metrics(&image, texture, &metrics, *glyph_height, *background)?
            }
        };

        Ok(atlas.with_tracking(config.tracking))
    }

    /// Set the inter-glyph tracking, consuming the atlas
    ///
    /// Construction-time builder; the atlas stays immutable once shared.
    pub fn with_tracking(mut self, tracking: f32) -> Self {
        self.tracking = tracking;
        self
    }

    /// Look up the region for a character
    ///
    /// On an upper-case-only atlas, lowercase input folds to uppercase
    /// first. A character with no mapping is an explicit
    /// [`FontError::GlyphNotFound`]; there is no silent substitution.
    pub fn region(&self, ch: char) -> FontResult<GlyphRegion> {
        let lookup = if self.auto_uppercase {
            ch.to_uppercase().next().unwrap_or(ch)
        } else {
            ch
        };
        self.regions
            .get(&lookup)
            .copied()
            .ok_or(FontError::GlyphNotFound(lookup))
    }

    /// Whether the atlas maps a character (after any case fold)
    pub fn contains(&self, ch: char) -> bool {
        self.region(ch).is_ok()
    }

    /// Pixel width of a glyph region
    pub fn glyph_width(&self, region: &GlyphRegion) -> f32 {
        region.width() * self.texture_width as f32
    }

    /// Pixel height of a glyph region
    pub fn glyph_height(&self, region: &GlyphRegion) -> f32 {
        region.height() * self.texture_height as f32
    }

    /// Handle of the atlas texture
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Atlas texture dimensions in pixels
    pub fn texture_dimensions(&self) -> (u32, u32) {
        (self.texture_width, self.texture_height)
    }

    /// Horizontal gap inserted between successive glyphs
    pub fn tracking(&self) -> f32 {
        self.tracking
    }

    /// Baseline height in pixels
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Line height in pixels
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Whether lookups fold lowercase to uppercase
    pub fn auto_uppercase(&self) -> bool {
        self.auto_uppercase
    }

    /// Number of mapped glyphs
    pub fn glyph_count(&self) -> usize {
        self.regions.len()
    }
}

/// Background test for the color-scan strategy
///
/// Asymmetric on purpose: a fully transparent pixel matches a fully
/// transparent background whatever its RGB happens to be, because
/// transparent texels carry garbage color in most image exports.
fn pixel_matches_background(pixel: Rgba8, background: Rgba8) -> bool {
    if pixel[3] == 0 {
        background[3] == 0
    } else {
        pixel == background
    }
}

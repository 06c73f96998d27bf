//! Text layout engine
//!
//! Converts strings into positioned quads for rendering. Two operations
//! share one glyph-advance algorithm: [`TextLayout::measure`] computes
//! the total size only, [`TextLayout::layout_text`] also emits the
//! GPU-ready quad batch. [`TextLayout::layout_wrapped`] runs the same
//! advance per word with a greedy line break for multi-line text.

use crate::text::font_atlas::{FontError, GlyphAtlas, GlyphRegion};
use bytemuck::{Pod, Zeroable};
use std::sync::Arc;
use thiserror::Error;

/// Errors local to laying out one string
#[derive(Debug, Error)]
pub enum TextError {
    /// A character in the string has no atlas entry
    #[error("no glyph for '{0}' in the active font")]
    MissingGlyph(char),
}

/// Measured extent of a laid-out string, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    /// Total advance width
    pub width: f32,
    /// Height of the tallest glyph (or of all lines, when wrapped)
    pub height: f32,
}

impl TextSize {
    /// Zero extent
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };
}

/// Vertex data for one glyph corner
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TextVertex {
    /// Position in local space
    pub position: [f32; 2],
    /// Normalized texture coordinates
    pub uv: [f32; 2],
}

/// One textured quad: four corners in top-left, top-right, bottom-right,
/// bottom-left order
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GlyphQuad {
    /// Corner vertices
    pub corners: [TextVertex; 4],
}

impl GlyphQuad {
    /// Build a quad for a glyph placed at `(x, y)` with pixel size
    /// `(w, h)`, textured by `region`
    fn new(x: f32, y: f32, w: f32, h: f32, region: &GlyphRegion) -> Self {
        Self {
            corners: [
                TextVertex { position: [x, y], uv: [region.left, region.top] },
                TextVertex { position: [x + w, y], uv: [region.right, region.top] },
                TextVertex { position: [x + w, y + h], uv: [region.right, region.bottom] },
                TextVertex { position: [x, y + h], uv: [region.left, region.bottom] },
            ],
        }
    }

    /// The same quad shifted by `(dx, dy)`
    fn translated(mut self, dx: f32, dy: f32) -> Self {
        for corner in &mut self.corners {
            corner.position[0] += dx;
            corner.position[1] += dy;
        }
        self
    }
}

/// Text layout engine over a shared glyph atlas
pub struct TextLayout {
    font: Arc<GlyphAtlas>,
}

impl TextLayout {
    /// Create a layout engine for the given atlas
    pub fn new(font: Arc<GlyphAtlas>) -> Self {
        Self { font }
    }

    /// Compute the total advance width and max glyph height of `text`
    ///
    /// Each glyph advances the cursor by its width plus the atlas
    /// tracking; the trailing gap after the last glyph is not part of the
    /// visible extent and is subtracted again. The empty string measures
    /// `(0, 0)`.
    pub fn measure(&self, text: &str) -> Result<TextSize, TextError> {
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for ch in text.chars() {
            let region = self.lookup(ch)?;
            let w = self.font.glyph_width(&region);
            let h = self.font.glyph_height(&region);

            width += w + self.font.tracking();
            if h > height {
                height = h;
            }
        }

        if !text.is_empty() {
            width -= self.font.tracking();
        }

        Ok(TextSize { width, height })
    }

    /// Build the per-glyph quad batch for `text`
    ///
    /// Quad positions start at the origin and grow rightward/downward;
    /// the caller's transform places the batch in the world. Returns the
    /// batch together with the measured size.
    pub fn layout_text(&self, text: &str) -> Result<(Vec<GlyphQuad>, TextSize), TextError> {
        let mut quads = Vec::with_capacity(text.len());
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for ch in text.chars() {
            let region = self.lookup(ch)?;
            let w = self.font.glyph_width(&region);
            let h = self.font.glyph_height(&region);

            quads.push(GlyphQuad::new(width, 0.0, w, h, &region));

            width += w + self.font.tracking();
            if h > height {
                height = h;
            }
        }

        if !text.is_empty() {
            width -= self.font.tracking();
        }

        Ok((quads, TextSize { width, height }))
    }

    /// Build a quad batch for `text` wrapped to `max_width`
    ///
    /// Greedy word wrap: words are separated by single spaces, lines by
    /// `\n`; a word that would overrun `max_width` starts a new line (a
    /// word longer than `max_width` on a line of its own is kept whole).
    /// Spaces are not emitted as quads, they only advance the cursor.
    pub fn layout_wrapped(
        &self,
        text: &str,
        max_width: f32,
    ) -> Result<(Vec<GlyphQuad>, TextSize), TextError> {
        if text.is_empty() {
            return Ok((Vec::new(), TextSize::ZERO));
        }

        let space = self.lookup(' ')?;
        let space_advance = self.font.glyph_width(&space) + self.font.tracking();
        let line_height = self.font.line_height();

        let mut quads = Vec::new();
        let mut widest = 0.0f32;
        let mut cursor_y = 0.0f32;

        for line in text.split('\n') {
            let mut cursor_x = 0.0f32;

            for word in line.split(' ') {
                let (word_quads, word_size) = self.layout_text(word)?;

                if cursor_x > 0.0 && cursor_x + word_size.width > max_width {
                    widest = widest.max(cursor_x - space_advance);
                    cursor_x = 0.0;
                    cursor_y += line_height;
                }

                quads.extend(
                    word_quads
                        .into_iter()
                        .map(|quad| quad.translated(cursor_x, cursor_y)),
                );
                cursor_x += word_size.width + space_advance;
            }

            widest = widest.max(cursor_x - space_advance);
            cursor_y += line_height;
        }

        Ok((
            quads,
            TextSize { width: widest.max(0.0), height: cursor_y },
        ))
    }

    /// The atlas this engine lays out against
    pub fn font(&self) -> &GlyphAtlas {
        &self.font
    }

    fn lookup(&self, ch: char) -> Result<GlyphRegion, TextError> {
        self.font.region(ch).map_err(|err| match err {
            FontError::GlyphNotFound(missing) => TextError::MissingGlyph(missing),
            _ => TextError::MissingGlyph(ch),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;
    use crate::render::TextureHandle;
    use approx::assert_relative_eq;

    /// 8px-wide glyphs in a 64x8 strip
    fn strip_atlas(tracking: f32) -> Arc<GlyphAtlas> {
        let image = ImageData::solid_color(64, 8, [255, 255, 255, 255]);
        Arc::new(
            GlyphAtlas::from_grid(&image, TextureHandle(1), 8, None, " ABCDEFG")
                .with_tracking(tracking),
        )
    }

    #[test]
    fn test_vertex_layout_is_gpu_compatible() {
        // Quad batches are uploaded as raw bytes
        assert_eq!(std::mem::size_of::<TextVertex>(), std::mem::size_of::<f32>() * 4);
        assert_eq!(std::mem::size_of::<GlyphQuad>(), std::mem::size_of::<f32>() * 16);
    }

    #[test]
    fn test_measure_sums_advances_and_tracking() {
        let layout = TextLayout::new(strip_atlas(2.0));

        // 3 glyphs of 8px each, 2 tracking gaps
        let size = layout.measure("ABC").unwrap();
        assert_relative_eq!(size.width, 3.0 * 8.0 + 2.0 * 2.0);
        assert_relative_eq!(size.height, 8.0);
    }

    #[test]
    fn test_measure_empty_string_is_zero() {
        let layout = TextLayout::new(strip_atlas(2.0));
        let size = layout.measure("").unwrap();
        assert_relative_eq!(size.width, 0.0);
        assert_relative_eq!(size.height, 0.0);
    }

    #[test]
    fn test_layout_matches_measure() {
        let layout = TextLayout::new(strip_atlas(1.5));
        let measured = layout.measure("ABCD").unwrap();
        let (quads, laid_out) = layout.layout_text("ABCD").unwrap();

        assert_eq!(quads.len(), 4);
        assert_relative_eq!(measured.width, laid_out.width);
        assert_relative_eq!(measured.height, laid_out.height);
    }

    #[test]
    fn test_quad_corners_and_winding() {
        let layout = TextLayout::new(strip_atlas(0.0));
        let (quads, _) = layout.layout_text("AB").unwrap();

        // First quad at origin, 8x8
        let a = &quads[0].corners;
        assert_eq!(a[0].position, [0.0, 0.0]);
        assert_eq!(a[1].position, [8.0, 0.0]);
        assert_eq!(a[2].position, [8.0, 8.0]);
        assert_eq!(a[3].position, [0.0, 8.0]);

        // UVs follow the same top-left, top-right, bottom-right,
        // bottom-left order; 'A' is the second cell of the strip
        assert_relative_eq!(a[0].uv[0], 1.0 / 8.0);
        assert_relative_eq!(a[0].uv[1], 0.0);
        assert_relative_eq!(a[2].uv[0], 2.0 / 8.0);
        assert_relative_eq!(a[2].uv[1], 1.0);

        // Second quad starts one advance to the right
        let b = &quads[1].corners;
        assert_eq!(b[0].position, [8.0, 0.0]);
    }

    #[test]
    fn test_missing_glyph_fails_explicitly() {
        let layout = TextLayout::new(strip_atlas(0.0));
        assert!(matches!(
            layout.measure("AZ"),
            Err(TextError::MissingGlyph('Z'))
        ));
    }

    #[test]
    fn test_wrapped_breaks_at_max_width() {
        let layout = TextLayout::new(strip_atlas(0.0));

        // Each word "AB" is 16px; two words and the gap between them fit
        // in 44px, the third wraps
        let (_, size) = layout.layout_wrapped("AB AB AB", 44.0).unwrap();
        assert_relative_eq!(size.height, 16.0); // two lines of 8px
        assert_relative_eq!(size.width, 40.0); // "AB AB" = 16 + 8 + 16
    }

    #[test]
    fn test_wrapped_honors_explicit_newlines() {
        let layout = TextLayout::new(strip_atlas(0.0));
        let (_, size) = layout.layout_wrapped("AB\nAB\nAB", 1000.0).unwrap();
        assert_relative_eq!(size.height, 24.0);
        assert_relative_eq!(size.width, 16.0);
    }

    #[test]
    fn test_wrapped_positions_second_line_below_first() {
        let layout = TextLayout::new(strip_atlas(0.0));
        let (quads, _) = layout.layout_wrapped("AB\nCD", 1000.0).unwrap();

        assert_eq!(quads.len(), 4);
        // 'C' starts at the left edge of the second line
        assert_eq!(quads[2].corners[0].position, [0.0, 8.0]);
    }

    #[test]
    fn test_wrapped_empty_string_is_zero() {
        let layout = TextLayout::new(strip_atlas(0.0));
        let (quads, size) = layout.layout_wrapped("", 100.0).unwrap();
        assert!(quads.is_empty());
        assert_eq!(size, TextSize::ZERO);
    }
}

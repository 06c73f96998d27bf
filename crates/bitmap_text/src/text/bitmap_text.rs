//! Cached text instance and render dispatch
//!
//! A [`BitmapText`] owns one string, a shared reference to its font
//! atlas, and the quad batch laid out from them. The batch is rebuilt
//! lazily: mutations only mark the instance dirty, and the next draw call
//! runs a single layout pass however many mutations happened in between.
//!
//! When the active translation table resolves the raw string, drawing
//! switches to an external font engine selected by scale tier; the local
//! atlas path is bypassed entirely and the engine's measurement becomes
//! the authoritative size for single-line instances.

use crate::foundation::math::Vec2;
use crate::locale::{FontEngineBank, LocaleContext, ScaleTier};
use crate::render::{DrawParams, ForeignDrawScope, QuadRenderer};
use crate::text::font_atlas::GlyphAtlas;
use crate::text::text_layout::{GlyphQuad, TextError, TextLayout, TextSize};
use std::sync::Arc;

/// Camera zoom below which localized text is drawn at a fixed
/// magnification instead of tracking the zoom
const SHARP_ZOOM_THRESHOLD: f32 = 2.0;

/// Fixed engine magnification used below the threshold
const LOW_ZOOM_MAGNIFICATION: f32 = 2.0;

/// Line discipline of a text instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextKind {
    /// One line, no wrapping
    SingleLine,
    /// Word-wrapped to a maximum width
    MultiLine {
        /// Wrap width in pixels
        max_width: f32,
    },
}

/// Resolved translation state of an instance
#[derive(Debug, Clone)]
struct LocalizedText {
    text: String,
    tier: ScaleTier,
    /// Size reported by the external engine; authoritative for
    /// single-line instances
    size: TextSize,
}

/// A run of text rendered from a glyph atlas
pub struct BitmapText {
    raw_text: String,
    font: Arc<GlyphAtlas>,
    kind: TextKind,
    scale: Vec2,

    quads: Vec<GlyphQuad>,
    size: TextSize,
    dirty: bool,
    layout_passes: u64,

    localized: Option<LocalizedText>,
}

impl BitmapText {
    /// Create a single-line instance
    ///
    /// The instance starts dirty; layout runs on the first draw.
    pub fn new(text: impl Into<String>, font: Arc<GlyphAtlas>) -> Self {
        Self::with_kind(text, font, TextKind::SingleLine)
    }

    /// Create a multi-line instance wrapped to `max_width`
    pub fn new_multiline(text: impl Into<String>, font: Arc<GlyphAtlas>, max_width: f32) -> Self {
        Self::with_kind(text, font, TextKind::MultiLine { max_width })
    }

    /// Create an instance with an explicit line discipline
    pub fn with_kind(text: impl Into<String>, font: Arc<GlyphAtlas>, kind: TextKind) -> Self {
        Self {
            raw_text: text.into(),
            font,
            kind,
            scale: Vec2::new(1.0, 1.0),
            quads: Vec::new(),
            size: TextSize::ZERO,
            dirty: true,
            layout_passes: 0,
            localized: None,
        }
    }

    /// The raw string as authored
    pub fn text(&self) -> &str {
        &self.raw_text
    }

    /// Replace the text and re-run translation resolution
    ///
    /// The cached quad batch is not rebuilt here, only invalidated;
    /// repeated mutations within one frame coalesce into a single layout
    /// pass on the next draw.
    pub fn set_text(&mut self, text: impl Into<String>, locale: &mut LocaleContext<'_>) {
        self.raw_text = text.into();
        self.resolve_translation(locale);
        self.dirty = true;
    }

    /// The shared font atlas
    pub fn font(&self) -> &Arc<GlyphAtlas> {
        &self.font
    }

    /// Replace the font atlas
    pub fn set_font(&mut self, font: Arc<GlyphAtlas>) {
        self.font = font;
        self.dirty = true;
    }

    /// Line discipline of this instance
    pub fn kind(&self) -> TextKind {
        self.kind
    }

    /// Per-instance scale factor
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Set the per-instance scale factor
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    /// Whether the cached batch is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of layout passes run so far
    ///
    /// Diagnostic counter; draw-twice-without-mutation must not increase
    /// it.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// The translated string, when a translation is active
    pub fn localized_text(&self) -> Option<&str> {
        self.localized.as_ref().map(|loc| loc.text.as_str())
    }

    /// The scale tier selected for the active translation
    pub fn scale_tier(&self) -> Option<ScaleTier> {
        self.localized.as_ref().map(|loc| loc.tier)
    }

    /// Visual width of the instance
    ///
    /// A single-line instance with an active translation reports the
    /// external engine's measurement scaled by the instance scale, so
    /// layout code sees the box that is actually drawn. Everything else
    /// reports the local measurement, which is valid once layout or
    /// [`Self::measure`] has run.
    pub fn width(&self) -> f32 {
        match (self.kind, self.localized.as_ref()) {
            (TextKind::SingleLine, Some(loc)) => loc.size.width * self.scale.x,
            _ => self.size.width,
        }
    }

    /// Visual height of the instance; see [`Self::width`]
    pub fn height(&self) -> f32 {
        match (self.kind, self.localized.as_ref()) {
            (TextKind::SingleLine, Some(loc)) => loc.size.height * self.scale.y,
            _ => self.size.height,
        }
    }

    /// Baseline height scaled by the instance's vertical scale
    pub fn baseline(&self) -> f32 {
        self.font.baseline() * self.scale.y
    }

    /// Run the measurement pass and update the stored size
    ///
    /// Does not build quads and does not clear the dirty flag; use it
    /// when a size is needed before the instance is ever drawn.
    pub fn measure(&mut self) -> Result<TextSize, TextError> {
        let layout = TextLayout::new(Arc::clone(&self.font));
        self.size = match self.kind {
            TextKind::SingleLine => layout.measure(&self.raw_text)?,
            TextKind::MultiLine { max_width } => {
                layout.layout_wrapped(&self.raw_text, max_width)?.1
            }
        };
        Ok(self.size)
    }

    /// Draw the instance
    ///
    /// Without an active translation this relays if dirty and submits the
    /// cached quad batch against the atlas texture. With one, the
    /// external engine for the resolved tier draws the translated string
    /// at the instance's screen position instead, inside a foreign-draw
    /// scope that restores the pipeline state on every exit path.
    pub fn draw(
        &mut self,
        gpu: &mut dyn QuadRenderer,
        fonts: &mut dyn FontEngineBank,
        params: &DrawParams,
    ) -> Result<(), TextError> {
        let Some(loc) = self.localized.as_ref() else {
            if self.dirty {
                self.relayout()?;
            }
            gpu.bind_texture(self.font.texture());
            gpu.set_transform(&params.transform);
            gpu.set_tint(params.tint);
            gpu.draw_quad_batch(&self.quads);
            return Ok(());
        };

        let _scope = ForeignDrawScope::enter(gpu);
        let engine = fonts.engine(loc.tier);
        let tagged = format!("[#{}]{}", params.tint.rgb_hex(), loc.text);

        if params.camera_zoom < SHARP_ZOOM_THRESHOLD {
            engine.set_scale(LOW_ZOOM_MAGNIFICATION);
        } else {
            engine.set_scale(params.camera_zoom);
        }

        match self.kind {
            TextKind::SingleLine => engine.draw(&tagged, params.position.x, params.position.y),
            TextKind::MultiLine { max_width } => {
                engine.draw_wrapped(&tagged, params.position.x, params.position.y, max_width);
            }
        }

        engine.set_scale(1.0);
        Ok(())
    }

    /// Rebuild the quad batch and clear the dirty flag
    ///
    /// On failure the previous batch and the dirty flag are left alone;
    /// the error stays local to this instance.
    fn relayout(&mut self) -> Result<(), TextError> {
        let layout = TextLayout::new(Arc::clone(&self.font));
        let (quads, size) = match self.kind {
            TextKind::SingleLine => layout.layout_text(&self.raw_text)?,
            TextKind::MultiLine { max_width } => {
                layout.layout_wrapped(&self.raw_text, max_width)?
            }
        };

        self.quads = quads;
        self.size = size;
        self.dirty = false;
        self.layout_passes += 1;

        log::trace!(
            "Laid out '{}': {} quads, {}x{}",
            self.raw_text,
            self.quads.len(),
            self.size.width,
            self.size.height
        );
        Ok(())
    }

    /// Re-run translation lookup for the current raw text
    ///
    /// On a hit the atlas baseline picks the scale tier and that tier's
    /// engine measures the translated string; the measurement is stored
    /// as the authoritative localized size.
    fn resolve_translation(&mut self, locale: &mut LocaleContext<'_>) {
        self.localized = None;

        let Some(translated) = locale.translations.resolve(&self.raw_text) else {
            return;
        };

        let tier = ScaleTier::from_baseline(self.font.baseline());
        let engine = locale.fonts.engine(tier);
        let (width, height) = match self.kind {
            TextKind::SingleLine => engine.measure(&translated),
            TextKind::MultiLine { max_width } => engine.measure_wrapped(&translated, max_width),
        };

        log::debug!(
            "Localized '{}' via tier {}: {}x{}",
            self.raw_text,
            tier.key(),
            width,
            height
        );

        self.localized = Some(LocalizedText {
            text: translated,
            tier,
            size: TextSize { width, height },
        });
    }
}

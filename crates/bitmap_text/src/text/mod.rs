//! Bitmap-font text rendering
//!
//! Glyph atlas construction, text layout, and the cached text instance.

pub mod bitmap_text;
pub mod font_atlas;
pub mod text_layout;

pub use bitmap_text::{BitmapText, TextKind};
pub use font_atlas::{charsets, FontError, GlyphAtlas, GlyphRegion};
pub use text_layout::{GlyphQuad, TextError, TextLayout, TextSize, TextVertex};

//! GPU collaborator seam
//!
//! # Design Philosophy
//!
//! The renderer is a passive collaborator: it accepts pre-computed
//! matrices and already-built quad batches, and only handles drawing. All
//! transform calculation is done by the scene graph before a draw call is
//! issued, so this crate never needs to know about cameras or windows.

use crate::foundation::math::{Color, Mat4, Vec2};
use crate::render::TextureHandle;
use crate::text::GlyphQuad;

/// Interface to the GPU command layer consumed by text rendering
///
/// Implemented by the engine's rendering backend. The foreign-draw pair
/// brackets the window in which an external font engine commandeers the
/// draw target; use [`ForeignDrawScope`] rather than calling the pair
/// directly so the exit half runs on every path.
pub trait QuadRenderer {
    /// Bind a texture for subsequent quad batches
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Upload the model-to-world transform
    fn set_transform(&mut self, transform: &Mat4);

    /// Upload the color tint applied to subsequent batches
    fn set_tint(&mut self, tint: Color);

    /// Draw a batch of textured glyph quads against the bound texture
    fn draw_quad_batch(&mut self, quads: &[GlyphQuad]);

    /// Save pipeline state before an external engine takes over the target
    fn begin_foreign_draw(&mut self);

    /// Restore the pipeline state saved by [`Self::begin_foreign_draw`]
    fn end_foreign_draw(&mut self);
}

/// Per-draw parameters supplied by the scene graph
///
/// # Example
///
/// ```rust,ignore
/// let params = DrawParams {
///     transform: node.world_matrix(),
///     position: node.screen_position(),
///     tint: node.tint(),
///     camera_zoom: camera.zoom(),
/// };
/// label.draw(&mut gpu, &mut fonts, &params)?;
/// ```
#[derive(Debug, Clone)]
pub struct DrawParams {
    /// Pre-computed model-to-world transformation matrix
    pub transform: Mat4,
    /// Screen-space position, used by the external font engine path
    pub position: Vec2,
    /// Color tint uniform
    pub tint: Color,
    /// Current camera zoom level
    pub camera_zoom: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            transform: Mat4::identity(),
            position: Vec2::zeros(),
            tint: Color::WHITE,
            camera_zoom: 1.0,
        }
    }
}

/// Scoped foreign-draw mode on a [`QuadRenderer`]
///
/// Entering the scope saves the pipeline state; dropping it restores the
/// state, so restoration happens on every exit path including early
/// returns.
pub struct ForeignDrawScope<'a> {
    gpu: &'a mut dyn QuadRenderer,
}

impl<'a> ForeignDrawScope<'a> {
    /// Enter foreign-draw mode
    pub fn enter(gpu: &'a mut dyn QuadRenderer) -> Self {
        gpu.begin_foreign_draw();
        Self { gpu }
    }

    /// Access the renderer while the scope is held
    pub fn gpu(&mut self) -> &mut dyn QuadRenderer {
        self.gpu
    }
}

impl Drop for ForeignDrawScope<'_> {
    fn drop(&mut self) {
        self.gpu.end_foreign_draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StateTracker {
        depth: i32,
        enters: u32,
        exits: u32,
    }

    impl QuadRenderer for StateTracker {
        fn bind_texture(&mut self, _texture: TextureHandle) {}
        fn set_transform(&mut self, _transform: &Mat4) {}
        fn set_tint(&mut self, _tint: Color) {}
        fn draw_quad_batch(&mut self, _quads: &[GlyphQuad]) {}

        fn begin_foreign_draw(&mut self) {
            self.depth += 1;
            self.enters += 1;
        }

        fn end_foreign_draw(&mut self) {
            self.depth -= 1;
            self.exits += 1;
        }
    }

    #[test]
    fn test_scope_restores_on_drop() {
        let mut gpu = StateTracker::default();
        {
            let _scope = ForeignDrawScope::enter(&mut gpu);
        }
        assert_eq!(gpu.depth, 0);
        assert_eq!(gpu.enters, 1);
        assert_eq!(gpu.exits, 1);
    }

    #[test]
    fn test_scope_restores_on_early_return() {
        fn bail(gpu: &mut dyn QuadRenderer) -> Result<(), ()> {
            let _scope = ForeignDrawScope::enter(gpu);
            Err(())
        }

        let mut gpu = StateTracker::default();
        assert!(bail(&mut gpu).is_err());
        assert_eq!(gpu.depth, 0);
        assert_eq!(gpu.exits, 1);
    }
}

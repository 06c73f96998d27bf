//! Texture handle registry for font atlases
//!
//! Hands out opaque handles for atlas images and remembers their
//! dimensions and sampling parameters. Actual GPU upload and binding
//! happen behind the [`QuadRenderer`](crate::render::QuadRenderer) seam.

use crate::assets::ImageData;
use std::collections::HashMap;

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Texture creation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    /// Texture filtering mode
    pub filter_mode: FilterMode,
    /// Texture wrapping mode
    pub wrap_mode: WrapMode,
}

impl Default for TextureParams {
    fn default() -> Self {
        // Glyph atlases are pixel art; bilinear sampling smears them
        Self {
            filter_mode: FilterMode::Nearest,
            wrap_mode: WrapMode::ClampToEdge,
        }
    }
}

/// Information about a registered texture
#[derive(Debug, Clone)]
struct TextureInfo {
    width: u32,
    height: u32,
    #[allow(dead_code)] // Read by the backend when it uploads
    params: TextureParams,
    name: Option<String>,
}

/// Registry of atlas textures known to the renderer
pub struct TextureManager {
    textures: HashMap<TextureHandle, TextureInfo>,
    next_handle: u32,
}

impl TextureManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Register an image and get a handle for it
    pub fn register(
        &mut self,
        image: &ImageData,
        params: TextureParams,
        name: Option<&str>,
    ) -> TextureHandle {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;

        self.textures.insert(
            handle,
            TextureInfo {
                width: image.width,
                height: image.height,
                params,
                name: name.map(str::to_owned),
            },
        );

        log::debug!(
            "Registered texture {:?} ({}x{}, {:?})",
            handle,
            image.width,
            image.height,
            name
        );

        handle
    }

    /// Dimensions of a registered texture
    pub fn dimensions(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(&handle).map(|info| (info.width, info.height))
    }

    /// Debug name of a registered texture
    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        self.textures.get(&handle).and_then(|info| info.name.as_deref())
    }

    /// Whether a handle refers to a registered texture
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    /// Number of registered textures
    pub fn count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let mut manager = TextureManager::new();
        let image = ImageData::solid_color(32, 16, [0, 0, 0, 255]);

        let handle = manager.register(&image, TextureParams::default(), Some("font.png"));

        assert!(manager.contains(handle));
        assert_eq!(manager.dimensions(handle), Some((32, 16)));
        assert_eq!(manager.name(handle), Some("font.png"));
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut manager = TextureManager::new();
        let image = ImageData::solid_color(8, 8, [0, 0, 0, 255]);

        let a = manager.register(&image, TextureParams::default(), None);
        let b = manager.register(&image, TextureParams::default(), None);

        assert_ne!(a, b);
    }
}

//! Render-facing interfaces
//!
//! The GPU command layer itself lives outside this crate; what lives here
//! is the seam it is reached through ([`QuadRenderer`]) and the handle
//! registry for atlas textures ([`TextureManager`]).

pub mod api;
pub mod texture_manager;

pub use api::{DrawParams, ForeignDrawScope, QuadRenderer};
pub use texture_manager::{FilterMode, TextureHandle, TextureManager, TextureParams, WrapMode};

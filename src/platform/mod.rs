//! Platform abstraction layer
//!
//! Browser implementations of the rendering collaborators:
//! - Canvas 2D surface
//! - Sprite images loaded by the page

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, ImageAssets};

//! Scene rendering
//!
//! Draws through the [`Surface`] trait so the scenes stay free of browser types.

pub mod hud;
pub mod scene;
pub mod surface;

pub use scene::{Camera, FrameInfo, draw, nozzle};
pub use surface::{AssetStore, Blend, Rect, Sprite, Surface, TextAlign};

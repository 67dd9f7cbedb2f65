//! Drawing surface abstraction
//!
//! The scene code only needs a handful of 2D primitives. The browser build
//! implements them on a canvas 2D context; tests record the calls.

/// Sprites loaded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Lander,
    Explosion,
    Smoke,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::Lander, Sprite::Explosion, Sprite::Smoke];

    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Lander => "assets/png/rocket/lander.png",
            Sprite::Explosion => "assets/png/rocket/explosion.png",
            Sprite::Smoke => "assets/png/smk.png",
        }
    }

    /// Full URL under `base`, which defaults to the site root
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            format!("/{}", self.path())
        } else {
            format!("{}/{}", base, self.path())
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Lander => "lander",
            Sprite::Explosion => "explosion",
            Sprite::Smoke => "smoke",
        }
    }
}

/// Readiness of sprite images
pub trait AssetStore {
    fn is_ready(&self, sprite: Sprite) -> bool;
}

/// Canvas global composite operations used by the scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    Lighter,
    Lighten,
    Overlay,
    SoftLight,
    ColorDodge,
}

impl Blend {
    pub fn as_css(&self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::Lighter => "lighter",
            Blend::Lighten => "lighten",
            Blend::Overlay => "overlay",
            Blend::SoftLight => "soft-light",
            Blend::ColorDodge => "color-dodge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Gradient color stop: offset in [0, 1] and a CSS color
pub type Stop<'a> = (f64, &'a str);

/// Primitive 2D drawing operations
pub trait Surface {
    fn set_blend(&mut self, blend: Blend);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// Fill `rect` with a linear gradient running from `from` to `to`
    fn fill_rect_gradient(&mut self, rect: Rect, from: (f64, f64), to: (f64, f64), stops: &[Stop]);
    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str);
    /// Disc filled with a radial gradient from the rim (offset 0) to the center (offset 1)
    fn fill_radial(&mut self, center: (f64, f64), radius: f64, stops: &[Stop]);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str);
    /// Closed polygon; optional outline and outer glow (shadow) colors
    fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str, outline: Option<(&str, f64)>, glow: Option<&str>);
    /// Blit `src` of a sprite (whole image when None) into `dst`, rotated about its center
    fn draw_sprite(&mut self, sprite: Sprite, src: Option<Rect>, dst: Rect, rotation: f64);
    fn fill_text(&mut self, text: &str, at: (f64, f64), font: &str, color: &str, align: TextAlign);
}

/// CSS `hsla()` color
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> String {
    format!("hsla({}, {}%, {}%, {})", h, s, l, a.clamp(0.0, 1.0))
}

/// CSS `rgba()` color
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, a.clamp(0.0, 1.0))
}

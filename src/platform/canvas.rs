//! Canvas 2D implementation of the drawing surface, and sprite images

use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::error::StartupError;
use crate::renderer::surface::{AssetStore, Blend, Rect, Sprite, Stop, Surface, TextAlign};

/// Draws onto a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    assets: Rc<ImageAssets>,
}

impl CanvasSurface {
    /// `assets` is shared with the scene, which checks readiness before drawing
    pub fn new(ctx: CanvasRenderingContext2d, assets: Rc<ImageAssets>) -> Self {
        Self { ctx, assets }
    }

    fn trace(&self, points: &[(f64, f64)]) {
        self.ctx.begin_path();
        if let Some((&(x, y), rest)) = points.split_first() {
            self.ctx.move_to(x, y);
            for &(x, y) in rest {
                self.ctx.line_to(x, y);
            }
        }
        self.ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn set_blend(&mut self, blend: Blend) {
        let _ = self.ctx.set_global_composite_operation(blend.as_css());
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_rect_gradient(&mut self, rect: Rect, from: (f64, f64), to: (f64, f64), stops: &[Stop]) {
        let gradient = self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
        for &(offset, color) in stops {
            let _ = gradient.add_color_stop(offset as f32, color);
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn fill_radial(&mut self, center: (f64, f64), radius: f64, stops: &[Stop]) {
        let Ok(gradient) = self
            .ctx
            .create_radial_gradient(center.0, center.1, radius, center.0, center.1, 0.0)
        else {
            return;
        };
        for &(offset, color) in stops {
            let _ = gradient.add_color_stop(offset as f32, color);
        }
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap("round");
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str, outline: Option<(&str, f64)>, glow: Option<&str>) {
        self.ctx.save();
        if let Some(glow) = glow {
            self.ctx.set_shadow_color(glow);
            self.ctx.set_shadow_blur(5.0);
        }
        self.trace(points);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        if let Some((color, width)) = outline {
            self.ctx.set_line_width(width);
            self.ctx.set_stroke_style_str(color);
            self.ctx.stroke();
        }
        self.ctx.restore();
    }

    fn draw_sprite(&mut self, sprite: Sprite, src: Option<Rect>, dst: Rect, rotation: f64) {
        let Some(image) = self.assets.image(sprite) else {
            return;
        };
        self.ctx.save();
        let _ = self.ctx.translate(dst.x + dst.w / 2.0, dst.y + dst.h / 2.0);
        if rotation != 0.0 {
            let _ = self.ctx.rotate(rotation);
        }
        let (dx, dy) = (-dst.w / 2.0, -dst.h / 2.0);
        let _ = match src {
            Some(src) => self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image, src.x, src.y, src.w, src.h, dx, dy, dst.w, dst.h,
                ),
            None => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, dx, dy, dst.w, dst.h),
        };
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, at: (f64, f64), font: &str, color: &str, align: TextAlign) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self.ctx.fill_text(text, at.0, at.1);
    }
}

/// Sprite images requested from the page; drawn once the browser finishes loading them
pub struct ImageAssets {
    images: HashMap<Sprite, HtmlImageElement>,
}

impl ImageAssets {
    /// Start loading every sprite relative to `base_url`
    pub fn load(base_url: &str) -> Result<Self, StartupError> {
        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            let image = HtmlImageElement::new().map_err(|_| StartupError::MissingAsset(sprite.name()))?;
            image.set_src(&sprite.url(base_url));
            images.insert(sprite, image);
        }
        log::info!("Requested {} sprites from {}", images.len(), base_url);
        Ok(Self { images })
    }

    fn image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images.get(&sprite).filter(|_| self.is_ready(sprite))
    }
}

impl AssetStore for ImageAssets {
    fn is_ready(&self, sprite: Sprite) -> bool {
        self.images
            .get(&sprite)
            .is_some_and(|image| image.complete() && image.natural_width() > 0)
    }
}

//! Scene drawing for both toys
//!
//! Reads the mission and effects, never mutates them.

use glam::Vec2;

use super::hud::{self, RESTART_PROMPT, ResultPanel};
use super::surface::{AssetStore, Blend, Rect, Sprite, Surface, TextAlign, hsla, rgba};
use crate::Toy;
use crate::consts::*;
use crate::effects::{Effects, ParticleKind, SMOKE_SIZE};
use crate::sim::{Mission, MissionPhase};

/// Lander sprite size
const LANDER_W: f64 = 128.0;
const LANDER_H: f64 = 108.0;

/// Explosion sheet layout
const EXPL_WIDTH: f64 = 960.0;
const EXPL_HEIGHT: f64 = 768.0;
const EXPL_COLS: u32 = 5;
const EXPL_ROWS: u32 = 4;
const EXPL_FRAME_W: f64 = EXPL_WIDTH / EXPL_COLS as f64;
const EXPL_FRAME_H: f64 = EXPL_HEIGHT / EXPL_ROWS as f64;

/// Ascent rocket drawing
const RCK_WIDTH: f64 = 64.0;
const RCK_HEIGHT: f64 = 300.0;
const RCK_CONE: f64 = 64.0;
const PAD_Y: f64 = VIEW_HEIGHT - 128.0;

const HUD_FONT: &str = "11pt sans";

/// Per-frame values from the driver that are not part of the mission
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInfo {
    /// Last frame delta (s)
    pub dt: f64,
    pub show_render_time: bool,
}

/// Vertical view placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen y of the vehicle's base
    pub vehicle_y: f64,
    /// How far the world has scrolled down to keep the vehicle in view
    pub screen_offset: f64,
}

impl Camera {
    /// Place the vehicle `altitude` meters above `ground_y`; it never climbs above `pin_y`
    pub fn follow(altitude: f64, ground_y: f64, pixel_per_meter: f64, pin_y: f64) -> Self {
        let vehicle_y = ground_y - altitude * pixel_per_meter;
        if vehicle_y > pin_y {
            Self {
                vehicle_y,
                screen_offset: 0.0,
            }
        } else {
            Self {
                vehicle_y: pin_y,
                screen_offset: pin_y - vehicle_y,
            }
        }
    }

    pub fn for_mission(mission: &Mission) -> Self {
        match mission.toy {
            Toy::Lander => Self::follow(
                mission.vehicle.altitude,
                VIEW_HEIGHT - MOON_SURFACE,
                PIXEL_PER_METER,
                VIEW_HEIGHT / 2.0,
            ),
            // The rocket stays on screen; the ground falls away below it
            Toy::Ascent => Self::follow(mission.vehicle.altitude, PAD_Y, ASCENT_PIXEL_PER_METER, PAD_Y),
        }
    }
}

/// Screen position of the engine nozzle (exhaust emitter)
pub fn nozzle(mission: &Mission) -> Vec2 {
    let camera = Camera::for_mission(mission);
    let x = match mission.toy {
        Toy::Lander => VIEW_WIDTH / 2.0,
        Toy::Ascent => rocket_x() + RCK_WIDTH / 2.0,
    };
    Vec2::new(x as f32, camera.vehicle_y as f32)
}

fn rocket_x() -> f64 {
    LEFT_PANE + (VIEW_WIDTH - LEFT_PANE) / 2.0 - RCK_WIDTH / 2.0
}

/// Paint one frame of the running toy
pub fn draw<S: Surface, A: AssetStore>(
    surface: &mut S,
    assets: &A,
    mission: &Mission,
    effects: &Effects,
    help: &str,
    frame: FrameInfo,
) {
    match mission.toy {
        Toy::Lander => draw_lander(surface, assets, mission, effects, help),
        Toy::Ascent => draw_ascent(surface, assets, mission, effects, help, frame),
    }
}

fn draw_lander<S: Surface, A: AssetStore>(
    surface: &mut S,
    assets: &A,
    mission: &Mission,
    effects: &Effects,
    help: &str,
) {
    let camera = Camera::for_mission(mission);

    surface.set_blend(Blend::SourceOver);
    surface.fill_rect(Rect::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT), &rgba(5, 5, 2, 1.0));

    // Stars scroll with the camera and wrap vertically
    for star in &effects.stars.stars {
        let y = (star.y as f64 + camera.screen_offset).rem_euclid(VIEW_HEIGHT);
        surface.fill_circle((star.x as f64, y), star.radius as f64, &rgba(255, 255, 255, star.alpha));
    }

    let moon_y = VIEW_HEIGHT - MOON_SURFACE + camera.screen_offset;
    if moon_y <= VIEW_HEIGHT {
        surface.set_blend(Blend::Lighten);
        surface.fill_rect(Rect::new(0.0, moon_y, VIEW_WIDTH, MOON_SURFACE), "#ccc");
    }

    surface.set_blend(Blend::SourceOver);
    if assets.is_ready(Sprite::Lander) {
        let dst = Rect::new(
            VIEW_WIDTH / 2.0 - LANDER_W / 2.0,
            camera.vehicle_y - LANDER_H,
            LANDER_W,
            LANDER_H,
        );
        surface.draw_sprite(Sprite::Lander, None, dst, 0.0);
    }

    draw_hud_lines(surface, &hud::lander_lines(mission, help), 12.0, 24.0, "#fff");
    if mission.controls.autopilot {
        surface.fill_text("Autopilot ON", (12.0, 144.0), HUD_FONT, "#0f0", TextAlign::Left);
    }

    match mission.phase {
        MissionPhase::Flying if mission.is_burning() => draw_exhaust(surface, effects),
        MissionPhase::Crashing if assets.is_ready(Sprite::Explosion) => {
            let frame = mission.explosion.sheet_frame(mission.config.explosion_frames);
            let src = Rect::new(
                (frame % EXPL_COLS) as f64 * EXPL_FRAME_W,
                (frame / EXPL_COLS) as f64 * EXPL_FRAME_H,
                EXPL_FRAME_W,
                EXPL_FRAME_H,
            );
            let dst = Rect::new(
                VIEW_WIDTH / 2.0 - EXPL_FRAME_W / 2.0,
                camera.vehicle_y - EXPL_FRAME_H / 2.0,
                EXPL_FRAME_W,
                EXPL_FRAME_H,
            );
            surface.set_blend(Blend::Lighter);
            surface.draw_sprite(Sprite::Explosion, Some(src), dst, 0.0);
        }
        _ => {}
    }

    if let Some(panel) = hud::result_panel(mission) {
        draw_panel(surface, &panel);
    }
}

fn draw_exhaust<S: Surface>(surface: &mut S, effects: &Effects) {
    surface.set_blend(Blend::Overlay);
    for p in effects.particles.alive().filter(|p| p.kind == ParticleKind::Flame) {
        let center = (p.pos.x as f64, p.pos.y as f64);
        let halo = hsla(p.hue, 100.0, p.lightness, p.alpha / 20.0);
        let core = hsla(p.hue, 100.0, p.lightness, p.alpha);
        surface.fill_radial(center, p.radius as f64 * 3.0, &[(0.0, "transparent"), (0.5, halo.as_str())]);
        surface.fill_radial(center, p.radius as f64, &[(0.0, "transparent"), (0.5, core.as_str())]);
        let trail = (p.prev.x as f64, p.prev.y as f64);
        surface.stroke_line(trail, center, 1.5, &hsla(p.hue, 100.0, p.lightness, 1.0));
    }

    surface.set_blend(Blend::SoftLight);
    for (i, p) in effects.particles.alive().filter(|p| p.kind == ParticleKind::Spark).enumerate() {
        // Only every other dim spark, they wash out the flame otherwise
        if i % 2 == 0 {
            draw_streak(surface, p.prev, p.pos, p.radius, p.hue, p.lightness, p.alpha);
        }
    }

    surface.set_blend(Blend::ColorDodge);
    for p in effects.particles.alive().filter(|p| p.kind == ParticleKind::Ember) {
        draw_streak(surface, p.prev, p.pos, p.radius, p.hue, p.lightness, p.alpha);
    }
    surface.set_blend(Blend::SourceOver);
}

fn draw_streak<S: Surface>(surface: &mut S, from: Vec2, to: Vec2, radius: f32, hue: f32, lightness: f32, alpha: f32) {
    let from = (from.x as f64, from.y as f64);
    let to = (to.x as f64, to.y as f64);
    surface.stroke_line(from, to, radius as f64 * 2.0, &hsla(hue, 100.0, lightness, alpha / 2.0));
    surface.stroke_line(from, to, radius as f64, &hsla(hue, 100.0, lightness, alpha));
}

/// Bevelled info panel with a title, a subtitle, stat lines and a restart prompt
fn draw_panel<S: Surface>(surface: &mut S, panel: &ResultPanel) {
    const BEVEL: f64 = 32.0;
    const PADDING: f64 = 64.0;
    let (w, h) = (VIEW_WIDTH, VIEW_HEIGHT);
    let outline = [
        (PADDING + BEVEL, PADDING),
        (w - PADDING - BEVEL, PADDING),
        (w - PADDING, PADDING + BEVEL),
        (w - PADDING, h - PADDING - BEVEL),
        (w - PADDING - BEVEL, h - PADDING),
        (PADDING + BEVEL, h - PADDING),
        (PADDING, h - PADDING - BEVEL),
        (PADDING, PADDING + BEVEL),
    ];

    surface.set_blend(Blend::SourceOver);
    surface.fill_polygon(&outline, &rgba(0, 0, 0, 0.75), Some((panel.color, 3.0)), Some(panel.color));

    surface.fill_text(panel.title, (w / 2.0, 128.0), "bold 20pt sans", "#fff", TextAlign::Center);
    surface.fill_text(panel.subtitle, (w / 2.0, 150.0), HUD_FONT, panel.color, TextAlign::Center);
    surface.fill_text(RESTART_PROMPT, (w / 2.0, h - 128.0), "bold 14pt sans", panel.color, TextAlign::Center);

    for (i, line) in panel.lines.iter().enumerate() {
        surface.fill_text(line, (128.0, 200.0 + 24.0 * i as f64), HUD_FONT, "#fff", TextAlign::Left);
    }
}

fn draw_hud_lines<S: Surface>(surface: &mut S, lines: &[String], x: f64, top: f64, color: &str) {
    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(line, (x, top + 24.0 * i as f64), HUD_FONT, color, TextAlign::Left);
    }
}

fn draw_ascent<S: Surface, A: AssetStore>(
    surface: &mut S,
    assets: &A,
    mission: &Mission,
    effects: &Effects,
    help: &str,
    frame: FrameInfo,
) {
    let camera = Camera::for_mission(mission);
    let (w, h) = (VIEW_WIDTH, VIEW_HEIGHT);

    // Sky darkens as the air thins
    let thin = (mission.vehicle.altitude / mission.config.scale_height).clamp(0.0, 1.0);
    let (top, mid) = if thin < 0.5 { ("#fff", "#ccf") } else { ("#99c", "#669") };
    surface.set_blend(Blend::SourceOver);
    surface.fill_rect_gradient(
        Rect::new(0.0, 0.0, w, h),
        (0.0, h),
        (0.0, 0.0),
        &[(0.0, "#66c"), (0.65, mid), (1.0, top)],
    );

    // Ground strip until it scrolls out of view
    let ground_y = PAD_Y + camera.screen_offset;
    if ground_y < h {
        surface.fill_rect(Rect::new(0.0, ground_y, w, h - ground_y), "#575");
    }

    if assets.is_ready(Sprite::Smoke) {
        for p in effects.particles.alive().filter(|p| p.kind == ParticleKind::Smoke) {
            let size = SMOKE_SIZE as f64;
            let dst = Rect::new(p.pos.x as f64 - size / 2.0, p.pos.y as f64 - size / 2.0, size, size);
            surface.draw_sprite(Sprite::Smoke, None, dst, p.angle as f64);
        }
    }

    draw_rocket(surface, rocket_x(), camera.vehicle_y);

    // Left pane with readouts
    surface.fill_rect(Rect::new(0.0, 0.0, LEFT_PANE, h), "#ccc");
    surface.stroke_line((LEFT_PANE, 0.0), (LEFT_PANE, h), 1.0, "#aaa");
    draw_hud_lines(surface, &hud::ascent_lines(mission), 12.0, 24.0, "#000");
    if mission.phase == MissionPhase::Idle {
        surface.fill_text("Press [L] to launch", (12.0, 24.0 * 5.0), HUD_FONT, "#036", TextAlign::Left);
    }
    // Key help stacked one binding per line above the render time
    let keys: Vec<String> = help.split(", ").filter(|k| !k.is_empty()).map(String::from).collect();
    let keys_top = h - 36.0 - 24.0 * keys.len() as f64;
    draw_hud_lines(surface, &keys, 12.0, keys_top, "#333");
    if frame.show_render_time {
        surface.fill_text(&hud::render_time_line(frame.dt), (12.0, h - 12.0), HUD_FONT, "#000", TextAlign::Left);
    }

    if let Some(panel) = hud::result_panel(mission) {
        draw_panel(surface, &panel);
    }
}

/// Cylinder body with a metallic gradient and a conical nose; `base_y` is the bottom edge
fn draw_rocket<S: Surface>(surface: &mut S, x: f64, base_y: f64) {
    let body = Rect::new(x, base_y - RCK_HEIGHT, RCK_WIDTH, RCK_HEIGHT);
    let mid_y = base_y - RCK_HEIGHT / 2.0;
    surface.fill_rect_gradient(
        body,
        (x, mid_y),
        (x + RCK_WIDTH, mid_y),
        &[(0.0, "#ccc"), (0.2, "#fff"), (0.5, "#aaa"), (0.95, "#ccc"), (1.0, "#aaa")],
    );
    let outline = [
        (x, base_y),
        (x, base_y - RCK_HEIGHT),
        (x + RCK_WIDTH, base_y - RCK_HEIGHT),
        (x + RCK_WIDTH, base_y),
    ];
    surface.fill_polygon(&outline, "transparent", Some(("#000", 1.0)), None);
    let cone = [
        (x, base_y - RCK_HEIGHT),
        (x + RCK_WIDTH / 2.0, base_y - RCK_HEIGHT - RCK_CONE),
        (x + RCK_WIDTH, base_y - RCK_HEIGHT),
    ];
    surface.fill_polygon(&cone, "#ccc", Some(("#000", 1.0)), None);
}

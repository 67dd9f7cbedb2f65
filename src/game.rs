//! Game instance holding all per-toy state
//!
//! Host-independent: the browser glue feeds it timestamps and key presses
//! and hands it a surface to paint on.

use crate::Toy;
use crate::driver::{FrameClock, FrameLoop, FrameRequest, LoopGeneration};
use crate::effects::Effects;
use crate::input::Keymap;
use crate::renderer::{self, AssetStore, FrameInfo, Surface};
use crate::settings::Settings;
use crate::sim::{Mission, MissionEvent, SimConfig, TickInput, tick};

pub struct Game {
    pub mission: Mission,
    pub effects: Effects,
    pub settings: Settings,
    keymap: Keymap,
    input: TickInput,
    clock: FrameClock,
    frame_loop: FrameLoop,
}

impl Game {
    pub fn new(toy: Toy, config: SimConfig, settings: Settings, seed: u64) -> Self {
        Self {
            mission: Mission::new(toy, config),
            effects: Effects::new(toy, &settings, seed),
            keymap: Keymap::for_toy(toy),
            settings,
            input: TickInput::default(),
            clock: FrameClock::new(),
            frame_loop: FrameLoop::new(),
        }
    }

    /// Queue the command bound to `key`; returns false for unbound keys
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.keymap.command_for(key) {
            Some(command) => {
                self.input.push(command);
                true
            }
            None => false,
        }
    }

    /// Run one frame: measure time, update the simulation, then paint
    pub fn frame<S: Surface, A: AssetStore>(
        &mut self,
        now_ms: f64,
        surface: &mut S,
        assets: &A,
    ) -> Option<MissionEvent> {
        let event = self.update(now_ms);
        self.render(surface, assets);
        event
    }

    /// Simulation half of a frame
    pub fn update(&mut self, now_ms: f64) -> Option<MissionEvent> {
        let dt = self.clock.advance(now_ms);
        let event = tick(&mut self.mission, &self.input, dt);
        // Commands are one-shot
        self.input.clear();

        let nozzle = renderer::nozzle(&self.mission);
        if let Some(event) = event {
            self.effects.on_event(event, nozzle);
        }
        self.effects.update(&self.mission, nozzle, dt);
        event
    }

    /// Paint the current state
    pub fn render<S: Surface, A: AssetStore>(&self, surface: &mut S, assets: &A) {
        let frame = FrameInfo {
            dt: self.clock.dt(),
            show_render_time: self.settings.show_render_time,
        };
        renderer::draw(surface, assets, &self.mission, &self.effects, self.keymap.help(), frame);
    }

    /// Start a fresh frame chain; returns its generation and the stale request to cancel
    pub fn begin_loop(&mut self) -> (LoopGeneration, Option<FrameRequest>) {
        self.clock.reset();
        self.frame_loop.begin()
    }

    pub fn frame_loop(&mut self) -> &mut FrameLoop {
        &mut self.frame_loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Blend, Rect, Sprite, TextAlign};
    use crate::sim::MissionPhase;

    #[derive(Default)]
    struct Counter {
        texts: Vec<String>,
    }

    impl Surface for Counter {
        fn set_blend(&mut self, _blend: Blend) {}
        fn fill_rect(&mut self, _rect: Rect, _color: &str) {}
        fn fill_rect_gradient(
            &mut self,
            _rect: Rect,
            _from: (f64, f64),
            _to: (f64, f64),
            _stops: &[(f64, &str)],
        ) {
        }
        fn fill_circle(&mut self, _center: (f64, f64), _radius: f64, _color: &str) {}
        fn fill_radial(&mut self, _center: (f64, f64), _radius: f64, _stops: &[(f64, &str)]) {}
        fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _width: f64, _color: &str) {}
        fn fill_polygon(
            &mut self,
            _points: &[(f64, f64)],
            _fill: &str,
            _outline: Option<(&str, f64)>,
            _glow: Option<&str>,
        ) {
        }
        fn draw_sprite(&mut self, _sprite: Sprite, _src: Option<Rect>, _dst: Rect, _rotation: f64) {}
        fn fill_text(&mut self, text: &str, _at: (f64, f64), _font: &str, _color: &str, _align: TextAlign) {
            self.texts.push(text.to_string());
        }
    }

    struct NoAssets;

    impl AssetStore for NoAssets {
        fn is_ready(&self, _sprite: Sprite) -> bool {
            false
        }
    }

    fn lander() -> Game {
        Game::new(Toy::Lander, SimConfig::lander(), Settings::default(), 9)
    }

    #[test]
    fn test_frame_updates_before_painting() {
        let mut game = lander();
        let mut surface = Counter::default();
        game.frame(0.0, &mut surface, &NoAssets);

        // First frame integrates the default delta, and the HUD shows the new state
        assert!(game.mission.vehicle.elapsed > 0.0);
        let altitude = format!("Altitude: {:.2} m", game.mission.vehicle.altitude);
        assert!(surface.texts.contains(&altitude));
    }

    #[test]
    fn test_keys_are_one_shot() {
        let mut game = lander();
        assert!(game.key_down("T"));
        assert!(!game.key_down("q"));
        game.update(0.0);
        assert!(game.mission.controls.thrusters_active);

        // The toggle is not re-applied on the next frame
        game.update(16.0);
        assert!(game.mission.controls.thrusters_active);
    }

    #[test]
    fn test_restart_key_resets_mission_and_effects() {
        let mut game = lander();
        game.key_down("t");
        for i in 0..30 {
            game.update(i as f64 * 16.0);
        }
        assert!(game.effects.particles.live_count() > 0);

        game.key_down("r");
        let event = game.update(30.0 * 16.0);
        assert_eq!(event, Some(MissionEvent::Restarted));
        assert_eq!(game.mission.phase, MissionPhase::Flying);
        assert_eq!(game.mission.vehicle.altitude, 100.0);
        assert!(!game.mission.controls.thrusters_active);
        assert_eq!(game.effects.particles.live_count(), 0);
    }

    #[test]
    fn test_paused_tab_does_not_teleport() {
        let mut game = lander();
        game.update(0.0);
        let before = game.mission.vehicle.elapsed;
        // Ten seconds hidden
        game.update(10_000.0);
        assert!(game.mission.vehicle.elapsed - before <= crate::consts::MAX_FRAME_DT + 1e-12);
    }

    #[test]
    fn test_begin_loop_resets_clock() {
        let mut game = lander();
        let (first, _) = game.begin_loop();
        game.frame_loop().armed(first, FrameRequest(1));
        game.update(5_000.0);

        let (second, stale) = game.begin_loop();
        assert_eq!(stale, Some(FrameRequest(1)));
        assert!(!game.frame_loop().accept(first));
        assert!(game.frame_loop().accept(second));

        let before = game.mission.vehicle.elapsed;
        game.update(9_000.0);
        assert!((game.mission.vehicle.elapsed - before - crate::consts::DEFAULT_FRAME_DT).abs() < 1e-12);
    }
}

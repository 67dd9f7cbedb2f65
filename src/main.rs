//! Rocket Toys entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use rocket_toys::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use rocket_toys::driver::{FrameRequest, LoopGeneration};
    use rocket_toys::game::Game;
    use rocket_toys::platform::{CanvasSurface, ImageAssets};
    use rocket_toys::sim::{MissionEvent, SimConfig};
    use rocket_toys::{Settings, StartupError, Toy};

    const CANVAS_ID: &str = "canvas";

    /// Game plus the browser objects it paints with
    struct Host {
        game: Game,
        surface: CanvasSurface,
        assets: Rc<ImageAssets>,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Rocket Toys starting...");

        match setup() {
            Ok(host) => {
                let host = Rc::new(RefCell::new(host));
                setup_input_handlers(host.clone());
                start_loop(host);
                log::info!("Rocket Toys running!");
            }
            Err(e) => log::error!("Startup failed: {}", e),
        }
    }

    fn setup() -> Result<Host, StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| StartupError::MissingCanvas(CANVAS_ID.to_string()))?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas(CANVAS_ID.to_string()))?;
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let toy = match canvas.get_attribute("data-toy") {
            Some(name) => Toy::parse(&name).ok_or(StartupError::UnknownToy(name))?,
            None => Toy::Lander,
        };
        let config = match canvas.get_attribute("data-config") {
            Some(json) => SimConfig::from_json_overrides(SimConfig::for_toy(toy), &json)?,
            None => SimConfig::for_toy(toy),
        };

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(StartupError::NoContext2d)?
            .dyn_into()
            .map_err(|_| StartupError::NoContext2d)?;

        // Sprites live under the site root unless the page points elsewhere
        let asset_base = canvas.get_attribute("data-assets").unwrap_or_default();
        let assets = Rc::new(ImageAssets::load(&asset_base)?);
        let settings = Settings::load();

        let seed = js_sys::Date::now() as u64;
        log::info!("Starting {} with seed {}", toy.as_str(), seed);

        Ok(Host {
            game: Game::new(toy, config, settings, seed),
            surface: CanvasSurface::new(ctx, assets.clone()),
            assets,
        })
    }

    fn setup_input_handlers(host: Rc<RefCell<Host>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            if host.borrow_mut().game.key_down(&event.key()) {
                event.prevent_default();
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Begin a new frame chain, cancelling whatever the previous one had scheduled
    fn start_loop(host: Rc<RefCell<Host>>) {
        let (generation, stale) = host.borrow_mut().game.begin_loop();
        if let Some(FrameRequest(id)) = stale
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
        request_animation_frame(host, generation);
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>, generation: LoopGeneration) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback_host = host.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(callback_host, generation, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => {
                host.borrow_mut().game.frame_loop().armed(generation, FrameRequest(id));
            }
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, generation: LoopGeneration, time: f64) {
        let event = {
            let mut h = host.borrow_mut();
            if !h.game.frame_loop().accept(generation) {
                return;
            }
            let Host { game, surface, assets } = &mut *h;
            game.frame(time, surface, &**assets)
        };

        if event == Some(MissionEvent::Restarted) {
            start_loop(host);
        } else {
            request_animation_frame(host, generation);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rocket Toys (native) starting...");
    log::info!("Native mode runs headless flights - serve the wasm build for the interactive toys");

    fly_lander();
    fly_ascent();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopiloted lunar descent at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
fn fly_lander() {
    use rocket_toys::Toy;
    use rocket_toys::consts::DEFAULT_FRAME_DT;
    use rocket_toys::sim::{Command, Mission, SimConfig, TickInput, tick};

    let mut mission = Mission::new(Toy::Lander, SimConfig::lander());
    let mut input = TickInput::default();
    input.push(Command::ToggleAutopilot);

    // Ten simulated minutes is far beyond any descent
    for _ in 0..36_000 {
        tick(&mut mission, &input, DEFAULT_FRAME_DT);
        input.clear();
        if mission.phase.is_terminal() {
            break;
        }
    }

    let vehicle = &mission.vehicle;
    println!(
        "Lander: {} after {:.2} s at {:.2} m.s⁻¹ with {:.2} kg fuel left",
        mission.phase.as_str(),
        vehicle.elapsed,
        vehicle.velocity,
        mission.fuel()
    );
}

/// Vertical launch burning the whole tank
#[cfg(not(target_arch = "wasm32"))]
fn fly_ascent() {
    use rocket_toys::Toy;
    use rocket_toys::consts::DEFAULT_FRAME_DT;
    use rocket_toys::sim::{Command, Mission, SimConfig, TickInput, tick};

    let mut mission = Mission::new(Toy::Ascent, SimConfig::ascent());
    let mut input = TickInput::default();
    input.push(Command::Launch);

    for _ in 0..36_000 {
        tick(&mut mission, &input, DEFAULT_FRAME_DT);
        input.clear();
        if mission.phase.is_terminal() {
            break;
        }
    }

    println!(
        "Ascent: {} at {:.2} m, {:.2} m.s⁻¹, apogee {:.2} m after {:.2} s",
        mission.phase.as_str(),
        mission.vehicle.altitude,
        mission.vehicle.velocity,
        mission.apogee,
        mission.vehicle.elapsed
    );
}

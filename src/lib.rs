//! Rocket Toys - a lunar lander minigame and a vertical ascent simulator
//!
//! Core modules:
//! - `sim`: Simulation core (integrator, mission state machine, vehicle config)
//! - `driver`: Frame clock and cancellable frame loop bookkeeping
//! - `input`: Key mapping to mission commands
//! - `effects`: Cosmetic particles and starfield (never read by physics)
//! - `game`: Per-frame orchestration of simulation, effects and drawing
//! - `renderer`: Scene drawing onto an abstract 2D surface
//! - `platform`: Browser glue (canvas surface, sprites)

pub mod driver;
pub mod effects;
pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::{QualityPreset, Settings};

use serde::{Deserialize, Serialize};

/// Frame timing and view constants
pub mod consts {
    /// Delta used for the first frame after a (re)start, before a previous timestamp exists
    pub const DEFAULT_FRAME_DT: f64 = 1.0 / 60.0;
    /// Largest delta a single frame may integrate (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Canvas dimensions (CSS pixels)
    pub const VIEW_WIDTH: f64 = 800.0;
    pub const VIEW_HEIGHT: f64 = 600.0;

    /// Lander view scale
    pub const PIXEL_PER_METER: f64 = 48.0;
    /// Height of the moon strip at the bottom of the lander view
    pub const MOON_SURFACE: f64 = 100.0;

    /// Ascent view left panel width
    pub const LEFT_PANE: f64 = 200.0;
    /// Pixels per meter in the ascent view (pad sits near the bottom)
    pub const ASCENT_PIXEL_PER_METER: f64 = 2.0;

    /// Number of background stars in the lander view
    pub const STAR_COUNT: usize = 100;
}

/// Which toy is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toy {
    /// Lunar landing minigame
    Lander,
    /// Vertical rocket ascent
    Ascent,
}

impl Toy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toy::Lander => "lander",
            Toy::Ascent => "ascent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lander" | "moon" => Some(Toy::Lander),
            "ascent" | "goddard" | "rocket" => Some(Toy::Ascent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toy_parse() {
        assert_eq!(Toy::parse("Lander"), Some(Toy::Lander));
        assert_eq!(Toy::parse(" ascent "), Some(Toy::Ascent));
        assert_eq!(Toy::parse("goddard"), Some(Toy::Ascent));
        assert_eq!(Toy::parse("pinball"), None);
    }
}

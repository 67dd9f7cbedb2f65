//! Simulation core
//!
//! All flight logic lives here, shared by both toys:
//! - One forward Euler step per frame
//! - Owned state passed explicitly (no globals)
//! - No rendering or platform dependencies

pub mod config;
pub mod integrator;
pub mod state;
pub mod tick;

pub use config::{ConfigError, SimConfig};
pub use integrator::{StepOutcome, air_density, autopilot, drag_force, gravity_at, step};
pub use state::{ControlInputs, Explosion, Mission, MissionEvent, MissionPhase, VehicleState};
pub use tick::{Command, TickInput, tick};

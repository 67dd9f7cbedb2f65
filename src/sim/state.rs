//! Mission state and core simulation types
//!
//! Everything the integrator reads or writes lives in one owned [`Mission`].

use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use crate::Toy;

/// Current phase of the mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    /// On the pad (or just reset), waiting for launch
    Idle,
    /// Integrator running
    Flying,
    /// Hit the ground too fast, explosion playing
    Crashing,
    /// Explosion finished
    Crashed,
    /// Touched down within tolerance
    Landed,
    /// Tanks empty (ascent)
    OutOfFuel,
}

impl MissionPhase {
    /// Terminal phases only leave through a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionPhase::Crashed | MissionPhase::Landed | MissionPhase::OutOfFuel)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPhase::Idle => "idle",
            MissionPhase::Flying => "flying",
            MissionPhase::Crashing => "crashing",
            MissionPhase::Crashed => "crashed",
            MissionPhase::Landed => "landed",
            MissionPhase::OutOfFuel => "out of fuel",
        }
    }
}

/// Authoritative vehicle state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Height above the surface (m, never negative)
    pub altitude: f64,
    /// Vertical velocity (m/s, up is positive)
    pub velocity: f64,
    /// Total mass including fuel (kg)
    pub mass: f64,
    /// Mission elapsed time (s)
    pub elapsed: f64,
}

impl VehicleState {
    /// Initial conditions for a config
    pub fn initial(config: &SimConfig) -> Self {
        Self {
            altitude: config.initial_altitude,
            velocity: config.initial_velocity,
            mass: config.full_mass,
            elapsed: 0.0,
        }
    }

    /// Remaining fuel (kg)
    pub fn fuel(&self, config: &SimConfig) -> f64 {
        (self.mass - config.empty_mass).max(0.0)
    }

    /// Kinetic energy at the current velocity (kJ)
    pub fn impact_energy_kj(&self) -> f64 {
        self.mass * self.velocity * self.velocity / 2000.0
    }
}

/// Pilot controls read by the integrator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInputs {
    pub thrusters_active: bool,
    pub autopilot: bool,
}

/// Explosion sprite sequence progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    /// Fractional sheet frame
    pub frame: f64,
}

impl Explosion {
    /// Sheet frame to draw
    pub fn sheet_frame(&self, frames: u32) -> u32 {
        (self.frame.max(0.0) as u32).min(frames.saturating_sub(1))
    }
}

/// Phase transitions reported by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissionEvent {
    Launched,
    Restarted,
    Landed { impact_speed: f64 },
    Crashed { impact_speed: f64 },
    Exploded,
    OutOfFuel { altitude: f64 },
}

/// Complete mission state (owned, passed explicitly to tick and renderer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub toy: Toy,
    pub config: SimConfig,
    pub vehicle: VehicleState,
    pub phase: MissionPhase,
    pub controls: ControlInputs,
    pub explosion: Explosion,
    /// Highest altitude reached this run (m)
    pub apogee: f64,
}

impl Mission {
    /// Create a mission in its post-restart state
    pub fn new(toy: Toy, config: SimConfig) -> Self {
        let mut mission = Self {
            toy,
            vehicle: VehicleState::initial(&config),
            config,
            phase: MissionPhase::Idle,
            controls: ControlInputs::default(),
            explosion: Explosion::default(),
            apogee: 0.0,
        };
        mission.restart();
        mission
    }

    /// Reset vehicle, controls and explosion; launch right away if the config says so
    pub fn restart(&mut self) {
        self.vehicle = VehicleState::initial(&self.config);
        self.controls = ControlInputs::default();
        self.explosion = Explosion::default();
        self.apogee = self.vehicle.altitude;
        self.phase = MissionPhase::Idle;
        if self.config.auto_launch {
            self.phase = MissionPhase::Flying;
        }
    }

    /// Leave Idle. Returns false if the mission is not waiting on the pad.
    pub fn launch(&mut self) -> bool {
        if self.phase != MissionPhase::Idle {
            return false;
        }
        self.phase = MissionPhase::Flying;
        // A rocket on the pad goes nowhere without its engine
        if self.vehicle.altitude <= 0.0 {
            self.controls.thrusters_active = true;
        }
        true
    }

    /// Remaining fuel (kg)
    pub fn fuel(&self) -> f64 {
        self.vehicle.fuel(&self.config)
    }

    /// Engine is producing thrust this frame (for exhaust effects)
    pub fn is_burning(&self) -> bool {
        self.phase == MissionPhase::Flying
            && self.controls.thrusters_active
            && self.vehicle.mass > self.config.empty_mass
    }
}

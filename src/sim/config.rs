//! Vehicle and environment parameters
//!
//! One config struct drives both toys; the presets reproduce the lander and
//! ascent pages. The page may override individual fields with a JSON object.

use serde::{Deserialize, Serialize};

use crate::Toy;

/// Physical parameters for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Surface gravity (m/s²)
    pub gravity: f64,
    /// Planet radius for inverse-square gravity falloff (m). `None` keeps gravity constant.
    pub planet_radius: Option<f64>,
    /// Maximum engine thrust (N)
    pub max_thrust: f64,
    /// Fuel burned per newton-second of thrust, i.e. the inverse exhaust speed (s/m)
    pub fuel_per_impulse: f64,
    /// Mass without fuel (kg)
    pub empty_mass: f64,
    /// Mass with full tanks (kg)
    pub full_mass: f64,
    /// Drag coefficient (dimensionless)
    pub drag_coefficient: f64,
    /// Cross-sectional area (m²)
    pub cross_section: f64,
    /// Air density at altitude 0 (kg/m³)
    pub sea_level_density: f64,
    /// Exponential atmosphere scale height (m)
    pub scale_height: f64,
    /// Highest ground-contact speed that still counts as a landing (m/s)
    pub shock_tolerance: f64,
    /// Autopilot fires the engine below this altitude (m)
    pub autopilot_altitude: f64,
    /// Altitude at (re)start (m)
    pub initial_altitude: f64,
    /// Velocity at (re)start (m/s, up is positive)
    pub initial_velocity: f64,
    /// Launch immediately after a restart instead of waiting in Idle
    pub auto_launch: bool,
    /// Running out of fuel ends the mission
    pub fuel_exhaustion_ends_mission: bool,
    /// Frames in the explosion sprite sheet
    pub explosion_frames: u32,
    /// Duration of one explosion frame (s)
    pub explosion_frame_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::lander()
    }
}

impl SimConfig {
    /// Moon lander: 1.5 t craft with 500 kg of fuel, starting at 100 m descending at 10 m/s
    pub fn lander() -> Self {
        Self {
            gravity: 1.62,
            planet_radius: None,
            max_thrust: 20_000.0,
            fuel_per_impulse: 1.0 / 200.0,
            empty_mass: 1000.0,
            full_mass: 1500.0,
            drag_coefficient: 0.0,
            cross_section: 0.0,
            sea_level_density: 0.0,
            scale_height: 8500.0,
            shock_tolerance: 5.0,
            autopilot_altitude: 15.0,
            initial_altitude: 100.0,
            initial_velocity: -10.0,
            auto_launch: true,
            fuel_exhaustion_ends_mission: false,
            explosion_frames: 20,
            explosion_frame_secs: 0.05,
        }
    }

    /// Small sounding rocket: 10 kg dry, 100 kg of fuel, conical nose
    pub fn ascent() -> Self {
        Self {
            gravity: 9.81,
            planet_radius: Some(6_371_000.0),
            max_thrust: 2_000.0,
            fuel_per_impulse: 1.0 / 2_000.0,
            empty_mass: 10.0,
            full_mass: 110.0,
            drag_coefficient: 0.5,
            cross_section: 1.0,
            sea_level_density: 1.225,
            scale_height: 8500.0,
            shock_tolerance: 5.0,
            autopilot_altitude: 15.0,
            initial_altitude: 0.0,
            initial_velocity: 0.0,
            auto_launch: false,
            fuel_exhaustion_ends_mission: true,
            explosion_frames: 20,
            explosion_frame_secs: 0.05,
        }
    }

    /// Preset for a toy
    pub fn for_toy(toy: Toy) -> Self {
        match toy {
            Toy::Lander => Self::lander(),
            Toy::Ascent => Self::ascent(),
        }
    }

    /// Apply a JSON object of field overrides on top of `base`
    pub fn from_json_overrides(base: Self, json: &str) -> Result<Self, ConfigError> {
        let mut value = serde_json::to_value(&base).map_err(ConfigError::Json)?;
        let overrides: serde_json::Value = serde_json::from_str(json).map_err(ConfigError::Json)?;
        let serde_json::Value::Object(fields) = overrides else {
            return Err(ConfigError::NotAnObject);
        };
        if let serde_json::Value::Object(ref mut target) = value {
            for (key, field) in fields {
                if !target.contains_key(&key) {
                    return Err(ConfigError::UnknownField(key));
                }
                target.insert(key, field);
            }
        }
        let config: Self = serde_json::from_value(value).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter sets the integrator cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.empty_mass > 0.0) {
            return Err(ConfigError::Invalid("empty_mass must be positive"));
        }
        if self.full_mass < self.empty_mass {
            return Err(ConfigError::Invalid("full_mass must be at least empty_mass"));
        }
        if self.max_thrust < 0.0 || self.fuel_per_impulse < 0.0 {
            return Err(ConfigError::Invalid("thrust and fuel consumption must be non-negative"));
        }
        if !(self.shock_tolerance > 0.0) {
            return Err(ConfigError::Invalid("shock_tolerance must be positive"));
        }
        if self.explosion_frames == 0 || !(self.explosion_frame_secs > 0.0) {
            return Err(ConfigError::Invalid("explosion timing must be positive"));
        }
        if self.initial_altitude < 0.0 {
            return Err(ConfigError::Invalid("initial_altitude must be non-negative"));
        }
        if !(self.scale_height > 0.0) {
            return Err(ConfigError::Invalid("scale_height must be positive"));
        }
        if matches!(self.planet_radius, Some(r) if !(r > 0.0)) {
            return Err(ConfigError::Invalid("planet_radius must be positive"));
        }
        Ok(())
    }

    /// Fuel capacity (kg)
    pub fn fuel_capacity(&self) -> f64 {
        self.full_mass - self.empty_mass
    }
}

/// Config override failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("config overrides must be a JSON object")]
    NotAnObject,
    #[error("unknown config field `{0}`")]
    UnknownField(String),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

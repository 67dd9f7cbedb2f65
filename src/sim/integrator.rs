//! Forward Euler vertical integrator
//!
//! One step per frame, no sub-stepping: accuracy depends on the frame rate.
//! Forces: gravity (optionally falling off with altitude), engine thrust while
//! fuel remains, and quadratic drag in an exponential atmosphere.

use super::config::SimConfig;
use super::state::{ControlInputs, VehicleState};

/// What happened during a single integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Net acceleration applied (m/s²)
    pub acceleration: f64,
    /// Thrust actually produced (N)
    pub thrust: f64,
    /// Fuel burned (kg)
    pub fuel_burned: f64,
    /// Tanks ran dry during or before this step
    pub fuel_exhausted: bool,
    /// Surface contact speed, if the vehicle crossed below altitude 0 while descending
    pub contact_speed: Option<f64>,
}

/// Gravitational acceleration at altitude (m/s², positive downward)
pub fn gravity_at(config: &SimConfig, altitude: f64) -> f64 {
    match config.planet_radius {
        Some(radius) => {
            let ratio = radius / (radius + altitude.max(0.0));
            config.gravity * ratio * ratio
        }
        None => config.gravity,
    }
}

/// Air density at altitude (kg/m³)
pub fn air_density(config: &SimConfig, altitude: f64) -> f64 {
    config.sea_level_density * (-altitude.max(0.0) / config.scale_height).exp()
}

/// Drag force magnitude at altitude and speed (N)
pub fn drag_force(config: &SimConfig, altitude: f64, velocity: f64) -> f64 {
    0.5 * air_density(config, altitude) * config.drag_coefficient * config.cross_section * velocity * velocity
}

/// Bang-bang autopilot: burn below the threshold altitude, coast above it
pub fn autopilot(config: &SimConfig, vehicle: &VehicleState, controls: &mut ControlInputs) {
    controls.thrusters_active = vehicle.altitude < config.autopilot_altitude;
}

/// Advance the vehicle by `dt` seconds
///
/// Mass never drops below `config.empty_mass`; once it sits at the bound the
/// thrusters are switched off and produce nothing. Altitude is clamped at 0.
pub fn step(config: &SimConfig, vehicle: &mut VehicleState, controls: &mut ControlInputs, dt: f64) -> StepOutcome {
    let dt = dt.max(0.0);
    vehicle.elapsed += dt;

    // Thrust and fuel burn
    let mut thrust = 0.0;
    let mut fuel_burned = 0.0;
    let mut fuel_exhausted = false;
    if controls.thrusters_active {
        let fuel = (vehicle.mass - config.empty_mass).max(0.0);
        if fuel > 0.0 {
            let wanted = config.fuel_per_impulse * config.max_thrust * dt;
            fuel_burned = wanted.min(fuel);
            // A clipped burn only delivers its share of the impulse
            thrust = if wanted > 0.0 {
                config.max_thrust * (fuel_burned / wanted)
            } else {
                config.max_thrust
            };
            vehicle.mass = (vehicle.mass - fuel_burned).max(config.empty_mass);
            fuel_exhausted = vehicle.mass <= config.empty_mass;
        } else {
            controls.thrusters_active = false;
            vehicle.mass = config.empty_mass;
            fuel_exhausted = true;
        }
    }

    let drag = drag_force(config, vehicle.altitude, vehicle.velocity) * vehicle.velocity.signum();
    let acceleration = (thrust - drag) / vehicle.mass - gravity_at(config, vehicle.altitude);

    // Moving toward the surface before this step (airborne, or already descending at 0)
    let approaching = vehicle.altitude > 0.0 || vehicle.velocity < 0.0;
    vehicle.velocity += acceleration * dt;
    vehicle.altitude += vehicle.velocity * dt;

    let mut contact_speed = None;
    if vehicle.altitude <= 0.0 {
        if approaching && vehicle.velocity < 0.0 {
            contact_speed = Some(vehicle.velocity.abs());
        } else {
            // Sitting on the pad without enough thrust to lift off
            vehicle.velocity = vehicle.velocity.max(0.0);
        }
        vehicle.altitude = 0.0;
    }

    StepOutcome {
        acceleration,
        thrust,
        fuel_burned,
        fuel_exhausted,
        contact_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vehicle(altitude: f64, velocity: f64, mass: f64) -> VehicleState {
        VehicleState { altitude, velocity, mass, elapsed: 0.0 }
    }

    #[test]
    fn test_free_fall_single_step() {
        let config = SimConfig::lander();
        let mut v = vehicle(100.0, -10.0, 1500.0);
        let mut controls = ControlInputs::default();

        let outcome = step(&config, &mut v, &mut controls, 1.0);

        assert!((v.velocity - -11.62).abs() < 1e-9);
        assert!((v.altitude - 88.38).abs() < 1e-9);
        assert_eq!(v.elapsed, 1.0);
        assert_eq!(outcome.thrust, 0.0);
        assert_eq!(outcome.contact_speed, None);
    }

    #[test]
    fn test_thrust_burns_fuel() {
        let config = SimConfig::lander();
        let mut v = vehicle(100.0, 0.0, 1500.0);
        let mut controls = ControlInputs { thrusters_active: true, autopilot: false };

        let outcome = step(&config, &mut v, &mut controls, 0.1);

        // 20 kN at 1/200 s/m burns 100 kg/s
        assert!((outcome.fuel_burned - 10.0).abs() < 1e-9);
        assert!((v.mass - 1490.0).abs() < 1e-9);
        assert_eq!(outcome.thrust, 20_000.0);
        assert!(v.velocity > 0.0);
    }

    #[test]
    fn test_empty_tank_produces_no_thrust() {
        let config = SimConfig::lander();
        let mut v = vehicle(50.0, -5.0, config.empty_mass);
        let mut controls = ControlInputs { thrusters_active: true, autopilot: false };

        let outcome = step(&config, &mut v, &mut controls, 0.1);

        assert_eq!(outcome.thrust, 0.0);
        assert!(outcome.fuel_exhausted);
        assert!(!controls.thrusters_active);
        assert_eq!(v.mass, config.empty_mass);
    }

    #[test]
    fn test_last_drop_clips_burn_and_thrust() {
        let config = SimConfig::lander();
        // 1 kg left, a 0.1 s burn wants 10 kg
        let mut v = vehicle(50.0, 0.0, config.empty_mass + 1.0);
        let mut controls = ControlInputs { thrusters_active: true, autopilot: false };

        let outcome = step(&config, &mut v, &mut controls, 0.1);
        assert!((outcome.fuel_burned - 1.0).abs() < 1e-9);
        assert!((outcome.thrust - 2_000.0).abs() < 1e-6);
        assert!(outcome.fuel_exhausted);
        assert_eq!(v.mass, config.empty_mass);

        // Next step: nothing left
        let outcome = step(&config, &mut v, &mut controls, 0.1);
        assert_eq!(outcome.thrust, 0.0);
        assert_eq!(v.mass, config.empty_mass);
    }

    #[test]
    fn test_ground_contact_reports_speed() {
        let config = SimConfig::lander();
        let mut v = vehicle(0.5, -6.0, 1500.0);
        let mut controls = ControlInputs::default();

        let outcome = step(&config, &mut v, &mut controls, 0.1);

        let speed = outcome.contact_speed.expect("should touch down");
        assert!((speed - 6.162).abs() < 1e-9);
        assert_eq!(v.altitude, 0.0);
    }

    #[test]
    fn test_step_ending_exactly_at_surface_is_contact() {
        let config = SimConfig { gravity: 2.0, ..SimConfig::lander() };
        // 12 - 10 - 2 lands on exactly 0.0
        let mut v = vehicle(12.0, -10.0, 1500.0);
        let mut controls = ControlInputs::default();

        let outcome = step(&config, &mut v, &mut controls, 1.0);

        assert_eq!(v.altitude, 0.0);
        assert_eq!(outcome.contact_speed, Some(12.0));
    }

    #[test]
    fn test_descending_from_the_surface_is_contact() {
        let config = SimConfig::lander();
        let mut v = vehicle(0.0, -8.0, 1500.0);
        let mut controls = ControlInputs::default();

        let outcome = step(&config, &mut v, &mut controls, 0.1);

        let speed = outcome.contact_speed.expect("should touch down");
        assert!((speed - 8.162).abs() < 1e-9);
        assert_eq!(v.altitude, 0.0);
    }

    #[test]
    fn test_resting_on_pad_is_not_contact() {
        let config = SimConfig::ascent();
        let mut v = vehicle(0.0, 0.0, config.full_mass);
        let mut controls = ControlInputs::default();

        let outcome = step(&config, &mut v, &mut controls, 0.1);

        assert_eq!(outcome.contact_speed, None);
        assert_eq!(v.altitude, 0.0);
        assert_eq!(v.velocity, 0.0);
    }

    #[test]
    fn test_drag_opposes_motion() {
        let config = SimConfig::ascent();
        let mut up = vehicle(100.0, 50.0, 50.0);
        let mut down = vehicle(100.0, -50.0, 50.0);
        let mut controls = ControlInputs::default();

        let a_up = step(&config, &mut up, &mut controls, 0.01).acceleration;
        let a_down = step(&config, &mut down, &mut controls, 0.01).acceleration;
        let g = gravity_at(&config, 100.0);

        assert!(a_up < -g);
        assert!(a_down > -g);
    }

    #[test]
    fn test_atmosphere_thins_with_altitude() {
        let config = SimConfig::ascent();
        assert!((air_density(&config, 0.0) - 1.225).abs() < 1e-12);
        assert!(air_density(&config, 10_000.0) < air_density(&config, 1_000.0));
        assert!(gravity_at(&config, 100_000.0) < gravity_at(&config, 0.0));
        // No atmosphere on the moon
        assert_eq!(drag_force(&SimConfig::lander(), 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_autopilot_threshold() {
        let config = SimConfig::lander();
        let mut controls = ControlInputs::default();
        autopilot(&config, &vehicle(14.9, -3.0, 1200.0), &mut controls);
        assert!(controls.thrusters_active);
        autopilot(&config, &vehicle(15.0, -3.0, 1200.0), &mut controls);
        assert!(!controls.thrusters_active);
    }

    proptest! {
        #[test]
        fn prop_mass_never_below_empty(
            dts in proptest::collection::vec(0.001f64..0.5, 1..400),
            start_fuel in 0.0f64..500.0,
            thrust_on in any::<bool>(),
        ) {
            let config = SimConfig::lander();
            let mut v = vehicle(1_000.0, 0.0, config.empty_mass + start_fuel);
            let mut controls = ControlInputs { thrusters_active: thrust_on, autopilot: false };
            for dt in dts {
                step(&config, &mut v, &mut controls, dt);
                prop_assert!(v.mass >= config.empty_mass);
                prop_assert!(v.fuel(&config) >= 0.0);
                prop_assert!(v.altitude >= 0.0);
            }
        }
    }
}

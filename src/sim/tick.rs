//! Per-frame mission update
//!
//! Applies queued commands, runs one integrator step while flying, and
//! evaluates phase transitions. At most one transition is reported per tick.

use super::integrator;
use super::state::{Mission, MissionEvent, MissionPhase};

/// One-shot commands collected between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Leave the pad
    Launch,
    /// Flip the engine on/off
    ToggleThrust,
    /// Flip the altitude-hold autopilot
    ToggleAutopilot,
    /// Reset to initial conditions
    Restart,
    /// Debug: overwrite vertical velocity (m/s)
    SetVelocity(f64),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Advance the mission by one frame of `dt` seconds
pub fn tick(mission: &mut Mission, input: &TickInput, dt: f64) -> Option<MissionEvent> {
    let mut event = None;

    for command in &input.commands {
        if let Some(e) = apply_command(mission, *command) {
            event = Some(e);
        }
    }
    // A restart or launch this frame takes effect from the next one
    if event.is_some() {
        return event;
    }

    match mission.phase {
        MissionPhase::Flying => fly(mission, dt),
        MissionPhase::Crashing => {
            mission.explosion.frame += dt / mission.config.explosion_frame_secs;
            let frames = mission.config.explosion_frames as f64;
            if mission.explosion.frame > frames {
                mission.explosion.frame = frames - 1.0;
                mission.phase = MissionPhase::Crashed;
                log::info!("Explosion finished");
                Some(MissionEvent::Exploded)
            } else {
                None
            }
        }
        MissionPhase::Idle | MissionPhase::Crashed | MissionPhase::Landed | MissionPhase::OutOfFuel => None,
    }
}

fn apply_command(mission: &mut Mission, command: Command) -> Option<MissionEvent> {
    match command {
        Command::Restart => {
            mission.restart();
            log::info!("{} restarted ({})", mission.toy.as_str(), mission.phase.as_str());
            Some(MissionEvent::Restarted)
        }
        Command::Launch => {
            if mission.launch() {
                log::info!("Launch!");
                Some(MissionEvent::Launched)
            } else {
                None
            }
        }
        Command::ToggleThrust if mission.phase == MissionPhase::Flying => {
            mission.controls.thrusters_active = !mission.controls.thrusters_active;
            None
        }
        Command::ToggleAutopilot if mission.phase == MissionPhase::Flying => {
            mission.controls.autopilot = !mission.controls.autopilot;
            log::info!("Autopilot: {}", mission.controls.autopilot);
            None
        }
        Command::SetVelocity(v) if mission.phase == MissionPhase::Flying => {
            mission.vehicle.velocity = v;
            None
        }
        _ => None,
    }
}

fn fly(mission: &mut Mission, dt: f64) -> Option<MissionEvent> {
    if mission.controls.autopilot {
        integrator::autopilot(&mission.config, &mission.vehicle, &mut mission.controls);
    }

    let outcome = integrator::step(&mission.config, &mut mission.vehicle, &mut mission.controls, dt);
    mission.apogee = mission.apogee.max(mission.vehicle.altitude);

    if let Some(impact_speed) = outcome.contact_speed {
        return Some(if impact_speed <= mission.config.shock_tolerance {
            mission.phase = MissionPhase::Landed;
            log::info!("Touchdown at {:.2} m/s", impact_speed);
            MissionEvent::Landed { impact_speed }
        } else {
            mission.phase = MissionPhase::Crashing;
            mission.explosion.frame = 0.0;
            log::info!("Crash at {:.2} m/s", impact_speed);
            MissionEvent::Crashed { impact_speed }
        });
    }

    if outcome.fuel_exhausted && mission.config.fuel_exhaustion_ends_mission {
        mission.phase = MissionPhase::OutOfFuel;
        log::info!("Out of fuel at {:.1} m", mission.vehicle.altitude);
        return Some(MissionEvent::OutOfFuel { altitude: mission.vehicle.altitude });
    }

    None
}

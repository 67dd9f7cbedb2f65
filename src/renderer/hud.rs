//! HUD text and end-of-mission panels

use crate::sim::{Mission, MissionPhase};

/// End-of-mission summary
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Accent color (outline glow and subtitle)
    pub color: &'static str,
    pub lines: Vec<String>,
}

pub const RESTART_PROMPT: &str = "- PRESS [R] TO RESTART THE SIMULATION -";

/// Lander status lines, top left
pub fn lander_lines(mission: &Mission, help: &str) -> Vec<String> {
    vec![
        help.to_string(),
        format!("Altitude: {:.2} m", mission.vehicle.altitude),
        format!("Velocity: {:.2} m.s⁻¹", mission.vehicle.velocity),
        format!("Fuel:  {:.2} kg", mission.fuel()),
        format!("Mission time: {:.2} s", mission.vehicle.elapsed),
    ]
}

/// Ascent status lines, inside the left pane
pub fn ascent_lines(mission: &Mission) -> Vec<String> {
    vec![
        format!("Altitude (m) : {:.2}", mission.vehicle.altitude),
        format!("Speed (m.s⁻¹): {:.2}", mission.vehicle.velocity),
        format!("Fuel left (kg): {:.2}", mission.fuel()),
        format!("Apogee (m)   : {:.2}", mission.apogee),
    ]
}

/// Frame time readout
pub fn render_time_line(dt: f64) -> String {
    format!("Render time: {:.2} ms", dt * 1000.0)
}

/// Summary panel for terminal phases
pub fn result_panel(mission: &Mission) -> Option<ResultPanel> {
    let (title, subtitle, color) = match mission.phase {
        MissionPhase::Crashed => ("YOU HAVE CRASHED", "Your vehicle hurled too fast towards the moon...", "#d69"),
        MissionPhase::Landed => ("YOU HAVE LANDED SAFELY", "The vehicle sits nicely at the surface", "#69d"),
        MissionPhase::OutOfFuel => ("OUT OF FUEL", "The engine flamed out", "#db6"),
        MissionPhase::Idle | MissionPhase::Flying | MissionPhase::Crashing => return None,
    };

    let vehicle = &mission.vehicle;
    let mut lines = vec![
        format!("Final velocity: {:.2} m.s⁻¹", vehicle.velocity),
        format!("Remaining fuel: {:.2} kg", mission.fuel()),
    ];
    if mission.phase == MissionPhase::OutOfFuel {
        lines.push(format!("Burnout altitude: {:.2} m", vehicle.altitude));
    } else {
        lines.push(format!("Impact energy : {:.2} kJ", vehicle.impact_energy_kj()));
    }
    lines.push(format!("Mission duration : {:.2} s", vehicle.elapsed));

    Some(ResultPanel {
        title,
        subtitle,
        color,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Toy;
    use crate::sim::SimConfig;

    #[test]
    fn test_lander_lines_initial() {
        let mission = Mission::new(Toy::Lander, SimConfig::lander());
        let lines = lander_lines(&mission, "help");
        assert_eq!(lines[0], "help");
        assert_eq!(lines[1], "Altitude: 100.00 m");
        assert_eq!(lines[2], "Velocity: -10.00 m.s⁻¹");
        assert_eq!(lines[3], "Fuel:  500.00 kg");
        assert_eq!(lines[4], "Mission time: 0.00 s");
    }

    #[test]
    fn test_no_panel_in_flight() {
        let mission = Mission::new(Toy::Lander, SimConfig::lander());
        assert_eq!(result_panel(&mission), None);
    }

    #[test]
    fn test_crash_panel() {
        let mut mission = Mission::new(Toy::Lander, SimConfig::lander());
        mission.phase = MissionPhase::Crashed;
        mission.vehicle.velocity = -20.0;
        mission.vehicle.mass = 1000.0;
        let panel = result_panel(&mission).unwrap();
        assert_eq!(panel.title, "YOU HAVE CRASHED");
        assert_eq!(panel.lines.len(), 4);
        assert_eq!(panel.lines[2], "Impact energy : 200.00 kJ");
    }

    #[test]
    fn test_render_time_line() {
        assert_eq!(render_time_line(0.016), "Render time: 16.00 ms");
    }
}

//! Keyboard mapping
//!
//! Each toy has its own key bindings. Unknown keys map to nothing.

use crate::Toy;
use crate::sim::Command;

/// Key bindings for a toy
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(&'static str, Command)>,
    help: &'static str,
}

impl Keymap {
    pub fn for_toy(toy: Toy) -> Self {
        match toy {
            Toy::Lander => Self {
                bindings: vec![
                    ("t", Command::ToggleThrust),
                    ("f", Command::ToggleAutopilot),
                    ("r", Command::Restart),
                ],
                help: "T: toggle thrusters, R: restart, F: autopilot",
            },
            Toy::Ascent => Self {
                bindings: vec![
                    ("l", Command::Launch),
                    ("t", Command::ToggleThrust),
                    ("r", Command::Restart),
                    ("1", Command::SetVelocity(10.0)),
                    ("2", Command::SetVelocity(20.0)),
                ],
                help: "L: launch, T: toggle engine, R: reset, 1/2: set speed",
            },
        }
    }

    /// Command for a `KeyboardEvent.key` value
    pub fn command_for(&self, key: &str) -> Option<Command> {
        let key = key.to_lowercase();
        self.bindings.iter().find(|(k, _)| *k == key).map(|(_, command)| *command)
    }

    /// One-line key help for the HUD
    pub fn help(&self) -> &'static str {
        self.help
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lander_bindings() {
        let keymap = Keymap::for_toy(Toy::Lander);
        assert_eq!(keymap.command_for("t"), Some(Command::ToggleThrust));
        assert_eq!(keymap.command_for("F"), Some(Command::ToggleAutopilot));
        assert_eq!(keymap.command_for("r"), Some(Command::Restart));
        // Ascent-only bindings are not active in the lander
        assert_eq!(keymap.command_for("1"), None);
    }

    #[test]
    fn test_ascent_bindings() {
        let keymap = Keymap::for_toy(Toy::Ascent);
        assert_eq!(keymap.command_for("l"), Some(Command::Launch));
        assert_eq!(keymap.command_for("1"), Some(Command::SetVelocity(10.0)));
        assert_eq!(keymap.command_for("2"), Some(Command::SetVelocity(20.0)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let keymap = Keymap::for_toy(Toy::Ascent);
        for key in ["3", "x", "Escape", "Enter", " ", ""] {
            assert_eq!(keymap.command_for(key), None, "key {key:?}");
        }
    }
}

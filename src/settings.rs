//! Display settings
//!
//! Read from the page URL query string (`?quality=low&exhaust=off`). Nothing is persisted.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 120,
            QualityPreset::Medium => 600,
            QualityPreset::High => 1500,
        }
    }

    /// Whether to render the twinkling starfield
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Flame/spark particles
    pub particles: bool,
    /// Ascent smoke plume
    pub exhaust: bool,
    /// Frame time readout in the HUD
    pub show_render_time: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            exhaust: true,
            show_render_time: true,
        }
    }
}

impl Settings {
    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        if preset == QualityPreset::Low {
            self.exhaust = false;
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn starfield_enabled(&self) -> bool {
        self.quality.starfield_enabled()
    }

    /// Parse a URL query string; unknown keys and values are ignored
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => {
                    if let Some(preset) = QualityPreset::parse(value) {
                        settings.apply_preset(preset);
                    }
                }
                "particles" => settings.particles = parse_flag(value, settings.particles),
                "exhaust" => settings.exhaust = parse_flag(value, settings.exhaust),
                "fps" | "render_time" => settings.show_render_time = parse_flag(value, settings.show_render_time),
                _ => {}
            }
        }
        settings
    }

    /// Load settings from the page location (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window().and_then(|w| w.location().search().ok());
        match query {
            Some(query) if !query.is_empty() => {
                let settings = Self::from_query(&query);
                log::info!(
                    "Settings from URL: {} quality, particles {}, exhaust {}",
                    settings.quality.as_str(),
                    settings.particles,
                    settings.exhaust
                );
                settings
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn parse_flag(value: &str, current: bool) -> bool {
    match value.to_lowercase().as_str() {
        "" | "1" | "on" | "true" | "yes" => true,
        "0" | "off" | "false" | "no" => false,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parsing() {
        let settings = Settings::from_query("?quality=high&particles=off&fps=0");
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(!settings.particles);
        assert!(!settings.show_render_time);
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_low_preset_drops_exhaust() {
        let settings = Settings::from_query("quality=low");
        assert!(!settings.exhaust);
        assert!(!settings.starfield_enabled());
        assert_eq!(settings.max_particles(), 120);
    }

    #[test]
    fn test_garbage_query_keeps_defaults() {
        assert_eq!(Settings::from_query("?foo=bar&quality=ultra&exhaust=maybe"), Settings::default());
        assert_eq!(Settings::from_query(""), Settings::default());
    }
}

//! Tunable game parameters.
//!
//! Static values come from `Default` and may be overridden by an optional
//! RON file next to the executable. Dynamic values (speeds, points, fleet
//! direction) are derived from the static ones and reset on every new game.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::paths;

pub const CONFIG_FILE: &str = "alien_invasion.ron";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FleetDirection {
    Left,
    #[default]
    Right,
}

impl FleetDirection {
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Left => -1.0,
            FleetDirection::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Screen size in dots, taken from the terminal at runtime.
    #[serde(skip)]
    pub screen_width: u32,
    #[serde(skip)]
    pub screen_height: u32,
    pub bg_color: (u8, u8, u8),

    pub ship_limit: u32,
    pub ship_color: (u8, u8, u8),
    /// Blocking pause after losing a ship.
    pub ship_hit_pause_ms: u64,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_color: (u8, u8, u8),
    pub bullets_allowed: usize,

    pub alien_color: (u8, u8, u8),
    pub fleet_drop_speed: u32,

    /// How quickly the game speeds up per level.
    pub speedup_scale: f32,
    /// How quickly alien point values grow per level.
    pub score_scale: f32,

    pub initial_ship_speed: f32,
    pub initial_bullet_speed: f32,
    pub initial_alien_speed: f32,
    pub initial_alien_points: u32,

    /// Length of one frame of the game loop.
    pub tick_rate_ms: u64,
    /// On terminals that never report key releases, how long a fresh press
    /// counts as held. Must outlast the keyboard's auto-repeat delay.
    pub key_hold_ms: u64,

    #[serde(skip)]
    pub ship_speed: f32,
    #[serde(skip)]
    pub bullet_speed: f32,
    #[serde(skip)]
    pub alien_speed: f32,
    #[serde(skip)]
    pub alien_points: u32,
    #[serde(skip)]
    pub fleet_direction: FleetDirection,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 160,
            screen_height: 96,
            bg_color: (0, 0, 5),
            ship_limit: 3,
            ship_color: (80, 255, 80),
            ship_hit_pause_ms: 500,
            bullet_width: 1.0,
            bullet_height: 3.0,
            bullet_color: (255, 255, 200),
            bullets_allowed: 3,
            alien_color: (80, 255, 150),
            fleet_drop_speed: 4,
            speedup_scale: 1.1,
            score_scale: 1.5,
            initial_ship_speed: 1.5,
            initial_bullet_speed: 2.5,
            initial_alien_speed: 0.4,
            initial_alien_points: 50,
            tick_rate_ms: 16,
            key_hold_ms: 700,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
            fleet_direction: FleetDirection::Right,
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    /// Load settings from the config file next to the executable, falling
    /// back to defaults when it is absent or unusable.
    pub fn load() -> Self {
        let path = paths::beside_executable(CONFIG_FILE);
        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(ConfigError::NotFound { .. }) => {
                debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::NotFound { path: path.to_path_buf() }
            } else {
                ConfigError::Read { path: path.to_path_buf(), source }
            }
        })?;
        Self::from_ron(&contents).map_err(|e| match e {
            ConfigError::Parse { details, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                details,
            },
            other => other,
        })
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: Default::default(),
            details: e.to_string(),
        })?;
        settings.validate()?;
        settings.initialize_dynamic_settings();
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 11] = [
            ("ship_limit", self.ship_limit as f64),
            ("bullet_width", self.bullet_width as f64),
            ("bullet_height", self.bullet_height as f64),
            ("bullets_allowed", self.bullets_allowed as f64),
            ("speedup_scale", self.speedup_scale as f64),
            ("score_scale", self.score_scale as f64),
            ("initial_ship_speed", self.initial_ship_speed as f64),
            ("initial_bullet_speed", self.initial_bullet_speed as f64),
            ("initial_alien_speed", self.initial_alien_speed as f64),
            ("tick_rate_ms", self.tick_rate_ms as f64),
            ("key_hold_ms", self.key_hold_ms as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    /// Reset the values that change during a game.
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = self.initial_ship_speed;
        self.bullet_speed = self.initial_bullet_speed;
        self.alien_speed = self.initial_alien_speed;
        self.alien_points = self.initial_alien_points;
        self.fleet_direction = FleetDirection::Right;
    }

    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points = (self.alien_points as f32 * self.score_scale) as u32;
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }

    pub fn ship_hit_pause(&self) -> Duration {
        Duration::from_millis(self.ship_hit_pause_ms)
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.fleet_direction, FleetDirection::Right);
        assert_relative_eq!(s.ship_speed, s.initial_ship_speed);
    }

    #[test]
    fn increase_speed_scales_once() {
        let mut s = Settings::default();
        s.increase_speed();
        assert_relative_eq!(s.ship_speed, 1.5 * 1.1);
        assert_relative_eq!(s.bullet_speed, 2.5 * 1.1);
        assert_relative_eq!(s.alien_speed, 0.4 * 1.1);
        assert_eq!(s.alien_points, 75);
    }

    #[test]
    fn dynamic_settings_reset_to_initial_values() {
        let mut s = Settings::default();
        s.increase_speed();
        s.increase_speed();
        s.fleet_direction = FleetDirection::Left;
        s.initialize_dynamic_settings();
        assert_relative_eq!(s.alien_speed, s.initial_alien_speed);
        assert_eq!(s.alien_points, 50);
        assert_eq!(s.fleet_direction, FleetDirection::Right);
    }

    #[test]
    fn direction_reverses() {
        assert_eq!(FleetDirection::Left.reversed(), FleetDirection::Right);
        assert_relative_eq!(FleetDirection::Left.sign(), -1.0);
        assert_relative_eq!(FleetDirection::Right.sign(), 1.0);
    }

    #[test]
    fn ron_overrides_only_given_fields() {
        let s = Settings::from_ron("(bullets_allowed: 5, initial_alien_speed: 1.0)").unwrap();
        assert_eq!(s.bullets_allowed, 5);
        assert_relative_eq!(s.alien_speed, 1.0);
        assert_eq!(s.ship_limit, 3);
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let err = Settings::from_ron("(initial_ship_speed: 0.0)").unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "initial_ship_speed", .. }));
    }

    #[test]
    fn key_hold_is_configurable() {
        let s = Settings::from_ron("(key_hold_ms: 450)").unwrap();
        assert_eq!(s.key_hold(), Duration::from_millis(450));
        let err = Settings::from_ron("(key_hold_ms: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "key_hold_ms", .. }));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = Settings::from_ron("(bullets_allowed: \"many\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "(ship_limit: 5)").unwrap();
        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.ship_limit, 5);
    }
}

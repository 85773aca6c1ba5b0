//! Game configuration (window and gameplay tuning). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::CameraSettings;
use crate::effect::EffectSettings;
use crate::launcher::LauncherSettings;
use crate::level::LevelLayout;
use crate::projectile::ProjectileSettings;

/// Game settings. Loaded from `config.ron` in the current directory; any field left out
/// keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Projectiles in the launcher's rotation.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Seconds a landed projectile lingers before the turn passes.
    #[serde(default = "default_turn_delay")]
    pub turn_delay: f64,
    #[serde(default)]
    pub launcher: LauncherSettings,
    #[serde(default)]
    pub projectile: ProjectileSettings,
    #[serde(default)]
    pub effect: EffectSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub level: LevelLayout,
}

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_pool_size() -> usize {
    4
}
fn default_turn_delay() -> f64 {
    1.5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fullscreen: false,
            pool_size: default_pool_size(),
            turn_delay: default_turn_delay(),
            launcher: LauncherSettings::default(),
            projectile: ProjectileSettings::default(),
            effect: EffectSettings::default(),
            camera: CameraSettings::default(),
            level: LevelLayout::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: GameConfig = ron::from_str("(pool_size: 6, effect: (max_scale: 4.0))").unwrap();
        assert_eq!(config.pool_size, 6);
        assert_eq!(config.effect.max_scale, 4.0);
        assert_eq!(config.effect.growth_rate, EffectSettings::default().growth_rate);
        assert_eq!(config.window_width, 800);
        assert_eq!(config.launcher.max_pitch, 25.57);
        assert_eq!(config.level, LevelLayout::default());
    }

    #[test]
    fn pretty_output_parses_back() {
        let config = GameConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let parsed: GameConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed.level, config.level);
        assert_eq!(parsed.launcher.origin, config.launcher.origin);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_from(Path::new("/nonexistent/hungry_bird/config.ron"));
        assert_eq!(config.pool_size, 4);
    }
}

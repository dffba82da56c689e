// Runtime configuration

use std::path::PathBuf;

use log::warn;

/// Environment variable overriding the asset root directory
pub const ASSET_ROOT_ENV: &str = "LEDGE_ASSET_ROOT";
/// Environment variable overriding the frame-rate cap
pub const FPS_ENV: &str = "LEDGE_FPS";

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Logical screen width in pixels
    pub screen_width: i32,
    /// Logical screen height in pixels
    pub screen_height: i32,
    /// Edge length of one level cell in pixels
    pub tile_size: i32,
    /// Frame-rate cap for the main loop
    pub target_fps: u32,
    /// Volume for sound effects (0.0 - 1.0)
    pub effect_volume: f32,
    /// Volume for background music (0.0 - 1.0)
    pub music_volume: f32,
    /// Directory holding `images/` and `sounds/`
    pub asset_root: PathBuf,
    /// Level image names, in door-id order. Index 0 of the loaded level list
    /// is a placeholder, so the first entry here becomes level 1.
    pub levels: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 854,
            screen_height: 480,
            tile_size: 32,
            target_fps: 120,
            effect_volume: 0.025,
            music_volume: 0.05,
            asset_root: PathBuf::from("resources"),
            levels: (101..=106).map(|n| format!("level_{n}.png")).collect(),
        }
    }
}

impl GameConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(root) = std::env::var(ASSET_ROOT_ENV) {
            config.asset_root = PathBuf::from(root);
        }

        if let Ok(fps) = std::env::var(FPS_ENV) {
            match fps.parse::<u32>() {
                Ok(value) if value > 0 => config.target_fps = value,
                _ => warn!("Ignoring invalid {}={:?}", FPS_ENV, fps),
            }
        }

        config
    }

    /// Screen size as a float vector
    pub fn screen_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width as f32, self.screen_height as f32)
    }
}

//! Startup constants shared by the grid, the entity and the camera.
//!
//! Every field has a default, so a missing file section (or no file at all)
//! yields the classic 800x600 window with 40-unit tiles and a 30-unit player.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::grid::{Generation, SparseGrid};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_tile_size")]
    pub tile_size: i32,
    #[serde(default)]
    pub entity: EntityConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default = "default_dt")]
    pub fixed_dt: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct EntityConfig {
    #[serde(default = "default_extent")]
    pub extent: i32,
    #[serde(default = "default_speed")]
    pub speed: i32,
    #[serde(default = "default_start")]
    pub start: [i32; 2],
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_blocked_probability")]
    pub blocked_probability: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub generation: Generation,
}

/// Viewport size in world units.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: u32,
    #[serde(default = "default_viewport_height")]
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            entity: EntityConfig::default(),
            grid: GridConfig::default(),
            viewport: ViewportConfig::default(),
            fixed_dt: default_dt(),
        }
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            extent: default_extent(),
            speed: default_speed(),
            start: default_start(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            blocked_probability: default_blocked_probability(),
            seed: 0,
            generation: Generation::default(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

impl GridConfig {
    pub fn build_grid(&self) -> SparseGrid {
        SparseGrid::new(self.blocked_probability, self.seed, self.generation)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config = parse_config(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn parse_config(raw: &str) -> Result<WorldConfig, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn validate_config(config: &WorldConfig) -> Result<(), String> {
    if config.tile_size <= 0 {
        return Err("Config validation failed: tile_size must be > 0".to_string());
    }
    if config.entity.extent <= 0 {
        return Err("Config validation failed: entity.extent must be > 0".to_string());
    }
    if config.entity.speed < 0 {
        return Err("Config validation failed: entity.speed must be >= 0".to_string());
    }
    let p = config.grid.blocked_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(format!(
            "Config validation failed: grid.blocked_probability must be within [0, 1], got {p}"
        ));
    }
    if config.viewport.width == 0 || config.viewport.height == 0 {
        return Err("Config validation failed: viewport width and height must be > 0".to_string());
    }
    if config.fixed_dt.is_nan() || config.fixed_dt <= 0.0 {
        return Err("Config validation failed: fixed_dt must be > 0".to_string());
    }

    if p == 1.0 {
        log::warn!("grid.blocked_probability is 1.0: every unseeded tile will be blocked");
    }
    if config.entity.extent > config.tile_size {
        log::warn!(
            "entity.extent ({}) exceeds tile_size ({}); corner checks skip interior tiles",
            config.entity.extent,
            config.tile_size
        );
    }
    Ok(())
}

const fn default_tile_size() -> i32 {
    40
}

const fn default_extent() -> i32 {
    30
}

const fn default_speed() -> i32 {
    5
}

const fn default_start() -> [i32; 2] {
    [400, 300]
}

const fn default_blocked_probability() -> f64 {
    0.2
}

const fn default_viewport_width() -> u32 {
    800
}

const fn default_viewport_height() -> u32 {
    600
}

const fn default_dt() -> f64 {
    1.0 / 60.0
}

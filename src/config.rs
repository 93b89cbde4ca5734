//=========================================================================
// Configuration
//=========================================================================
//
// TOML-backed game configuration.
//
// Lookup order:
//   1. explicit path (CLI argument, or ROTORFORT_CONFIG via the CLI)
//   2. ./rotorfort.toml, if it exists
//   3. built-in defaults
//
// Every section and field is optional; anything omitted keeps its
// default. An explicitly named file that cannot be read is an error.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== Constants ===========================================================

pub const DEFAULT_CONFIG_FILE: &str = "rotorfort.toml";

const MIN_GRID_BLOCKS: u32 = 20;
const MAX_GRID_BLOCKS: u32 = 1024;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "Rotorfort".to_string(), width: 800, height: 600 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tps: f64,
    pub channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { tps: 60.0, channel_capacity: 128 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub block_size: u32,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { width: 3000, height: 2000, block_size: 40, seed: 1984 }
    }
}

impl WorldConfig {
    pub fn grid_width(&self) -> u32 {
        self.width / self.block_size
    }

    pub fn grid_height(&self) -> u32 {
        self.height / self.block_size
    }
}

/// Flight model. Forces are in px/s², speeds in px/s.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HelicopterConfig {
    pub gravity: f32,
    pub base_thrust: f32,
    /// Upward force while Up is held, as a multiple of gravity.
    pub lift_factor: f32,
    /// Downward force while Down is held, as a fraction of base thrust.
    pub dive_factor: f32,
    pub landed_steer_factor: f32,
    pub airborne_steer_factor: f32,
    pub takeoff_speed: f32,
    pub takeoff_height: f32,
    pub max_speed_x: f32,
    pub max_speed_up: f32,
    pub max_speed_down: f32,
    pub width: f32,
    pub height: f32,
    /// Largest downward speed that still counts as a landing.
    pub safe_landing_vy: f32,
    /// Largest sideways speed that still counts as a landing.
    pub safe_landing_vx: f32,
    /// Vertical slack between skids and pad top for a pad landing.
    pub pad_snap_distance: f32,
}

impl Default for HelicopterConfig {
    fn default() -> Self {
        Self {
            gravity: 60.0,
            base_thrust: 400.0,
            lift_factor: 3.0,
            dive_factor: 0.6,
            landed_steer_factor: 0.1,
            airborne_steer_factor: 0.4,
            takeoff_speed: 25.0,
            takeoff_height: 50.0,
            max_speed_x: 150.0,
            max_speed_up: 180.0,
            max_speed_down: 100.0,
            width: 30.0,
            height: 20.0,
            safe_landing_vy: 100.0,
            safe_landing_vx: 50.0,
            pad_snap_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub cooldown: f32,
    pub projectile_speed: f32,
    pub muzzle_offset: f32,
    pub projectile_radius: f32,
    pub damage: f32,
    pub projectile_lifetime: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.2,
            projectile_speed: 400.0,
            muzzle_offset: 20.0,
            projectile_radius: 3.0,
            damage: 10.0,
            projectile_lifetime: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub capacity: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { capacity: crate::core::particles::DEFAULT_CAPACITY }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub lerp_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { lerp_speed: 5.0 }
    }
}

/// Keys per action. Names are `KeyCode` variant names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub fire: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::ArrowUp],
            down: vec![KeyCode::ArrowDown],
            left: vec![KeyCode::ArrowLeft],
            right: vec![KeyCode::ArrowRight],
            fire: vec![KeyCode::Space],
            pause: vec![KeyCode::KeyP, KeyCode::Escape],
            restart: vec![KeyCode::KeyR],
        }
    }
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub engine: EngineConfig,
    pub world: WorldConfig,
    pub helicopter: HelicopterConfig,
    pub weapon: WeaponConfig,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
}

impl GameConfig {
    //--- Loading ----------------------------------------------------------

    /// Loads `explicit` if given, else `./rotorfort.toml` if present, else
    /// the defaults. The CLI folds `ROTORFORT_CONFIG` into `explicit`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            return Self::from_file(default_path);
        }

        debug!("No config file found, using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let config = toml::from_str::<Self>(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    //--- Validation -------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid("window", "width and height must be positive"));
        }
        if !(self.engine.tps > 0.0) {
            return Err(ConfigError::invalid("engine.tps", format!("must be positive, got {}", self.engine.tps)));
        }
        if self.engine.channel_capacity == 0 {
            return Err(ConfigError::invalid("engine.channel_capacity", "must be positive"));
        }

        let world = &self.world;
        if world.width == 0 || world.height == 0 {
            return Err(ConfigError::invalid("world", "width and height must be positive"));
        }
        if world.block_size == 0 {
            return Err(ConfigError::invalid("world.block_size", "must be positive"));
        }
        if world.width % world.block_size != 0 || world.height % world.block_size != 0 {
            return Err(ConfigError::invalid(
                "world.block_size",
                format!("{} does not divide {}x{}", world.block_size, world.width, world.height),
            ));
        }
        // Border, pads and the generation margins need room.
        if world.grid_width() < MIN_GRID_BLOCKS || world.grid_height() < MIN_GRID_BLOCKS {
            return Err(ConfigError::invalid("world", "grid must be at least 20x20 blocks"));
        }
        if world.grid_width() > MAX_GRID_BLOCKS || world.grid_height() > MAX_GRID_BLOCKS {
            return Err(ConfigError::invalid(
                "world",
                format!("grid must be at most {0}x{0} blocks", MAX_GRID_BLOCKS),
            ));
        }

        let heli = &self.helicopter;
        let limits = [
            ("helicopter.max_speed_x", heli.max_speed_x),
            ("helicopter.max_speed_up", heli.max_speed_up),
            ("helicopter.max_speed_down", heli.max_speed_down),
            ("helicopter.takeoff_speed", heli.takeoff_speed),
            ("helicopter.takeoff_height", heli.takeoff_height),
            ("helicopter.safe_landing_vx", heli.safe_landing_vx),
            ("helicopter.safe_landing_vy", heli.safe_landing_vy),
            ("helicopter.pad_snap_distance", heli.pad_snap_distance),
        ];
        for (field, value) in limits {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("must not be negative, got {}", value)));
            }
        }
        if !(heli.width > 0.0 && heli.height > 0.0) {
            return Err(ConfigError::invalid("helicopter", "width and height must be positive"));
        }

        if self.particles.capacity == 0 {
            return Err(ConfigError::invalid("particles.capacity", "must be positive"));
        }
        if self.weapon.cooldown < 0.0 {
            return Err(ConfigError::invalid("weapon.cooldown", "must not be negative"));
        }
        if self.camera.lerp_speed < 0.0 {
            return Err(ConfigError::invalid("camera.lerp_speed", "must not be negative"));
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//! # Explorer Configuration
//!
//! Every tunable of the explorer lives here, grouped by the part of the
//! simulation that reads it. Defaults reproduce the shipped colony scene; a
//! JSON file may override any subset of fields.
//!
//! ```rust
//! use colony_explorer::config::ExplorerConfig;
//!
//! let config = ExplorerConfig::from_json_str(r#"{ "player": { "move_speed": 25.0 } }"#).unwrap();
//! assert_eq!(config.player.move_speed, 25.0);
//! assert_eq!(config.player.turn_speed, 2.5);
//! ```

use std::path::Path;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub player: PlayerConfig,
    pub vehicles: VehicleConfig,
    pub camera: CameraConfig,
    pub world: WorldConfig,
    pub simulation: SimulationConfig,
}

/// Player movement tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal walking speed (units/second).
    pub move_speed: f32,

    /// Turning rate (radians/second).
    pub turn_speed: f32,

    /// Vertical acceleration while grounded or falling (units/second², negative).
    pub gravity: f32,

    /// Upward acceleration while the jetpack is held (units/second²).
    pub jetpack_accel: f32,

    /// Cap on upward velocity under jetpack thrust (units/second).
    pub max_ascent_rate: f32,

    /// Height above ground past which the player holds the airborne posture.
    pub airborne_posture_height: f32,

    /// Collision footprint, width x height x depth.
    pub footprint: [f32; 3],

    /// Sideways step taken when leaving a vehicle (local +X).
    pub dismount_offset: f32,

    /// Height of the rider above the vehicle origin.
    pub ride_height: f32,

    /// Where the player starts.
    pub spawn: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 40.0,
            turn_speed: 2.5,
            gravity: -60.0,
            jetpack_accel: 90.0,
            max_ascent_rate: 20.0,
            airborne_posture_height: 1.0,
            footprint: [2.0, 5.0, 2.0],
            dismount_offset: 5.0,
            ride_height: 7.2,
            spawn: [0.0, 0.0, 20.0],
        }
    }
}

impl PlayerConfig {
    pub fn footprint(&self) -> Vector3<f32> {
        Vector3::from(self.footprint)
    }

    pub fn spawn(&self) -> Vector3<f32> {
        Vector3::from(self.spawn)
    }
}

/// Train and track tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Half-length of every track; a train past it re-enters from the other end.
    pub reset_limit: f32,

    /// Along-track distance at which a hailed train stops for the player.
    pub arrival_threshold: f32,

    /// Maximum straight-line distance for boarding.
    pub board_radius: f32,

    /// Maximum cross-track distance from a line for a hail to reach its trains.
    pub hail_lateral_threshold: f32,

    /// Along-track distance beyond which a hailed train is brought closer.
    pub hail_far_distance: f32,

    /// How far behind the player a far hailed train is placed.
    pub hail_lead_distance: f32,

    /// Cruise speed of every train (units/second, before direction).
    pub train_speed: f32,

    /// Height of the train origin above ground.
    pub train_height: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            reset_limit: 2000.0,
            arrival_threshold: 2.0,
            board_radius: 15.0,
            hail_lateral_threshold: 15.0,
            hail_far_distance: 200.0,
            hail_lead_distance: 100.0,
            train_speed: 40.0,
            train_height: 0.8,
        }
    }
}

/// Follow camera tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye offset behind the player in follow mode, in the player's frame.
    pub follow_offset: [f32; 3],

    /// Eye offset in overhead mode, in the player's frame.
    pub overhead_offset: [f32; 3],

    /// Height of the look target above the player's feet.
    pub look_height: f32,

    /// Fraction of the remaining distance the eye covers each frame.
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_offset: [0.0, 8.0, -18.0],
            overhead_offset: [0.0, 60.0, -30.0],
            look_height: 4.0,
            smoothing: 0.1,
        }
    }
}

/// World assembly tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for rock scatter and colony layout.
    pub seed: u64,

    /// Number of rock placement attempts.
    pub rock_count: usize,

    /// Half-size of the square rocks are scattered over.
    pub rock_field_half_size: f32,

    /// Half-size of the rock-free clearing around the spawn.
    pub spawn_clearing: f32,

    /// Rock-free half-width either side of every track line.
    pub track_corridor: f32,

    /// Track lines with their fixed cross-track coordinate.
    pub lines: Vec<TrackLine>,

    /// Along-track spawn offset of the first train on every line.
    pub first_train_offset: f32,

    /// Spacing between trains on a line.
    pub train_spacing: f32,

    /// Trains per line.
    pub trains_per_line: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x4d41_5253,
            rock_count: 200,
            rock_field_half_size: 400.0,
            spawn_clearing: 50.0,
            track_corridor: 10.0,
            lines: vec![
                TrackLine {
                    axis: 'z',
                    offset: -70.0,
                    direction: 1,
                },
                TrackLine {
                    axis: 'z',
                    offset: -90.0,
                    direction: -1,
                },
                TrackLine {
                    axis: 'x',
                    offset: 50.0,
                    direction: 1,
                },
                TrackLine {
                    axis: 'x',
                    offset: 70.0,
                    direction: -1,
                },
            ],
            first_train_offset: -1000.0,
            train_spacing: 800.0,
            trains_per_line: 3,
        }
    }
}

/// A straight track along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackLine {
    /// `'x'` or `'z'`: the axis trains travel along.
    pub axis: char,
    /// The fixed coordinate on the other horizontal axis.
    pub offset: f32,
    /// `1` or `-1`.
    pub direction: i8,
}

/// Frame stepping tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Longest frame delta stepped in one go (seconds); longer stalls are clamped.
    pub max_frame_delta: f32,

    /// Fixed step length, or `None` for one step per frame.
    pub fixed_timestep: Option<f32>,

    /// Frame-time samples kept for performance statistics.
    pub stats_window: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: 0.1,
            fixed_timestep: None,
            stats_window: 120,
        }
    }
}

impl ExplorerConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player.move_speed", self.player.move_speed)?;
        positive("player.turn_speed", self.player.turn_speed)?;
        positive("player.jetpack_accel", self.player.jetpack_accel)?;
        positive("player.max_ascent_rate", self.player.max_ascent_rate)?;
        positive("player.ride_height", self.player.ride_height)?;
        positive("player.dismount_offset", self.player.dismount_offset)?;
        if !(self.player.gravity < 0.0) {
            return Err(invalid("player.gravity", "must be negative"));
        }
        if self.player.footprint.iter().any(|v| !(*v > 0.0)) {
            return Err(invalid("player.footprint", "all extents must be positive"));
        }

        positive("vehicles.reset_limit", self.vehicles.reset_limit)?;
        positive("vehicles.arrival_threshold", self.vehicles.arrival_threshold)?;
        positive("vehicles.board_radius", self.vehicles.board_radius)?;
        positive("vehicles.hail_lateral_threshold", self.vehicles.hail_lateral_threshold)?;
        positive("vehicles.hail_far_distance", self.vehicles.hail_far_distance)?;
        positive("vehicles.hail_lead_distance", self.vehicles.hail_lead_distance)?;
        positive("vehicles.train_speed", self.vehicles.train_speed)?;

        positive("world.rock_field_half_size", self.world.rock_field_half_size)?;

        if !(0.0..=1.0).contains(&self.camera.smoothing) {
            return Err(invalid("camera.smoothing", "must be within 0..=1"));
        }

        for line in &self.world.lines {
            if line.axis != 'x' && line.axis != 'z' {
                return Err(invalid("world.lines.axis", "must be 'x' or 'z'"));
            }
            if line.direction != 1 && line.direction != -1 {
                return Err(invalid("world.lines.direction", "must be 1 or -1"));
            }
        }

        let last_train = self.world.first_train_offset
            + self.world.train_spacing * self.world.trains_per_line.saturating_sub(1) as f32;
        if self.world.first_train_offset.abs() > self.vehicles.reset_limit
            || last_train.abs() > self.vehicles.reset_limit
        {
            return Err(invalid(
                "vehicles.reset_limit",
                format!("trains spawn outside the track (limit {})", self.vehicles.reset_limit),
            ));
        }

        positive("simulation.max_frame_delta", self.simulation.max_frame_delta)?;
        if let Some(step) = self.simulation.fixed_timestep {
            positive("simulation.fixed_timestep", step)?;
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

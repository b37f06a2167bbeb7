//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be re-tuned from a JSON file
//! without touching the simulation. Missing fields fall back to [`crate::consts`].

use std::path::Path;

use anyhow::{Context, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ObstacleTemplate;

/// Gameplay tuning for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Seed for obstacle placement
    pub seed: u64,
    /// Fixed simulation timestep (seconds)
    pub fixed_dt: f32,
    /// Visible playing area (width, height)
    pub viewport: Vec2,
    /// Scroll speed of ground and obstacles (units per second)
    pub scroll_speed: f32,

    // === Obstacles ===
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Viewport x where new obstacles appear
    pub spawn_x: f32,
    /// Vertical spawn range (inclusive)
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    /// Template every obstacle is built from
    pub obstacle: ObstacleTemplate,

    // === Player ===
    pub flap_impulse: f32,
    pub flap_spin: f32,
    pub max_rise_speed: f32,
    pub idle_threshold: f32,
    pub falling_torque: f32,
    pub min_rotation_deg: f32,
    pub max_rotation_deg: f32,
    pub min_angular_vel: f32,
    pub max_angular_vel: f32,
    pub death_rotation_deg: f32,
    pub hero_start: Vec2,
    pub hero_half_size: f32,

    // === Ground ===
    pub strip_width: f32,
    pub strip_count: usize,
    pub ground_height: f32,

    /// Gravity used by the headless world
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            fixed_dt: SIM_DT,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            scroll_speed: SCROLL_SPEED,

            spawn_interval: SPAWN_INTERVAL,
            spawn_x: SPAWN_X,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,
            obstacle: ObstacleTemplate::default(),

            flap_impulse: FLAP_IMPULSE,
            flap_spin: FLAP_SPIN,
            max_rise_speed: MAX_RISE_SPEED,
            idle_threshold: IDLE_THRESHOLD,
            falling_torque: FALLING_TORQUE,
            min_rotation_deg: MIN_ROTATION_DEG,
            max_rotation_deg: MAX_ROTATION_DEG,
            min_angular_vel: MIN_ANGULAR_VEL,
            max_angular_vel: MAX_ANGULAR_VEL,
            death_rotation_deg: DEATH_ROTATION_DEG,
            hero_start: Vec2::new(HERO_START_X, HERO_START_Y),
            hero_half_size: HERO_HALF_SIZE,

            strip_width: STRIP_WIDTH,
            strip_count: STRIP_COUNT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("malformed tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning =
            Self::from_json(&json).with_context(|| format!("loading {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning if the file exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("No tuning at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.fixed_dt > 0.0, "fixed_dt must be positive");
        ensure!(
            self.viewport.x > 0.0 && self.viewport.y > 0.0,
            "viewport must have a positive size"
        );
        ensure!(self.scroll_speed >= 0.0, "scroll_speed must not be negative");
        ensure!(self.spawn_interval > 0.0, "spawn_interval must be positive");
        ensure!(
            self.spawn_y_min <= self.spawn_y_max,
            "spawn_y_min ({}) is above spawn_y_max ({})",
            self.spawn_y_min,
            self.spawn_y_max
        );
        ensure!(
            self.obstacle.half_width > 0.0,
            "obstacle half_width must be positive"
        );
        ensure!(
            self.min_rotation_deg <= self.max_rotation_deg,
            "rotation range is inverted"
        );
        ensure!(
            self.min_angular_vel <= self.max_angular_vel,
            "angular velocity range is inverted"
        );
        ensure!(self.strip_width > 0.0, "strip_width must be positive");
        ensure!(self.strip_count >= 2, "at least two ground strips are needed");
        // Every strip but the one being recycled must reach past the right edge,
        // otherwise a seam opens when a strip wraps around.
        ensure!(
            (self.strip_count - 1) as f32 * self.strip_width > self.viewport.x,
            "{} strips of width {} cannot tile a viewport {} wide",
            self.strip_count,
            self.strip_width,
            self.viewport.x
        );
        Ok(())
    }

    /// Rotation limits in radians
    pub fn rotation_range(&self) -> (f32, f32) {
        (
            self.min_rotation_deg.to_radians(),
            self.max_rotation_deg.to_radians(),
        )
    }
}

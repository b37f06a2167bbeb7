//! Hop Runner - fixed-step core of a side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, scrolling, obstacles, contacts)
//! - `tuning`: Data-driven game balance
//! - `headless`: Stand-in physics/contact collaborator for running without an engine
//! - `highscores`: Best-run table

pub mod headless;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, impulses are tuned to it)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Visible playing area
    pub const VIEWPORT_WIDTH: f32 = 320.0;
    pub const VIEWPORT_HEIGHT: f32 = 568.0;

    /// World scroll speed (units per second)
    pub const SCROLL_SPEED: f32 = 100.0;

    /// Obstacle spawning
    pub const SPAWN_INTERVAL: f32 = 1.5;
    pub const SPAWN_X: f32 = 352.0;
    pub const SPAWN_Y_MIN: f32 = 234.0;
    pub const SPAWN_Y_MAX: f32 = 383.0;
    /// Half the width of an obstacle; removal threshold left of the viewport
    pub const OBSTACLE_HALF_WIDTH: f32 = 26.0;
    /// Vertical opening between the upper and lower obstacle parts
    pub const OBSTACLE_GAP: f32 = 130.0;

    /// Input response
    pub const FLAP_IMPULSE: f32 = 300.0;
    pub const FLAP_SPIN: f32 = 1.0;
    /// Terminal rise speed
    pub const MAX_RISE_SPEED: f32 = 400.0;
    /// Idle time before the body starts to nose-dive (seconds)
    pub const IDLE_THRESHOLD: f32 = 0.2;
    /// Falling torque rate, multiplied by dt each tick
    pub const FALLING_TORQUE: f32 = 20_000.0;

    /// Rotation limits (degrees)
    pub const MIN_ROTATION_DEG: f32 = -90.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;
    /// Angular velocity limits (radians per second)
    pub const MIN_ANGULAR_VEL: f32 = -1.0;
    pub const MAX_ANGULAR_VEL: f32 = 3.0;
    /// Face-down pose after a fatal hit (degrees)
    pub const DEATH_ROTATION_DEG: f32 = -90.0;

    /// Ground strips
    pub const STRIP_WIDTH: f32 = 320.0;
    pub const STRIP_COUNT: usize = 3;
    pub const GROUND_HEIGHT: f32 = 90.0;

    /// Hero start and collision box
    pub const HERO_START_X: f32 = 80.0;
    pub const HERO_START_Y: f32 = 300.0;
    pub const HERO_HALF_SIZE: f32 = 12.0;

    /// Gravity applied by the headless world (units per second squared)
    pub const GRAVITY: f32 = -1470.0;

    /// Layers fold their offset back into children past this distance
    pub const REBASE_DISTANCE: f32 = 10_000.0;
}

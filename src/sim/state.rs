//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`SessionState`], owned by one
//! controller and handed to each subsystem per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::ControlledBody;
use super::obstacle::ObstacleLayer;
use super::scroll::ScrollLayer;
use crate::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Flying, scrolling and spawning
    #[default]
    Active,
    /// Hero crashed; terminal until a new session is built
    GameOver,
}

/// Owner of the authoritative [`GameState`]
///
/// The only transition is `Active -> GameOver`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    /// Enter GameOver. Returns false if the session was already over.
    pub fn transition_to_game_over(&mut self) -> bool {
        if self.state == GameState::GameOver {
            return false;
        }
        self.state = GameState::GameOver;
        true
    }
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player input was accepted
    Flapped,
    /// Score display should show this value
    ScoreChanged { score: u32 },
    ObstacleSpawned { id: u32, pos: Vec2 },
    ObstacleDespawned { id: u32 },
    /// Ground strip moved to the right edge
    StripRecycled { index: usize },
    /// Fatal collision
    GameOver { score: u32, ticks: u64 },
    /// One-shot camera shake on every top-level node
    ImpactShake,
    /// Restart control shown or hidden
    RestartVisibility { visible: bool },
    /// Player asked for a new session
    RestartRequested,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub machine: GameStateMachine,
    /// Goals passed
    pub score: u32,
    /// Active ticks simulated
    pub time_ticks: u64,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Seconds since the last accepted input
    pub since_touch: f32,
    pub hero: ControlledBody,
    pub scroll: ScrollLayer,
    pub obstacles: ObstacleLayer,
    pub restart_visible: bool,
    /// Pending presentation events
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl SessionState {
    /// Set up a fresh session
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.ground_height / 2.0;
        let mut state = Self {
            seed: tuning.seed,
            machine: GameStateMachine::new(),
            score: 0,
            time_ticks: 0,
            spawn_timer: 0.0,
            since_touch: 0.0,
            hero: ControlledBody::new(tuning.hero_start),
            scroll: ScrollLayer::new(tuning.strip_width, tuning.strip_count, ground_y),
            obstacles: ObstacleLayer::new(),
            restart_visible: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(tuning.seed),
        };

        state.events.push(GameEvent::RestartVisibility { visible: false });
        state.events.push(GameEvent::ScoreChanged { score: 0 });

        state
    }

    pub fn is_active(&self) -> bool {
        self.machine.is_active()
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single owner, single thread: `tick` and `on_contact` never overlap
//! - No rendering, physics integration or platform dependencies

pub mod body;
pub mod clock;
pub mod contact;
pub mod game;
pub mod obstacle;
pub mod player;
pub mod scroll;
pub mod space;
pub mod state;
pub mod tick;

pub use body::{BodyAction, ControlledBody, PhysicsBody};
pub use clock::FixedStep;
pub use contact::{BodyTag, ContactEvent, ContactKind, ContactOutcome};
pub use game::{Game, Presenter};
pub use obstacle::{Obstacle, ObstacleLayer, ObstaclePart, ObstaclePool, ObstacleTemplate};
pub use scroll::{ScrollLayer, ScrollStrip};
pub use space::{CoordinateSpace, Layer};
pub use state::{GameEvent, GameState, GameStateMachine, SessionState};
pub use tick::tick;

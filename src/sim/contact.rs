//! Contact handling
//!
//! The physics collaborator reports every new contact with the tags of the two
//! bodies involved. Passing a goal scores; anything else ends the run.

use serde::{Deserialize, Serialize};

use super::body::{BodyAction, PhysicsBody};
use super::state::{GameEvent, SessionState};
use crate::Tuning;

/// Name tag of a body taking part in a contact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyTag {
    Hero,
    /// Sensor between the two halves of an obstacle
    Goal,
    Obstacle,
    Ground,
    /// Anything else; treated as solid
    Other(String),
}

impl BodyTag {
    pub fn from_name(name: &str) -> Self {
        match name {
            "hero" => BodyTag::Hero,
            "goal" => BodyTag::Goal,
            "obstacle" => BodyTag::Obstacle,
            "ground" => BodyTag::Ground,
            other => BodyTag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BodyTag::Hero => "hero",
            BodyTag::Goal => "goal",
            BodyTag::Obstacle => "obstacle",
            BodyTag::Ground => "ground",
            BodyTag::Other(name) => name,
        }
    }

    pub fn is_goal(&self) -> bool {
        *self == BodyTag::Goal
    }
}

impl From<&str> for BodyTag {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for BodyTag {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BodyTag> for String {
    fn from(tag: BodyTag) -> Self {
        tag.name().to_string()
    }
}

/// Two bodies started touching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: BodyTag,
    pub b: BodyTag,
}

impl ContactEvent {
    pub fn new(a: impl Into<BodyTag>, b: impl Into<BodyTag>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn kind(&self) -> ContactKind {
        if self.a.is_goal() || self.b.is_goal() {
            ContactKind::Goal
        } else {
            ContactKind::Fatal
        }
    }
}

/// Goal vs. everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Goal,
    Fatal,
}

/// What a contact did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Goal passed, new score
    Scored(u32),
    /// This contact ended the run
    GameOver,
    /// Fatal contact after the run was already over
    Ignored,
}

/// React to a contact reported by the physics collaborator
pub fn on_contact(
    state: &mut SessionState,
    tuning: &Tuning,
    contact: &ContactEvent,
) -> ContactOutcome {
    // Goals count whatever the game state, including the tick the run ends
    if contact.kind() == ContactKind::Goal {
        state.score = state.score.saturating_add(1);
        state.events.push(GameEvent::ScoreChanged { score: state.score });
        return ContactOutcome::Scored(state.score);
    }

    if !state.machine.transition_to_game_over() {
        return ContactOutcome::Ignored;
    }

    let hero = &mut state.hero;
    hero.set_rotation_enabled(false);
    hero.set_angular_velocity(0.0);
    hero.remove_all_actions();
    // Face down in the dirt on the next frame
    hero.run(BodyAction::SetRotation(tuning.death_rotation_deg.to_radians()));

    log::info!(
        "💥 Game over: hit {} / {} with score {} after {} ticks",
        contact.a.name(),
        contact.b.name(),
        state.score,
        state.time_ticks
    );

    state.events.push(GameEvent::GameOver {
        score: state.score,
        ticks: state.time_ticks,
    });
    state.events.push(GameEvent::ImpactShake);
    state.restart_visible = true;
    state.events.push(GameEvent::RestartVisibility { visible: true });

    ContactOutcome::GameOver
}

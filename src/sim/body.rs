//! The player-controlled body
//!
//! The simulation never integrates the body itself: a physics collaborator
//! moves it and the core only talks to it through [`PhysicsBody`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What the core needs from a rigid body
pub trait PhysicsBody {
    /// Instant change in linear momentum
    fn apply_linear_impulse(&mut self, impulse: Vec2);
    /// Instant change in angular momentum (ignored while rotation is locked)
    fn apply_angular_impulse(&mut self, impulse: f32);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn angular_velocity(&self) -> f32;
    fn set_angular_velocity(&mut self, angular_velocity: f32);
    /// Rotation in radians
    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, rotation: f32);
    fn rotation_enabled(&self) -> bool;
    fn set_rotation_enabled(&mut self, enabled: bool);
}

/// Actions attached to the body, evaluated once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyAction {
    /// Looping wing-flap animation (presentation only)
    FlapLoop,
    /// One-shot: snap rotation to the given angle (radians)
    SetRotation(f32),
}

/// The hero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlledBody {
    /// Viewport-space center
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    /// Radians, 0 = level, negative = nose down
    pub rotation: f32,
    pub rotation_enabled: bool,
    pub mass: f32,
    pub inertia: f32,
    /// Pending and looping actions
    pub actions: Vec<BodyAction>,
}

impl ControlledBody {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            rotation: 0.0,
            rotation_enabled: true,
            mass: 1.0,
            inertia: 1.0,
            actions: vec![BodyAction::FlapLoop],
        }
    }

    /// Queue an action for the next frame
    pub fn run(&mut self, action: BodyAction) {
        self.actions.push(action);
    }

    /// Cancel every running or queued action
    pub fn remove_all_actions(&mut self) {
        self.actions.clear();
    }

    /// Whether the flap animation is still playing
    pub fn is_animating(&self) -> bool {
        self.actions.contains(&BodyAction::FlapLoop)
    }

    /// Evaluate queued actions. One-shots fire and are dropped, loops stay.
    pub fn run_actions(&mut self) {
        let mut rotation = None;
        self.actions.retain(|action| match *action {
            BodyAction::FlapLoop => true,
            BodyAction::SetRotation(r) => {
                rotation = Some(r);
                false
            }
        });
        // Node rotation is written directly, so this bypasses the rotation lock
        if let Some(r) = rotation {
            self.rotation = r;
        }
    }
}

impl PhysicsBody for ControlledBody {
    fn apply_linear_impulse(&mut self, impulse: Vec2) {
        self.vel += impulse / self.mass;
    }

    fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.rotation_enabled {
            self.angular_vel += impulse / self.inertia;
        }
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.vel = velocity;
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_vel
    }

    fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_vel = angular_velocity;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    fn rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }
}

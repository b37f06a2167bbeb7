//! Player control
//!
//! Input hops the hero up with a little forward spin. Between inputs the hero
//! is left to the physics collaborator, except for the rise-speed cap, the
//! rotation limits and a nose-dive torque once input has been idle a while.

use glam::Vec2;

use super::body::PhysicsBody;
use super::state::{GameEvent, SessionState};
use crate::Tuning;

/// Hop: reset velocity, then kick up and spin
pub fn flap<B: PhysicsBody>(body: &mut B, tuning: &Tuning) {
    // Without the reset, accumulated fall speed swallows the impulse
    body.set_velocity(Vec2::ZERO);
    body.apply_linear_impulse(Vec2::new(0.0, tuning.flap_impulse));
    body.apply_angular_impulse(tuning.flap_spin);
}

/// Per-tick limits and falling torque. `since_touch` is seconds since the
/// last accepted input and is advanced by `dt`.
pub fn steer<B: PhysicsBody>(body: &mut B, since_touch: &mut f32, tuning: &Tuning, dt: f32) {
    let mut vel = body.velocity();
    if vel.y > tuning.max_rise_speed {
        vel.y = tuning.max_rise_speed;
        body.set_velocity(vel);
    }

    if *since_touch > tuning.idle_threshold {
        body.apply_angular_impulse(-tuning.falling_torque * dt);
    }

    let (min_rot, max_rot) = tuning.rotation_range();
    body.set_rotation(body.rotation().clamp(min_rot, max_rot));
    body.set_angular_velocity(
        body.angular_velocity()
            .clamp(tuning.min_angular_vel, tuning.max_angular_vel),
    );

    *since_touch += dt;
}

/// Handle a tap. Ignored once the run is over; returns whether it was applied.
pub fn on_input(state: &mut SessionState, tuning: &Tuning) -> bool {
    if !state.is_active() {
        return false;
    }

    flap(&mut state.hero, tuning);
    state.since_touch = 0.0;
    state.events.push(GameEvent::Flapped);
    true
}

/// Apply per-tick player control
pub fn tick(state: &mut SessionState, tuning: &Tuning, dt: f32) {
    if !state.is_active() {
        return;
    }
    steer(&mut state.hero, &mut state.since_touch, tuning, dt);
}

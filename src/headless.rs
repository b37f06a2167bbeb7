//! Headless world
//!
//! A minimal stand-in for the physics engine so a session can run without a
//! renderer: it integrates the hero under gravity, keeps it on the ground and
//! reports begin-contacts from box overlaps. Good enough for demos and soak
//! tests, not a physics engine.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::Tuning;
use crate::sim::{BodyTag, ContactEvent, Game};

/// Something the hero can be touching. Ordered so contacts are reported
/// in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Touch {
    Ground,
    Part { obstacle: u32, part: usize },
}

/// Axis-aligned box overlap
fn overlaps(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let d = (a_center - b_center).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}

/// Gravity, ground and contact detection for one hero
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    gravity: f32,
    ground_top: f32,
    hero_half: Vec2,
    touching: BTreeSet<Touch>,
}

impl HeadlessWorld {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            gravity: tuning.gravity,
            ground_top: tuning.ground_height,
            hero_half: Vec2::splat(tuning.hero_half_size),
            touching: BTreeSet::new(),
        }
    }

    /// Integrate the hero for one step, then report new contacts
    pub fn step(&mut self, game: &mut Game, dt: f32) {
        let min_y = self.ground_top + self.hero_half.y;
        let hero = game.body_mut();

        hero.vel.y += self.gravity * dt;
        hero.pos += hero.vel * dt;
        if hero.rotation_enabled {
            hero.rotation += hero.angular_vel * dt;
        }

        // Ground is solid
        if hero.pos.y < min_y {
            hero.pos.y = min_y;
            hero.vel.y = hero.vel.y.max(0.0);
        }

        let current = self.touches(game);
        for touch in &current {
            if self.touching.contains(touch) {
                continue;
            }
            let tag = match *touch {
                Touch::Ground => BodyTag::Ground,
                Touch::Part { part, .. } => game.tuning().obstacle.parts[part].tag.clone(),
            };
            game.on_contact(ContactEvent::new(BodyTag::Hero, tag));
        }
        self.touching = current;
    }

    fn touches(&self, game: &Game) -> BTreeSet<Touch> {
        let hero = game.body().pos;
        let mut touches = BTreeSet::new();

        // Resting on the ground counts as touching it
        if hero.y - self.hero_half.y <= self.ground_top {
            touches.insert(Touch::Ground);
        }

        let parts = &game.tuning().obstacle.parts;
        for (obstacle, origin) in game.obstacles() {
            for (i, part) in parts.iter().enumerate() {
                if overlaps(hero, self.hero_half, origin + part.offset, part.size / 2.0) {
                    touches.insert(Touch::Part {
                        obstacle: obstacle.id,
                        part: i,
                    });
                }
            }
        }
        touches
    }
}

/// Taps whenever the hero sinks below the next gap
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// How far below the gap center to let the hero fall before tapping
    pub margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { margin: 12.0 }
    }
}

impl Autopilot {
    /// Height the hero should hold: the center of the nearest gap ahead
    pub fn target_y(&self, game: &Game) -> f32 {
        let hero = game.body();
        let tuning = game.tuning();
        game.obstacles()
            .filter(|(o, pos)| pos.x + o.half_width >= hero.pos.x - tuning.hero_half_size)
            .min_by(|a, b| a.1.x.total_cmp(&b.1.x))
            .map(|(_, pos)| pos.y)
            .unwrap_or((tuning.spawn_y_min + tuning.spawn_y_max) / 2.0)
    }

    pub fn wants_flap(&self, game: &Game) -> bool {
        if !game.is_active() {
            return false;
        }
        let hero = game.body();
        let below = self.target_y(game) - hero.pos.y;

        // Far under the next gap: tap again before the apex to climb faster
        if below > self.margin * 3.0 {
            return hero.vel.y < game.tuning().flap_impulse / 2.0;
        }
        hero.vel.y <= 0.0 && below > self.margin
    }
}

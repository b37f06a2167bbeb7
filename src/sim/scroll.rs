//! Ground scrolling
//!
//! A small pool of strips slides left forever. A strip that has fully left the
//! viewport is moved to the right end of the row, so the ground never ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::space::{CoordinateSpace, Layer};
use super::state::{GameEvent, SessionState};
use crate::Tuning;

/// One ground tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollStrip {
    /// Layer-local center
    pub pos: Vec2,
    pub width: f32,
}

impl ScrollStrip {
    pub fn new(pos: Vec2, width: f32) -> Self {
        Self { pos, width }
    }
}

/// Layer holding the strip pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollLayer {
    pub layer: Layer,
    pub strips: Vec<ScrollStrip>,
}

impl ScrollLayer {
    /// Lay `count` strips edge to edge starting at the left of the viewport
    pub fn new(width: f32, count: usize, y: f32) -> Self {
        let strips = (0..count)
            .map(|i| ScrollStrip::new(Vec2::new(width / 2.0 + i as f32 * width, y), width))
            .collect();
        Self {
            layer: Layer::default(),
            strips,
        }
    }

    /// Viewport-space center of a strip
    pub fn viewport_pos(&self, index: usize) -> Vec2 {
        self.layer.to_viewport(self.strips[index].pos)
    }

    /// Rightmost viewport-space edge of every strip except `skip`
    fn right_edge_excluding(&self, skip: usize) -> f32 {
        self.strips
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, s)| self.layer.to_viewport(s.pos).x + s.width / 2.0)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Slide left by `distance` and recycle strips that left the viewport.
    /// Returns the indices of recycled strips.
    pub fn scroll(&mut self, distance: f32, viewport_width: f32) -> Vec<usize> {
        self.layer.translate_x(-distance);

        let mut recycled = Vec::new();
        for i in 0..self.strips.len() {
            let strip = self.strips[i];
            let pos = self.layer.to_viewport(strip.pos);

            if pos.x <= -strip.width / 2.0 {
                // Butt against the row, never inside the viewport
                let left = self.right_edge_excluding(i).max(viewport_width);
                let target = Vec2::new(left + strip.width / 2.0, pos.y);
                self.strips[i].pos = self.layer.from_viewport(target);
                recycled.push(i);
            }
        }

        if self.layer.rebase(self.strips.iter_mut().map(|s| &mut s.pos)) {
            log::debug!("Scroll layer rebased");
        }

        recycled
    }
}

/// Advance ground scrolling by one tick
pub fn tick(state: &mut SessionState, tuning: &Tuning, dt: f32) {
    if !state.is_active() {
        return;
    }

    let recycled = state
        .scroll
        .scroll(tuning.scroll_speed * dt, tuning.viewport.x);

    for index in recycled {
        log::trace!("Recycled strip {}", index);
        state.events.push(GameEvent::StripRecycled { index });
    }
}

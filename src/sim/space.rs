//! Coordinate frames
//!
//! Ground strips and obstacles live inside layers that slide left. All
//! on-screen tests happen in viewport space, so every position goes through
//! [`CoordinateSpace`] on the way in and back out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::REBASE_DISTANCE;

/// Maps positions between a local frame and the viewport
pub trait CoordinateSpace {
    fn to_viewport(&self, local: Vec2) -> Vec2;
    fn from_viewport(&self, viewport: Vec2) -> Vec2;
}

/// A translated frame (no rotation or scale)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Origin of the layer in viewport space
    pub offset: Vec2,
}

impl Layer {
    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }

    /// Slide the layer horizontally
    pub fn translate_x(&mut self, dx: f32) {
        self.offset.x += dx;
    }

    /// Fold a large horizontal offset back into the children so their local
    /// coordinates stay small. Viewport positions are unchanged.
    ///
    /// Returns true if the layer was rebased.
    pub fn rebase<'a>(&mut self, children: impl IntoIterator<Item = &'a mut Vec2>) -> bool {
        if self.offset.x > -REBASE_DISTANCE {
            return false;
        }
        let shift = self.offset.x;
        for pos in children {
            pos.x += shift;
        }
        self.offset.x = 0.0;
        true
    }
}

impl CoordinateSpace for Layer {
    #[inline]
    fn to_viewport(&self, local: Vec2) -> Vec2 {
        local + self.offset
    }

    #[inline]
    fn from_viewport(&self, viewport: Vec2) -> Vec2 {
        viewport - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_inverts() {
        let layer = Layer::new(Vec2::new(-123.5, 0.0));
        let p = Vec2::new(40.0, 250.0);
        assert_eq!(layer.from_viewport(layer.to_viewport(p)), p);
    }

    #[test]
    fn test_rebase_preserves_viewport_positions() {
        let mut layer = Layer::new(Vec2::new(-REBASE_DISTANCE - 50.0, 0.0));
        let mut children = vec![Vec2::new(REBASE_DISTANCE + 100.0, 10.0)];
        let before = layer.to_viewport(children[0]);

        assert!(layer.rebase(children.iter_mut()));
        assert_eq!(layer.offset.x, 0.0);
        assert!((layer.to_viewport(children[0]) - before).length() < 0.01);
    }

    #[test]
    fn test_small_offset_not_rebased() {
        let mut layer = Layer::new(Vec2::new(-100.0, 0.0));
        let mut children = vec![Vec2::ZERO];
        assert!(!layer.rebase(children.iter_mut()));
        assert_eq!(layer.offset.x, -100.0);
    }
}

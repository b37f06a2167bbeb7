//! Obstacles: template, slot pool and the spawner tick
//!
//! Obstacles are built from an immutable [`ObstacleTemplate`] and stored in
//! a slot pool with a free list, so steady-state spawning does not allocate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::contact::BodyTag;
use super::space::{CoordinateSpace, Layer};
use super::state::{GameEvent, SessionState};
use crate::Tuning;
use crate::consts::{OBSTACLE_GAP, OBSTACLE_HALF_WIDTH};

/// A collision box belonging to an obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePart {
    /// Contact tag reported when the hero touches this part
    pub tag: BodyTag,
    /// Center relative to the obstacle origin
    pub offset: Vec2,
    /// Full width and height
    pub size: Vec2,
}

/// Read-only description every obstacle is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTemplate {
    /// Half the obstacle width; also how far past the left edge it may travel
    pub half_width: f32,
    pub parts: Vec<ObstaclePart>,
}

impl Default for ObstacleTemplate {
    fn default() -> Self {
        Self::with_gap(OBSTACLE_HALF_WIDTH, OBSTACLE_GAP)
    }
}

impl ObstacleTemplate {
    /// Upper and lower blocks around a goal sensor of height `gap`
    pub fn with_gap(half_width: f32, gap: f32) -> Self {
        let block = Vec2::new(half_width * 2.0, 400.0);
        let block_offset = gap / 2.0 + block.y / 2.0;
        Self {
            half_width,
            parts: vec![
                ObstaclePart {
                    tag: BodyTag::Obstacle,
                    offset: Vec2::new(0.0, block_offset),
                    size: block,
                },
                ObstaclePart {
                    tag: BodyTag::Obstacle,
                    offset: Vec2::new(0.0, -block_offset),
                    size: block,
                },
                ObstaclePart {
                    tag: BodyTag::Goal,
                    offset: Vec2::ZERO,
                    size: Vec2::new(4.0, gap),
                },
            ],
        }
    }

    /// Build a fresh obstacle at a layer-local position
    pub fn instantiate(&self, id: u32, pos: Vec2) -> Obstacle {
        Obstacle {
            id,
            pos,
            half_width: self.half_width,
        }
    }
}

/// A live obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Layer-local origin (center of the gap)
    pub pos: Vec2,
    pub half_width: f32,
}

/// Slot arena of live obstacles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePool {
    slots: Vec<Option<Obstacle>>,
    free: Vec<usize>,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an obstacle, reusing a free slot when one exists
    pub fn insert(&mut self, obstacle: Obstacle) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(obstacle);
                slot
            }
            None => {
                self.slots.push(Some(obstacle));
                self.slots.len() - 1
            }
        }
    }

    pub fn remove(&mut self, slot: usize) -> Option<Obstacle> {
        let removed = self.slots.get_mut(slot)?.take();
        if removed.is_some() {
            self.free.push(slot);
        }
        removed
    }

    pub fn get(&self, slot: usize) -> Option<&Obstacle> {
        self.slots.get(slot)?.as_ref()
    }

    /// Live obstacles in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Obstacle)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, o)| o.as_ref().map(|o| (slot, o)))
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Sliding layer that holds the live obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleLayer {
    pub layer: Layer,
    pub pool: ObstaclePool,
    next_id: u32,
}

impl Default for ObstacleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleLayer {
    pub fn new() -> Self {
        Self {
            layer: Layer::default(),
            pool: ObstaclePool::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Live obstacles with their viewport-space origin
    pub fn viewport_positions(&self) -> impl Iterator<Item = (&Obstacle, Vec2)> {
        self.pool
            .iter()
            .map(|(_, o)| (o, self.layer.to_viewport(o.pos)))
    }

    /// Build an obstacle from the template at a viewport position
    pub fn spawn(&mut self, template: &ObstacleTemplate, viewport_pos: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let local = self.layer.from_viewport(viewport_pos);
        self.pool.insert(template.instantiate(id, local));
        id
    }

    /// Remove every obstacle whose viewport x is at or past `-half_width`.
    /// Returns the removed ids.
    pub fn despawn_exited(&mut self) -> Vec<u32> {
        let exited: Vec<usize> = self
            .pool
            .iter()
            .filter(|(_, o)| self.layer.to_viewport(o.pos).x <= -o.half_width)
            .map(|(slot, _)| slot)
            .collect();

        exited
            .into_iter()
            .filter_map(|slot| self.pool.remove(slot))
            .map(|o| o.id)
            .collect()
    }

    fn rebase(&mut self) {
        let Self { layer, pool, .. } = self;
        if layer.rebase(pool.iter_mut().map(|o| &mut o.pos)) {
            log::debug!("Obstacle layer rebased");
        }
    }
}

/// Move, cull and spawn obstacles for one tick
pub fn tick(state: &mut SessionState, tuning: &Tuning, dt: f32) {
    if !state.is_active() {
        return;
    }

    let obstacles = &mut state.obstacles;
    obstacles.layer.translate_x(-tuning.scroll_speed * dt);

    for id in obstacles.despawn_exited() {
        log::debug!("Obstacle {} left the viewport", id);
        state.events.push(GameEvent::ObstacleDespawned { id });
    }

    state.spawn_timer += dt;
    if state.spawn_timer >= tuning.spawn_interval {
        let y = state
            .rng
            .random_range(tuning.spawn_y_min..=tuning.spawn_y_max);
        let pos = Vec2::new(tuning.spawn_x, y);
        let id = obstacles.spawn(&tuning.obstacle, pos);
        log::debug!("Spawned obstacle {} at y={:.1}", id, y);
        state.events.push(GameEvent::ObstacleSpawned { id, pos });

        // Reset rather than subtract: one spawn per crossing
        state.spawn_timer = 0.0;
    }

    obstacles.rebase();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    #[test]
    fn test_three_half_second_ticks_spawn_once() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);

        tick(&mut state, &tuning, 0.5);
        tick(&mut state, &tuning, 0.5);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 1.0);

        tick(&mut state, &tuning, 0.5);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_huge_dt_spawns_only_once() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        state.spawn_timer = 2.0;

        tick(&mut state, &tuning, 1.5);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_spawn_height_in_range() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        for _ in 0..200 {
            state.spawn_timer = tuning.spawn_interval;
            tick(&mut state, &tuning, 0.0);
        }
        assert_eq!(state.obstacles.len(), 200);
        for (o, pos) in state.obstacles.viewport_positions() {
            assert!((234.0..=383.0).contains(&pos.y), "obstacle {} at {}", o.id, pos.y);
            assert_eq!(pos.x, 352.0);
        }
    }

    #[test]
    fn test_exited_obstacle_removed_next_tick() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        let id = state
            .obstacles
            .spawn(&tuning.obstacle, Vec2::new(-25.0, 300.0));
        let keep = state
            .obstacles
            .spawn(&tuning.obstacle, Vec2::new(10.0, 300.0));

        // 100 * 1/60 carries the first obstacle to x <= -26
        tick(&mut state, &tuning, SIM_DT);

        let live: Vec<u32> = state.obstacles.pool.iter().map(|(_, o)| o.id).collect();
        assert_eq!(live, vec![keep]);
        assert!(state.events.contains(&GameEvent::ObstacleDespawned { id }));
    }

    #[test]
    fn test_pool_reuses_slots() {
        let template = ObstacleTemplate::default();
        let mut pool = ObstaclePool::new();
        let a = pool.insert(template.instantiate(1, Vec2::ZERO));
        pool.insert(template.instantiate(2, Vec2::ZERO));
        assert!(pool.remove(a).is_some());
        assert!(pool.remove(a).is_none());

        let c = pool.insert(template.instantiate(3, Vec2::ZERO));
        assert_eq!(c, a);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(c).map(|o| o.id), Some(3));
    }

    #[test]
    fn test_steady_state_spawning_does_not_grow_pool() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        for _ in 0..60 * 120 {
            tick(&mut state, &tuning, SIM_DT);
        }
        // Crossing 378 units at 100 u/s takes under 4 s, spawns are 1.5 s apart
        assert!(state.obstacles.pool.capacity() <= 4);
        assert!(state.obstacles.len() <= 3);
    }

    #[test]
    fn test_game_over_stops_spawner() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        state.machine.transition_to_game_over();
        tick(&mut state, &tuning, 5.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_template_has_goal_between_blocks() {
        let template = ObstacleTemplate::default();
        let goals: Vec<_> = template.parts.iter().filter(|p| p.tag.is_goal()).collect();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].size.y, OBSTACLE_GAP);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_spawn_per_tick(timer in 0.0f32..10.0, dt in 0.0f32..10.0) {
            let tuning = Tuning::default();
            let mut state = SessionState::new(&tuning);
            state.spawn_timer = timer;

            tick(&mut state, &tuning, dt);

            prop_assert!(state.obstacles.len() <= 1);
            prop_assert!(state.spawn_timer >= 0.0);
            if state.obstacles.len() == 1 {
                prop_assert_eq!(state.spawn_timer, 0.0);
            }
        }
    }
}

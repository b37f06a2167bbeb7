//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::state::SessionState;
use super::{obstacle, player, scroll};
use crate::Tuning;

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SessionState, tuning: &Tuning, dt: f32) {
    // Body actions run every frame, even after the crash
    state.hero.run_actions();

    if !state.is_active() {
        return;
    }

    state.time_ticks += 1;

    player::tick(state, tuning, dt);
    scroll::tick(state, tuning, dt);
    obstacle::tick(state, tuning, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{ContactEvent, GameState, contact};

    #[test]
    fn test_tick_counts_only_active_ticks() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        for _ in 0..10 {
            tick(&mut state, &tuning, SIM_DT);
        }
        contact::on_contact(&mut state, &tuning, &ContactEvent::new("hero", "ground"));
        for _ in 0..10 {
            tick(&mut state, &tuning, SIM_DT);
        }
        assert_eq!(state.time_ticks, 10);
        assert_eq!(state.machine.state(), GameState::GameOver);
    }

    #[test]
    fn test_death_pose_applied_next_tick() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        state.hero.rotation = 0.3;
        contact::on_contact(&mut state, &tuning, &ContactEvent::new("hero", "obstacle"));
        assert_eq!(state.hero.rotation, 0.3);

        tick(&mut state, &tuning, SIM_DT);
        assert_eq!(state.hero.rotation, (-90.0f32).to_radians());
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed should produce identical results
        let tuning = Tuning::default();
        let mut state1 = SessionState::new(&tuning);
        let mut state2 = SessionState::new(&tuning);

        for i in 0..600 {
            if i % 25 == 0 {
                player::on_input(&mut state1, &tuning);
                player::on_input(&mut state2, &tuning);
            }
            tick(&mut state1, &tuning, SIM_DT);
            tick(&mut state2, &tuning, SIM_DT);
        }

        let pos1: Vec<_> = state1.obstacles.viewport_positions().map(|(_, p)| p).collect();
        let pos2: Vec<_> = state2.obstacles.viewport_positions().map(|(_, p)| p).collect();
        assert!(!pos1.is_empty());
        assert_eq!(pos1, pos2);
        assert_eq!(state1.hero.rotation, state2.hero.rotation);
    }
}

//! Frame clock
//!
//! Converts variable frame times into a whole number of fixed ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Length of one tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Account for a rendered frame and return how many ticks to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // Long stalls (tab switch, debugger) are not replayed
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }

    /// Leftover fraction of a tick, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_one_tick_per_frame_at_60hz() {
        let mut clock = FixedStep::new(SIM_DT);
        let total: u32 = (0..600).map(|_| clock.advance(SIM_DT)).sum();
        assert!((599..=600).contains(&total));
    }

    #[test]
    fn test_slow_frames_catch_up() {
        let mut clock = FixedStep::new(SIM_DT);
        assert_eq!(clock.advance(SIM_DT * 3.5), 3);
        assert!((clock.alpha() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FixedStep::new(SIM_DT);
        let ticks = clock.advance(5.0);
        assert!((5..=6).contains(&ticks), "{ticks} ticks");
    }
}

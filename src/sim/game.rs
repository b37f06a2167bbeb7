//! Session controller
//!
//! [`Game`] is the single owner of a session. It has two entry points, `tick`
//! and `on_contact`, both taking `&mut self`, so a contact can land between
//! two ticks but never inside one.

use glam::Vec2;

use super::body::ControlledBody;
use super::contact::{self, ContactEvent, ContactOutcome};
use super::obstacle::Obstacle;
use super::player;
use super::state::{GameEvent, GameState, SessionState};
use super::tick;
use crate::Tuning;

/// Presentation collaborator fed from the event queue
pub trait Presenter {
    /// Show the current score
    fn show_score(&mut self, score: u32);
    /// Show or hide the restart control
    fn set_restart_visible(&mut self, visible: bool);
    /// Shake every top-level node once
    fn impact_shake(&mut self) {}
    /// Tear down this session and build a new one
    fn restart_requested(&mut self) {}
    /// Every event, including the ones above
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// One play session
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    state: SessionState,
}

impl Game {
    pub fn new(tuning: Tuning) -> Self {
        let state = SessionState::new(&tuning);
        log::info!("New session with seed {}", tuning.seed);
        Self { tuning, state }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn game_state(&self) -> GameState {
        self.state.machine.state()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// The hero, for the physics collaborator to integrate
    pub fn body(&self) -> &ControlledBody {
        &self.state.hero
    }

    pub fn body_mut(&mut self) -> &mut ControlledBody {
        &mut self.state.hero
    }

    /// Live obstacles with their viewport-space origin
    pub fn obstacles(&self) -> impl Iterator<Item = (&Obstacle, Vec2)> {
        self.state.obstacles.viewport_positions()
    }

    /// Player tapped
    pub fn on_input(&mut self) -> bool {
        player::on_input(&mut self.state, &self.tuning)
    }

    /// Advance one fixed step
    pub fn tick(&mut self, dt: f32) {
        tick::tick(&mut self.state, &self.tuning, dt);
    }

    /// The physics collaborator reports a new contact
    pub fn on_contact(&mut self, contact: ContactEvent) -> ContactOutcome {
        contact::on_contact(&mut self.state, &self.tuning, &contact)
    }

    /// Restart control pressed. Only honoured while the control is shown;
    /// the host builds the next session.
    pub fn request_restart(&mut self) -> bool {
        if !self.state.restart_visible {
            return false;
        }
        self.state.events.push(GameEvent::RestartRequested);
        true
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.state.events.drain(..)
    }

    /// Forward pending events to the presentation layer
    pub fn present<P: Presenter>(&mut self, presenter: &mut P) {
        for event in self.state.events.drain(..) {
            presenter.on_event(&event);
            match event {
                GameEvent::ScoreChanged { score } => presenter.show_score(score),
                GameEvent::RestartVisibility { visible } => presenter.set_restart_visible(visible),
                GameEvent::ImpactShake => presenter.impact_shake(),
                GameEvent::RestartRequested => presenter.restart_requested(),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        score: Option<u32>,
        restart_visible: Option<bool>,
        shakes: u32,
        restarts: u32,
        events: usize,
    }

    impl Presenter for Recorder {
        fn show_score(&mut self, score: u32) {
            self.score = Some(score);
        }
        fn set_restart_visible(&mut self, visible: bool) {
            self.restart_visible = Some(visible);
        }
        fn impact_shake(&mut self) {
            self.shakes += 1;
        }
        fn restart_requested(&mut self) {
            self.restarts += 1;
        }
        fn on_event(&mut self, _event: &GameEvent) {
            self.events += 1;
        }
    }

    #[test]
    fn test_new_game_shows_zero_and_hides_restart() {
        let mut game = Game::new(Tuning::default());
        let mut ui = Recorder::default();
        game.present(&mut ui);
        assert_eq!(ui.score, Some(0));
        assert_eq!(ui.restart_visible, Some(false));
        assert_eq!(ui.events, 2);
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn test_crash_reveals_restart_and_shakes_once() {
        let mut game = Game::new(Tuning::default());
        game.on_contact(ContactEvent::new("hero", "goal"));
        game.on_contact(ContactEvent::new("hero", "obstacle"));
        game.on_contact(ContactEvent::new("hero", "ground"));

        let mut ui = Recorder::default();
        game.present(&mut ui);
        assert_eq!(ui.score, Some(1));
        assert_eq!(ui.restart_visible, Some(true));
        assert_eq!(ui.shakes, 1);
        assert_eq!(game.game_state(), GameState::GameOver);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut game = Game::new(Tuning::default());
        assert!(!game.request_restart());

        game.on_contact(ContactEvent::new("hero", "obstacle"));
        assert!(game.request_restart());

        let mut ui = Recorder::default();
        game.present(&mut ui);
        assert_eq!(ui.restarts, 1);
    }

    #[test]
    fn test_dead_game_ignores_input_and_freezes_world() {
        let mut game = Game::new(Tuning::default());
        for _ in 0..30 {
            game.tick(SIM_DT);
        }
        game.on_contact(ContactEvent::new("hero", "obstacle"));
        let scroll_before = game.state().scroll.layer.offset;

        assert!(!game.on_input());
        for _ in 0..120 {
            game.tick(SIM_DT);
        }
        assert_eq!(game.state().scroll.layer.offset, scroll_before);
        assert!(game.obstacles().next().is_none());
    }

    #[test]
    fn test_flap_event_published() {
        let mut game = Game::new(Tuning::default());
        game.drain_events().for_each(drop);
        assert!(game.on_input());
        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Flapped]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tick(f32),
        Tap,
        Contact(&'static str),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f32..0.5).prop_map(Op::Tick),
            Just(Op::Tap),
            prop::sample::select(vec!["goal", "obstacle", "ground", "cloud"])
                .prop_map(Op::Contact),
        ]
    }

    proptest! {
        #[test]
        fn prop_game_over_is_permanent(ops in prop::collection::vec(op(), 1..200)) {
            let mut game = Game::new(Tuning::default());
            let mut ended = false;
            let mut score = 0;

            for op in ops {
                match op {
                    Op::Tick(dt) => game.tick(dt),
                    Op::Tap => {
                        game.on_input();
                    }
                    Op::Contact(tag) => {
                        game.on_contact(ContactEvent::new("hero", tag));
                    }
                }
                if ended {
                    prop_assert_eq!(game.game_state(), GameState::GameOver);
                }
                ended = !game.is_active();
                prop_assert!(game.score() >= score);
                score = game.score();
            }

            let game_overs = game
                .drain_events()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
            prop_assert!(game_overs <= 1);
        }
    }
}

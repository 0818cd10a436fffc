use lumen_engine::DelayQueue;

use crate::indicators::IndicatorBoard;
use crate::presenter::{Cue, Presenter};

/// Seconds from the solve to the completion cue.
pub const CUE_DELAY: f32 = 2.0;
/// Seconds from the completion cue to the end screen.
pub const END_DELAY: f32 = 4.0;

/// Session state machine phases. There is no way back to `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Solved,
    Ending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndStep {
    CompletionCue,
    ShowEnd,
}

/// One-shot end-of-game sequence.
#[derive(Debug, Clone)]
pub struct GameOver {
    phase: GamePhase,
    steps: DelayQueue<EndStep>,
    cue_delay: f32,
    end_delay: f32,
    finished: bool,
}

impl GameOver {
    pub fn new(cue_delay: f32, end_delay: f32) -> Self {
        Self {
            phase: GamePhase::Playing,
            steps: DelayQueue::new(),
            cue_delay,
            end_delay,
            finished: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Switches may only change while the game is still being played.
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// True once the end screen has been requested.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fire the end sequence. Returns false if it already fired.
    pub fn trigger(&mut self, indicators: &mut IndicatorBoard, presenter: &mut impl Presenter) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Solved;
        log::info!("puzzle solved");
        presenter.game_solved();

        self.phase = GamePhase::Ending;
        indicators.force_solved(presenter);
        self.steps.schedule(self.cue_delay, EndStep::CompletionCue);
        true
    }

    /// Advance the end sequence timers.
    pub fn tick(&mut self, dt: f32, presenter: &mut impl Presenter) {
        for step in self.steps.tick(dt) {
            match step {
                EndStep::CompletionCue => {
                    presenter.play_cue(Cue::Complete);
                    self.steps.schedule(self.end_delay, EndStep::ShowEnd);
                }
                EndStep::ShowEnd => {
                    log::info!("end sequence finished");
                    self.finished = true;
                    presenter.show_end();
                }
            }
        }
    }
}

impl Default for GameOver {
    fn default() -> Self {
        Self::new(CUE_DELAY, END_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::recording::{Call, Recorder};
    use crate::switches::SwitchRegistry;
    use glam::Vec2;
    use lumen_engine::EntityId;

    fn board() -> IndicatorBoard {
        let mut reg = SwitchRegistry::new();
        reg.add(EntityId(1), Vec2::ZERO).unwrap();
        IndicatorBoard::bind(&reg, &[Vec2::ZERO], || EntityId(2)).unwrap()
    }

    fn run(over: &mut GameOver, rec: &mut Recorder, seconds: f32) {
        let dt = 0.25;
        let mut t = 0.0;
        while t < seconds {
            over.tick(dt, rec);
            t += dt;
        }
    }

    #[test]
    fn trigger_fires_once() {
        let mut over = GameOver::default();
        let mut board = board();
        let mut rec = Recorder::default();
        assert!(over.accepts_input());

        assert!(over.trigger(&mut board, &mut rec));
        assert_eq!(over.phase(), GamePhase::Ending);
        assert!(!over.accepts_input());
        assert!(!over.trigger(&mut board, &mut rec));

        assert_eq!(rec.count(|c| *c == Call::Solved), 1);
    }

    #[test]
    fn solve_turns_indicators_green_immediately() {
        let mut over = GameOver::default();
        let mut board = board();
        let mut rec = Recorder::default();
        over.trigger(&mut board, &mut rec);
        assert_eq!(
            rec.take(),
            vec![
                Call::Solved,
                Call::Indicator(EntityId(2), crate::indicators::IndicatorColor::Solved),
            ]
        );
    }

    #[test]
    fn cue_then_end_after_fixed_delays() {
        let mut over = GameOver::default();
        let mut board = board();
        let mut rec = Recorder::default();
        over.trigger(&mut board, &mut rec);
        rec.take();

        run(&mut over, &mut rec, 1.75);
        assert!(rec.calls.is_empty());

        run(&mut over, &mut rec, 0.25);
        assert_eq!(rec.take(), vec![Call::Cue(Cue::Complete)]);

        run(&mut over, &mut rec, 3.75);
        assert!(rec.calls.is_empty());
        assert!(!over.is_finished());

        run(&mut over, &mut rec, 0.25);
        assert_eq!(rec.take(), vec![Call::End]);
        assert!(over.is_finished());

        run(&mut over, &mut rec, 10.0);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn tick_while_playing_is_quiet() {
        let mut over = GameOver::default();
        let mut rec = Recorder::default();
        run(&mut over, &mut rec, 10.0);
        assert!(rec.calls.is_empty());
        assert_eq!(over.phase(), GamePhase::Playing);
    }
}

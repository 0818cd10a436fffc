use glam::Vec2;
use lumen_engine::EntityId;

use crate::game_over::{GameOver, GamePhase};
use crate::hint::HintMode;
use crate::indicators::IndicatorBoard;
use crate::level::{InteractMode, Level, Tuning};
use crate::presenter::{Cue, Presenter};
use crate::proximity::{find_nearby, lift, nearest};
use crate::puzzle::{is_solved, Target};
use crate::switches::SwitchRegistry;

/// What an interact press did.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractOutcome {
    /// The puzzle is over; switches are frozen.
    Locked,
    /// No switch within reach.
    NothingInRange,
    /// These switches were toggled (id, new state).
    Toggled {
        switches: Vec<(EntityId, bool)>,
        solved: bool,
    },
}

/// One play-through of a level. Owns every switch and indicator for its lifetime.
pub struct Session {
    switches: SwitchRegistry,
    indicators: IndicatorBoard,
    target: Target,
    tuning: Tuning,
    hint: HintMode,
    game_over: GameOver,
    /// Last prompt visibility sent to the presenter.
    prompt: Option<bool>,
}

impl Session {
    pub fn new(level: Level) -> Self {
        let Level {
            switches,
            indicators,
            target,
            tuning,
        } = level;
        let game_over = GameOver::new(tuning.end_sequence.cue_delay, tuning.end_sequence.end_delay);
        Self {
            switches,
            indicators,
            target,
            tuning,
            hint: HintMode::new(),
            game_over,
            prompt: None,
        }
    }

    /// Publish the full starting presentation.
    pub fn attach(&mut self, presenter: &mut impl Presenter) {
        self.indicators.publish_all(presenter);
        self.hint.publish(presenter);
        self.set_prompt(false, presenter);
    }

    /// Switches within reach of a player standing at `player` (x, z).
    pub fn nearby(&self, player: Vec2) -> Vec<EntityId> {
        find_nearby(
            lift(player, self.tuning.eye_height),
            self.switch_positions(),
            self.tuning.interaction_threshold,
        )
    }

    fn switch_positions(&self) -> impl Iterator<Item = (EntityId, glam::Vec3)> + '_ {
        let height = self.tuning.switch_height;
        self.switches.iter().map(move |s| (s.id, lift(s.pos, height)))
    }

    /// Per-tick work: proximity prompt and end sequence timers.
    pub fn tick(&mut self, player: Vec2, dt: f32, presenter: &mut impl Presenter) {
        let in_range = !self.nearby(player).is_empty();
        self.set_prompt(in_range, presenter);
        self.game_over.tick(dt, presenter);
    }

    fn set_prompt(&mut self, visible: bool, presenter: &mut impl Presenter) {
        if self.prompt != Some(visible) {
            self.prompt = Some(visible);
            presenter.show_interact_prompt(visible);
        }
    }

    /// Handle one interact press from a player at `player` (x, z).
    ///
    /// Each affected switch is toggled, its indicator recolored and the push
    /// cue played; the puzzle is then evaluated once for the whole press.
    pub fn interact(&mut self, player: Vec2, presenter: &mut impl Presenter) -> InteractOutcome {
        if !self.game_over.accepts_input() {
            log::debug!("interact ignored: puzzle already solved");
            return InteractOutcome::Locked;
        }

        let targets = match self.tuning.interact_mode {
            InteractMode::AllInRange => self.nearby(player),
            InteractMode::Nearest => nearest(
                lift(player, self.tuning.eye_height),
                self.switch_positions(),
                self.tuning.interaction_threshold,
            )
            .into_iter()
            .collect(),
        };
        if targets.is_empty() {
            return InteractOutcome::NothingInRange;
        }

        let mut toggled = Vec::with_capacity(targets.len());
        for id in targets {
            let Some(pushed) = self.switches.toggle(id) else {
                continue;
            };
            if let Some(switch) = self.switches.get(id) {
                self.indicators.sync(switch, presenter);
            }
            presenter.play_cue(Cue::ButtonPush);
            log::debug!("switch {:?} -> {}", id, if pushed { "pushed" } else { "released" });
            toggled.push((id, pushed));
        }

        let solved = is_solved(&self.switches, &self.target);
        if solved {
            self.game_over.trigger(&mut self.indicators, presenter);
        }
        InteractOutcome::Toggled {
            switches: toggled,
            solved,
        }
    }

    /// Flip hint mode. Works in every phase and never touches the switches.
    pub fn toggle_hint(&mut self, presenter: &mut impl Presenter) -> bool {
        self.hint.toggle(presenter)
    }

    pub fn is_solved(&self) -> bool {
        is_solved(&self.switches, &self.target)
    }

    pub fn phase(&self) -> GamePhase {
        self.game_over.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.game_over.is_finished()
    }

    pub fn hint_enabled(&self) -> bool {
        self.hint.enabled()
    }

    pub fn switches(&self) -> &SwitchRegistry {
        &self.switches
    }

    pub fn indicators(&self) -> &IndicatorBoard {
        &self.indicators
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

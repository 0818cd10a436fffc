//! The seam between puzzle logic and whatever draws the room.
//!
//! The session calls these synchronously, in the order things happen
//! (toggle, indicator update, cue, evaluation, solve), so a presenter sees a
//! deterministic command stream.

use lumen_engine::{rgb_from_hex, Ambient, EngineContext, GameEvent, PointLight, SoundEvent};

use crate::indicators::Indicator;
use crate::proximity::lift;

// Game event kinds (Rust → JS)
pub const EVENT_INTERACT_PROMPT: f32 = 1.0;
pub const EVENT_HINT_OVERLAY: f32 = 2.0;
pub const EVENT_GAME_SOLVED: f32 = 3.0;
pub const EVENT_SHOW_END: f32 = 4.0;
pub const EVENT_LEVEL_REJECTED: f32 = 5.0;

/// Ceiling lamp brightness and emitter width.
pub const INDICATOR_INTENSITY: f32 = 20.0;
pub const INDICATOR_SIZE: f32 = 2.0;

/// Sound cues the puzzle can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    ButtonPush,
    Complete,
}

impl Cue {
    pub fn sound(self) -> SoundEvent {
        match self {
            Cue::ButtonPush => SoundEvent(1),
            Cue::Complete => SoundEvent(2),
        }
    }
}

/// Commands the puzzle core issues to the presentation layer.
pub trait Presenter {
    fn set_indicator_color(&mut self, indicator: &Indicator);
    fn set_ambient(&mut self, ambient: Ambient);
    fn set_hint_overlay_visible(&mut self, visible: bool);
    fn play_cue(&mut self, cue: Cue);
    fn show_interact_prompt(&mut self, visible: bool);
    /// The puzzle has just been solved (fires once per session).
    fn game_solved(&mut self);
    /// The end sequence is over; switch to the end screen.
    fn show_end(&mut self);
}

/// Presenter writing into the engine's light state, sound list and event list.
pub struct EnginePresenter<'a> {
    ctx: &'a mut EngineContext,
    light_height: f32,
}

impl<'a> EnginePresenter<'a> {
    pub fn new(ctx: &'a mut EngineContext, light_height: f32) -> Self {
        Self { ctx, light_height }
    }
}

impl Presenter for EnginePresenter<'_> {
    fn set_indicator_color(&mut self, indicator: &Indicator) {
        let color = rgb_from_hex(indicator.color.hex());
        match self.ctx.lights.get_mut(indicator.id) {
            Some(light) => light.set_color(color),
            None => self.ctx.lights.add(
                indicator.id,
                PointLight::new(
                    lift(indicator.pos, self.light_height),
                    color,
                    INDICATOR_INTENSITY,
                    INDICATOR_SIZE,
                ),
            ),
        }
    }

    fn set_ambient(&mut self, ambient: Ambient) {
        self.ctx.lights.set_ambient(ambient);
    }

    fn set_hint_overlay_visible(&mut self, visible: bool) {
        self.ctx.emit_event(GameEvent::flag(EVENT_HINT_OVERLAY, visible));
    }

    fn play_cue(&mut self, cue: Cue) {
        self.ctx.emit_sound(cue.sound());
    }

    fn show_interact_prompt(&mut self, visible: bool) {
        self.ctx.emit_event(GameEvent::flag(EVENT_INTERACT_PROMPT, visible));
    }

    fn game_solved(&mut self) {
        self.ctx.emit_event(GameEvent::signal(EVENT_GAME_SOLVED));
    }

    fn show_end(&mut self) {
        self.ctx.emit_event(GameEvent::signal(EVENT_SHOW_END));
    }
}

/// Records every command, for tests.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use crate::indicators::IndicatorColor;
    use lumen_engine::EntityId;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Indicator(EntityId, IndicatorColor),
        Ambient(Ambient),
        Overlay(bool),
        Cue(Cue),
        Prompt(bool),
        Solved,
        End,
    }

    #[derive(Debug, Default)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    impl Recorder {
        pub fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }

        pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(*c)).count()
        }
    }

    impl Presenter for Recorder {
        fn set_indicator_color(&mut self, indicator: &Indicator) {
            self.calls.push(Call::Indicator(indicator.id, indicator.color));
        }
        fn set_ambient(&mut self, ambient: Ambient) {
            self.calls.push(Call::Ambient(ambient));
        }
        fn set_hint_overlay_visible(&mut self, visible: bool) {
            self.calls.push(Call::Overlay(visible));
        }
        fn play_cue(&mut self, cue: Cue) {
            self.calls.push(Call::Cue(cue));
        }
        fn show_interact_prompt(&mut self, visible: bool) {
            self.calls.push(Call::Prompt(visible));
        }
        fn game_solved(&mut self) {
            self.calls.push(Call::Solved);
        }
        fn show_end(&mut self) {
            self.calls.push(Call::End);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::IndicatorColor;
    use glam::{Vec2, Vec3};
    use lumen_engine::EntityId;

    fn lamp(color: IndicatorColor) -> Indicator {
        Indicator {
            id: EntityId(17),
            switch: EntityId(1),
            pos: Vec2::new(10.0, -15.0),
            color,
        }
    }

    #[test]
    fn first_color_places_the_lamp() {
        let mut ctx = EngineContext::new();
        EnginePresenter::new(&mut ctx, 9.9).set_indicator_color(&lamp(IndicatorColor::Neutral));
        let light = ctx.lights.get(EntityId(17)).unwrap();
        assert_eq!(light.pos(), Vec3::new(10.0, 9.9, -15.0));
        assert_eq!(light.color(), [1.0, 1.0, 1.0]);
        assert_eq!(light.intensity, INDICATOR_INTENSITY);
    }

    #[test]
    fn later_colors_recolor_in_place() {
        let mut ctx = EngineContext::new();
        let mut p = EnginePresenter::new(&mut ctx, 9.9);
        p.set_indicator_color(&lamp(IndicatorColor::Neutral));
        p.set_indicator_color(&lamp(IndicatorColor::Active));
        assert_eq!(ctx.lights.count(), 1);
        assert_eq!(ctx.lights.get(EntityId(17)).unwrap().color(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn signals_become_events_and_sounds() {
        let mut ctx = EngineContext::new();
        let mut p = EnginePresenter::new(&mut ctx, 9.9);
        p.show_interact_prompt(true);
        p.set_hint_overlay_visible(false);
        p.play_cue(Cue::Complete);
        p.game_solved();
        p.show_end();
        assert_eq!(
            ctx.events,
            vec![
                GameEvent::flag(EVENT_INTERACT_PROMPT, true),
                GameEvent::flag(EVENT_HINT_OVERLAY, false),
                GameEvent::signal(EVENT_GAME_SOLVED),
                GameEvent::signal(EVENT_SHOW_END),
            ]
        );
        assert_eq!(ctx.sounds, vec![SoundEvent(2)]);
    }
}

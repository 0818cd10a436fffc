use std::collections::HashMap;

use glam::Vec2;
use lumen_engine::EntityId;

use crate::error::LevelError;
use crate::presenter::Presenter;
use crate::switches::{Switch, SwitchRegistry};

/// Ceiling light color states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    /// Switch released (white).
    Neutral,
    /// Switch pushed (red).
    Active,
    /// Puzzle solved (green), overrides everything.
    Solved,
}

impl IndicatorColor {
    pub fn for_state(pushed: bool) -> Self {
        if pushed {
            IndicatorColor::Active
        } else {
            IndicatorColor::Neutral
        }
    }

    /// `0xRRGGBB` value used by the renderer.
    pub fn hex(self) -> u32 {
        match self {
            IndicatorColor::Neutral => 0xffffff,
            IndicatorColor::Active => 0xff0000,
            IndicatorColor::Solved => 0x00ff00,
        }
    }
}

/// A ceiling light bound to one switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub id: EntityId,
    pub switch: EntityId,
    pub pos: Vec2,
    pub color: IndicatorColor,
}

/// Indicators joined to their switches.
///
/// The join happens once, by exact position, when the level is built.
/// From then on every lookup goes through switch ids.
#[derive(Debug, Clone, Default)]
pub struct IndicatorBoard {
    indicators: Vec<Indicator>,
    by_switch: HashMap<EntityId, usize>,
}

impl IndicatorBoard {
    /// Bind one indicator per position to the switch at that position.
    ///
    /// Fails if an indicator has no switch, a switch gets two indicators,
    /// or a switch is left without one.
    pub fn bind(
        switches: &SwitchRegistry,
        positions: &[Vec2],
        mut next_id: impl FnMut() -> EntityId,
    ) -> Result<Self, LevelError> {
        let mut board = Self::default();
        for &pos in positions {
            let switch = switches
                .find_at(pos)
                .ok_or(LevelError::OrphanIndicator { x: pos.x, z: pos.y })?;
            if board.by_switch.contains_key(&switch.id) {
                return Err(LevelError::DuplicateIndicator { x: pos.x, z: pos.y });
            }
            board.by_switch.insert(switch.id, board.indicators.len());
            board.indicators.push(Indicator {
                id: next_id(),
                switch: switch.id,
                pos,
                color: IndicatorColor::for_state(switch.pushed),
            });
        }

        if let Some(unbound) = switches.iter().find(|s| !board.by_switch.contains_key(&s.id)) {
            return Err(LevelError::MissingIndicator { x: unbound.pos.x, z: unbound.pos.y });
        }
        Ok(board)
    }

    /// Recolor the indicator of `switch` from its pushed state.
    pub fn sync(&mut self, switch: &Switch, presenter: &mut impl Presenter) -> Option<IndicatorColor> {
        let idx = *self.by_switch.get(&switch.id)?;
        let indicator = &mut self.indicators[idx];
        indicator.color = IndicatorColor::for_state(switch.pushed);
        presenter.set_indicator_color(indicator);
        Some(indicator.color)
    }

    /// Turn every indicator green.
    pub fn force_solved(&mut self, presenter: &mut impl Presenter) {
        for indicator in &mut self.indicators {
            indicator.color = IndicatorColor::Solved;
            presenter.set_indicator_color(indicator);
        }
    }

    /// Send the current color of every indicator.
    pub fn publish_all(&self, presenter: &mut impl Presenter) {
        for indicator in &self.indicators {
            presenter.set_indicator_color(indicator);
        }
    }

    pub fn for_switch(&self, switch: EntityId) -> Option<&Indicator> {
        self.by_switch.get(&switch).map(|&i| &self.indicators[i])
    }

    pub fn color_of(&self, switch: EntityId) -> Option<IndicatorColor> {
        self.for_switch(switch).map(|i| i.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::recording::{Call, Recorder};

    fn switches() -> SwitchRegistry {
        let mut reg = SwitchRegistry::new();
        reg.add(EntityId(1), Vec2::new(-40.0, -40.0)).unwrap();
        reg.add(EntityId(2), Vec2::new(-15.0, -40.0)).unwrap();
        reg
    }

    fn ids() -> impl FnMut() -> EntityId {
        let mut next = 100;
        move || {
            next += 1;
            EntityId(next)
        }
    }

    fn board(reg: &SwitchRegistry) -> IndicatorBoard {
        IndicatorBoard::bind(reg, &[Vec2::new(-15.0, -40.0), Vec2::new(-40.0, -40.0)], ids()).unwrap()
    }

    #[test]
    fn binds_by_position_then_by_id() {
        let reg = switches();
        let board = board(&reg);
        assert_eq!(board.len(), 2);
        assert_eq!(board.for_switch(EntityId(2)).unwrap().id, EntityId(101));
        assert_eq!(board.for_switch(EntityId(1)).unwrap().id, EntityId(102));
        assert!(board.iter().all(|i| i.color == IndicatorColor::Neutral));
    }

    #[test]
    fn color_follows_switch_state() {
        let mut reg = switches();
        let mut board = board(&reg);
        let mut rec = Recorder::default();

        reg.toggle(EntityId(1));
        let sw = reg.get(EntityId(1)).unwrap();
        assert_eq!(board.sync(sw, &mut rec), Some(IndicatorColor::Active));

        reg.toggle(EntityId(1));
        let sw = reg.get(EntityId(1)).unwrap();
        assert_eq!(board.sync(sw, &mut rec), Some(IndicatorColor::Neutral));

        assert_eq!(
            rec.take(),
            vec![
                Call::Indicator(EntityId(102), IndicatorColor::Active),
                Call::Indicator(EntityId(102), IndicatorColor::Neutral),
            ]
        );
        assert_eq!(board.color_of(EntityId(2)), Some(IndicatorColor::Neutral));
    }

    #[test]
    fn force_solved_overrides_all() {
        let mut reg = switches();
        let mut board = board(&reg);
        let mut rec = Recorder::default();
        reg.toggle(EntityId(2));
        board.sync(reg.get(EntityId(2)).unwrap(), &mut rec);

        board.force_solved(&mut rec);
        assert!(board.iter().all(|i| i.color == IndicatorColor::Solved));
        assert_eq!(rec.count(|c| matches!(c, Call::Indicator(_, IndicatorColor::Solved))), 2);
    }

    #[test]
    fn orphan_indicator_is_rejected() {
        let reg = switches();
        let err = IndicatorBoard::bind(&reg, &[Vec2::new(0.0, 0.0)], ids()).unwrap_err();
        assert!(matches!(err, LevelError::OrphanIndicator { .. }));
    }

    #[test]
    fn switch_without_indicator_is_rejected() {
        let reg = switches();
        let err = IndicatorBoard::bind(&reg, &[Vec2::new(-40.0, -40.0)], ids()).unwrap_err();
        assert!(matches!(err, LevelError::MissingIndicator { x, z } if x == -15.0 && z == -40.0));
    }

    #[test]
    fn two_indicators_on_one_switch_are_rejected() {
        let reg = switches();
        let pos = Vec2::new(-40.0, -40.0);
        let err = IndicatorBoard::bind(&reg, &[pos, pos], ids()).unwrap_err();
        assert!(matches!(err, LevelError::DuplicateIndicator { .. }));
    }

    #[test]
    fn hex_values() {
        assert_eq!(IndicatorColor::Neutral.hex(), 0xffffff);
        assert_eq!(IndicatorColor::Active.hex(), 0xff0000);
        assert_eq!(IndicatorColor::Solved.hex(), 0x00ff00);
    }
}

use glam::Vec2;
use lumen_engine::EntityId;

use crate::error::LevelError;

/// A floor button. `pushed` flips on every toggle and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub id: EntityId,
    /// Floor-plane position, `(x, z)` stored as `Vec2 { x, y: z }`.
    pub pos: Vec2,
    pub pushed: bool,
}

impl Switch {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self { id, pos, pushed: false }
    }

    /// Flip the switch. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.pushed = !self.pushed;
        self.pushed
    }
}

/// All switches of a level, in placement order.
///
/// Switches are placed once at level build and never removed.
#[derive(Debug, Clone, Default)]
pub struct SwitchRegistry {
    switches: Vec<Switch>,
}

impl SwitchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a switch. Positions must be distinct.
    pub fn add(&mut self, id: EntityId, pos: Vec2) -> Result<(), LevelError> {
        if self.find_at(pos).is_some() {
            return Err(LevelError::DuplicateSwitch { x: pos.x, z: pos.y });
        }
        self.switches.push(Switch::new(id, pos));
        Ok(())
    }

    pub fn get(&self, id: EntityId) -> Option<&Switch> {
        self.switches.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Switch> {
        self.switches.iter_mut().find(|s| s.id == id)
    }

    /// Toggle the switch with `id`. Returns its new state.
    pub fn toggle(&mut self, id: EntityId) -> Option<bool> {
        self.get_mut(id).map(Switch::toggle)
    }

    /// The switch placed exactly at `pos`.
    ///
    /// Exact float comparison is only used while building a level, where
    /// positions come verbatim from the same config.
    pub fn find_at(&self, pos: Vec2) -> Option<&Switch> {
        self.switches.iter().find(|s| s.pos == pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Switch> {
        self.switches.iter()
    }

    pub fn pushed_count(&self) -> usize {
        self.switches.iter().filter(|s| s.pushed).count()
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}

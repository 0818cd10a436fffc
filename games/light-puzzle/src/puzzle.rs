use std::collections::BTreeSet;

use glam::Vec2;
use lumen_engine::EntityId;

use crate::error::LevelError;
use crate::switches::SwitchRegistry;

/// The switches that must be pushed for the puzzle to count as solved.
/// Every other switch must be released.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Target {
    members: BTreeSet<EntityId>,
}

impl Target {
    /// Resolve target positions to switch ids.
    pub fn from_positions(switches: &SwitchRegistry, positions: &[Vec2]) -> Result<Self, LevelError> {
        let mut members = BTreeSet::new();
        for &pos in positions {
            let switch = switches
                .find_at(pos)
                .ok_or(LevelError::UnknownTarget { x: pos.x, z: pos.y })?;
            members.insert(switch.id);
        }
        Ok(Self { members })
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// True iff every switch is pushed exactly when it belongs to the target.
pub fn is_solved(switches: &SwitchRegistry, target: &Target) -> bool {
    switches.iter().all(|s| s.pushed == target.contains(s.id))
}

use bytemuck::{Pod, Zeroable};

/// Unique identifier for an object placed in the room (switch, indicator, ...).
/// Assigned once at level build and stable for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A sound cue emitted by the game logic.
/// The numeric value maps to a game-defined clip in the JS audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A presentation command communicated from Rust to JS.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Event carrying a single boolean flag in `a`.
    pub fn flag(kind: f32, on: bool) -> Self {
        Self {
            kind,
            a: if on { 1.0 } else { 0.0 },
            ..Self::default()
        }
    }

    /// Event with no payload.
    pub fn signal(kind: f32) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

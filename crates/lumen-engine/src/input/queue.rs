use std::collections::HashSet;

/// Input event types the engine understands.
/// Generic — no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The presentation layer moved the player to (x, z) on the floor plane.
    PlayerMove { x: f32, z: f32 },
    /// A key was pressed. Browsers repeat this while the key is held.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer (overlay buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns level-triggered key events into press edges.
///
/// A key counts as pressed once per physical press: repeated `KeyDown`s
/// for a held key are swallowed until its `KeyUp` arrives.
#[derive(Debug, Default)]
pub struct KeyEdges {
    held: HashSet<u32>,
}

impl KeyEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `KeyDown`. Returns true only on the press edge.
    pub fn press(&mut self, key_code: u32) -> bool {
        self.held.insert(key_code)
    }

    /// Record a `KeyUp`.
    pub fn release(&mut self, key_code: u32) {
        self.held.remove(&key_code);
    }

    /// Feed one event. Returns the key code if it is a fresh press.
    pub fn observe(&mut self, event: &InputEvent) -> Option<u32> {
        match *event {
            InputEvent::KeyDown { key_code } => self.press(key_code).then_some(key_code),
            InputEvent::KeyUp { key_code } => {
                self.release(key_code);
                None
            }
            _ => None,
        }
    }

    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }
}

use crate::api::types::{GameEvent, SoundEvent};
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::input::queue::InputQueue;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of lights (default: 64).
    pub max_lights: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_lights: DEFAULT_MAX_LIGHTS,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: place lights, publish the starting presentation.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. React to input, poll proximity, check win conditions.
    /// `dt` is the fixed timestep.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub lights: LightState,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            lights: LightState::new(),
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Create an EngineContext sized for the given config.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            lights: LightState::with_capacity(config.max_lights),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
        }
    }

    /// Emit a sound event to be forwarded to JS.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to JS.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

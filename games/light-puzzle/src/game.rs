use glam::Vec2;
use lumen_engine::{EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue, KeyEdges};

use crate::error::LevelError;
use crate::level::{KeyBindings, Level, LevelConfig};
use crate::presenter::{EnginePresenter, EVENT_LEVEL_REJECTED};
use crate::session::Session;

// Custom event kinds (JS → Rust)
pub const CUSTOM_INTERACT: u32 = 1;
pub const CUSTOM_TOGGLE_HINT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Interact,
    ToggleHint,
}

pub struct LightPuzzle {
    config: LevelConfig,
    session: Option<Session>,
    /// Level loaded from JS, swapped in at the start of the next update.
    pending: Option<Level>,
    keys: KeyEdges,
    /// Last reported player position (x, z).
    player: Vec2,
}

impl LightPuzzle {
    pub fn new() -> Self {
        Self::with_level(LevelConfig::default())
    }

    /// Start from `config` instead of the stock room. Validation happens in `init`.
    pub fn with_level(config: LevelConfig) -> Self {
        Self {
            config,
            session: None,
            pending: None,
            keys: KeyEdges::new(),
            player: Vec2::ZERO,
        }
    }

    /// Replace the running level with one parsed from JSON. The current
    /// session is untouched if the level does not validate.
    pub fn load_level(&mut self, json: &str) -> Result<(), LevelError> {
        let config = LevelConfig::from_json(json)?;
        let level = Level::build(&config)?;
        log::info!("level loaded: {} switches", level.switches.len());
        self.config = config;
        self.pending = Some(level);
        Ok(())
    }

    pub fn level_config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    fn start(&mut self, level: Level, ctx: &mut EngineContext) {
        ctx.lights.clear();
        let mut session = Session::new(level);
        let mut presenter = EnginePresenter::new(ctx, session.tuning().light_height);
        session.attach(&mut presenter);
        self.session = Some(session);
    }

    fn action_for(keys: &mut KeyEdges, bindings: KeyBindings, event: &InputEvent) -> Option<Action> {
        match *event {
            InputEvent::Custom { kind, .. } if kind == CUSTOM_INTERACT => Some(Action::Interact),
            InputEvent::Custom { kind, .. } if kind == CUSTOM_TOGGLE_HINT => Some(Action::ToggleHint),
            _ => match keys.observe(event) {
                Some(key) if key == bindings.interact => Some(Action::Interact),
                Some(key) if key == bindings.hint => Some(Action::ToggleHint),
                _ => None,
            },
        }
    }
}

impl Default for LightPuzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for LightPuzzle {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match Level::build(&self.config) {
            Ok(level) => self.start(level, ctx),
            Err(err) => {
                log::error!("level rejected: {}", err);
                ctx.emit_event(GameEvent::signal(EVENT_LEVEL_REJECTED));
            }
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        if let Some(level) = self.pending.take() {
            self.start(level, ctx);
        }

        let bindings = self.config.keys;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let light_height = session.tuning().light_height;
        let mut presenter = EnginePresenter::new(ctx, light_height);

        for event in input.iter() {
            if let InputEvent::PlayerMove { x, z } = *event {
                self.player = Vec2::new(x, z);
                continue;
            }
            match Self::action_for(&mut self.keys, bindings, event) {
                Some(Action::Interact) => {
                    session.interact(self.player, &mut presenter);
                }
                Some(Action::ToggleHint) => {
                    session.toggle_hint(&mut presenter);
                }
                None => {}
            }
        }

        session.tick(self.player, dt, &mut presenter);
    }
}

use lumen_engine::bridge::protocol::*;
use lumen_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue,
    FixedTimestep, ProtocolLayout,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    /// Flat buffer of sound event IDs for shared-memory reads.
    sound_buffer: Vec<u8>,
    /// Protocol header, rewritten after every init and tick.
    header: [f32; HEADER_FLOATS],
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            timestep,
            layout,
            config,
            initialized: false,
            frame: 0,
            sound_buffer,
            header: [0.0; HEADER_FLOATS],
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.enforce_capacities();
        self.pack_sounds();
        self.write_header();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: update the game for every fixed step that elapsed.
    ///
    /// Queued input is handed to the first step only, so a single key press
    /// is never seen twice when a slow frame runs several steps. If no step
    /// runs, input stays queued for the next frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let empty = InputQueue::new();
            let step_dt = self.timestep.dt();
            for step in 0..steps {
                let input = if step == 0 { &self.input } else { &empty };
                self.game.update(&mut self.ctx, input, step_dt);
            }
            self.input.drain();
        }

        self.frame = self.frame.wrapping_add(1);
        self.enforce_capacities();
        self.pack_sounds();
        self.write_header();
    }

    fn enforce_capacities(&mut self) {
        if self.ctx.sounds.len() > self.layout.max_sounds {
            log::warn!(
                "dropping {} sound events over capacity {}",
                self.ctx.sounds.len() - self.layout.max_sounds,
                self.layout.max_sounds
            );
            self.ctx.sounds.truncate(self.layout.max_sounds);
        }
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "dropping {} game events over capacity {}",
                self.ctx.events.len() - self.layout.max_events,
                self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }
        if self.ctx.lights.count() > self.layout.max_lights {
            log::warn!(
                "{} lights exceed capacity {}; extra lights are not exported",
                self.ctx.lights.count(),
                self.layout.max_lights
            );
        }
    }

    fn pack_sounds(&mut self) {
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    fn write_header(&mut self) {
        let ambient = self.ctx.lights.ambient();
        let h = &mut self.header;
        h[HEADER_FRAME_COUNTER] = self.frame as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_MAX_LIGHTS] = self.layout.max_lights as f32;
        h[HEADER_LIGHT_COUNT] = self.ctx.lights.count().min(self.layout.max_lights) as f32;
        h[HEADER_MAX_SOUNDS] = self.layout.max_sounds as f32;
        h[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        h[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_AMBIENT_R] = ambient.color[0];
        h[HEADER_AMBIENT_G] = ambient.color[1];
        h[HEADER_AMBIENT_B] = ambient.color[2];
        h[HEADER_AMBIENT_INTENSITY] = ambient.intensity;
    }

    /// Mutable access to the game, for game-specific exports.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Read-only view of the engine context (tests and debugging).
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn header(&self) -> &[f32] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    /// Copy of the exported light floats, for JS callers that prefer a typed array.
    pub fn lights_array(&self) -> js_sys::Float32Array {
        let floats = self.ctx.lights.as_floats();
        let exported = floats.len().min(self.layout.light_data_floats);
        js_sys::Float32Array::from(&floats[..exported])
    }

    pub fn ambient_r(&self) -> f32 {
        self.ctx.lights.ambient().color[0]
    }

    pub fn ambient_g(&self) -> f32 {
        self.ctx.lights.ambient().color[1]
    }

    pub fn ambient_b(&self) -> f32 {
        self.ctx.lights.ambient().color[2]
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ctx.lights.ambient().intensity
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by JS via wasm_bindgen exports) ----

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

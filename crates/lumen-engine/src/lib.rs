pub mod api;
pub mod core;
pub mod systems;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use crate::api::game::{Game, GameConfig, EngineContext};
pub use crate::api::types::{EntityId, SoundEvent, GameEvent};
pub use crate::core::time::{FixedTimestep, DelayQueue};
pub use crate::input::queue::{InputEvent, InputQueue, KeyEdges};
pub use crate::bridge::protocol::{ProtocolLayout, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use crate::systems::lighting::{PointLight, LightState, Ambient, rgb_from_hex};

use thiserror::Error;

/// Reasons a level configuration is rejected at build time.
///
/// Every variant is a construction bug in the level data; nothing here is
/// recoverable at runtime, so the level is refused before play starts.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level has no switches")]
    NoSwitches,

    #[error("two switches share position ({x}, {z})")]
    DuplicateSwitch { x: f32, z: f32 },

    #[error("switch at ({x}, {z}) has no indicator light")]
    MissingIndicator { x: f32, z: f32 },

    #[error("indicator at ({x}, {z}) matches no switch")]
    OrphanIndicator { x: f32, z: f32 },

    #[error("switch at ({x}, {z}) has more than one indicator")]
    DuplicateIndicator { x: f32, z: f32 },

    #[error("target position ({x}, {z}) matches no switch")]
    UnknownTarget { x: f32, z: f32 },

    #[error("interaction threshold must be positive and finite, got {0}")]
    InvalidThreshold(f32),

    #[error("end sequence delay must be non-negative and finite, got {0}")]
    InvalidDelay(f32),
}


use glam::Vec2;
use lumen_engine::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::game_over::{CUE_DELAY, END_DELAY};
use crate::indicators::IndicatorBoard;
use crate::proximity::INTERACTION_THRESHOLD;
use crate::puzzle::Target;
use crate::switches::SwitchRegistry;

// Room layout constants
const GRID_MIN: i32 = -40;
const GRID_MAX: i32 = 40;
const GRID_STEP: usize = 25;
const EYE_HEIGHT: f32 = 2.0;
const SWITCH_HEIGHT: f32 = 0.05;
const LIGHT_HEIGHT: f32 = 9.9;

// Default key bindings (KeyboardEvent.keyCode)
const KEY_E: u32 = 69;
const KEY_L: u32 = 76;

const HINT_TEXT: &str = "O O O X\nX O O X\nX O X X\nX X O O";
const KEY_LABEL: &str = "Key = L";

/// Which switches one interact press toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractMode {
    /// Every switch within reach.
    #[default]
    AllInRange,
    /// Only the closest switch within reach.
    Nearest,
}

/// Delays of the end sequence, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndSequence {
    /// Solve → completion cue.
    pub cue_delay: f32,
    /// Completion cue → end screen.
    pub end_delay: f32,
}

impl Default for EndSequence {
    fn default() -> Self {
        Self {
            cue_delay: CUE_DELAY,
            end_delay: END_DELAY,
        }
    }
}

/// Key codes for the two puzzle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub interact: u32,
    pub hint: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            interact: KEY_E,
            hint: KEY_L,
        }
    }
}

/// Level description, loadable from JSON. Missing fields fall back to the
/// stock room: a 4×4 grid of buttons with one ceiling light above each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Switch positions as `[x, z]`.
    pub switches: Vec<[f32; 2]>,
    /// Indicator positions as `[x, z]`; each must sit exactly on a switch.
    pub indicators: Vec<[f32; 2]>,
    /// Positions of the switches that must end up pushed.
    pub target: Vec<[f32; 2]>,
    pub interaction_threshold: f32,
    pub interact_mode: InteractMode,
    /// Player eye height above the floor.
    pub eye_height: f32,
    /// Height of a switch top above the floor.
    pub switch_height: f32,
    /// Height of the ceiling lights.
    pub light_height: f32,
    pub end_sequence: EndSequence,
    pub keys: KeyBindings,
    /// Clue revealed by hint mode.
    pub hint_text: String,
    /// Wall label telling the player which key toggles hint mode.
    pub key_label: String,
}

impl Default for LevelConfig {
    fn default() -> Self {
        let grid: Vec<[f32; 2]> = (GRID_MIN..GRID_MAX)
            .step_by(GRID_STEP)
            .flat_map(|x| {
                (GRID_MIN..GRID_MAX)
                    .step_by(GRID_STEP)
                    .map(move |z| [x as f32, z as f32])
            })
            .collect();

        Self {
            switches: grid.clone(),
            indicators: grid,
            target: vec![
                [-40.0, -15.0],
                [-40.0, 10.0],
                [-40.0, 35.0],
                [-15.0, 35.0],
                [10.0, 10.0],
                [35.0, -40.0],
                [35.0, -15.0],
                [35.0, 10.0],
            ],
            interaction_threshold: INTERACTION_THRESHOLD,
            interact_mode: InteractMode::default(),
            eye_height: EYE_HEIGHT,
            switch_height: SWITCH_HEIGHT,
            light_height: LIGHT_HEIGHT,
            end_sequence: EndSequence::default(),
            keys: KeyBindings::default(),
            hint_text: HINT_TEXT.to_string(),
            key_label: KEY_LABEL.to_string(),
        }
    }
}

impl LevelConfig {
    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Tunables copied out of the config for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub interaction_threshold: f32,
    pub interact_mode: InteractMode,
    pub eye_height: f32,
    pub switch_height: f32,
    pub light_height: f32,
    pub end_sequence: EndSequence,
}

/// A validated level: switches and indicators placed, joined and given ids.
#[derive(Debug, Clone)]
pub struct Level {
    pub switches: SwitchRegistry,
    pub indicators: IndicatorBoard,
    pub target: Target,
    pub tuning: Tuning,
}

impl Level {
    /// Validate `config` and place everything. Ids are assigned in
    /// placement order: switches first, then indicators.
    pub fn build(config: &LevelConfig) -> Result<Self, LevelError> {
        let threshold = config.interaction_threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(LevelError::InvalidThreshold(threshold));
        }
        for delay in [config.end_sequence.cue_delay, config.end_sequence.end_delay] {
            if !(delay.is_finite() && delay >= 0.0) {
                return Err(LevelError::InvalidDelay(delay));
            }
        }
        if config.switches.is_empty() {
            return Err(LevelError::NoSwitches);
        }

        let mut next = 0u32;
        let mut next_id = move || {
            next += 1;
            EntityId(next)
        };

        let mut switches = SwitchRegistry::new();
        for p in &config.switches {
            switches.add(next_id(), Vec2::from(*p))?;
        }

        let indicator_pos: Vec<Vec2> = config.indicators.iter().map(|p| Vec2::from(*p)).collect();
        let indicators = IndicatorBoard::bind(&switches, &indicator_pos, &mut next_id)?;

        let target_pos: Vec<Vec2> = config.target.iter().map(|p| Vec2::from(*p)).collect();
        let target = Target::from_positions(&switches, &target_pos)?;

        log::debug!(
            "level built: {} switches, {} indicators, {} targets",
            switches.len(),
            indicators.len(),
            target.len()
        );

        Ok(Self {
            switches,
            indicators,
            target,
            tuning: Tuning {
                interaction_threshold: threshold,
                interact_mode: config.interact_mode,
                eye_height: config.eye_height,
                switch_height: config.switch_height,
                light_height: config.light_height,
                end_sequence: config.end_sequence,
            },
        })
    }
}

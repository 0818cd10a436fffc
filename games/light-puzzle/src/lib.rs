use lumen_engine::InputEvent;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod game;
pub mod game_over;
pub mod hint;
pub mod indicators;
pub mod level;
pub mod presenter;
pub mod proximity;
pub mod puzzle;
pub mod session;
pub mod switches;

pub use game::LightPuzzle;

lumen_web::export_game!(LightPuzzle, "light-puzzle");

/// Load a level from JSON. Takes effect on the next tick; on error the
/// running level is kept and the message is returned to JS.
#[wasm_bindgen]
pub fn game_load_level(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.game_mut().load_level(json)).map_err(|err| {
        log::warn!("level load failed: {}", err);
        JsValue::from_str(&err.to_string())
    })
}

/// Clue text shown on the hint overlay.
#[wasm_bindgen]
pub fn get_hint_text() -> String {
    with_runner(|r| r.game().level_config().hint_text.clone())
}

/// Wall label naming the hint key.
#[wasm_bindgen]
pub fn get_key_label() -> String {
    with_runner(|r| r.game().level_config().key_label.clone())
}

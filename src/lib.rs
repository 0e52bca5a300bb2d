//! HZ Bird core crate.
//!
//! The bird flies between answer lanes and locks in answers to beat a quiz
//! boss. Gameplay (player, boss fight, frame orchestration, drawing through the
//! `Canvas` trait) is plain Rust and runs natively for tests; the browser host
//! in `web.rs` only exists on wasm32.

use wasm_bindgen::prelude::*;

pub mod bossfight;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod player;
pub mod questions;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bossfight::{AnswerResult, Bossfight, MusicState};
pub use config::GameConfig;
pub use error::GameError;
pub use game::{Frame, FrameEvent, FrameOutcome, Game, GameOutcome, Sound, TransitionKind, random_number};
pub use input::InputState;
pub use player::{Player, PlayerStatus};
pub use questions::{QUESTIONS, Question};
pub use render::{Canvas, DrawCall, RecordingCanvas, Sprite, TextAlign, TextStyle, write_text};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Show the start button with the default config.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    boot(GameConfig::default())
}

/// Same as `start_game`, with a partial JSON config layered over the defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    boot(GameConfig::from_json(json)?)
}

fn boot(config: GameConfig) -> Result<(), JsValue> {
    config.validate()?;
    #[cfg(target_arch = "wasm32")]
    web::install_start_button(config)?;
    #[cfg(not(target_arch = "wasm32"))]
    log::warn!("no browser host off wasm32, ignoring {config:?}");
    Ok(())
}

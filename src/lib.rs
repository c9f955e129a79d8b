//! HolidayMagic - holiday greeting widget in WASM
//!
//! Snowfall, a self-advancing message carousel, a New Year countdown and
//! celebratory fireworks. The simulation and state live in platform-free
//! modules; `web` binds them to the page.

use wasm_bindgen::prelude::*;

pub mod carousel;
pub mod config;
pub mod constants;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod fireworks;
pub mod messages;
pub mod platform;
pub mod scheduler;
pub mod snow;
pub mod web;

#[cfg(test)]
mod testing;

pub use config::GreetingConfig;
pub use constants::*;
pub use controller::{AppState, Collaborators, Controller, FrameStats, Screen};
pub use error::SetupError;
pub use web::HolidayMagic;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();
    let mode = if RUNTIME_CONFIGURABLE {
        "configurable"
    } else {
        "release"
    };
    log::info!("[HolidayMagic] WASM loaded ({mode})");
}

#[wasm_bindgen]
pub fn is_runtime_configurable() -> bool {
    RUNTIME_CONFIGURABLE
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

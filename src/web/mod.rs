//! Browser bindings for the greeting experience
//!
//! The page owns the animation loop and button wiring; it calls `frame`
//! from `requestAnimationFrame` and the action methods from its handlers.

pub mod canvas;
pub mod dom;
pub mod media;

use chrono::Local;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::config::GreetingConfig;
use crate::constants::RUNTIME_CONFIGURABLE;
use crate::controller::{Collaborators, Controller, FrameStats, Screen};
use crate::error::SetupError;
use crate::platform::ShareOutcome;

pub use canvas::CanvasSurface;
pub use dom::DomDisplay;
pub use media::{WebAudio, WebShare};

const SNOW_CANVAS: &str = "snowCanvas";
const FIREWORKS_CANVAS: &str = "fireworksCanvas";

type WebController = Controller<DomDisplay, WebAudio, WebShare, CanvasSurface, Local>;

fn viewport(window: &Window) -> (f32, f32) {
    let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        dimension(window.inner_width()) as f32,
        dimension(window.inner_height()) as f32,
    )
}

#[wasm_bindgen]
pub struct HolidayMagic {
    window: Window,
    controller: WebController,
}

#[wasm_bindgen]
impl HolidayMagic {
    #[wasm_bindgen(constructor)]
    pub fn new(config_val: JsValue) -> Result<HolidayMagic, JsValue> {
        log::info!("[HolidayMagic] Initializing greeting module...");

        let config = GreetingConfig::from_js(config_val);

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;
        let (width, height) = viewport(&window);

        let parts = Collaborators {
            display: DomDisplay::bind(&document)?,
            audio: WebAudio::bind(&document, config.volume),
            share: WebShare::new(window.clone()),
            snow_surface: CanvasSurface::bind(&document, SNOW_CANVAS, width, height)?,
            fireworks_surface: CanvasSurface::bind(&document, FIREWORKS_CANVAS, width, height)?,
        };

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        let mut magic = Self {
            controller: Controller::new(config, parts, seed),
            window,
        };
        let now = magic.now();
        magic.controller.start(now, &Local::now());
        Ok(magic)
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Call once per animation frame with the `requestAnimationFrame` timestamp.
    pub fn frame(&mut self, timestamp: f64) -> FrameStats {
        self.controller.frame(timestamp, &Local::now())
    }

    /// Call on viewport resize or orientation change.
    pub fn resize(&mut self) {
        let (width, height) = viewport(&self.window);
        self.controller.resize(width, height);
    }

    pub fn submit_name(&mut self) -> bool {
        let now = self.now();
        self.controller.submit_name(now)
    }

    pub fn next_message(&mut self) {
        let now = self.now();
        self.controller.next_message(now);
    }

    pub fn toggle_snow(&mut self) -> bool {
        self.controller.toggle_snow()
    }

    pub fn toggle_music(&mut self) -> bool {
        self.controller.toggle_music()
    }

    pub fn trigger_fireworks(&mut self) {
        let now = self.now();
        self.controller.trigger_fireworks(now);
    }

    /// Returns "native", "copied" or "unavailable".
    pub fn share(&mut self) -> String {
        let now = self.now();
        match self.controller.share(now) {
            ShareOutcome::Native => "native",
            ShareOutcome::Copied => "copied",
            ShareOutcome::Unavailable => "unavailable",
        }
        .into()
    }

    pub fn reset(&mut self) {
        let now = self.now();
        self.controller.reset(now);
    }

    #[cfg(feature = "configurable")]
    pub fn set_auto_advance_secs(&mut self, secs: u32) {
        let now = self.now();
        self.controller.set_auto_advance_secs(secs, now);
    }

    #[cfg(feature = "configurable")]
    pub fn set_snow_density(&mut self, max_flakes: u32, area_per_flake: f32) {
        self.controller.set_snow_density(max_flakes, area_per_flake);
    }

    #[cfg(feature = "configurable")]
    pub fn set_frame_rate(&mut self, rate: u32) {
        self.controller.set_frame_rate(rate);
    }

    pub fn get_current_index(&self) -> u32 {
        self.controller.carousel().index() as u32
    }
    pub fn get_user_name(&self) -> String {
        self.controller.state().user_name.clone()
    }
    pub fn is_greeting(&self) -> bool {
        self.controller.state().screen == Screen::Greeting
    }
    pub fn is_snow_enabled(&self) -> bool {
        self.controller.state().snow_enabled
    }
    pub fn is_music_enabled(&self) -> bool {
        self.controller.state().music_enabled
    }
    pub fn get_stats(&self) -> FrameStats {
        self.controller.stats()
    }
    pub fn get_config(&self) -> GreetingConfig {
        self.controller.config().clone()
    }
    pub fn is_configurable(&self) -> bool {
        RUNTIME_CONFIGURABLE
    }
}

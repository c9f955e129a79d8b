//! Greeting widget configuration

use crate::constants::*;
use crate::messages::DEFAULT_MESSAGES;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct GreetingConfig {
    pub auto_advance_secs: u32,
    pub max_snowflakes: u32,
    pub area_per_snowflake: f32,
    pub frame_rate: u32,
    pub burst_sparks: u32,
    pub bursts_per_show: u32,
    pub burst_stagger_ms: u32,
    pub spark_lifetime_ms: u32,
    pub spark_distance: f32,
    pub theme_cycle_secs: u32,
    pub type_interval_ms: u32,
    pub message_out_ms: u32,
    pub volume: f64,

    #[wasm_bindgen(skip)]
    pub messages: Vec<String>,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            auto_advance_secs: DEFAULT_AUTO_ADVANCE_SECS,
            max_snowflakes: DEFAULT_MAX_SNOWFLAKES,
            area_per_snowflake: DEFAULT_AREA_PER_SNOWFLAKE,
            frame_rate: DEFAULT_FRAME_RATE,
            burst_sparks: DEFAULT_BURST_SPARKS,
            bursts_per_show: DEFAULT_BURSTS_PER_SHOW,
            burst_stagger_ms: DEFAULT_BURST_STAGGER_MS,
            spark_lifetime_ms: DEFAULT_SPARK_LIFETIME_MS,
            spark_distance: DEFAULT_SPARK_DISTANCE,
            theme_cycle_secs: DEFAULT_THEME_CYCLE_SECS,
            type_interval_ms: DEFAULT_TYPE_INTERVAL_MS,
            message_out_ms: DEFAULT_MESSAGE_OUT_MS,
            volume: DEFAULT_VOLUME,
            messages: DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[wasm_bindgen]
impl GreetingConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GreetingConfig {
    /// Reads overrides from a JS object with camelCase keys. A bare number is
    /// taken as the auto-advance period in seconds.
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            if let Some(secs) = value.as_f64() {
                config.auto_advance_secs = secs as u32;
            }
            return config.sanitize();
        }

        macro_rules! extract {
            ($field:ident, $key:expr, $ty:ty) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num as $ty;
                    }
                }
            };
        }

        extract!(auto_advance_secs, "autoAdvanceSecs", u32);
        extract!(max_snowflakes, "maxSnowflakes", u32);
        extract!(area_per_snowflake, "areaPerSnowflake", f32);
        extract!(frame_rate, "frameRate", u32);
        extract!(burst_sparks, "burstSparks", u32);
        extract!(bursts_per_show, "burstsPerShow", u32);
        extract!(burst_stagger_ms, "burstStaggerMs", u32);
        extract!(spark_lifetime_ms, "sparkLifetimeMs", u32);
        extract!(spark_distance, "sparkDistance", f32);
        extract!(theme_cycle_secs, "themeCycleSecs", u32);
        extract!(type_interval_ms, "typeIntervalMs", u32);
        extract!(message_out_ms, "messageOutMs", u32);
        extract!(volume, "volume", f64);

        if let Ok(messages_val) = js_sys::Reflect::get(&value, &"messages".into()) {
            if js_sys::Array::is_array(&messages_val) {
                let arr: js_sys::Array = messages_val.into();
                let messages: Vec<String> = arr.iter().filter_map(|m| m.as_string()).collect();
                if !messages.is_empty() {
                    config.messages = messages;
                }
            }
        }

        config.sanitize()
    }

    /// Clamps every tunable into a range the timers and simulations accept.
    pub fn sanitize(mut self) -> Self {
        self.auto_advance_secs = self.auto_advance_secs.clamp(1, 3_600);
        self.frame_rate = self.frame_rate.clamp(1, 240);
        self.max_snowflakes = self.max_snowflakes.min(5_000);
        if !(self.area_per_snowflake.is_finite() && self.area_per_snowflake >= 1.0) {
            self.area_per_snowflake = DEFAULT_AREA_PER_SNOWFLAKE;
        }
        self.burst_sparks = self.burst_sparks.clamp(1, 500);
        self.bursts_per_show = self.bursts_per_show.clamp(1, 20);
        self.spark_lifetime_ms = self.spark_lifetime_ms.max(1);
        if !self.spark_distance.is_finite() || self.spark_distance < 0.0 {
            self.spark_distance = DEFAULT_SPARK_DISTANCE;
        }
        self.theme_cycle_secs = self.theme_cycle_secs.max(1);
        self.type_interval_ms = self.type_interval_ms.max(1);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        if self.messages.is_empty() {
            self.messages = Self::default().messages;
        }
        self
    }

    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate as f64
    }

    pub fn auto_advance_ms(&self) -> f64 {
        self.auto_advance_secs as f64 * 1000.0
    }
}

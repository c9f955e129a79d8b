//! Greeting widget constants
//!
//! With the `configurable` feature the exported struct can change some of
//! these at runtime. Otherwise they only seed `GreetingConfig::default()`.

// Carousel
pub const DEFAULT_AUTO_ADVANCE_SECS: u32 = 10;
pub const DEFAULT_MESSAGE_OUT_MS: u32 = 400;
pub const DEFAULT_TYPE_INTERVAL_MS: u32 = 40;
pub const TYPE_START_DELAY_MS: u32 = 200;

// Snow
pub const DEFAULT_MAX_SNOWFLAKES: u32 = 100;
pub const DEFAULT_AREA_PER_SNOWFLAKE: f32 = 10_000.0;
pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const SNOW_MARGIN: f32 = 10.0;

// Fireworks
pub const DEFAULT_BURST_SPARKS: u32 = 30;
pub const DEFAULT_BURSTS_PER_SHOW: u32 = 3;
pub const DEFAULT_BURST_STAGGER_MS: u32 = 400;
pub const DEFAULT_SPARK_LIFETIME_MS: u32 = 800;
pub const DEFAULT_SPARK_DISTANCE: f32 = 60.0;
pub const SPARK_MAX_LAUNCH_DELAY_MS: f64 = 200.0;

// Screens and flourishes
pub const SCREEN_FADE_MS: u32 = 500;
pub const SCREEN_REVEAL_MS: u32 = 10;
pub const SHAKE_MS: u32 = 500;
pub const FLIP_MS: u32 = 300;
pub const NAME_POP_MS: u32 = 300;
pub const NOTIFICATION_MS: u32 = 3_000;
pub const PROGRESS_RESTART_MS: u32 = 10;
pub const SUBTITLE_START_MS: u32 = 1_000;

// Ambient
pub const DEFAULT_THEME_CYCLE_SECS: u32 = 20;
pub const DEFAULT_VOLUME: f64 = 0.2;

// Countdown
pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_SECOND: i64 = 1_000;

// Feature flag
pub const RUNTIME_CONFIGURABLE: bool = cfg!(feature = "configurable");

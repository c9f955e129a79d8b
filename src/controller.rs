//! Greeting experience controller
//!
//! Owns every piece of mutable state and every timer line. The page calls
//! `frame` once per animation frame; user actions call the matching method.
//! Nothing here fails: absent collaborators turn operations into no-ops.

use chrono::{DateTime, TimeZone};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::*;

use crate::carousel::{Carousel, SubtitleLoop, Typewriter};
use crate::config::GreetingConfig;
use crate::constants::*;
use crate::countdown::{changed_fields, CountdownField, NewYearCountdown};
use crate::fireworks::Fireworks;
use crate::messages::{
    share_text, BACKGROUND_THEMES, COPIED_NOTICE, GREETING_TITLES, SHARE_TITLE,
    SHARE_UNAVAILABLE_NOTICE, SUBTITLE_PHRASES,
};
use crate::platform::{Audio, Cue, Display, Share, ShareOutcome, SharePayload, Surface, Target};
use crate::scheduler::{Scheduler, Scope, TimeoutId};
use crate::snow::{FrameGate, SnowField};

const FALLBACK_MESSAGE: &str = "Happy Holidays!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    AwaitingName,
    Greeting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceTrigger {
    Auto,
    Manual,
}

#[derive(Clone, Debug, PartialEq)]
enum Task {
    AutoAdvance,
    SlideCountdown,
    WallCountdown,
    ThemeCycle,
    HideEntry,
    RevealGreeting,
    NameSettle,
    ShowIncoming { slot: usize, token: u64 },
    TypeChar { token: u64 },
    FlipCommit { field: CountdownField, value: String },
    ShakeEnd,
    LaunchBurst,
    DismissNotification,
    SubtitleStep,
    ProgressRestart,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub user_name: String,
    pub snow_enabled: bool,
    pub music_enabled: bool,
    pub theme: usize,
    pub celebrations: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::AwaitingName,
            user_name: String::new(),
            snow_enabled: true,
            music_enabled: false,
            theme: 0,
            celebrations: 0,
        }
    }
}

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub fps: u32,
    pub snowflakes: u32,
    pub sparks: u32,
    pub bursts: u32,
}

/// Everything the controller talks to on the page.
pub struct Collaborators<D, A, S, C> {
    pub display: D,
    pub audio: A,
    pub share: S,
    pub snow_surface: Option<C>,
    pub fireworks_surface: Option<C>,
}

pub struct Controller<D, A, S, C, Tz: TimeZone> {
    config: GreetingConfig,
    state: AppState,
    carousel: Carousel,
    typing: Option<(usize, Typewriter)>,
    subtitle: SubtitleLoop,
    countdown: Option<NewYearCountdown<Tz>>,
    snow: SnowField,
    fireworks: Fireworks,
    gate: FrameGate,
    scheduler: Scheduler<Task>,
    notification: Option<TimeoutId>,
    rng: SmallRng,

    display: D,
    audio: A,
    share: S,
    snow_surface: Option<C>,
    fireworks_surface: Option<C>,

    frame_count: u32,
    fps_last_time: f64,
    current_fps: u32,
}

impl<D, A, S, C, Tz> Controller<D, A, S, C, Tz>
where
    D: Display,
    A: Audio,
    S: Share,
    C: Surface,
    Tz: TimeZone,
{
    pub fn new(config: GreetingConfig, parts: Collaborators<D, A, S, C>, seed: u64) -> Self {
        let config = config.sanitize();
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut snow = SnowField::new(config.max_snowflakes, config.area_per_snowflake);
        if let Some(surface) = &parts.snow_surface {
            let (w, h) = surface.size();
            snow.seed(w, h, &mut rng);
        }

        Self {
            carousel: Carousel::new(config.messages.clone(), config.auto_advance_secs),
            typing: None,
            subtitle: SubtitleLoop::new(&SUBTITLE_PHRASES),
            countdown: None,
            fireworks: Fireworks::new(
                config.burst_sparks,
                config.spark_lifetime_ms,
                config.spark_distance,
            ),
            gate: FrameGate::new(config.frame_rate),
            scheduler: Scheduler::new(),
            notification: None,
            state: AppState::default(),
            snow,
            rng,
            display: parts.display,
            audio: parts.audio,
            share: parts.share,
            snow_surface: parts.snow_surface,
            fireworks_surface: parts.fireworks_surface,
            frame_count: 0,
            fps_last_time: 0.0,
            current_fps: 0,
            config,
        }
    }

    /// Paints the initial labels and starts the ambient timer lines.
    pub fn start(&mut self, now: f64, wall: &DateTime<Tz>) {
        self.display
            .set_text(Target::MessageTotal, &self.carousel.len().to_string());
        self.display.set_text(Target::MessageIndex, "1");
        self.display.set_text(
            Target::SlideCountdown,
            &self.carousel.period_secs().to_string(),
        );
        self.paint_toggle_labels();

        self.update_countdown(now, wall);
        self.scheduler
            .set_interval(Task::WallCountdown, MS_PER_SECOND as f64, now);
        self.scheduler.set_interval(
            Task::ThemeCycle,
            self.config.theme_cycle_secs as f64 * 1000.0,
            now,
        );
        self.scheduler.set_timeout(
            Task::SubtitleStep,
            SUBTITLE_START_MS as f64,
            now,
            Scope::Global,
        );

        log::info!(
            "greeting ready: {} messages, {} snowflakes",
            self.carousel.len(),
            self.snow.len()
        );
    }

    /// Runs due timers, then draws if the frame gate admits this frame.
    pub fn frame(&mut self, now: f64, wall: &DateTime<Tz>) -> FrameStats {
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run(task, now, wall);
        }

        if self.gate.admit(now) {
            if self.state.snow_enabled {
                if let Some(surface) = self.snow_surface.as_mut() {
                    self.snow.step(now, surface, &mut self.rng);
                }
            }
            match self.fireworks_surface.as_mut() {
                Some(surface) => self.fireworks.step(now, surface),
                None => {
                    self.fireworks.prune(now);
                }
            }

            self.frame_count += 1;
            if now - self.fps_last_time >= 1000.0 {
                self.current_fps = self.frame_count;
                self.frame_count = 0;
                self.fps_last_time = now;
            }
        }

        self.stats()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            fps: self.current_fps,
            snowflakes: self.snow.len() as u32,
            sparks: self.fireworks.live_sparks() as u32,
            bursts: self.fireworks.bursts() as u32,
        }
    }

    /// Resizes both surfaces and reseeds the snow for the new area.
    pub fn resize(&mut self, width: f32, height: f32) {
        for surface in [&mut self.snow_surface, &mut self.fireworks_surface]
            .into_iter()
            .flatten()
        {
            surface.resize(width, height);
        }
        self.snow.seed(width, height, &mut self.rng);
    }

    /// Accepts the typed name and moves to the greeting screen. Returns
    /// whether the transition happened.
    pub fn submit_name(&mut self, now: f64) -> bool {
        if self.state.screen != Screen::AwaitingName {
            return false;
        }

        let name = self
            .display
            .input_value()
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            self.display
                .set_style(Target::NameInput, "animation", "shake 0.5s");
            self.scheduler
                .set_timeout(Task::ShakeEnd, SHAKE_MS as f64, now, Scope::Global);
            return false;
        }

        log::info!("greeting started for {name}");
        self.state.user_name = name;
        self.state.screen = Screen::Greeting;
        self.audio.play(Cue::Magic);

        self.display.set_style(Target::EntryScreen, "opacity", "0");
        self.scheduler
            .set_timeout(Task::HideEntry, SCREEN_FADE_MS as f64, now, Scope::Session);
        self.display
            .set_style(Target::GreetingScreen, "display", "block");
        self.scheduler.set_timeout(
            Task::RevealGreeting,
            SCREEN_REVEAL_MS as f64,
            now,
            Scope::Session,
        );

        self.show_greeting(now);
        self.start_auto_advance(now);
        self.trigger_fireworks(now);
        true
    }

    pub fn next_message(&mut self, now: f64) {
        self.advance(now, AdvanceTrigger::Manual);
    }

    /// Moves to the next message. Both triggers refresh the display the same
    /// way; a manual advance also restarts the auto-advance lines.
    pub fn advance(&mut self, now: f64, trigger: AdvanceTrigger) {
        self.carousel.advance();
        self.show_message(now);

        match trigger {
            AdvanceTrigger::Manual => {
                if self.state.screen == Screen::Greeting {
                    self.start_auto_advance(now);
                }
                self.audio.play(Cue::Click);
            }
            AdvanceTrigger::Auto => {
                self.carousel.reset_countdown();
                self.paint_slide_countdown();
                self.scheduler
                    .set_interval(Task::SlideCountdown, MS_PER_SECOND as f64, now);
                self.restart_progress(now);
            }
        }
    }

    /// (Re)starts both auto-advance lines from `now`.
    pub fn start_auto_advance(&mut self, now: f64) {
        self.scheduler
            .set_interval(Task::AutoAdvance, self.config.auto_advance_ms(), now);
        self.scheduler
            .set_interval(Task::SlideCountdown, MS_PER_SECOND as f64, now);
        self.carousel.reset_countdown();
        self.paint_slide_countdown();
        self.restart_progress(now);
    }

    fn stop_auto_advance(&mut self) {
        self.scheduler.clear_interval(&Task::AutoAdvance);
        self.scheduler.clear_interval(&Task::SlideCountdown);
    }

    pub fn toggle_snow(&mut self) -> bool {
        self.state.snow_enabled = !self.state.snow_enabled;
        if !self.state.snow_enabled {
            if let Some(surface) = self.snow_surface.as_mut() {
                surface.clear();
            }
        }
        self.sync_loops();
        self.paint_toggle_labels();
        self.state.snow_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.state.music_enabled = !self.state.music_enabled;
        self.sync_loops();
        self.paint_toggle_labels();
        self.state.music_enabled
    }

    /// Full celebration: several bursts at random spots, staggered. Bursts
    /// still pending at `reset` are dropped.
    pub fn trigger_fireworks(&mut self, now: f64) {
        self.state.celebrations += 1;
        self.audio.play(Cue::Magic);
        for i in 0..self.config.bursts_per_show {
            self.scheduler.set_timeout(
                Task::LaunchBurst,
                (i * self.config.burst_stagger_ms) as f64,
                now,
                Scope::Session,
            );
        }
    }

    pub fn share(&mut self, now: f64) -> ShareOutcome {
        let message = self
            .carousel
            .current_message(&self.state.user_name)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: share_text(&self.state.user_name, &message),
        };

        let outcome = self.share.share(&payload);
        match outcome {
            ShareOutcome::Native => log::debug!("greeting handed to native share"),
            ShareOutcome::Copied => {
                self.audio.play(Cue::Notification);
                self.notify(COPIED_NOTICE, now);
            }
            ShareOutcome::Unavailable => self.notify(SHARE_UNAVAILABLE_NOTICE, now),
        }
        outcome
    }

    /// Back to the name entry screen. Pending continuations of the old
    /// session are dropped.
    pub fn reset(&mut self, now: f64) {
        self.scheduler.invalidate_session();
        self.stop_auto_advance();
        self.typing = None;
        if let Some(slot) = self.carousel.active() {
            self.display
                .set_class(Target::Message(slot), "active", false);
        }
        self.carousel.reset();

        self.state.user_name.clear();
        self.state.screen = Screen::AwaitingName;

        self.display.set_input_value("");
        self.display.set_style(Target::EntryScreen, "display", "block");
        self.display.set_style(Target::EntryScreen, "opacity", "1");
        self.display
            .set_style(Target::GreetingScreen, "display", "none");
        self.display.set_style(Target::GreetingScreen, "opacity", "0");
        self.display.focus(Target::NameInput);

        self.display.set_text(Target::MessageIndex, "1");
        self.paint_slide_countdown();
        self.restart_progress(now);
        self.audio.play(Cue::Click);
    }

    #[cfg(feature = "configurable")]
    pub fn set_auto_advance_secs(&mut self, secs: u32, now: f64) {
        self.config.auto_advance_secs = secs.max(1);
        self.carousel.set_period(self.config.auto_advance_secs);
        if self.state.screen == Screen::Greeting {
            self.start_auto_advance(now);
        } else {
            self.paint_slide_countdown();
        }
    }

    #[cfg(feature = "configurable")]
    pub fn set_snow_density(&mut self, max_flakes: u32, area_per_flake: f32) {
        self.config.max_snowflakes = max_flakes;
        self.config.area_per_snowflake = area_per_flake;
        self.snow
            .set_density(max_flakes, area_per_flake, &mut self.rng);
    }

    #[cfg(feature = "configurable")]
    pub fn set_frame_rate(&mut self, rate: u32) {
        self.config.frame_rate = rate.clamp(1, 240);
        self.gate = FrameGate::new(self.config.frame_rate);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn snow(&self) -> &SnowField {
        &self.snow
    }

    pub fn fireworks(&self) -> &Fireworks {
        &self.fireworks
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn share_target(&self) -> &S {
        &self.share
    }

    fn run(&mut self, task: Task, now: f64, wall: &DateTime<Tz>) {
        match task {
            Task::AutoAdvance => self.advance(now, AdvanceTrigger::Auto),
            Task::SlideCountdown => {
                let shown = self.carousel.tick_countdown();
                self.display
                    .set_text(Target::SlideCountdown, &shown.to_string());
            }
            Task::WallCountdown => self.update_countdown(now, wall),
            Task::ThemeCycle => {
                self.state.theme = (self.state.theme + 1) % BACKGROUND_THEMES.len();
                self.display.set_style(
                    Target::Body,
                    "background",
                    BACKGROUND_THEMES[self.state.theme],
                );
            }
            Task::HideEntry => self.display.set_style(Target::EntryScreen, "display", "none"),
            Task::RevealGreeting => self.display.set_style(Target::GreetingScreen, "opacity", "1"),
            Task::NameSettle => {
                self.display
                    .set_text(Target::NameText, &self.state.user_name);
                self.display.set_style(Target::NameText, "transform", "scale(1)");
                self.display.set_style(Target::NameText, "opacity", "1");
            }
            Task::ShowIncoming { slot, token } => self.show_incoming(slot, token, now),
            Task::TypeChar { token } => self.type_char(token, now),
            Task::FlipCommit { field, value } => {
                self.display.set_text(field.target(), &value);
                self.display.set_class(field.target(), "flip", false);
            }
            Task::ShakeEnd => self.display.set_style(Target::NameInput, "animation", ""),
            Task::LaunchBurst => self.launch_burst(now),
            Task::DismissNotification => {
                self.notification = None;
                self.display.set_class(Target::Notification, "visible", false);
                self.display.set_text(Target::Notification, "");
            }
            Task::SubtitleStep => {
                if let Some((text, delay)) = self.subtitle.step() {
                    self.display.set_text(Target::Subtitle, &text);
                    self.scheduler
                        .set_timeout(Task::SubtitleStep, delay as f64, now, Scope::Global);
                }
            }
            Task::ProgressRestart => {
                let animation = format!(
                    "progressShrink {}s linear infinite",
                    self.carousel.period_secs()
                );
                self.display
                    .set_style(Target::ProgressBar, "animation", &animation);
            }
        }
    }

    fn show_greeting(&mut self, now: f64) {
        self.display.set_style(Target::NameText, "transform", "scale(1.2)");
        self.display.set_style(Target::NameText, "opacity", "0.5");
        self.scheduler
            .set_timeout(Task::NameSettle, NAME_POP_MS as f64, now, Scope::Session);

        let title = GREETING_TITLES[self.rng.gen_range(0..GREETING_TITLES.len())];
        self.display.set_text(Target::GreetingTitle, title);

        self.show_message(now);
    }

    /// First phase of the message transition: the outgoing message slides
    /// out and the incoming one is scheduled.
    fn show_message(&mut self, now: f64) {
        let token = self.carousel.invalidate_reveal();
        self.typing = None;

        if let Some(previous) = self.carousel.set_active(None) {
            let target = Target::Message(previous);
            self.display.set_class(target, "active", false);
            self.display
                .set_style(target, "animation", "messageSlideOut 0.8s ease-out forwards");
        }

        let slot = self.carousel.index();
        self.display
            .set_text(Target::MessageIndex, &(slot + 1).to_string());
        self.scheduler.set_timeout(
            Task::ShowIncoming { slot, token },
            self.config.message_out_ms as f64,
            now,
            Scope::Session,
        );
    }

    fn show_incoming(&mut self, slot: usize, token: u64, now: f64) {
        if !self.carousel.is_current(token) {
            log::debug!("skipping stale reveal of message {slot}");
            return;
        }
        let target = Target::Message(slot);
        if !self.display.exists(target) {
            return;
        }
        let Some(text) = self.carousel.message(slot, &self.state.user_name) else {
            return;
        };

        self.carousel.set_active(Some(slot));
        self.display.set_class(target, "active", true);
        self.display
            .set_style(target, "animation", "messageSlideIn 0.8s ease-out forwards");
        self.display.set_text(target, "");
        self.typing = Some((slot, Typewriter::new(&text)));
        self.scheduler.set_timeout(
            Task::TypeChar { token },
            TYPE_START_DELAY_MS as f64,
            now,
            Scope::Session,
        );
    }

    fn type_char(&mut self, token: u64, now: f64) {
        if !self.carousel.is_current(token) {
            return;
        }
        let step = self
            .typing
            .as_mut()
            .map(|(slot, writer)| (*slot, writer.type_next()));

        match step {
            Some((slot, Some(visible))) => {
                self.display.set_text(Target::Message(slot), &visible);
                self.scheduler.set_timeout(
                    Task::TypeChar { token },
                    self.config.type_interval_ms as f64,
                    now,
                    Scope::Session,
                );
            }
            Some((_, None)) => self.typing = None,
            None => {}
        }
    }

    fn update_countdown(&mut self, now: f64, wall: &DateTime<Tz>) {
        if self.countdown.is_none() {
            self.countdown = NewYearCountdown::starting_at(wall);
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        let left = countdown.tick(wall);

        let display = &self.display;
        let changes = changed_fields(&left, |field| display.text(field.target()));
        for (field, value) in changes {
            let target = field.target();
            if !self.display.exists(target) {
                continue;
            }
            self.display.set_class(target, "flip", true);
            self.scheduler.set_timeout(
                Task::FlipCommit { field, value },
                FLIP_MS as f64,
                now,
                Scope::Global,
            );
        }
    }

    fn launch_burst(&mut self, now: f64) {
        let (width, height) = self
            .fireworks_surface
            .as_ref()
            .map(|s| s.size())
            .unwrap_or_else(|| self.snow.size());
        let (x, y) = Fireworks::random_origin(width, height, &mut self.rng);
        let sparks = self.fireworks.trigger(x, y, now, &mut self.rng);
        self.audio.play(Cue::Firework);
        log::debug!("burst of {sparks} sparks at ({x:.0}, {y:.0})");
    }

    fn notify(&mut self, message: &str, now: f64) {
        if let Some(previous) = self.notification.take() {
            self.scheduler.cancel(previous);
        }
        self.display.set_text(Target::Notification, message);
        self.display.set_class(Target::Notification, "visible", true);
        self.notification = Some(self.scheduler.set_timeout(
            Task::DismissNotification,
            NOTIFICATION_MS as f64,
            now,
            Scope::Global,
        ));
    }

    fn restart_progress(&mut self, now: f64) {
        self.display.set_style(Target::ProgressBar, "animation", "none");
        self.scheduler.set_timeout(
            Task::ProgressRestart,
            PROGRESS_RESTART_MS as f64,
            now,
            Scope::Global,
        );
    }

    fn paint_slide_countdown(&mut self) {
        self.display.set_text(
            Target::SlideCountdown,
            &self.carousel.remaining_secs().to_string(),
        );
    }

    fn paint_toggle_labels(&mut self) {
        let snow = if self.state.snow_enabled { "Snow Off" } else { "Snow On" };
        let music = if self.state.music_enabled { "Music Off" } else { "Music On" };
        self.display.set_text(Target::SnowLabel, snow);
        self.display.set_text(Target::MusicLabel, music);
    }

    fn sync_loops(&mut self) {
        self.audio
            .set_looping(Cue::Background, self.state.music_enabled);
        self.audio.set_looping(
            Cue::SnowAmbient,
            self.state.music_enabled && self.state.snow_enabled,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryDisplay, RecordingAudio, RecordingSurface, StubShare};
    use chrono::Utc;

    type TestController =
        Controller<MemoryDisplay, RecordingAudio, StubShare, RecordingSurface, Utc>;

    fn wall() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 30).unwrap()
    }

    fn controller_with(display: MemoryDisplay, outcome: ShareOutcome) -> TestController {
        let parts = Collaborators {
            display,
            audio: RecordingAudio::default(),
            share: StubShare::new(outcome),
            snow_surface: Some(RecordingSurface::new(800.0, 600.0)),
            fireworks_surface: Some(RecordingSurface::new(800.0, 600.0)),
        };
        let mut c = Controller::new(GreetingConfig::default(), parts, 42);
        c.start(0.0, &wall());
        c
    }

    fn controller() -> TestController {
        controller_with(MemoryDisplay::full(10), ShareOutcome::Copied)
    }

    /// Steps frames at 60 Hz from `from` up to and including `to`.
    fn run_frames(c: &mut TestController, from: f64, to: f64) {
        let mut t = from;
        while t <= to {
            c.frame(t, &wall());
            t += 16.0;
        }
        c.frame(to, &wall());
    }

    fn type_name(c: &mut TestController, name: &str) {
        c.display.set_input_value(name);
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let mut c = controller();
        type_name(&mut c, "   ");
        assert!(!c.submit_name(100.0));

        assert_eq!(c.state().screen, Screen::AwaitingName);
        assert_eq!(c.state().user_name, "");
        assert_eq!(c.carousel().index(), 0);
        assert_eq!(c.state().celebrations, 0);
        assert_eq!(
            c.display().style(Target::NameInput, "animation"),
            Some("shake 0.5s")
        );

        run_frames(&mut c, 100.0, 700.0);
        assert_eq!(c.display().style(Target::NameInput, "animation"), Some(""));

        type_name(&mut c, " Alex ");
        assert!(c.submit_name(800.0));
    }

    #[test]
    fn valid_name_opens_greeting_and_celebrates_once() {
        let mut c = controller();
        c.next_message(50.0);
        c.next_message(60.0);
        type_name(&mut c, "  Alex ");
        assert!(c.submit_name(100.0));

        assert_eq!(c.state().screen, Screen::Greeting);
        assert_eq!(c.state().user_name, "Alex");
        assert_eq!(c.carousel().index(), 2);
        assert_eq!(c.state().celebrations, 1);
        assert_eq!(c.audio().count(Cue::Magic), 2);

        run_frames(&mut c, 100.0, 1_000.0);
        assert_eq!(c.display().style(Target::EntryScreen, "display"), Some("none"));
        assert_eq!(c.display().style(Target::GreetingScreen, "opacity"), Some("1"));
        assert_eq!(c.display().text_of(Target::NameText), "Alex");
        assert_eq!(c.fireworks().bursts(), 3);
        assert_eq!(c.audio().count(Cue::Firework), 3);

        run_frames(&mut c, 1_000.0, 3_000.0);
        assert_eq!(c.fireworks().bursts(), 0);
    }

    #[test]
    fn second_submit_is_ignored() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        assert!(c.submit_name(0.0));
        type_name(&mut c, "Sam");
        assert!(!c.submit_name(10.0));
        assert_eq!(c.state().user_name, "Alex");
    }

    #[test]
    fn message_is_typed_out_after_slide_out() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);

        run_frames(&mut c, 0.0, 450.0);
        assert!(c.display().has_class(Target::Message(0), "active"));
        assert_eq!(c.display().text_of(Target::Message(0)), "");

        run_frames(&mut c, 450.0, 700.0);
        let partial = c.display().text_of(Target::Message(0)).to_string();
        assert!(!partial.is_empty());

        run_frames(&mut c, 700.0, 6_000.0);
        let expected = c.carousel().message(0, "Alex").unwrap();
        assert!(expected.contains("Alex"));
        assert_eq!(c.display().text_of(Target::Message(0)), expected);
    }

    #[test]
    fn rapid_advances_do_not_interleave_typing() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);
        run_frames(&mut c, 0.0, 700.0);
        c.next_message(700.0);
        run_frames(&mut c, 700.0, 6_000.0);

        assert!(!c.display().has_class(Target::Message(0), "active"));
        assert!(c.display().has_class(Target::Message(1), "active"));
        let expected = c.carousel().message(1, "Alex").unwrap();
        assert_eq!(c.display().text_of(Target::Message(1)), expected);
    }

    #[test]
    fn missing_message_slot_is_a_no_op() {
        let display = MemoryDisplay::with([Target::NameInput, Target::EntryScreen]);
        let mut c = controller_with(display, ShareOutcome::Copied);
        type_name(&mut c, "Alex");
        assert!(c.submit_name(0.0));
        run_frames(&mut c, 0.0, 2_000.0);
        assert_eq!(c.carousel().active(), None);
        assert_eq!(c.state().screen, Screen::Greeting);
    }

    #[test]
    fn reset_returns_to_entry_and_drops_stale_steps() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);
        c.next_message(50.0);
        c.reset(100.0);

        assert_eq!(c.state().user_name, "");
        assert_eq!(c.state().screen, Screen::AwaitingName);
        assert_eq!(c.carousel().index(), 0);
        assert_eq!(c.display().input, "");
        assert_eq!(c.display().focused, Some(Target::NameInput));

        run_frames(&mut c, 100.0, 12_000.0);
        assert_eq!(c.display().style(Target::EntryScreen, "display"), Some("block"));
        assert_eq!(c.display().style(Target::GreetingScreen, "display"), Some("none"));
        assert_eq!(c.carousel().active(), None);
        assert_eq!(c.carousel().index(), 0);
        assert_eq!(c.display().text_of(Target::Message(1)), "");
    }

    #[test]
    fn next_on_entry_screen_does_not_resume_auto_advance() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);
        c.reset(100.0);
        c.next_message(200.0);
        assert_eq!(c.carousel().index(), 1);
        assert!(!c.scheduler.has_interval(&Task::AutoAdvance));
        assert!(!c.scheduler.has_interval(&Task::SlideCountdown));

        run_frames(&mut c, 200.0, 30_500.0);
        assert_eq!(c.state().screen, Screen::AwaitingName);
        assert_eq!(c.carousel().index(), 1);
    }

    #[test]
    fn reset_drops_pending_bursts() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);
        run_frames(&mut c, 0.0, 100.0);
        let launched = c.audio().count(Cue::Firework);
        assert_eq!(launched, 1);

        c.reset(200.0);
        run_frames(&mut c, 200.0, 2_000.0);
        assert_eq!(c.audio().count(Cue::Firework), launched);
    }

    #[test]
    fn auto_advance_runs_on_period() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);

        run_frames(&mut c, 0.0, 1_000.0);
        assert_eq!(c.display().text_of(Target::SlideCountdown), "9");

        run_frames(&mut c, 1_000.0, 10_000.0);
        assert_eq!(c.carousel().index(), 1);
        assert_eq!(c.display().text_of(Target::SlideCountdown), "10");
        assert_eq!(c.display().text_of(Target::MessageIndex), "2");

        run_frames(&mut c, 10_000.0, 11_000.0);
        assert_eq!(c.display().text_of(Target::SlideCountdown), "9");
    }

    #[test]
    fn manual_advance_pushes_back_auto_advance() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);
        run_frames(&mut c, 0.0, 9_000.0);
        c.next_message(9_000.0);
        assert_eq!(c.carousel().index(), 1);
        assert_eq!(c.display().text_of(Target::SlideCountdown), "10");

        run_frames(&mut c, 9_000.0, 18_900.0);
        assert_eq!(c.carousel().index(), 1);
        run_frames(&mut c, 18_900.0, 19_050.0);
        assert_eq!(c.carousel().index(), 2);
    }

    #[test]
    fn countdown_flips_only_changed_fields() {
        let mut c = controller();
        assert!(c.display().has_class(Target::Days, "flip"));
        c.frame(300.0, &wall());
        assert_eq!(c.display().text_of(Target::Days), "73");
        assert_eq!(c.display().text_of(Target::Hours), "11");
        assert_eq!(c.display().text_of(Target::Minutes), "59");
        assert_eq!(c.display().text_of(Target::Seconds), "30");
        assert!(!c.display().has_class(Target::Days, "flip"));

        let later = wall() + chrono::TimeDelta::seconds(1);
        c.frame(1_000.0, &later);
        assert!(c.display().has_class(Target::Seconds, "flip"));
        assert!(!c.display().has_class(Target::Minutes, "flip"));
        assert!(!c.display().has_class(Target::Days, "flip"));
        c.frame(1_300.0, &later);
        assert_eq!(c.display().text_of(Target::Seconds), "29");
    }

    #[test]
    fn snow_freezes_while_disabled() {
        let mut c = controller();
        run_frames(&mut c, 0.0, 200.0);
        assert!(!c.toggle_snow());
        assert_eq!(c.display().text_of(Target::SnowLabel), "Snow On");

        let frozen = c.snow().flakes().to_vec();
        run_frames(&mut c, 200.0, 1_000.0);
        assert_eq!(c.snow().flakes(), frozen.as_slice());

        assert!(c.toggle_snow());
        run_frames(&mut c, 1_000.0, 1_100.0);
        assert_ne!(c.snow().flakes(), frozen.as_slice());
    }

    #[test]
    fn music_toggle_drives_loops() {
        let mut c = controller();
        assert!(c.toggle_music());
        assert!(c.audio().looping.contains(&Cue::Background));
        assert!(c.audio().looping.contains(&Cue::SnowAmbient));
        assert_eq!(c.display().text_of(Target::MusicLabel), "Music Off");
        c.toggle_snow();
        assert!(!c.audio().looping.contains(&Cue::SnowAmbient));
        assert!(!c.toggle_music());
        assert!(c.audio().looping.is_empty());
    }

    #[test]
    fn copied_share_shows_notification_briefly() {
        let mut c = controller();
        type_name(&mut c, "Alex");
        c.submit_name(0.0);
        assert_eq!(c.share(100.0), ShareOutcome::Copied);

        let payload = &c.share_target().payloads[0];
        assert!(payload.text.contains("Alex sent you"));
        assert!(c.display().has_class(Target::Notification, "visible"));
        assert_eq!(c.audio().count(Cue::Notification), 1);

        run_frames(&mut c, 100.0, 3_200.0);
        assert!(!c.display().has_class(Target::Notification, "visible"));
    }

    #[test]
    fn native_share_shows_no_notification() {
        let mut c = controller_with(MemoryDisplay::full(10), ShareOutcome::Native);
        c.share(0.0);
        assert!(!c.display().has_class(Target::Notification, "visible"));
        assert!(c.share_target().payloads[0].text.contains("Someone sent you"));
    }

    #[test]
    fn theme_cycles_on_its_own_line() {
        let mut c = controller();
        run_frames(&mut c, 0.0, 20_010.0);
        assert_eq!(c.state().theme, 1);
        assert_eq!(
            c.display().style(Target::Body, "background"),
            Some(BACKGROUND_THEMES[1])
        );
    }

    #[test]
    fn subtitle_starts_typing_after_delay() {
        let mut c = controller();
        run_frames(&mut c, 0.0, 990.0);
        assert_eq!(c.display().text_of(Target::Subtitle), "");
        run_frames(&mut c, 990.0, 1_200.0);
        assert!(SUBTITLE_PHRASES[0].starts_with(c.display().text_of(Target::Subtitle)));
        assert!(!c.display().text_of(Target::Subtitle).is_empty());
    }

    #[test]
    fn resize_reseeds_snow() {
        let mut c = controller();
        assert_eq!(c.snow().len(), 48);
        c.resize(200.0, 200.0);
        assert_eq!(c.snow().len(), 4);
        assert_eq!(c.snow().size(), (200.0, 200.0));
        assert_eq!(c.stats().snowflakes, 4);
    }
}

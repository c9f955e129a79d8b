//! Collaborator seams between the greeting core and the page
//!
//! Every operation on an absent collaborator is a no-op. Implementations
//! must never panic or surface an error from these calls.

/// Named display regions resolved once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Body,
    EntryScreen,
    GreetingScreen,
    NameInput,
    NameText,
    GreetingTitle,
    Subtitle,
    /// One slot per carousel message, in document order.
    Message(usize),
    MessageIndex,
    MessageTotal,
    SlideCountdown,
    ProgressBar,
    Days,
    Hours,
    Minutes,
    Seconds,
    SnowLabel,
    MusicLabel,
    Notification,
}

/// Text, class and style sinks. The core reads back only text (for
/// flip avoidance) and the name input value.
pub trait Display {
    fn exists(&self, target: Target) -> bool;
    fn set_text(&mut self, target: Target, text: &str);
    fn text(&self, target: Target) -> Option<String>;
    fn set_class(&mut self, target: Target, class: &str, enabled: bool);
    fn set_style(&mut self, target: Target, property: &str, value: &str);
    fn input_value(&self) -> Option<String>;
    fn set_input_value(&mut self, value: &str);
    fn focus(&mut self, target: Target);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// A 2D raster drawing surface in surface-space pixels.
pub trait Surface {
    fn size(&self) -> (f32, f32);
    fn resize(&mut self, width: f32, height: f32);
    fn clear(&mut self);
    /// Paints a translucent rectangle over the whole surface.
    fn fade(&mut self, color: Rgba);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Click,
    Magic,
    Firework,
    Notification,
    Background,
    SnowAmbient,
}

impl Cue {
    /// Element id of the audio source for this cue.
    pub fn element_id(self) -> &'static str {
        match self {
            Cue::Click => "clickSound",
            Cue::Magic => "magicSound",
            Cue::Firework => "fireworkSound",
            Cue::Notification => "notificationSound",
            Cue::Background => "bgMusic",
            Cue::SnowAmbient => "snowSound",
        }
    }
}

/// Fire-and-forget audio. Playback refusals are swallowed by implementations.
pub trait Audio {
    fn play(&mut self, cue: Cue);
    fn set_looping(&mut self, cue: Cue, playing: bool);
}

#[derive(Clone, Debug, PartialEq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the platform share sheet.
    Native,
    /// Written to the clipboard.
    Copied,
    Unavailable,
}

pub trait Share {
    fn share(&mut self, payload: &SharePayload) -> ShareOutcome;
}

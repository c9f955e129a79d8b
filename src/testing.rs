//! In-memory collaborators for tests

use std::collections::{HashMap, HashSet};

use crate::platform::{
    Audio, Cue, Display, Rgba, Share, ShareOutcome, SharePayload, Surface, Target,
};

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub clears: usize,
    pub fades: usize,
    pub circles: usize,
    pub last_circle: Option<(f32, f32, f32, Rgba)>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fade(&mut self, _color: Rgba) {
        self.fades += 1;
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.circles += 1;
        self.last_circle = Some((x, y, radius, color));
    }
}

#[derive(Debug, Default, Clone)]
pub struct Node {
    pub text: String,
    pub classes: HashSet<String>,
    pub styles: HashMap<String, String>,
}

/// Page stand-in. Only targets passed to `with` exist.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    pub nodes: HashMap<Target, Node>,
    pub input: String,
    pub focused: Option<Target>,
}

impl MemoryDisplay {
    pub fn with(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            nodes: targets.into_iter().map(|t| (t, Node::default())).collect(),
            ..Self::default()
        }
    }

    /// Every target the page normally has, with `messages` message slots.
    pub fn full(messages: usize) -> Self {
        let mut targets = vec![
            Target::Body,
            Target::EntryScreen,
            Target::GreetingScreen,
            Target::NameInput,
            Target::NameText,
            Target::GreetingTitle,
            Target::Subtitle,
            Target::MessageIndex,
            Target::MessageTotal,
            Target::SlideCountdown,
            Target::ProgressBar,
            Target::Days,
            Target::Hours,
            Target::Minutes,
            Target::Seconds,
            Target::SnowLabel,
            Target::MusicLabel,
            Target::Notification,
        ];
        targets.extend((0..messages).map(Target::Message));
        Self::with(targets)
    }

    pub fn style(&self, target: Target, property: &str) -> Option<&str> {
        self.nodes
            .get(&target)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.nodes
            .get(&target)
            .is_some_and(|n| n.classes.contains(class))
    }

    pub fn text_of(&self, target: Target) -> &str {
        self.nodes.get(&target).map_or("", |n| n.text.as_str())
    }
}

impl Display for MemoryDisplay {
    fn exists(&self, target: Target) -> bool {
        self.nodes.contains_key(&target)
    }

    fn set_text(&mut self, target: Target, text: &str) {
        if let Some(node) = self.nodes.get_mut(&target) {
            node.text = text.to_string();
        }
    }

    fn text(&self, target: Target) -> Option<String> {
        self.nodes.get(&target).map(|n| n.text.clone())
    }

    fn set_class(&mut self, target: Target, class: &str, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(&target) {
            if enabled {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn set_style(&mut self, target: Target, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&target) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn input_value(&self) -> Option<String> {
        self.exists(Target::NameInput).then(|| self.input.clone())
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn focus(&mut self, target: Target) {
        if self.exists(target) {
            self.focused = Some(target);
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Cue>,
    pub looping: HashSet<Cue>,
}

impl RecordingAudio {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl Audio for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }

    fn set_looping(&mut self, cue: Cue, playing: bool) {
        if playing {
            self.looping.insert(cue);
        } else {
            self.looping.remove(&cue);
        }
    }
}

#[derive(Debug)]
pub struct StubShare {
    pub outcome: ShareOutcome,
    pub payloads: Vec<SharePayload>,
}

impl StubShare {
    pub fn new(outcome: ShareOutcome) -> Self {
        Self {
            outcome,
            payloads: Vec::new(),
        }
    }
}

impl Share for StubShare {
    fn share(&mut self, payload: &SharePayload) -> ShareOutcome {
        self.payloads.push(payload.clone());
        self.outcome
    }
}

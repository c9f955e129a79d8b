//! Message carousel state and text reveal effects

use crate::messages::personalize;

/// Cyclic message list with an auto-advance countdown.
#[derive(Clone, Debug)]
pub struct Carousel {
    messages: Vec<String>,
    index: usize,
    period_secs: u32,
    remaining_secs: u32,
    reveal_token: u64,
    active: Option<usize>,
}

impl Carousel {
    pub fn new(messages: Vec<String>, period_secs: u32) -> Self {
        let period_secs = period_secs.max(1);
        Self {
            messages,
            index: 0,
            period_secs,
            remaining_secs: period_secs,
            reveal_token: 0,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the next message, wrapping after the last.
    pub fn advance(&mut self) -> usize {
        if !self.messages.is_empty() {
            self.index = (self.index + 1) % self.messages.len();
        }
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.active = None;
        self.reset_countdown();
        self.invalidate_reveal();
    }

    pub fn message(&self, index: usize, name: &str) -> Option<String> {
        self.messages.get(index).map(|m| personalize(m, name))
    }

    pub fn current_message(&self, name: &str) -> Option<String> {
        self.message(self.index, name)
    }

    pub fn period_secs(&self) -> u32 {
        self.period_secs
    }

    pub fn set_period(&mut self, secs: u32) {
        self.period_secs = secs.max(1);
        self.reset_countdown();
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn reset_countdown(&mut self) {
        self.remaining_secs = self.period_secs;
    }

    /// One-second step of the visible countdown. Returns the value to show;
    /// reaching zero shows zero and rearms to the full period.
    pub fn tick_countdown(&mut self) -> u32 {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let shown = self.remaining_secs;
        if self.remaining_secs == 0 {
            self.remaining_secs = self.period_secs;
        }
        shown
    }

    /// Starts a new reveal; continuations holding an older token are stale.
    pub fn invalidate_reveal(&mut self) -> u64 {
        self.reveal_token += 1;
        self.reveal_token
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.reveal_token == token
    }

    /// Slot currently marked active on the page.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn set_active(&mut self, slot: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.active, slot)
    }
}

/// Appends one character at a time.
#[derive(Clone, Debug, Default)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveals the next character and returns the visible prefix, or `None`
    /// once the whole text is shown.
    pub fn type_next(&mut self) -> Option<String> {
        if self.shown >= self.chars.len() {
            return None;
        }
        self.shown += 1;
        Some(self.visible())
    }

    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }
}

const SUBTITLE_TYPE_MS: u32 = 70;
const SUBTITLE_DELETE_MS: u32 = 30;
const SUBTITLE_HOLD_MS: u32 = 2_000;
const SUBTITLE_GAP_MS: u32 = 500;

/// Endless type-then-delete loop over a list of phrases.
#[derive(Clone, Debug)]
pub struct SubtitleLoop {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl SubtitleLoop {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|p| p.as_ref().chars().collect())
                .filter(|p: &Vec<char>| !p.is_empty())
                .collect(),
            phrase: 0,
            chars: 0,
            deleting: false,
        }
    }

    /// Advances one keystroke. Returns the text to show and the delay before
    /// the next step.
    pub fn step(&mut self) -> Option<(String, u32)> {
        let current = self.phrases.get(self.phrase)?;
        let len = current.len();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(len);
        }
        let text: String = current[..self.chars].iter().collect();

        let delay = if !self.deleting && self.chars == len {
            self.deleting = true;
            SUBTITLE_HOLD_MS
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            SUBTITLE_GAP_MS
        } else if self.deleting {
            SUBTITLE_DELETE_MS
        } else {
            SUBTITLE_TYPE_MS
        };

        Some((text, delay))
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }
}

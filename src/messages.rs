//! Greeting texts, titles, themes and share text

/// Placeholder replaced with the visitor's name when a message is shown.
pub const NAME_PLACEHOLDER: &str = "{name}";

pub const DEFAULT_MESSAGES: [&str; 10] = [
    "May your holidays sparkle with joy and laughter, {name}!",
    "Wishing you a season full of light, warmth and wonder.",
    "May the magic of the season fill your heart with peace.",
    "Here's to a New Year of fresh starts and big dreams, {name}.",
    "May every snowflake bring you a little extra happiness.",
    "Warm cocoa, good friends and cozy nights to you!",
    "May your days be merry and your nights be bright.",
    "Sending you hugs, cheer and a sleigh full of smiles, {name}.",
    "May the coming year be your most magical one yet.",
    "Happy Holidays and a wonderful New Year!",
];

pub const GREETING_TITLES: [&str; 4] = [
    "Special Greetings",
    "Holiday Wishes",
    "Season's Greetings",
    "Warmest Wishes",
];

pub const SUBTITLE_PHRASES: [&str; 5] = [
    "Your magical holiday experience awaits...",
    "Spread joy and happiness...",
    "Season's greetings!",
    "Make wonderful memories...",
    "Share the holiday spirit!",
];

pub const BACKGROUND_THEMES: [&str; 4] = [
    "linear-gradient(135deg, #0a0a2a, #1a1a4a, #2d0a3d, #0a2a2a, #2a0a2a)",
    "linear-gradient(135deg, #1a0a2a, #4a1a4a, #3d0a2d, #2a0a1a, #2a2a0a)",
    "linear-gradient(135deg, #0a2a2a, #1a4a4a, #0a3d2d, #2a2a0a, #2a0a0a)",
    "linear-gradient(135deg, #2a0a0a, #4a1a1a, #3d0a0a, #2a2a1a, #0a2a2a)",
];

pub const SHARE_TITLE: &str = "Magical Holiday Greetings";
pub const COPIED_NOTICE: &str = "✨ Magical greeting copied! Share the joy! ✨";
pub const SHARE_UNAVAILABLE_NOTICE: &str = "Sharing isn't available here, but the joy still is! ✨";
pub const FALLBACK_SENDER: &str = "Someone";

/// Substitutes the visitor's name into a message template.
pub fn personalize(template: &str, name: &str) -> String {
    let name = if name.is_empty() { "friend" } else { name };
    template.replace(NAME_PLACEHOLDER, name)
}

pub fn share_text(name: &str, message: &str) -> String {
    let sender = if name.is_empty() { FALLBACK_SENDER } else { name };
    format!(
        "🎄 {sender} sent you magical holiday greetings! ✨\n\n\"{message}\"\n\nSend your own magical greetings!"
    )
}

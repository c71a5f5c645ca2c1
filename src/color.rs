//! Terminal color utilities using ANSI escape codes.
//!
//! Provides colored output for priorities, rollover badges and status messages.

use crate::slots::{BadgeLevel, Priority};

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const STRIKE: &str = "\x1b[9m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";

    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

use codes::*;

/// Color a priority label (major is also bold).
pub fn priority(priority: Priority, text: &str) -> String {
    match priority {
        Priority::Major => format!("{}{}{}{}", BOLD, YELLOW, text, RESET),
        Priority::Medium => format!("{}{}{}", BLUE, text, RESET),
        Priority::Small => text.to_string(),
    }
}

/// Color a rollover badge by severity.
pub fn badge(level: BadgeLevel, text: &str) -> String {
    let color = match level {
        BadgeLevel::Fresh => CYAN,
        BadgeLevel::Stale => YELLOW,
        BadgeLevel::Overdue => RED,
    };
    format!("{}[{}]{}", color, text, RESET)
}

/// Color a completed task (dim, struck through).
pub fn done(text: &str) -> String {
    format!("{}{}{}{}", DIM, STRIKE, text, RESET)
}

/// Color a dimmed hint or empty slot.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", DIM, text, RESET)
}

/// Color success messages (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", GREEN, text, RESET)
}

/// Color error messages (red).
pub fn error(text: &str) -> String {
    format!("{}{}{}", RED, text, RESET)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", YELLOW, text, RESET)
}

/// Color info messages (cyan).
pub fn info(text: &str) -> String {
    format!("{}{}{}", CYAN, text, RESET)
}

/// Color the overflow tier heading (magenta + bold).
pub fn overflow(text: &str) -> String {
    format!("{}{}{}{}", BOLD, MAGENTA, text, RESET)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}

/// Color a number/count (bright cyan).
pub fn number(n: impl std::fmt::Display) -> String {
    format!("{}{}{}", BRIGHT_CYAN, n, RESET)
}

/// Emoji constants for consistent usage
pub mod emoji {
    pub const CHECK: &str = "✅";
    pub const EMPTY: &str = "⬜";
    pub const WARNING: &str = "⚠️";
    pub const FIRE: &str = "🔥";
    pub const SPARKLES: &str = "✨";
    pub const CALENDAR: &str = "📅";
    pub const CLOCK: &str = "🕐";
    pub const PARTY: &str = "🎉";
}

//! Free-text command handling: the closed trigger set and the booking
//! command pattern.

use std::sync::LazyLock;

use regex::Regex;

use crate::clock::to_24_hour;
use crate::types::{Court, DaySelector};

/// Court number and 12-hour start time, e.g. `#4 @ 8 pm` or `#2 at 12pm`.
static BOOK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#(?P<court>[1-5]).*(@|at) (?P<hour>[1-9]|1[012])\s*(?P<period>am|pm)")
        .expect("booking pattern is valid")
});

/// Chat triggers understood by the bot. Trigger words are checked in
/// declaration order; the first hit wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Help,
    Show,
    Book,
}

const HELP_TRIGGERS: &[&str] = &["help"];
const SHOW_TRIGGERS: &[&str] = &["show", "availab", "look"];
const BOOK_TRIGGERS: &[&str] = &["book", "reserve"];

impl Action {
    /// Resolve the first trigger word contained in `text`, if any.
    pub fn from_text(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        let table: &[(&[&str], Action)] = &[
            (HELP_TRIGGERS, Self::Help),
            (SHOW_TRIGGERS, Self::Show),
            (BOOK_TRIGGERS, Self::Book),
        ];
        for (triggers, action) in table {
            if triggers.iter().any(|t| lower.contains(t)) {
                return Some(*action);
            }
        }
        None
    }
}

/// True when the message asks about the following day.
pub fn wants_tomorrow(text: &str) -> bool {
    text.to_lowercase().contains("tomorrow")
}

/// True when the message asks for usage help. Help is the first trigger
/// checked, so any text containing it resolves to [`Action::Help`].
pub fn wants_help(text: &str) -> bool {
    matches!(Action::from_text(text), Some(Action::Help))
}

/// A parsed booking command: court, 24-hour start hour, target day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    pub court: Court,
    pub hour: u8,
    pub day: DaySelector,
}

impl BookingRequest {
    /// Parse a free-text command like `book #4 @ 8 pm tomorrow`.
    /// Returns `None` when no court/hour pair can be read from the text.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = BOOK_PATTERN.captures(text)?;
        let court = Court::new(caps["court"].parse().ok()?)?;
        let hour12: u8 = caps["hour"].parse().ok()?;
        let pm = caps["period"].eq_ignore_ascii_case("pm");
        Some(Self {
            court,
            hour: to_24_hour(hour12, pm),
            day: DaySelector::from_tomorrow_flag(wants_tomorrow(text)),
        })
    }
}

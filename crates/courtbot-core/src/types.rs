use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of courts at the facility.
pub const COURT_COUNT: u8 = 5;

/// Offset between a human court number and the remote resource ID.
const RESOURCE_ID_OFFSET: u16 = 16;

/// A bookable court, numbered 1 through [`COURT_COUNT`] on the human side.
///
/// The remote scheduler identifies the same court by a resource ID offset
/// by 16 (court 1 is resource 17).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Court(u8);

impl Court {
    pub fn new(number: u8) -> Option<Self> {
        (1..=COURT_COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// The remote scheduler's resource ID for this court.
    pub fn resource_id(&self) -> u16 {
        u16::from(self.0) + RESOURCE_ID_OFFSET
    }

    pub fn from_resource_id(id: u16) -> Option<Self> {
        id.checked_sub(RESOURCE_ID_OFFSET)
            .and_then(|n| u8::try_from(n).ok())
            .and_then(Self::new)
    }

    /// All courts in number order.
    pub fn all() -> impl Iterator<Item = Court> {
        (1..=COURT_COUNT).map(Court)
    }
}

impl std::fmt::Display for Court {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which calendar day a lookup or booking targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DaySelector {
    Today,
    Tomorrow,
}

impl DaySelector {
    pub fn from_tomorrow_flag(tomorrow: bool) -> Self {
        if tomorrow { Self::Tomorrow } else { Self::Today }
    }

    pub fn is_tomorrow(&self) -> bool {
        matches!(self, Self::Tomorrow)
    }

    /// Resolve to a calendar date relative to `today`.
    pub fn date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Tomorrow => today + Duration::days(1),
        }
    }

    /// Suffix appended to user-facing messages.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Today => "",
            Self::Tomorrow => " tomorrow",
        }
    }
}

/// One external account in the rotation pool.
///
/// Loaded once at startup; pool order is declaration order and never
/// changes afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keeps the password out of logs and panic messages.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

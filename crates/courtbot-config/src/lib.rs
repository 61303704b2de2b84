//! Environment-driven configuration (`COURTBOT_*` variables).
//!
//! Everything is read once at startup into an explicit [`BotConfig`] that
//! callers pass down; no module holds mutable process-wide state. Slack
//! settings are optional so the CLI stays usable without a workspace
//! integration.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use courtbot_core::Credential;

/// Default scheme+host of the target scheduling site.
const DEFAULT_BASE_URL: &str = "https://hnd-p-ols.spectrumng.net";
/// Default TTL for cached login sessions.
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
/// Default retention for booking idempotency records.
const DEFAULT_ATTEMPT_TTL_SECS: u64 = 3600;
/// Default auto-booking target hours (7, 8 and 9 PM).
const DEFAULT_TARGET_HOURS: &[u8] = &[19, 20, 21];

/// Process configuration, loaded once from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Account rotation pool, in declaration order.
    pub credentials: Vec<Credential>,
    /// Scheme+host of the target site, no trailing slash.
    pub base_url: String,
    pub session_ttl_secs: u64,
    pub attempt_ttl_secs: u64,
    /// Hours (24-hour clock, ascending) the scheduled cycle tries to book.
    pub target_hours: Vec<u8>,
    pub embargo: Option<EmbargoWindow>,
    pub slack: Option<SlackConfig>,
}

/// Inclusive date range during which the facility is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbargoWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EmbargoWindow {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Closure notice shown while the window is active.
    pub fn notice(&self) -> String {
        format!(
            "Courts are closed {} through {}.",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d"),
        )
    }
}

/// Slack settings for the slash-command server and outcome relay.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token used for `chat.postMessage`.
    pub token: String,
    /// Channel receiving scheduled-cycle outcomes.
    pub channel: String,
    /// Verification token expected on inbound slash commands.
    pub verification_token: String,
    /// Workspace ID expected on inbound slash commands.
    pub team_id: String,
    /// Channel IDs allowed to issue `/book`.
    pub book_channels: Vec<String>,
}

impl BotConfig {
    /// Load configuration from `COURTBOT_*` environment variables.
    ///
    /// `COURTBOT_USERNAMES` and `COURTBOT_PASSWORDS` are required parallel
    /// comma-separated lists; everything else has a default or is optional.
    pub fn from_env() -> Result<Self> {
        let usernames = split_csv(&require_env("COURTBOT_USERNAMES")?);
        let passwords = split_csv(&require_env("COURTBOT_PASSWORDS")?);
        if usernames.is_empty() {
            bail!("COURTBOT_USERNAMES must list at least one account");
        }
        if usernames.len() != passwords.len() {
            bail!(
                "COURTBOT_USERNAMES and COURTBOT_PASSWORDS must have the same length ({} vs {})",
                usernames.len(),
                passwords.len()
            );
        }
        let credentials = usernames
            .into_iter()
            .zip(passwords)
            .map(|(username, password)| Credential::new(username, password))
            .collect();

        let base_url = optional_env("COURTBOT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let session_ttl_secs = parse_env_or("COURTBOT_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        let attempt_ttl_secs = parse_env_or("COURTBOT_ATTEMPT_TTL_SECS", DEFAULT_ATTEMPT_TTL_SECS)?;
        let target_hours = match optional_env("COURTBOT_TARGET_HOURS") {
            Some(raw) => parse_hours(&raw)?,
            None => DEFAULT_TARGET_HOURS.to_vec(),
        };

        Ok(Self {
            credentials,
            base_url,
            session_ttl_secs,
            attempt_ttl_secs,
            target_hours,
            embargo: embargo_from_env()?,
            slack: slack_from_env(),
        })
    }

    pub fn session_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session_ttl_secs)
    }

    pub fn attempt_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.attempt_ttl_secs)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_env_or(key: &str, default: u64) -> Result<u64> {
    match optional_env(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be an integer, got '{raw}'")),
        None => Ok(default),
    }
}

fn parse_hours(raw: &str) -> Result<Vec<u8>> {
    let mut hours = Vec::new();
    for part in split_csv(raw) {
        let hour: u8 = part
            .parse()
            .with_context(|| format!("COURTBOT_TARGET_HOURS entry '{part}' is not an hour"))?;
        if hour > 23 {
            bail!("COURTBOT_TARGET_HOURS entry '{part}' is out of range (0-23)");
        }
        hours.push(hour);
    }
    if hours.is_empty() {
        bail!("COURTBOT_TARGET_HOURS must list at least one hour");
    }
    hours.sort_unstable();
    hours.dedup();
    Ok(hours)
}

fn embargo_from_env() -> Result<Option<EmbargoWindow>> {
    let start = optional_env("COURTBOT_EMBARGO_START");
    let end = optional_env("COURTBOT_EMBARGO_END");
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start_raw), Some(end_raw)) => {
            let start = NaiveDate::parse_from_str(&start_raw, "%Y-%m-%d").with_context(|| {
                format!("COURTBOT_EMBARGO_START '{start_raw}' is not a YYYY-MM-DD date")
            })?;
            let end = NaiveDate::parse_from_str(&end_raw, "%Y-%m-%d").with_context(|| {
                format!("COURTBOT_EMBARGO_END '{end_raw}' is not a YYYY-MM-DD date")
            })?;
            if end < start {
                bail!("COURTBOT_EMBARGO_END precedes COURTBOT_EMBARGO_START");
            }
            Ok(Some(EmbargoWindow { start, end }))
        }
        _ => bail!("COURTBOT_EMBARGO_START and COURTBOT_EMBARGO_END must be set together"),
    }
}

fn slack_from_env() -> Option<SlackConfig> {
    Some(SlackConfig {
        token: optional_env("COURTBOT_SLACK_TOKEN")?,
        channel: optional_env("COURTBOT_SLACK_CHANNEL")?,
        verification_token: optional_env("COURTBOT_SLACK_VERIFICATION_TOKEN")?,
        team_id: optional_env("COURTBOT_SLACK_TEAM_ID")?,
        book_channels: split_csv(&optional_env("COURTBOT_SLACK_BOOK_CHANNELS").unwrap_or_default()),
    })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

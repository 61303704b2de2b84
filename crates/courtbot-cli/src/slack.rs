//! Slack surface: slash-command payloads, delayed responses, and the
//! channel notifier used by scheduled bookings.

use anyhow::{Context, Result, bail};
use courtbot_config::SlackConfig;
use serde::Deserialize;
use serde_json::{Value, json};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Form body Slack sends for a slash command.
#[derive(Debug, Deserialize)]
pub struct SlashCommand {
    pub token: String,
    pub team_id: String,
    pub channel_id: String,
    #[serde(default)]
    pub text: String,
    pub response_url: String,
}

impl SlashCommand {
    /// A command is trusted only when both the verification token and the
    /// team id match the configured workspace.
    pub fn is_authorized(&self, slack: &SlackConfig) -> bool {
        self.token == slack.verification_token && self.team_id == slack.team_id
    }
}

/// Body for an in-channel slash-command reply.
pub fn in_channel(text: impl Into<String>) -> Value {
    json!({ "response_type": "in_channel", "text": text.into() })
}

/// Deliver a delayed in-channel reply to a slash command's response URL.
pub async fn respond(client: &reqwest::Client, response_url: &str, text: &str) -> Result<()> {
    let response = client
        .post(response_url)
        .json(&in_channel(text))
        .send()
        .await
        .context("slash-command response failed")?;

    let status = response.status();
    if !status.is_success() {
        bail!("slash-command response rejected: status {status}");
    }
    Ok(())
}

/// Posts messages to the configured channel on behalf of the bot.
pub struct SlackNotifier {
    token: String,
    channel: String,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(slack: &SlackConfig) -> Self {
        Self {
            token: slack.token.clone(),
            channel: slack.channel.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn post(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&json!({ "channel": self.channel, "text": text }))
            .send()
            .await
            .context("chat.postMessage request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("chat.postMessage rejected: status {status}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slack_config() -> SlackConfig {
        SlackConfig {
            token: "xoxb-secret".into(),
            channel: "courts".into(),
            verification_token: "verify".into(),
            team_id: "T123".into(),
            book_channels: vec!["C999".into()],
        }
    }

    fn command(token: &str, team_id: &str) -> SlashCommand {
        SlashCommand {
            token: token.into(),
            team_id: team_id.into(),
            channel_id: "C999".into(),
            text: String::new(),
            response_url: "https://hooks.slack.com/commands/T123/1/abc".into(),
        }
    }

    #[test]
    fn test_accepts_matching_token_and_team() {
        assert!(command("verify", "T123").is_authorized(&slack_config()));
    }

    #[test]
    fn test_rejects_wrong_token() {
        assert!(!command("other", "T123").is_authorized(&slack_config()));
    }

    #[test]
    fn test_rejects_wrong_team() {
        assert!(!command("verify", "T999").is_authorized(&slack_config()));
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let raw = r#"{
            "token": "verify",
            "team_id": "T123",
            "channel_id": "C999",
            "response_url": "https://hooks.slack.com/commands/T123/1/abc"
        }"#;
        let cmd: SlashCommand = serde_json::from_str(raw).unwrap();
        assert_eq!(cmd.text, "");
    }

    #[test]
    fn test_in_channel_reply_shape() {
        let body = in_channel("Looking...");
        assert_eq!(body["response_type"], "in_channel");
        assert_eq!(body["text"], "Looking...");
    }
}

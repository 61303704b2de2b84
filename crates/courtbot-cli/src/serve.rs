//! Slash-command server. Slack gives a slash command three seconds to
//! answer, so the handlers acknowledge right away and deliver the real
//! reply to the response URL from a spawned task.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use chrono::Local;
use courtbot_client::{BookingPipeline, CourtSite, ops};
use courtbot_config::{BotConfig, EmbargoWindow, SlackConfig};
use courtbot_core::wants_help;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::commands::{book_embargo_notice, booking_pipeline, look_embargo_notice};
use crate::slack::{SlashCommand, in_channel, respond};

struct ServerState {
    slack: SlackConfig,
    embargo: Option<EmbargoWindow>,
    site: Arc<dyn CourtSite>,
    pipeline: Mutex<BookingPipeline>,
    http: reqwest::Client,
}

pub async fn handle_serve(port: u16) -> Result<()> {
    let config = BotConfig::from_env()?;
    let Some(slack) = config.slack.clone() else {
        bail!("serve requires the COURTBOT_SLACK_* variables");
    };

    let pipeline = booking_pipeline(&config);
    let state = Arc::new(ServerState {
        slack,
        embargo: config.embargo,
        site: pipeline.site(),
        pipeline: Mutex::new(pipeline),
        http: reqwest::Client::new(),
    });

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind slash-command server at {addr}"))?;
    info!(%addr, "slash-command server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("slash-command server stopped")
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/look", post(look_command))
        .route("/book", post(book_command))
        .with_state(state)
}

async fn look_command(
    State(state): State<Arc<ServerState>>,
    Form(command): Form<SlashCommand>,
) -> Result<Json<Value>, StatusCode> {
    if !command.is_authorized(&state.slack) {
        return Err(StatusCode::BAD_REQUEST);
    }
    if wants_help(&command.text) {
        return Ok(Json(in_channel(ops::LOOK_HELP)));
    }

    let now = Local::now().naive_local();
    if let Some(notice) = look_embargo_notice(state.embargo.as_ref(), &command.text, now.date()) {
        return Ok(Json(in_channel(notice)));
    }

    tokio::spawn(async move {
        let reply = ops::look(state.site.as_ref(), &command.text, now).await;
        deliver(&state, &command.response_url, &reply).await;
    });
    Ok(Json(in_channel("Looking...")))
}

async fn book_command(
    State(state): State<Arc<ServerState>>,
    Form(command): Form<SlashCommand>,
) -> Result<Json<Value>, StatusCode> {
    if !command.is_authorized(&state.slack) {
        return Err(StatusCode::BAD_REQUEST);
    }
    if let Some(rejection) = channel_rejection(&state.slack, &command.channel_id) {
        return Ok(Json(in_channel(rejection)));
    }
    if wants_help(&command.text) {
        return Ok(Json(in_channel(ops::BOOK_HELP)));
    }

    let now = Local::now().naive_local();
    if let Some(notice) = book_embargo_notice(state.embargo.as_ref(), &command.text, now.date()) {
        return Ok(Json(in_channel(notice)));
    }

    tokio::spawn(async move {
        let reply = {
            let mut pipeline = state.pipeline.lock().await;
            ops::book(&mut pipeline, &command.text, now).await
        };
        deliver(&state, &command.response_url, &reply).await;
    });
    Ok(Json(in_channel("Booking...")))
}

/// Restriction reply when `/book` arrives from a channel outside the
/// allow-list. An empty allow-list leaves booking open everywhere.
fn channel_rejection(slack: &SlackConfig, channel_id: &str) -> Option<String> {
    let first = slack.book_channels.first()?;
    if slack.book_channels.iter().any(|allowed| allowed == channel_id) {
        return None;
    }
    Some(format!("I can only book courts in <#{first}|general>"))
}

async fn deliver(state: &ServerState, response_url: &str, text: &str) {
    if let Err(error) = respond(&state.http, response_url, text).await {
        error!(error = %error, "delayed slash-command reply failed");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use courtbot_client::SiteSession;
    use courtbot_core::{Court, Credential, ResourceAvailability};

    use super::*;

    /// Transport that refuses everything; inline replies never reach it.
    struct UnreachableSite;

    #[async_trait]
    impl CourtSite for UnreachableSite {
        async fn login(&self, _credential: &Credential) -> courtbot_core::Result<SiteSession> {
            panic!("inline replies must not touch the site");
        }

        async fn availability(
            &self,
            _date: NaiveDate,
            _courts: &[Court],
        ) -> courtbot_core::Result<Vec<ResourceAvailability>> {
            panic!("inline replies must not touch the site");
        }

        async fn stage(
            &self,
            _session: &SiteSession,
            _court: Court,
            _hour: u8,
            _date: NaiveDate,
        ) -> courtbot_core::Result<()> {
            panic!("inline replies must not touch the site");
        }

        async fn confirm(&self, _session: &SiteSession) -> courtbot_core::Result<String> {
            panic!("inline replies must not touch the site");
        }
    }

    fn slack_config() -> SlackConfig {
        SlackConfig {
            token: "xoxb-secret".into(),
            channel: "courts".into(),
            verification_token: "verify".into(),
            team_id: "T123".into(),
            book_channels: vec!["C111".into(), "C222".into()],
        }
    }

    fn state_with(slack: SlackConfig, embargo: Option<EmbargoWindow>) -> Arc<ServerState> {
        let site: Arc<dyn CourtSite> = Arc::new(UnreachableSite);
        let pipeline = BookingPipeline::new(
            Arc::clone(&site),
            vec![Credential::new("alice", "pw")],
            Duration::from_secs(3600),
            Duration::from_secs(3600),
        );
        Arc::new(ServerState {
            slack,
            embargo,
            site,
            pipeline: Mutex::new(pipeline),
            http: reqwest::Client::new(),
        })
    }

    fn command(token: &str, channel_id: &str, text: &str) -> SlashCommand {
        SlashCommand {
            token: token.into(),
            team_id: "T123".into(),
            channel_id: channel_id.into(),
            text: text.into(),
            response_url: "https://hooks.slack.com/commands/T123/1/abc".into(),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_look_gets_400() {
        let state = state_with(slack_config(), None);
        let result = look_command(State(state), Form(command("bogus", "C111", ""))).await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_look_help_is_answered_inline() {
        let state = state_with(slack_config(), None);
        let result = look_command(State(state), Form(command("verify", "C111", "help"))).await;
        let body = result.unwrap().0;
        assert_eq!(body["text"], ops::LOOK_HELP);
    }

    #[tokio::test]
    async fn test_book_outside_allowed_channels_is_refused_inline() {
        let state = state_with(slack_config(), None);
        let result =
            book_command(State(state), Form(command("verify", "C999", "#4 @ 8 pm"))).await;
        let body = result.unwrap().0;
        assert_eq!(body["text"], "I can only book courts in <#C111|general>");
    }

    #[tokio::test]
    async fn test_book_during_embargo_is_refused_inline() {
        let embargo = EmbargoWindow {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2999, 12, 31).unwrap(),
        };
        let state = state_with(slack_config(), Some(embargo));
        let result =
            book_command(State(state), Form(command("verify", "C111", "#4 @ 8 pm"))).await;
        let body = result.unwrap().0;
        assert_eq!(
            body["text"],
            "Unable to book. Courts are closed 2000-01-01 through 2999-12-31."
        );
    }

    #[tokio::test]
    async fn test_look_during_embargo_is_answered_inline() {
        let embargo = EmbargoWindow {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2999, 12, 31).unwrap(),
        };
        let state = state_with(slack_config(), Some(embargo));
        let result = look_command(State(state), Form(command("verify", "C111", "tomorrow"))).await;
        let body = result.unwrap().0;
        assert_eq!(
            body["text"],
            "Courts are closed 2000-01-01 through 2999-12-31."
        );
    }

    #[tokio::test]
    async fn test_book_help_from_disallowed_channel_gets_rejection() {
        let state = state_with(slack_config(), None);
        let result = book_command(State(state), Form(command("verify", "C999", "help"))).await;
        let body = result.unwrap().0;
        assert_eq!(body["text"], "I can only book courts in <#C111|general>");
    }

    #[test]
    fn test_empty_allow_list_means_unrestricted() {
        let mut slack = slack_config();
        slack.book_channels.clear();
        assert_eq!(channel_rejection(&slack, "C999"), None);
    }

    #[test]
    fn test_allowed_channel_passes() {
        assert_eq!(channel_rejection(&slack_config(), "C222"), None);
    }
}

//! One-shot CLI commands. Each handler loads configuration, builds the
//! client stack, prints the outcome lines, and exits.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use courtbot_client::{BookingPipeline, HttpCourtSite, ops};
use courtbot_config::{BotConfig, EmbargoWindow};
use courtbot_core::{Action, DaySelector, wants_tomorrow};
use courtbot_scheduler::AutoBooker;
use tracing::{info, warn};

use crate::slack::SlackNotifier;

pub async fn handle_look(text: &str) -> Result<()> {
    let config = BotConfig::from_env()?;
    let now = Local::now().naive_local();

    if let Some(notice) = look_embargo_notice(config.embargo.as_ref(), text, now.date()) {
        println!("{notice}");
        return Ok(());
    }

    let site = HttpCourtSite::new(&config.base_url);
    println!("{}", ops::look(&site, text, now).await);
    Ok(())
}

pub async fn handle_book(text: &str) -> Result<()> {
    let config = BotConfig::from_env()?;
    let now = Local::now().naive_local();

    if let Some(notice) = book_embargo_notice(config.embargo.as_ref(), text, now.date()) {
        println!("{notice}");
        return Ok(());
    }

    let mut pipeline = booking_pipeline(&config);
    println!("{}", ops::book(&mut pipeline, text, now).await);
    Ok(())
}

pub async fn handle_auto() -> Result<()> {
    let config = BotConfig::from_env()?;
    let now = Local::now().naive_local();
    let notifier = config.slack.as_ref().map(SlackNotifier::new);

    // The scheduled cycle always targets tomorrow.
    if let Some(embargo) = &config.embargo {
        if embargo.covers(DaySelector::Tomorrow.date(now.date())) {
            let notice = format!("Skipping scheduled booking. {}", embargo.notice());
            relay(notifier.as_ref(), &notice).await;
            return Ok(());
        }
    }

    let mut pipeline = booking_pipeline(&config);
    let outcomes = AutoBooker::new(&mut pipeline, config.target_hours.clone())
        .run(now)
        .await;
    for outcome in &outcomes {
        relay(notifier.as_ref(), outcome).await;
    }
    Ok(())
}

/// Free-text chat message routed by trigger word, the way the original
/// bot answered channel mentions.
pub async fn handle_chat(text: &str) -> Result<()> {
    let config = BotConfig::from_env()?;
    let now = Local::now().naive_local();

    let Some(action) = Action::from_text(text) else {
        info!("message does not include any triggers");
        return Ok(());
    };

    let reply = match action {
        Action::Help => format!("{}\n\n{}", ops::LOOK_HELP, ops::BOOK_HELP),
        Action::Show => match look_embargo_notice(config.embargo.as_ref(), text, now.date()) {
            Some(notice) => notice,
            None => {
                let site = HttpCourtSite::new(&config.base_url);
                ops::look(&site, text, now).await
            }
        },
        Action::Book => match book_embargo_notice(config.embargo.as_ref(), text, now.date()) {
            Some(notice) => notice,
            None => {
                let mut pipeline = booking_pipeline(&config);
                ops::book(&mut pipeline, text, now).await
            }
        },
    };
    println!("{reply}");
    Ok(())
}

/// Closure notice when an availability request targets an embargoed date.
pub fn look_embargo_notice(
    embargo: Option<&EmbargoWindow>,
    text: &str,
    today: NaiveDate,
) -> Option<String> {
    let embargo = embargo?;
    let day = DaySelector::from_tomorrow_flag(wants_tomorrow(text));
    embargo.covers(day.date(today)).then(|| embargo.notice())
}

/// Closure notice when a booking command targets an embargoed date.
pub fn book_embargo_notice(
    embargo: Option<&EmbargoWindow>,
    text: &str,
    today: NaiveDate,
) -> Option<String> {
    let embargo = embargo?;
    let day = DaySelector::from_tomorrow_flag(wants_tomorrow(text));
    embargo
        .covers(day.date(today))
        .then(|| format!("Unable to book. {}", embargo.notice()))
}

pub fn booking_pipeline(config: &BotConfig) -> BookingPipeline {
    BookingPipeline::new(
        Arc::new(HttpCourtSite::new(&config.base_url)),
        config.credentials.clone(),
        config.session_ttl(),
        config.attempt_ttl(),
    )
}

async fn relay(notifier: Option<&SlackNotifier>, text: &str) {
    println!("{text}");
    if let Some(notifier) = notifier {
        if let Err(error) = notifier.post(text).await {
            warn!(error = %error, "slack relay failed");
        }
    }
}

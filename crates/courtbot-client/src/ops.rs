//! Plain-text entry points used by the chat and CLI surfaces. Each one
//! turns a free-text command into a single reply string; failures never
//! leak internals past the log line.

use chrono::NaiveDateTime;
use courtbot_core::{BookingRequest, DaySelector, wants_tomorrow};
use tracing::error;

use crate::look::{hourly_availability, render_report};
use crate::pipeline::BookingPipeline;
use crate::transport::CourtSite;

/// Generic user-facing failure line.
pub const APOLOGY: &str = "Something went wrong. Sorry!";

/// Reply to a booking command the parser cannot read.
pub const BOOK_USAGE: &str =
    "Please provide a court number and an hour (e.g., `/book #4 @ 8 pm`).";

/// Help text for the availability command.
pub const LOOK_HELP: &str = "Use this command to check squash court availability. \
     Call it without arguments (i.e., `/look`) to check today. \
     Call it with `tomorrow` as an argument (e.g., `/look tomorrow`) to check tomorrow.";

/// Help text for the booking command.
pub const BOOK_HELP: &str = "Use this command to reserve a Z-Center squash court. \
     Call it with a court number and an hour to make a reservation (e.g., `/book #4 @ 8 pm`). \
     Include `tomorrow` as an argument (e.g., `/book #4 @ 8 pm tomorrow`) to book a court \
     for tomorrow.";

/// Availability report for the day `text` selects.
pub async fn look(site: &dyn CourtSite, text: &str, now: NaiveDateTime) -> String {
    let day = DaySelector::from_tomorrow_flag(wants_tomorrow(text));
    match hourly_availability(site, day, now).await {
        Ok(report) => render_report(&report, day),
        Err(error) => {
            error!(error = %error, "availability lookup failed");
            APOLOGY.to_string()
        }
    }
}

/// Parse a booking command out of `text` and drive the pipeline.
pub async fn book(pipeline: &mut BookingPipeline, text: &str, now: NaiveDateTime) -> String {
    let Some(request) = BookingRequest::parse(text) else {
        return BOOK_USAGE.to_string();
    };

    match pipeline
        .book(request.court, request.hour, request.day, now)
        .await
    {
        Ok(outcome) => outcome.message(),
        Err(error) => {
            error!(error = %error, "booking failed");
            APOLOGY.to_string()
        }
    }
}

//! The booking pipeline: fresh availability gate, then authenticate,
//! stage, confirm with one credential after another until an attempt
//! sticks.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use courtbot_core::clock::twelve_hour;
use courtbot_core::{Court, Credential, DaySelector, Error, Result, available_hours};
use tracing::{debug, info, warn};

use crate::attempts::AttemptStore;
use crate::session::SessionAuthenticator;
use crate::transport::CourtSite;

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub court: Court,
    pub hour: u8,
    pub day: DaySelector,
    pub username: String,
}

impl BookingOutcome {
    /// Conversational confirmation line.
    pub fn message(&self) -> String {
        format!(
            "Booked {} at {}{} (as {})",
            self.court,
            twelve_hour(self.hour),
            self.day.suffix(),
            self.username,
        )
    }
}

/// Books one slot by walking the credential pool in declaration order.
/// A failed step abandons that credential and rotates to the next; only
/// exhausting the whole pool is an error.
pub struct BookingPipeline {
    site: Arc<dyn CourtSite>,
    sessions: SessionAuthenticator,
    attempts: AttemptStore,
    credentials: Vec<Credential>,
}

impl BookingPipeline {
    pub fn new(
        site: Arc<dyn CourtSite>,
        credentials: Vec<Credential>,
        session_ttl: Duration,
        attempt_ttl: Duration,
    ) -> Self {
        Self {
            sessions: SessionAuthenticator::new(Arc::clone(&site), session_ttl),
            attempts: AttemptStore::new(attempt_ttl),
            site,
            credentials,
        }
    }

    /// Number of accounts in the rotation pool.
    pub fn pool_size(&self) -> usize {
        self.credentials.len()
    }

    /// Shared transport handle, for callers that pair bookings with
    /// availability lookups.
    pub fn site(&self) -> Arc<dyn CourtSite> {
        Arc::clone(&self.site)
    }

    /// Book `court` at `hour` (24-hour) on the day `day` selects. `now`
    /// anchors date resolution and same-day hour filtering.
    pub async fn book(
        &mut self,
        court: Court,
        hour: u8,
        day: DaySelector,
        now: NaiveDateTime,
    ) -> Result<BookingOutcome> {
        let date = day.date(now.date());
        self.ensure_slot_open(court, hour, day, date, now.hour() as u8)
            .await?;

        let pool = self.credentials.clone();
        let mut attempted = 0usize;
        for credential in &pool {
            if self.attempts.is_recorded(&credential.username, day) {
                info!(
                    username = %credential.username,
                    "account already booked for this day, skipping"
                );
                continue;
            }
            attempted += 1;

            match self.attempt_with(credential, court, hour, date).await {
                Ok(()) => {
                    self.attempts.record(&credential.username, day);
                    info!(
                        court = court.number(),
                        hour,
                        username = %credential.username,
                        "booking confirmed"
                    );
                    return Ok(BookingOutcome {
                        court,
                        hour,
                        day,
                        username: credential.username.clone(),
                    });
                }
                Err(error) => {
                    warn!(
                        username = %credential.username,
                        error = %error,
                        "attempt failed, rotating to next credential"
                    );
                    self.sessions.invalidate(&credential.username);
                }
            }
        }

        Err(Error::Exhausted { attempted })
    }

    /// Authenticate, stage, confirm with one credential.
    async fn attempt_with(
        &mut self,
        credential: &Credential,
        court: Court,
        hour: u8,
        date: NaiveDate,
    ) -> Result<()> {
        let session = self.sessions.session_for(credential).await?;
        self.site.stage(&session, court, hour, date).await?;
        let confirmation = self.site.confirm(&session).await?;
        debug!(confirmation = %confirmation, "confirm step accepted");
        Ok(())
    }

    /// The target slot must still be open in a fresh snapshot before any
    /// credential is spent on it.
    async fn ensure_slot_open(
        &self,
        court: Court,
        hour: u8,
        day: DaySelector,
        date: NaiveDate,
        current_hour: u8,
    ) -> Result<()> {
        let snapshot = self.site.availability(date, &[court]).await?;
        let resource = snapshot
            .iter()
            .find(|r| r.id == court.resource_id())
            .ok_or_else(|| Error::Availability(format!("no data for {court}")))?;

        let open = available_hours(&resource.availability, day.is_tomorrow(), current_hour);
        if !open.contains(&hour) {
            return Err(Error::Availability(format!(
                "{court} is not bookable at {} on {date}",
                twelve_hour(hour)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

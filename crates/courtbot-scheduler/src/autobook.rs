//! The scheduled booking cycle: snapshot, plan, budgeted pipeline walk.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use courtbot_client::look::hourly_availability;
use courtbot_client::ops::APOLOGY;
use courtbot_client::pipeline::BookingPipeline;
use courtbot_core::clock::twelve_hour;
use courtbot_core::{Court, DaySelector};
use tracing::{info, warn};

use crate::plan::build_plan;

/// One scheduled run over the configured target hours, always for
/// tomorrow.
///
/// The booking budget equals the credential pool size: each account holds
/// at most one slot per day, so attempts past that are pointless. The run
/// announces itself with a `Looking...` line; the remaining outcome
/// messages come back in hour order. A hard failure stops the cycle and
/// appends one generic apology, keeping whatever was already booked.
pub struct AutoBooker<'a> {
    pipeline: &'a mut BookingPipeline,
    target_hours: Vec<u8>,
}

impl<'a> AutoBooker<'a> {
    /// `target_hours` are 24-hour values, expected ascending.
    pub fn new(pipeline: &'a mut BookingPipeline, target_hours: Vec<u8>) -> Self {
        Self {
            pipeline,
            target_hours,
        }
    }

    pub async fn run(&mut self, now: NaiveDateTime) -> Vec<String> {
        let day = DaySelector::Tomorrow;
        let mut outcomes = Vec::new();

        let (Some(&first_hour), Some(&last_hour)) =
            (self.target_hours.first(), self.target_hours.last())
        else {
            return outcomes;
        };

        outcomes.push("Looking...".to_string());

        let plan = match self.planned_courts(day, now).await {
            Ok(options) => build_plan(&options),
            Err(error) => {
                warn!(error = %error, "availability snapshot failed, aborting cycle");
                outcomes.push(APOLOGY.to_string());
                return outcomes;
            }
        };
        info!(?plan, "selection plan ready");

        let mut booked: BTreeMap<u8, u32> = self.target_hours.iter().map(|&h| (h, 0)).collect();
        let mut budget = self.pipeline.pool_size();

        for (&hour, courts) in &plan {
            // An isolated block at the last hour is worthless once the
            // first hour is covered.
            if hour == last_hour && booked[&first_hour] > 0 {
                info!(hour, "last hour reached with the first hour booked, stopping");
                break;
            }

            if courts.is_empty() {
                outcomes.push(format!("No courts available at {} tomorrow.", twelve_hour(hour)));
                // A hole in the middle splits the block; nothing later is
                // worth holding.
                if hour != first_hour && hour != last_hour {
                    info!(hour, "middle hour has no courts, stopping");
                    break;
                }
                continue;
            }

            for &court in courts {
                if budget == 0 {
                    continue;
                }
                match self.pipeline.book(court, hour, day, now).await {
                    Ok(outcome) => {
                        outcomes.push(outcome.message());
                        *booked.entry(hour).or_insert(0) += 1;
                        budget -= 1;
                    }
                    Err(error) => {
                        warn!(error = %error, "scheduled booking aborted");
                        outcomes.push(APOLOGY.to_string());
                        return outcomes;
                    }
                }
            }
        }

        outcomes
    }

    /// Tomorrow's open courts keyed by target hour; hours with nothing
    /// open stay in the map as empty entries.
    async fn planned_courts(
        &self,
        day: DaySelector,
        now: NaiveDateTime,
    ) -> courtbot_core::Result<BTreeMap<u8, Vec<Court>>> {
        let site = self.pipeline.site();
        let report = hourly_availability(site.as_ref(), day, now).await?;

        let mut options: BTreeMap<u8, Vec<Court>> =
            self.target_hours.iter().map(|&h| (h, Vec::new())).collect();
        for (court, hours) in &report {
            for hour in hours {
                if let Some(courts) = options.get_mut(hour) {
                    courts.push(*court);
                }
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
#[path = "autobook_tests.rs"]
mod tests;

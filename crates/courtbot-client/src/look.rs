//! Availability reports across all courts.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use courtbot_core::clock::twelve_hour;
use courtbot_core::{Court, DaySelector, Result, available_hours};

use crate::transport::CourtSite;

/// Free hours per court for `day`; courts with nothing free are omitted.
pub async fn hourly_availability(
    site: &dyn CourtSite,
    day: DaySelector,
    now: NaiveDateTime,
) -> Result<BTreeMap<Court, Vec<u8>>> {
    let courts: Vec<Court> = Court::all().collect();
    let snapshot = site.availability(day.date(now.date()), &courts).await?;

    let current_hour = now.hour() as u8;
    let mut report = BTreeMap::new();
    for resource in &snapshot {
        let Some(court) = Court::from_resource_id(resource.id) else {
            continue;
        };
        let hours = available_hours(&resource.availability, day.is_tomorrow(), current_hour);
        if !hours.is_empty() {
            report.insert(court, hours);
        }
    }
    Ok(report)
}

/// Conversational rendering of an availability report: a lead-in line,
/// then one block per court in number order.
pub fn render_report(report: &BTreeMap<Court, Vec<u8>>, day: DaySelector) -> String {
    if report.is_empty() {
        return format!("There are no courts available{}.", day.suffix());
    }

    let mut blocks = vec![format!("Here's how the courts look{}.", day.suffix())];
    for (court, hours) in report {
        let times: Vec<String> = hours.iter().map(|&hour| twelve_hour(hour)).collect();
        blocks.push(format!("*{court}* is available at {}.", times.join(", ")));
    }
    blocks.join("\n\n")
}

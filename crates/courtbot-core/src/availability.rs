//! Decoding of the remote scheduler's minute-granularity availability
//! payload into bookable hours.

use serde::Deserialize;

const MINUTES_PER_HOUR: u16 = 60;

/// One minute entry in a court's daily availability bitmap.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MinuteSlot {
    /// Minute offset since midnight (0-1439).
    #[serde(rename = "TimeId")]
    pub time_id: u16,
    #[serde(rename = "IsAvailable")]
    pub is_available: bool,
}

impl MinuteSlot {
    pub fn new(time_id: u16, is_available: bool) -> Self {
        Self {
            time_id,
            is_available,
        }
    }
}

/// Daily availability for one remote resource, as returned under `d.Value`
/// by the scheduling query endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceAvailability {
    /// Remote resource ID (court number + 16).
    #[serde(rename = "Id")]
    pub id: u16,
    #[serde(rename = "Availability")]
    pub availability: Vec<MinuteSlot>,
}

/// Hours (0-23) at which a court can still be booked.
///
/// The site tracks per-minute state internally but only accepts
/// hour-aligned bookings, so only entries sitting exactly on an hour
/// boundary count; sub-hour flips are ignored. Same-day queries drop the
/// current hour and everything before it; tomorrow queries keep every
/// hour. The result is ascending and duplicate-free for any input order.
pub fn available_hours(slots: &[MinuteSlot], for_tomorrow: bool, current_hour: u8) -> Vec<u8> {
    let mut hours: Vec<u8> = slots
        .iter()
        .filter(|slot| slot.is_available && slot.time_id % MINUTES_PER_HOUR == 0)
        .map(|slot| (slot.time_id / MINUTES_PER_HOUR) as u8)
        .filter(|&hour| for_tomorrow || hour > current_hour)
        .collect();
    hours.sort_unstable();
    hours.dedup();
    hours
}

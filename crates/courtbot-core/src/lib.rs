//! Domain types shared across the courtbot workspace: courts, days,
//! credentials, the availability decoder, command parsing, and the error
//! taxonomy. No I/O lives here.

pub mod availability;
pub mod clock;
pub mod command;
pub mod error;
pub mod types;

pub use availability::{MinuteSlot, ResourceAvailability, available_hours};
pub use command::{Action, BookingRequest, wants_help, wants_tomorrow};
pub use error::{BookingStep, Error, Result};
pub use types::{Court, Credential, DaySelector};

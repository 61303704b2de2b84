//! Scheduled booking: the selection planner and the budgeted cycle that
//! walks it against the booking pipeline.

pub mod autobook;
pub mod plan;

pub use autobook::AutoBooker;
pub use plan::{SelectionPlan, build_plan};

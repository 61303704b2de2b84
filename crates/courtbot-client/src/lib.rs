//! Client for the remote scheduling site: wire payloads, the HTTP
//! transport seam, session and attempt caches, and the booking pipeline
//! built on top of them.

pub mod attempts;
pub mod look;
pub mod ops;
pub mod pipeline;
pub mod session;
pub mod tokens;
pub mod transport;
pub mod wire;

pub use attempts::AttemptStore;
pub use look::{hourly_availability, render_report};
pub use pipeline::{BookingOutcome, BookingPipeline};
pub use session::SessionAuthenticator;
pub use transport::{CourtSite, HttpCourtSite, SiteSession};

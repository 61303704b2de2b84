/// Booking pipeline step at which a credential's attempt failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingStep {
    Stage,
    Confirm,
}

impl BookingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Confirm => "confirm",
        }
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Login rejected for '{username}': {reason}")]
    Authentication { username: String, reason: String },

    #[error("Availability lookup failed: {0}")]
    Availability(String),

    #[error("Booking {step} step failed: {reason}")]
    Booking { step: BookingStep, reason: String },

    #[error("All {attempted} credentials exhausted without a confirmed booking")]
    Exhausted { attempted: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn authentication(username: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Authentication {
            username: username.into(),
            reason: reason.into(),
        }
    }

    pub fn booking(step: BookingStep, reason: impl Into<String>) -> Self {
        Self::Booking {
            step,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_authentication() {
        let err = Error::authentication("alice", "status 403");
        assert_eq!(err.to_string(), "Login rejected for 'alice': status 403");
    }

    #[test]
    fn test_display_availability() {
        let err = Error::Availability("query returned status 500".into());
        assert_eq!(
            err.to_string(),
            "Availability lookup failed: query returned status 500"
        );
    }

    #[test]
    fn test_display_booking_stage() {
        let err = Error::booking(BookingStep::Stage, "status 409");
        assert_eq!(err.to_string(), "Booking stage step failed: status 409");
    }

    #[test]
    fn test_display_booking_confirm() {
        let err = Error::booking(BookingStep::Confirm, "no confirmation text");
        assert_eq!(
            err.to_string(),
            "Booking confirm step failed: no confirmation text"
        );
    }

    #[test]
    fn test_display_exhausted() {
        let err = Error::Exhausted { attempted: 3 };
        assert_eq!(
            err.to_string(),
            "All 3 credentials exhausted without a confirmed booking"
        );
    }

    #[test]
    fn test_booking_step_as_str() {
        assert_eq!(BookingStep::Stage.as_str(), "stage");
        assert_eq!(BookingStep::Confirm.as_str(), "confirm");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

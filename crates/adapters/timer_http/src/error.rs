//! Timer-specific error type wrapping transport failures.

use heathub_domain::error::HeatHubError;

/// Errors originating from the durable-timer service client.
#[derive(Debug, thiserror::Error)]
pub enum TimerError {
    /// The HTTP round trip failed or the service answered with an error.
    #[error("timer service error")]
    Http(#[from] reqwest::Error),
}

impl From<TimerError> for HeatHubError {
    fn from(err: TimerError) -> Self {
        Self::Scheduler(Box::new(err))
    }
}

//! Driver-specific error type wrapping transport and protocol failures.

use heathub_domain::error::HeatHubError;

/// Errors originating from a device driver backend.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The HTTP round trip failed.
    #[error("http error")]
    Http(#[from] reqwest::Error),

    /// The driver's options blob is missing or malformed.
    #[error("invalid driver options: {0}")]
    Options(serde_json::Error),

    /// The portal answered without the expected session credentials.
    #[error("no session credentials in portal response")]
    MissingCredentials,

    /// The portal answered with a payload we could not interpret.
    #[error("unexpected portal response: {0}")]
    Protocol(String),
}

impl From<DriverError> for HeatHubError {
    fn from(err: DriverError) -> Self {
        Self::Device(Box::new(err))
    }
}

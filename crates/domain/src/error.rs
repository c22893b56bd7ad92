//! Common error types used across the workspace.
//!
//! Every error carries both a kind (the enum variant, for programmatic
//! handling) and a human-readable message (its `Display` output, spoken
//! verbatim by the front end). User-facing variants are `transparent` so the
//! exact spoken text survives the trip through [`HeatHubError`].

use std::error::Error as StdError;

/// Top-level error type returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HeatHubError {
    /// Unrecognized device type or broken deployment wiring. Fatal, not retried.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The device cannot be operated on right now. Spoken to the user, not retried.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// A value failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An expected record was missing.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The durable-timer service failed. Start failures propagate; cancel and
    /// query failures are caught by the hold scheduler and never surface here.
    #[error("Sorry, I couldn't arm the turn-off timer.")]
    Scheduler(#[source] Box<dyn StdError + Send + Sync>),

    /// The profile store failed. Fatal for the command.
    #[error("Sorry, I couldn't reach your saved settings.")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),

    /// Device IO failed below the online/contactable checks.
    #[error("Sorry, something went wrong talking to the thermostat.")]
    Device(#[source] Box<dyn StdError + Send + Sync>),
}

impl HeatHubError {
    /// Wrap a timer-service error.
    pub fn scheduler(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Scheduler(Box::new(err))
    }

    /// Wrap a profile-store error.
    pub fn storage(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }

    /// Wrap a device driver error.
    pub fn device(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Device(Box::new(err))
    }
}

/// Deployment configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The factory was asked for a device type it does not know.
    #[error("Unknown thermostat type {0}")]
    UnknownDeviceType(String),
}

/// Conditions that must hold before a command may touch the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// The backend reports the device offline.
    #[error("Sorry, the thermostat is offline at the moment.")]
    Offline,

    /// The backend answered but with the "could not reach device" sentinel.
    #[error("Sorry, I couldn't contact the thermostat.")]
    Uncontactable,

    /// Turn-up was requested while the heating is already on.
    #[error("The heating is already on.")]
    AlreadyOn,
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Text that does not parse as an ISO-8601 duration.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

/// An expected record was not found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Which kind of record was missing (e.g. `"Profile"`).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_preserve_spoken_text_for_precondition_errors() {
        let err: HeatHubError = PreconditionError::Offline.into();
        assert_eq!(
            err.to_string(),
            "Sorry, the thermostat is offline at the moment."
        );

        let err: HeatHubError = PreconditionError::Uncontactable.into();
        assert_eq!(err.to_string(), "Sorry, I couldn't contact the thermostat.");

        let err: HeatHubError = PreconditionError::AlreadyOn.into();
        assert_eq!(err.to_string(), "The heating is already on.");
    }

    #[test]
    fn should_name_the_unknown_device_type() {
        let err: HeatHubError =
            ConfigurationError::UnknownDeviceType("nest".to_string()).into();
        assert_eq!(err.to_string(), "Unknown thermostat type nest");
    }

    #[test]
    fn should_expose_the_kind_through_matching() {
        let err: HeatHubError = PreconditionError::AlreadyOn.into();
        assert!(matches!(
            err,
            HeatHubError::Precondition(PreconditionError::AlreadyOn)
        ));
    }

    #[test]
    fn should_format_not_found_error() {
        let err = NotFoundError {
            entity: "Profile",
            id: "user-1".to_string(),
        };
        assert_eq!(err.to_string(), "Profile not found: user-1");
    }
}

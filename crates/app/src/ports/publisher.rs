//! Message channel port — republishing commands for asynchronous reprocessing.

use std::future::Future;

use heathub_domain::command::TemperatureCommand;
use heathub_domain::error::HeatHubError;

/// Publishes a command onto an asynchronous channel for later reprocessing.
///
/// Used by the deferred dispatch strategy when a driver cannot complete a
/// setpoint write inside the interactive time budget. The published command
/// must carry the full original arguments with the defer flag cleared.
pub trait CommandPublisher: Send + Sync {
    fn publish(
        &self,
        topic: &str,
        command: &TemperatureCommand,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;
}

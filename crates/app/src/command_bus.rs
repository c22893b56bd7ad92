//! In-process command bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use heathub_domain::command::TemperatureCommand;
use heathub_domain::error::HeatHubError;

use crate::ports::CommandPublisher;

/// A republished command together with the topic it was sent on.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedCommand {
    pub topic: String,
    pub command: TemperatureCommand,
}

/// In-process command bus using a tokio [`broadcast`] channel.
///
/// The reprocessing task subscribes at startup, so in practice there is
/// always a receiver; should none exist the command is dropped with a
/// warning rather than failing the interactive request.
pub struct InProcessCommandBus {
    sender: broadcast::Sender<PublishedCommand>,
}

impl InProcessCommandBus {
    /// Create a new command bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to commands published on this bus.
    ///
    /// Returns a receiver that will get all commands published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedCommand> {
        self.sender.subscribe()
    }
}

impl CommandPublisher for InProcessCommandBus {
    fn publish(
        &self,
        topic: &str,
        command: &TemperatureCommand,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        let published = PublishedCommand {
            topic: topic.to_string(),
            command: command.clone(),
        };
        if self.sender.send(published).is_err() {
            tracing::warn!(topic, "no subscriber for deferred command, dropping");
        }
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heathub_domain::command::{CommandContext, OnOff};

    fn command() -> TemperatureCommand {
        TemperatureCommand {
            context: CommandContext::user("user-1"),
            target_temperature: 21.0,
            duration: None,
            mode: OnOff::On,
            defer: false,
        }
    }

    #[tokio::test]
    async fn should_deliver_command_to_subscriber() {
        let bus = InProcessCommandBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish("set-temperature", &command()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.topic, "set-temperature");
        assert_eq!(received.command, command());
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessCommandBus::new(16);
        let result = bus.publish("set-temperature", &command()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_deliver_commands_published_before_subscription() {
        let bus = InProcessCommandBus::new(16);
        bus.publish("early", &command()).await.unwrap();

        let mut rx = bus.subscribe();
        bus.publish("late", &command()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.topic, "late");
    }
}

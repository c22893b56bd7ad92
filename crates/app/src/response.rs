//! Service response — spoken messages plus optional presentation data.

use serde::Serialize;

use heathub_domain::device::Card;

/// What an operation says back to the user, with optional card and readings
/// for front ends that can render them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ServiceResponse {
    pub messages: Vec<String>,
    pub card: Option<Card>,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
}

impl ServiceResponse {
    /// Response carrying a single spoken message.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.messages.push(text.into());
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    #[must_use]
    pub fn with_readings(mut self, current: f64, target: f64) -> Self {
        self.current_temperature = Some(current);
        self.target_temperature = Some(target);
        self
    }

    /// All messages joined into one utterance.
    #[must_use]
    pub fn spoken(&self) -> String {
        self.messages.join(" ")
    }
}

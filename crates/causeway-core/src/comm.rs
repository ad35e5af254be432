//! Communication (edge) types

use serde::{Deserialize, Serialize};

/// A directed communication edge: one publisher, one topic, one subscriber
///
/// A topic with several publishers or subscribers contributes one
/// `Communication` per (publisher, subscriber) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    /// Topic the message travels on
    pub topic_name: String,

    /// Publishing node name
    pub publisher: String,

    /// Subscribing node name
    pub subscriber: String,
}

impl Communication {
    /// Create a new communication edge
    pub fn new(
        topic_name: impl Into<String>,
        publisher: impl Into<String>,
        subscriber: impl Into<String>,
    ) -> Self {
        Self {
            topic_name: topic_name.into(),
            publisher: publisher.into(),
            subscriber: subscriber.into(),
        }
    }
}

impl std::fmt::Display for Communication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -({})-> {}",
            self.publisher, self.topic_name, self.subscriber
        )
    }
}

use std::{borrow::Cow, fmt};

use crate::Label;

/// The bus operation that produced a recorded event.
///
/// This is the discriminant of [`BusEvent`](crate::BusEvent) without its data,
/// used to classify the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    Sent,
    SentToSelf,
    SentToDestination,
    Published,
    PublishedToTopic,
    SentWithRoutingSlip,
    Deferred,
    DeferredToSelf,
    DeferredToDestination,
}

impl OperationKind {
    /// Every kind, in declaration order.
    pub const ALL: [OperationKind; 9] = [
        OperationKind::Sent,
        OperationKind::SentToSelf,
        OperationKind::SentToDestination,
        OperationKind::Published,
        OperationKind::PublishedToTopic,
        OperationKind::SentWithRoutingSlip,
        OperationKind::Deferred,
        OperationKind::DeferredToSelf,
        OperationKind::DeferredToDestination,
    ];

    /// Conventional name of the event this operation records.
    pub fn event_name(&self) -> &'static str {
        match self {
            OperationKind::Sent => "MessageSent",
            OperationKind::SentToSelf => "MessageSentToSelf",
            OperationKind::SentToDestination => "MessageSentToDestination",
            OperationKind::Published => "MessagePublished",
            OperationKind::PublishedToTopic => "MessagePublishedToTopic",
            OperationKind::SentWithRoutingSlip => "MessageSentWithRoutingSlip",
            OperationKind::Deferred => "MessageDeferred",
            OperationKind::DeferredToSelf => "MessageDeferredToSelf",
            OperationKind::DeferredToDestination => "MessageDeferredToDestination",
        }
    }

    /// Returns true for the three deferred kinds.
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            OperationKind::Deferred
                | OperationKind::DeferredToSelf
                | OperationKind::DeferredToDestination
        )
    }

    /// Returns true for kinds that deliver to subscribers rather than a queue.
    pub fn is_publish(&self) -> bool {
        matches!(
            self,
            OperationKind::Published | OperationKind::PublishedToTopic
        )
    }
}

impl Label for OperationKind {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.event_name())
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

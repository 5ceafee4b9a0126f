use std::{borrow::Cow, time::Duration};

use crate::{Headers, Itinerary, Label, Message, MessageId, OperationKind};

/// A record of one operation performed on a [`FakeBus`](crate::FakeBus).
///
/// Each variant carries the [`Message`] that was handed to the bus plus the
/// routing data of that operation. Events are created once, when the
/// operation is invoked, and never change afterwards.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum BusEvent {
    Sent {
        message: Message,
    },
    SentToSelf {
        message: Message,
    },
    SentToDestination {
        destination: String,
        message: Message,
    },
    Published {
        message: Message,
    },
    PublishedToTopic {
        topic: String,
        message: Message,
    },
    SentWithRoutingSlip {
        itinerary: Itinerary,
        message: Message,
    },
    Deferred {
        delay: Duration,
        message: Message,
    },
    DeferredToSelf {
        delay: Duration,
        message: Message,
    },
    DeferredToDestination {
        destination: String,
        delay: Duration,
        message: Message,
    },
}

impl BusEvent {
    /// Returns the operation that produced this event.
    pub fn kind(&self) -> OperationKind {
        match self {
            BusEvent::Sent { .. } => OperationKind::Sent,
            BusEvent::SentToSelf { .. } => OperationKind::SentToSelf,
            BusEvent::SentToDestination { .. } => OperationKind::SentToDestination,
            BusEvent::Published { .. } => OperationKind::Published,
            BusEvent::PublishedToTopic { .. } => OperationKind::PublishedToTopic,
            BusEvent::SentWithRoutingSlip { .. } => OperationKind::SentWithRoutingSlip,
            BusEvent::Deferred { .. } => OperationKind::Deferred,
            BusEvent::DeferredToSelf { .. } => OperationKind::DeferredToSelf,
            BusEvent::DeferredToDestination { .. } => OperationKind::DeferredToDestination,
        }
    }

    pub fn message(&self) -> &Message {
        match self {
            BusEvent::Sent { message }
            | BusEvent::SentToSelf { message }
            | BusEvent::SentToDestination { message, .. }
            | BusEvent::Published { message }
            | BusEvent::PublishedToTopic { message, .. }
            | BusEvent::SentWithRoutingSlip { message, .. }
            | BusEvent::Deferred { message, .. }
            | BusEvent::DeferredToSelf { message, .. }
            | BusEvent::DeferredToDestination { message, .. } => message,
        }
    }

    #[inline]
    pub fn id(&self) -> MessageId {
        self.message().id()
    }

    #[inline]
    pub fn headers(&self) -> Option<&Headers> {
        self.message().headers()
    }

    /// Destination address, for operations routed to an explicit queue.
    pub fn destination(&self) -> Option<&str> {
        match self {
            BusEvent::SentToDestination { destination, .. }
            | BusEvent::DeferredToDestination { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Topic name, for topic publishes.
    pub fn topic(&self) -> Option<&str> {
        match self {
            BusEvent::PublishedToTopic { topic, .. } => Some(topic),
            _ => None,
        }
    }

    /// Delivery delay, for deferred operations.
    pub fn delay(&self) -> Option<Duration> {
        match self {
            BusEvent::Deferred { delay, .. }
            | BusEvent::DeferredToSelf { delay, .. }
            | BusEvent::DeferredToDestination { delay, .. } => Some(*delay),
            _ => None,
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            BusEvent::SentWithRoutingSlip { itinerary, .. } => Some(itinerary),
            _ => None,
        }
    }

    /// Returns true if this event has the given kind and a payload of type `M`.
    pub fn is_a<M: 'static>(&self, kind: OperationKind) -> bool {
        self.kind() == kind && self.message().is::<M>()
    }

    /// Event name with the payload type, e.g. `MessageSent<(String, String)>`.
    pub fn display_name(&self) -> String {
        format!(
            "{}<{}>",
            self.kind().event_name(),
            self.message().payload_type_name()
        )
    }
}

impl Label for BusEvent {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.kind().event_name())
    }
}

use std::{fmt, sync::Arc, time::Duration};

use crate::{BusEvent, Headers, Itinerary, MessageId, OperationKind};

/// A recorded bus event whose payload is known to be of type `M`.
///
/// Items of a filtered view ([`MessageAssertions`](crate::MessageAssertions))
/// and of [`BusQuery::entries`](crate::BusQuery::entries). The typed payload
/// and the headers can be asserted on independently.
///
/// # Example
///
/// ```rust
/// use fakebus_assertions::{FakeBus, Should, headers};
///
/// let bus = FakeBus::new();
/// bus.send(("key".to_string(), "value".to_string()), Some(headers([("header", "header-value")])));
///
/// let entry = bus
///     .should()
///     .have_sent_messages::<(String, String)>()
///     .contain_single();
/// assert_eq!(entry.payload(), &("key".to_string(), "value".to_string()));
/// assert_eq!(entry.header("header"), Some("header-value"));
/// ```
pub struct MessageEntry<M> {
    event: BusEvent,
    payload: Arc<M>,
}

impl<M> Clone for MessageEntry<M> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            payload: Arc::clone(&self.payload),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for MessageEntry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageEntry")
            .field("kind", &self.kind())
            .field("payload", &self.payload)
            .field("headers", &self.headers())
            .finish_non_exhaustive()
    }
}

impl<M: Send + Sync + 'static> MessageEntry<M> {
    /// Returns `None` if the event's payload is not of type `M`.
    pub(crate) fn from_event(event: &BusEvent) -> Option<Self> {
        let payload = event.message().downcast::<M>()?;
        Some(Self {
            event: event.clone(),
            payload,
        })
    }
}

impl<M> MessageEntry<M> {
    /// Returns a reference to the typed payload.
    #[inline]
    pub fn payload(&self) -> &M {
        &self.payload
    }

    /// Returns a shared handle to the payload.
    #[inline]
    pub fn payload_arc(&self) -> Arc<M> {
        Arc::clone(&self.payload)
    }

    /// Returns the headers given with the operation, if any.
    #[inline]
    pub fn headers(&self) -> Option<&Headers> {
        self.event.headers()
    }

    #[inline]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.event.message().header(key)
    }

    #[inline]
    pub fn id(&self) -> MessageId {
        self.event.id()
    }

    #[inline]
    pub fn kind(&self) -> OperationKind {
        self.event.kind()
    }

    #[inline]
    pub fn destination(&self) -> Option<&str> {
        self.event.destination()
    }

    #[inline]
    pub fn topic(&self) -> Option<&str> {
        self.event.topic()
    }

    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        self.event.delay()
    }

    #[inline]
    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.event.itinerary()
    }

    /// Returns the underlying event.
    #[inline]
    pub fn event(&self) -> &BusEvent {
        &self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, headers};

    #[derive(Debug, PartialEq)]
    struct Invoice {
        amount: u32,
    }

    fn make_event() -> BusEvent {
        BusEvent::DeferredToDestination {
            destination: "billing".into(),
            delay: Duration::from_secs(3),
            message: Message::new(Invoice { amount: 42 }, Some(headers([("tenant", "acme")]))),
        }
    }

    #[test]
    fn from_event_requires_matching_payload_type() {
        let event = make_event();
        assert!(MessageEntry::<Invoice>::from_event(&event).is_some());
        assert!(MessageEntry::<u32>::from_event(&event).is_none());
    }

    #[test]
    fn payload_returns_typed_value() {
        let entry = MessageEntry::<Invoice>::from_event(&make_event()).unwrap();
        assert_eq!(entry.payload(), &Invoice { amount: 42 });
        assert_eq!(entry.payload_arc().amount, 42);
    }

    #[test]
    fn headers_come_from_event() {
        let entry = MessageEntry::<Invoice>::from_event(&make_event()).unwrap();
        assert_eq!(entry.headers(), Some(&headers([("tenant", "acme")])));
        assert_eq!(entry.header("tenant"), Some("acme"));
    }

    #[test]
    fn routing_data_comes_from_event() {
        let event = make_event();
        let entry = MessageEntry::<Invoice>::from_event(&event).unwrap();
        assert_eq!(entry.kind(), OperationKind::DeferredToDestination);
        assert_eq!(entry.destination(), Some("billing"));
        assert_eq!(entry.delay(), Some(Duration::from_secs(3)));
        assert_eq!(entry.topic(), None);
        assert!(entry.itinerary().is_none());
        assert_eq!(entry.id(), event.id());
    }

    #[test]
    fn clone_shares_payload() {
        let entry = MessageEntry::<Invoice>::from_event(&make_event()).unwrap();
        let clone = entry.clone();
        assert!(Arc::ptr_eq(&entry.payload_arc(), &clone.payload_arc()));
    }
}

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use crate::{BusEvent, BusQuery, BusRecords, Headers, Itinerary, Message, MessageId};

/// In-memory message bus double that records every operation.
///
/// Nothing is delivered anywhere. Each call appends one [`BusEvent`] to an
/// append-only log that tests inspect through [`Should::should`](crate::Should::should)
/// or [`query`](Self::query).
///
/// `FakeBus` is a cheap handle: clones share the same log, so one clone can be
/// handed to the code under test while the test keeps another.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use fakebus_assertions::{FakeBus, Itinerary, headers};
///
/// let bus = FakeBus::new();
/// bus.send("place order", None);
/// bus.publish("order placed", Some(headers([("tenant", "acme")])));
/// bus.defer(Duration::from_secs(30), "reminder", None);
/// bus.routing().send("billing", "invoice", None);
/// bus.routing().send_routing_slip(Itinerary::new(["a", "b"]), "slip", None);
/// bus.topics().publish("orders", "order placed", None);
///
/// assert_eq!(bus.len(), 6);
/// ```
#[derive(Clone, Default)]
pub struct FakeBus {
    events: Arc<Mutex<Vec<BusEvent>>>,
}

impl fmt::Debug for FakeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeBus")
            .field("events", &self.len())
            .finish()
    }
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Bus Operations ====================

    /// Send a command to the queue its type is routed to.
    pub fn send<M>(&self, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        self.record(|message| BusEvent::Sent { message }, message, headers)
    }

    /// Send a command to this endpoint's own input queue.
    pub fn send_local<M>(&self, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        self.record(|message| BusEvent::SentToSelf { message }, message, headers)
    }

    /// Publish an event to the subscribers of its type.
    pub fn publish<M>(&self, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        self.record(|message| BusEvent::Published { message }, message, headers)
    }

    /// Send a command that is delivered after `delay`.
    pub fn defer<M>(&self, delay: Duration, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        self.record(
            |message| BusEvent::Deferred { delay, message },
            message,
            headers,
        )
    }

    /// Send a command to this endpoint's own input queue, delivered after `delay`.
    pub fn defer_local<M>(&self, delay: Duration, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        self.record(
            |message| BusEvent::DeferredToSelf { delay, message },
            message,
            headers,
        )
    }

    /// Operations that address an explicit destination.
    pub fn routing(&self) -> Routing<'_> {
        Routing { bus: self }
    }

    /// Operations that address a named topic.
    pub fn topics(&self) -> Topics<'_> {
        Topics { bus: self }
    }

    // ==================== Recorded Log ====================

    /// Returns a snapshot of the log. Later operations do not affect it.
    pub fn events(&self) -> BusRecords {
        Arc::new(self.lock().clone())
    }

    /// Returns a query over a snapshot of the log.
    pub fn query(&self) -> BusQuery {
        BusQuery::new(self.events())
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Renders the log as a JSON array.
    ///
    /// Payloads are type-erased, so each message is rendered by its id,
    /// payload type name and headers.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BusEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record<M, F>(&self, make_event: F, payload: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
        F: FnOnce(Message) -> BusEvent,
    {
        let event = make_event(Message::new(payload, headers));
        let id = event.id();
        tracing::trace!(
            kind = %event.kind(),
            message_id = %id,
            payload_type = event.message().payload_type(),
            "message recorded"
        );
        self.lock().push(event);
        id
    }
}

/// Destination-addressed operations of a [`FakeBus`]. See [`FakeBus::routing`].
#[derive(Debug, Clone, Copy)]
pub struct Routing<'a> {
    bus: &'a FakeBus,
}

impl Routing<'_> {
    /// Send a command to the given destination address.
    pub fn send<M>(&self, destination: &str, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        let destination = destination.to_string();
        self.bus.record(
            |message| BusEvent::SentToDestination {
                destination,
                message,
            },
            message,
            headers,
        )
    }

    /// Send a command to the given destination address, delivered after `delay`.
    pub fn defer<M>(
        &self,
        destination: &str,
        delay: Duration,
        message: M,
        headers: Option<Headers>,
    ) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        let destination = destination.to_string();
        self.bus.record(
            |message| BusEvent::DeferredToDestination {
                destination,
                delay,
                message,
            },
            message,
            headers,
        )
    }

    /// Send a message that visits every destination of `itinerary` in order.
    pub fn send_routing_slip<M>(
        &self,
        itinerary: Itinerary,
        message: M,
        headers: Option<Headers>,
    ) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        self.bus.record(
            |message| BusEvent::SentWithRoutingSlip { itinerary, message },
            message,
            headers,
        )
    }
}

/// Topic-addressed operations of a [`FakeBus`]. See [`FakeBus::topics`].
#[derive(Debug, Clone, Copy)]
pub struct Topics<'a> {
    bus: &'a FakeBus,
}

impl Topics<'_> {
    /// Publish an event to the subscribers of the named topic.
    pub fn publish<M>(&self, topic: &str, message: M, headers: Option<Headers>) -> MessageId
    where
        M: Send + Sync + 'static,
    {
        let topic = topic.to_string();
        self.bus.record(
            |message| BusEvent::PublishedToTopic { topic, message },
            message,
            headers,
        )
    }
}

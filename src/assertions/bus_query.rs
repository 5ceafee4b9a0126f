use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{BusEvent, BusRecords, MessageId, OperationKind, assertions::MessageEntry};

type Filter = Rc<dyn Fn(&BusEvent) -> bool>;

/// A composable query builder for filtering and inspecting recorded bus events.
///
/// `BusQuery` provides a fluent API for filtering events by various criteria
/// (operation kind, payload type, headers, destination, topic) and terminal
/// operations for inspection (count, iteration, typed entries).
///
/// Filters never reorder: every terminal operation sees events in the order
/// they were recorded.
///
/// # Example
///
/// ```rust
/// use fakebus_assertions::{FakeBus, OperationKind, headers};
///
/// let bus = FakeBus::new();
/// bus.send("ship order 1", Some(headers([("tenant", "acme")])));
/// bus.send("ship order 2", None);
/// bus.publish("order shipped", Some(headers([("tenant", "acme")])));
///
/// let acme_commands = bus
///     .query()
///     .of_kind(OperationKind::Sent)
///     .with_header("tenant", "acme")
///     .count();
/// assert_eq!(acme_commands, 1);
/// ```
#[derive(Clone)]
pub struct BusQuery {
    events: BusRecords,
    filters: Vec<Filter>,
}

impl fmt::Debug for BusQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusQuery")
            .field("records", &self.events.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl BusQuery {
    pub fn new(events: BusRecords) -> Self {
        Self {
            events,
            filters: Vec::new(),
        }
    }

    fn add_filter<F>(&mut self, filter: F)
    where
        F: Fn(&BusEvent) -> bool + 'static,
    {
        self.filters.push(Rc::new(filter));
    }

    fn apply_filters(&self) -> Vec<&BusEvent> {
        self.events
            .iter()
            .filter(|e| self.filters.iter().all(|f| f(e)))
            .collect()
    }

    // ==================== Terminal Operations ====================

    /// Returns the number of events matching all filters.
    pub fn count(&self) -> usize {
        self.apply_filters().len()
    }

    /// Returns true if no events match the filters.
    pub fn is_empty(&self) -> bool {
        self.apply_filters().is_empty()
    }

    /// Returns true if any events match the filters.
    pub fn exists(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the first matching event, if any.
    pub fn first(&self) -> Option<BusEvent> {
        self.apply_filters().first().cloned().cloned()
    }

    /// Returns the last matching event, if any.
    pub fn last(&self) -> Option<BusEvent> {
        self.apply_filters().last().cloned().cloned()
    }

    /// Returns the nth matching event (0-indexed), if any.
    pub fn nth(&self, index: usize) -> Option<BusEvent> {
        self.apply_filters().get(index).cloned().cloned()
    }

    /// Collects all matching events in recording order.
    pub fn collect(&self) -> Vec<BusEvent> {
        self.apply_filters().into_iter().cloned().collect()
    }

    /// Returns the matching events whose payload is of type `M`, typed.
    ///
    /// Events carrying any other payload type are skipped, so this also
    /// acts as a payload type filter.
    pub fn entries<M>(&self) -> Vec<MessageEntry<M>>
    where
        M: Send + Sync + 'static,
    {
        self.apply_filters()
            .into_iter()
            .filter_map(MessageEntry::from_event)
            .collect()
    }

    /// Returns the operation kind of each matching event, in order.
    pub fn kinds(&self) -> Vec<OperationKind> {
        self.apply_filters().into_iter().map(BusEvent::kind).collect()
    }

    /// Returns a count of matching events grouped by operation kind.
    pub fn count_by_kind(&self) -> HashMap<OperationKind, usize> {
        let mut counts = HashMap::new();
        for event in self.apply_filters() {
            *counts.entry(event.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns true if all matching events satisfy the predicate.
    pub fn all(&self, predicate: impl Fn(&BusEvent) -> bool) -> bool {
        self.apply_filters().into_iter().all(predicate)
    }

    /// Returns true if any matching event satisfies the predicate.
    pub fn any(&self, predicate: impl Fn(&BusEvent) -> bool) -> bool {
        self.apply_filters().into_iter().any(predicate)
    }

    /// Returns true if any matching event has the given kind.
    pub fn has_kind(&self, kind: OperationKind) -> bool {
        self.any(|e| e.kind() == kind)
    }

    // ==================== Filter Operations ====================

    /// Filter to events produced by the given operation.
    pub fn of_kind(mut self, kind: OperationKind) -> Self {
        self.add_filter(move |e| e.kind() == kind);
        self
    }

    /// Filter to events whose payload is exactly of type `M`.
    pub fn of_payload<M: 'static>(mut self) -> Self {
        self.add_filter(|e| e.message().is::<M>());
        self
    }

    /// Filter to a specific message by ID.
    pub fn with_id(mut self, id: impl Into<MessageId>) -> Self {
        let id = id.into();
        self.add_filter(move |e| e.id() == id);
        self
    }

    /// Filter to events carrying the header `key` with the given value.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        self.add_filter(move |e| e.message().header(&key) == Some(value.as_str()));
        self
    }

    /// Filter to events carrying the header `key`, whatever its value.
    pub fn with_header_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.add_filter(move |e| e.message().header(&key).is_some());
        self
    }

    /// Filter to events addressed to the given destination.
    pub fn to_destination(mut self, destination: impl Into<String>) -> Self {
        let destination = destination.into();
        self.add_filter(move |e| e.destination() == Some(destination.as_str()));
        self
    }

    /// Filter to events published to the given topic.
    pub fn on_topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.add_filter(move |e| e.topic() == Some(topic.as_str()));
        self
    }

    /// Filter using a custom predicate on the event.
    pub fn matching<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&BusEvent) -> bool + 'static,
    {
        self.add_filter(predicate);
        self
    }

    /// Filter using a custom predicate on the payload.
    ///
    /// Events whose payload is not of type `M` never match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fakebus_assertions::FakeBus;
    ///
    /// let bus = FakeBus::new();
    /// bus.send(10u32, None);
    /// bus.send(250u32, None);
    ///
    /// let large = bus.query().matching_payload(|amount: &u32| *amount > 100).count();
    /// assert_eq!(large, 1);
    /// ```
    pub fn matching_payload<M, F>(mut self, predicate: F) -> Self
    where
        M: 'static,
        F: Fn(&M) -> bool + 'static,
    {
        self.add_filter(move |e| e.message().downcast_ref::<M>().is_some_and(&predicate));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Itinerary, Message, headers};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    struct PlaceOrder(u32);

    #[derive(Debug, PartialEq)]
    struct OrderPlaced(u32);

    fn message<M: Send + Sync + 'static>(payload: M) -> Message {
        Message::new(payload, None)
    }

    fn sample_records() -> BusRecords {
        Arc::new(vec![
            BusEvent::Sent {
                message: Message::new(PlaceOrder(1), Some(headers([("tenant", "acme")]))),
            },
            BusEvent::Published {
                message: Message::new(OrderPlaced(1), Some(headers([("tenant", "acme")]))),
            },
            BusEvent::SentToDestination {
                destination: "billing".into(),
                message: message(PlaceOrder(2)),
            },
            BusEvent::PublishedToTopic {
                topic: "orders".into(),
                message: message(OrderPlaced(2)),
            },
            BusEvent::Sent {
                message: message(PlaceOrder(3)),
            },
            BusEvent::DeferredToDestination {
                destination: "billing".into(),
                delay: Duration::from_secs(60),
                message: Message::new(PlaceOrder(4), Some(headers([("tenant", "globex")]))),
            },
            BusEvent::SentWithRoutingSlip {
                itinerary: Itinerary::new(["a", "b"]),
                message: message("slip"),
            },
        ])
    }

    #[test]
    fn count_returns_total_entries() {
        let query = BusQuery::new(sample_records());
        assert_eq!(query.count(), 7);
    }

    #[test]
    fn is_empty_returns_true_for_empty_records() {
        let query = BusQuery::new(Arc::new(vec![]));
        assert!(query.is_empty());
        assert!(!query.exists());
    }

    #[test]
    fn first_last_and_nth() {
        let query = BusQuery::new(sample_records());
        assert_eq!(query.first().map(|e| e.kind()), Some(OperationKind::Sent));
        assert_eq!(
            query.last().map(|e| e.kind()),
            Some(OperationKind::SentWithRoutingSlip)
        );
        assert_eq!(query.nth(1).map(|e| e.kind()), Some(OperationKind::Published));
        assert!(query.nth(100).is_none());
    }

    #[test]
    fn of_kind_preserves_recording_order() {
        let entries = BusQuery::new(sample_records())
            .of_kind(OperationKind::Sent)
            .entries::<PlaceOrder>();
        let ids: Vec<_> = entries.iter().map(|e| e.payload().0).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn of_payload_matches_exact_type() {
        let query = BusQuery::new(sample_records());
        assert_eq!(query.clone().of_payload::<OrderPlaced>().count(), 2);
        assert_eq!(query.clone().of_payload::<&str>().count(), 1);
        assert_eq!(query.of_payload::<String>().count(), 0);
    }

    #[test]
    fn entries_skip_other_payload_types() {
        let query = BusQuery::new(sample_records());
        assert_eq!(query.entries::<PlaceOrder>().len(), 4);
        assert_eq!(query.entries::<OrderPlaced>().len(), 2);
    }

    #[test]
    fn with_header_filters_by_value() {
        let query = BusQuery::new(sample_records());
        assert_eq!(query.clone().with_header("tenant", "acme").count(), 2);
        assert_eq!(query.clone().with_header("tenant", "globex").count(), 1);
        assert_eq!(query.with_header_key("tenant").count(), 3);
    }

    #[test]
    fn to_destination_and_on_topic() {
        let query = BusQuery::new(sample_records());
        assert_eq!(
            query.clone().to_destination("billing").kinds(),
            [
                OperationKind::SentToDestination,
                OperationKind::DeferredToDestination
            ]
        );
        assert_eq!(query.clone().on_topic("orders").count(), 1);
        assert_eq!(query.on_topic("payments").count(), 0);
    }

    #[test]
    fn with_id_filters_by_message_id() {
        let records = sample_records();
        let target = records[3].id();
        let query = BusQuery::new(records).with_id(target);
        assert_eq!(query.count(), 1);
        assert_eq!(query.first().and_then(|e| e.topic().map(String::from)), Some("orders".into()));
    }

    #[test]
    fn matching_payload_ignores_other_types() {
        let query = BusQuery::new(sample_records()).matching_payload(|p: &PlaceOrder| p.0 >= 2);
        assert_eq!(query.count(), 3);
    }

    #[test]
    fn matching_applies_custom_predicate() {
        let query = BusQuery::new(sample_records()).matching(|e| e.kind().is_publish());
        assert_eq!(query.count(), 2);
    }

    #[test]
    fn chained_filters_combine() {
        let query = BusQuery::new(sample_records())
            .of_kind(OperationKind::Sent)
            .with_header_key("tenant");
        assert_eq!(query.count(), 1);
    }

    #[test]
    fn count_by_kind_groups_events() {
        let counts = BusQuery::new(sample_records()).count_by_kind();
        assert_eq!(counts[&OperationKind::Sent], 2);
        assert_eq!(counts[&OperationKind::Published], 1);
        assert!(!counts.contains_key(&OperationKind::Deferred));
    }

    #[test]
    fn all_and_any() {
        let query = BusQuery::new(sample_records()).to_destination("billing");
        assert!(query.all(|e| e.destination() == Some("billing")));
        assert!(query.any(|e| e.delay().is_some()));
        assert!(!query.any(|e| e.topic().is_some()));
    }

    #[test]
    fn has_kind_respects_filters() {
        let query = BusQuery::new(sample_records());
        assert!(query.has_kind(OperationKind::SentWithRoutingSlip));
        assert!(!query.clone().of_payload::<PlaceOrder>().has_kind(OperationKind::Published));
        assert!(!query.has_kind(OperationKind::DeferredToSelf));
    }

    #[test]
    fn collect_returns_clones_in_order() {
        let query = BusQuery::new(sample_records()).of_payload::<OrderPlaced>();
        let kinds: Vec<_> = query.collect().iter().map(BusEvent::kind).collect();
        assert_eq!(
            kinds,
            [OperationKind::Published, OperationKind::PublishedToTopic]
        );
    }
}

use std::fmt;

use crate::{
    AssertionError, BusEvent, BusRecords, Label, OperationKind, Reason, Result,
    assertions::{BusQuery, MessageAssertions, classify, verdict::ensure},
    friendly_type_name,
};

/// Assertions over the full event log of a bus.
///
/// Obtained with [`Should::should`](crate::Should::should). Works on a snapshot
/// taken at that moment; operations recorded afterwards are not seen.
///
/// Every assertion panics with a descriptive message when it does not hold,
/// and otherwise returns `self` (count checks) or a [`MessageAssertions`]
/// scoped to one kind of message (filters), so checks can be chained.
/// The `try_*` variants return the [`AssertionError`] instead of panicking.
///
/// # Example
///
/// ```rust
/// use fakebus_assertions::{FakeBus, Should};
///
/// let bus = FakeBus::new();
/// bus.send("a message".to_string(), None);
/// bus.publish("an event".to_string(), None);
///
/// bus.should()
///     .have_message_count(2)
///     .have_sent_messages::<String>()
///     .satisfy_respectively(&[&|m| assert_eq!(m.payload(), "a message")]);
///
/// bus.should()
///     .have_published_messages::<String>()
///     .satisfy_respectively(&[&|m| assert_eq!(m.payload(), "an event")]);
/// ```
#[derive(Clone)]
pub struct BusAssertions {
    records: BusRecords,
}

impl fmt::Debug for BusAssertions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusAssertions")
            .field("records", &self.records.len())
            .finish()
    }
}

impl BusAssertions {
    pub fn new(records: BusRecords) -> Self {
        Self { records }
    }

    /// The events under assertion, in recording order.
    pub fn subject(&self) -> &[BusEvent] {
        &self.records
    }

    /// A query over the same snapshot.
    pub fn query(&self) -> BusQuery {
        BusQuery::new(self.records.clone())
    }

    // ==================== Count Assertions ====================

    pub fn try_have_message_count(&self, expected: usize, reason: Reason) -> Result {
        let actual = self.records.len();
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::MessageCount {
                expected,
                actual,
                reason,
            })
        }
    }

    /// Asserts that exactly `expected` messages were recorded.
    #[track_caller]
    pub fn have_message_count(self, expected: usize) -> Self {
        ensure(self.try_have_message_count(expected, Reason::none()));
        self
    }

    /// Like [`have_message_count`](Self::have_message_count), with a reason
    /// added to the failure message.
    ///
    /// ```rust,should_panic
    /// use fakebus_assertions::{FakeBus, Should};
    ///
    /// let bus = FakeBus::new();
    /// bus.send(1, None);
    /// // panics: "Expected bus to contain 2 messages because it should test-var but found 1"
    /// bus.should().have_message_count_because(2, "it should {0}", &[&"test-var"]);
    /// ```
    #[track_caller]
    pub fn have_message_count_because(
        self,
        expected: usize,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> Self {
        ensure(self.try_have_message_count(expected, Reason::new(template, args)));
        self
    }

    pub fn try_be_empty(&self, reason: Reason) -> Result {
        match self.records.len() {
            0 => Ok(()),
            actual => Err(AssertionError::NotEmpty { actual, reason }),
        }
    }

    /// Asserts that no messages were recorded.
    #[track_caller]
    pub fn be_empty(self) -> Self {
        ensure(self.try_be_empty(Reason::none()));
        self
    }

    #[track_caller]
    pub fn be_empty_because(self, template: &str, args: &[&dyn fmt::Display]) -> Self {
        ensure(self.try_be_empty(Reason::new(template, args)));
        self
    }

    pub fn try_not_be_empty(&self, reason: Reason) -> Result {
        if self.records.is_empty() {
            Err(AssertionError::Empty { reason })
        } else {
            Ok(())
        }
    }

    /// Asserts that at least one message was recorded.
    #[track_caller]
    pub fn not_be_empty(self) -> Self {
        ensure(self.try_not_be_empty(Reason::none()));
        self
    }

    #[track_caller]
    pub fn not_be_empty_because(self, template: &str, args: &[&dyn fmt::Display]) -> Self {
        ensure(self.try_not_be_empty(Reason::new(template, args)));
        self
    }

    // ==================== Per-Kind Filters ====================

    /// Returns the messages recorded by `kind` with a payload of type `M`.
    ///
    /// Fails when there are none.
    pub fn try_have_messages_of_kind<M>(&self, kind: OperationKind) -> Result<MessageAssertions<M>>
    where
        M: Send + Sync + 'static,
    {
        let entries = classify::<M>(&self.records, kind);
        if entries.is_empty() {
            return Err(AssertionError::NoMessagesOfType(format!(
                "{}<{}>",
                kind.label(),
                friendly_type_name::<M>()
            )));
        }
        Ok(MessageAssertions::new(entries))
    }

    /// Asserts that at least one message was recorded by `kind` with a payload
    /// of type `M`, and returns assertions scoped to those messages.
    #[track_caller]
    pub fn have_messages_of_kind<M>(&self, kind: OperationKind) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        ensure(self.try_have_messages_of_kind(kind))
    }

    /// Messages recorded by [`FakeBus::send`](crate::FakeBus::send).
    #[track_caller]
    pub fn have_sent_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::Sent)
    }

    /// Messages recorded by [`FakeBus::send_local`](crate::FakeBus::send_local).
    #[track_caller]
    pub fn have_sent_to_self_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::SentToSelf)
    }

    /// Messages recorded by [`Routing::send`](crate::Routing::send).
    #[track_caller]
    pub fn have_sent_to_destination_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::SentToDestination)
    }

    /// Messages recorded by [`FakeBus::publish`](crate::FakeBus::publish).
    #[track_caller]
    pub fn have_published_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::Published)
    }

    /// Messages recorded by [`Topics::publish`](crate::Topics::publish).
    #[track_caller]
    pub fn have_published_to_topic_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::PublishedToTopic)
    }

    /// Messages recorded by [`Routing::send_routing_slip`](crate::Routing::send_routing_slip).
    #[track_caller]
    pub fn have_sent_with_routing_slip_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::SentWithRoutingSlip)
    }

    /// Messages recorded by [`FakeBus::defer`](crate::FakeBus::defer).
    #[track_caller]
    pub fn have_deferred_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::Deferred)
    }

    /// Messages recorded by [`FakeBus::defer_local`](crate::FakeBus::defer_local).
    #[track_caller]
    pub fn have_deferred_to_self_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::DeferredToSelf)
    }

    /// Messages recorded by [`Routing::defer`](crate::Routing::defer).
    #[track_caller]
    pub fn have_deferred_to_destination_messages<M>(&self) -> MessageAssertions<M>
    where
        M: Send + Sync + 'static,
    {
        self.have_messages_of_kind(OperationKind::DeferredToDestination)
    }
}

use crate::{
    BusRecords, OperationKind,
    assertions::{BusQuery, MessageEntry},
};

/// Returns the events of `log` produced by `kind` whose payload is exactly `M`.
///
/// Recording order is preserved. An empty result is not an error here; the
/// assertion methods built on top of this decide how to report it.
///
/// ```rust
/// use fakebus_assertions::{FakeBus, OperationKind, classify};
///
/// let bus = FakeBus::new();
/// bus.send("a", None);
/// bus.publish("b", None);
/// bus.send(1u8, None);
/// bus.send("c", None);
///
/// let sent: Vec<_> = classify::<&str>(&bus.events(), OperationKind::Sent)
///     .iter()
///     .map(|e| *e.payload())
///     .collect();
/// assert_eq!(sent, ["a", "c"]);
/// ```
pub fn classify<M>(log: &BusRecords, kind: OperationKind) -> Vec<MessageEntry<M>>
where
    M: Send + Sync + 'static,
{
    BusQuery::new(log.clone()).of_kind(kind).entries::<M>()
}

use std::fmt;

use crate::{
    AssertionError, Failures, Indices, Reason, Result,
    assertions::{
        MessageEntry,
        verdict::{ensure, run_inspector},
    },
};

/// An inspector run against one item of a [`MessageAssertions`] view.
///
/// Inspectors assert with the usual `assert!` family; a panic inside an
/// inspector is collected and reported as part of the view's failure.
pub type Inspector<'a, M> = &'a dyn Fn(&MessageEntry<M>);

/// Assertions over the messages of one operation kind and payload type.
///
/// Returned by the per-kind filters of [`BusAssertions`](crate::BusAssertions),
/// which guarantee the view is not empty. Items keep their recording order.
///
/// # Example
///
/// ```rust
/// use fakebus_assertions::{FakeBus, Should, headers};
///
/// let bus = FakeBus::new();
/// bus.send(
///     ("key".to_string(), "value".to_string()),
///     Some(headers([("header", "header-value")])),
/// );
///
/// bus.should()
///     .have_sent_messages::<(String, String)>()
///     .satisfy_respectively(&[&|m| {
///         assert_eq!(m.headers(), Some(&headers([("header", "header-value")])));
///         assert_eq!(m.payload(), &("key".to_string(), "value".to_string()));
///     }]);
/// ```
pub struct MessageAssertions<M> {
    entries: Vec<MessageEntry<M>>,
}

impl<M> Clone for MessageAssertions<M> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for MessageAssertions<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageAssertions")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<M> MessageAssertions<M> {
    pub(crate) fn new(entries: Vec<MessageEntry<M>>) -> Self {
        Self { entries }
    }

    // ==================== Accessors ====================

    /// The items under assertion, in recording order.
    pub fn entries(&self) -> &[MessageEntry<M>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<MessageEntry<M>> {
        self.entries
    }

    pub fn first(&self) -> Option<&MessageEntry<M>> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the typed payloads.
    pub fn payloads(&self) -> impl Iterator<Item = &M> {
        self.entries.iter().map(MessageEntry::payload)
    }

    // ==================== Count Assertions ====================

    pub fn try_have_count(&self, expected: usize, reason: Reason) -> Result {
        let actual = self.entries.len();
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::ItemCount {
                expected,
                actual,
                reason,
            })
        }
    }

    /// Asserts that the view holds exactly `expected` items.
    #[track_caller]
    pub fn have_count(self, expected: usize) -> Self {
        ensure(self.try_have_count(expected, Reason::none()));
        self
    }

    #[track_caller]
    pub fn have_count_because(
        self,
        expected: usize,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> Self {
        ensure(self.try_have_count(expected, Reason::new(template, args)));
        self
    }

    pub fn try_contain_single(&self) -> Result<MessageEntry<M>> {
        match self.entries.as_slice() {
            [single] => Ok(single.clone()),
            entries => Err(AssertionError::NotSingle(entries.len())),
        }
    }

    /// Asserts that the view holds exactly one item and returns it.
    #[track_caller]
    pub fn contain_single(self) -> MessageEntry<M> {
        ensure(self.try_contain_single())
    }

    // ==================== Inspection ====================

    /// Runs one inspector per item, in order.
    ///
    /// Fails if the number of inspectors differs from the number of items, or
    /// if any inspector fails. Every inspector runs even after one fails, and
    /// all failures are reported together, by item index.
    pub fn try_satisfy_respectively(&self, inspectors: &[Inspector<'_, M>]) -> Result {
        self.try_have_count(inspectors.len(), Reason::none())?;

        let mut failures = Failures::default();
        for (index, (entry, inspector)) in self.entries.iter().zip(inspectors).enumerate() {
            if let Some(message) = run_inspector(entry, *inspector) {
                failures.push(index, message);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::InspectorsNotSatisfied(failures))
        }
    }

    #[track_caller]
    pub fn satisfy_respectively(self, inspectors: &[Inspector<'_, M>]) -> Self {
        ensure(self.try_satisfy_respectively(inspectors));
        self
    }

    /// Runs the same inspector against every item.
    pub fn try_all_satisfy(&self, inspector: impl Fn(&MessageEntry<M>)) -> Result {
        let mut failures = Failures::default();
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(message) = run_inspector(entry, &inspector) {
                failures.push(index, message);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::NotAllSatisfied(failures))
        }
    }

    #[track_caller]
    pub fn all_satisfy(self, inspector: impl Fn(&MessageEntry<M>)) -> Self {
        ensure(self.try_all_satisfy(inspector));
        self
    }

    // ==================== Predicates ====================

    pub fn try_contain_match(&self, predicate: impl Fn(&MessageEntry<M>) -> bool) -> Result {
        if self.entries.iter().any(predicate) {
            Ok(())
        } else {
            Err(AssertionError::NoMatch(self.entries.len()))
        }
    }

    /// Asserts that at least one item matches the predicate.
    #[track_caller]
    pub fn contain_match(self, predicate: impl Fn(&MessageEntry<M>) -> bool) -> Self {
        ensure(self.try_contain_match(predicate));
        self
    }

    pub fn try_only_contain(&self, predicate: impl Fn(&MessageEntry<M>) -> bool) -> Result {
        let mismatched: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !predicate(entry))
            .map(|(index, _)| index)
            .collect();

        if mismatched.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::NotAllMatch(Indices(mismatched)))
        }
    }

    /// Asserts that every item matches the predicate.
    #[track_caller]
    pub fn only_contain(self, predicate: impl Fn(&MessageEntry<M>) -> bool) -> Self {
        ensure(self.try_only_contain(predicate));
        self
    }
}

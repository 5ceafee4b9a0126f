use std::fmt;

use crate::Reason;

/// The single error type for every failed bus assertion.
///
/// Each variant corresponds to one failure template. The `Display` text is
/// the message a test sees when the assertion panics; the `try_*` assertion
/// methods return it instead so a caller can inspect it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    #[error("Expected bus to contain {expected} messages{reason} but found {actual}")]
    MessageCount {
        expected: usize,
        actual: usize,
        reason: Reason,
    },

    #[error("Expected bus to contain no messages{reason} but found {actual}")]
    NotEmpty { actual: usize, reason: Reason },

    #[error("Expected bus not to be empty{reason}")]
    Empty { reason: Reason },

    #[error("The bus contains no messages of type {0}")]
    NoMessagesOfType(String),

    #[error("Expected bus to contain exactly {expected} items{reason}, but found {actual}")]
    ItemCount {
        expected: usize,
        actual: usize,
        reason: Reason,
    },

    #[error("Expected bus to contain a single item, but found {0}")]
    NotSingle(usize),

    #[error("Expected bus to satisfy all inspectors, but some inspectors are not satisfied:{0}")]
    InspectorsNotSatisfied(Failures),

    #[error("Expected all items in bus to satisfy the inspector, but some items do not:{0}")]
    NotAllSatisfied(Failures),

    #[error("Expected bus to have an item matching the predicate, but none of {0} items did")]
    NoMatch(usize),

    #[error("Expected bus to only contain items matching the predicate, but items at {0} did not")]
    NotAllMatch(Indices),
}

/// Per-item failures collected from inspectors, keyed by item index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failures(Vec<(usize, String)>);

impl Failures {
    pub(crate) fn push(&mut self, index: usize, message: String) {
        self.0.push((index, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the `(index, message)` pairs in item order.
    pub fn iter(&self) -> impl Iterator<Item = &(usize, String)> {
        self.0.iter()
    }
}

impl fmt::Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, message) in &self.0 {
            write!(f, "\n  At index {index}:")?;
            for line in message.lines() {
                write!(f, "\n    {line}")?;
            }
        }
        Ok(())
    }
}

/// Item positions rendered as `{0, 2, 5}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indices(pub(crate) Vec<usize>);

impl Indices {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Indices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "}}")
    }
}

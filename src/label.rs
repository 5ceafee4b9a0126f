use std::borrow::Cow;

/// Human-readable label for a recorded bus operation.
///
/// Names the message type in assertion failure messages.
///
/// # Example
///
/// ```rust
/// use fakebus_assertions::{Label, OperationKind};
///
/// assert_eq!(OperationKind::Sent.label(), "MessageSent");
/// assert_eq!(OperationKind::PublishedToTopic.label(), "MessagePublishedToTopic");
/// ```
pub trait Label {
    /// Returns a human-readable label for this item.
    fn label(&self) -> Cow<'static, str>;
}

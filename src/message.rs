use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
    fmt,
    sync::Arc,
};

use crate::{MessageId, type_name::strip_paths};

/// Headers attached to a message at call time.
pub type Headers = BTreeMap<String, String>;

/// Builds [`Headers`] from key/value pairs.
///
/// ```rust
/// use fakebus_assertions::headers;
///
/// let h = headers([("content-type", "json"), ("tenant", "acme")]);
/// assert_eq!(h["tenant"], "acme");
/// ```
pub fn headers<I, K, V>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A payload handed to the bus, together with its optional headers.
///
/// The payload is type-erased and shared. Use [`downcast`](Self::downcast) or
/// [`downcast_ref`](Self::downcast_ref) to get the concrete value back, or
/// [`is`](Self::is) to check its type. Type checks are exact: a
/// `Vec<u8>` payload is never a `Vec<u16>`.
#[derive(Clone)]
pub struct Message {
    id: MessageId,
    payload: Arc<dyn Any + Send + Sync>,
    payload_type: &'static str,
    headers: Option<Headers>,
}

impl Message {
    pub fn new<M>(payload: M, headers: Option<Headers>) -> Self
    where
        M: Send + Sync + 'static,
    {
        Self {
            id: MessageId::new(),
            payload: Arc::new(payload),
            payload_type: std::any::type_name::<M>(),
            headers,
        }
    }

    #[inline]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the headers given when the message was recorded, if any.
    #[inline]
    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    /// Returns a single header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|h| h.get(key))
            .map(String::as_str)
    }

    /// Full type name of the payload, as reported by [`std::any::type_name`].
    #[inline]
    pub fn payload_type(&self) -> &'static str {
        self.payload_type
    }

    /// Payload type name without module paths, e.g. `Vec<String>`.
    pub fn payload_type_name(&self) -> String {
        strip_paths(self.payload_type)
    }

    pub fn payload_type_id(&self) -> TypeId {
        self.payload.as_ref().type_id()
    }

    /// Returns true if the payload is exactly of type `M`.
    #[inline]
    pub fn is<M: 'static>(&self) -> bool {
        self.payload.as_ref().is::<M>()
    }

    pub fn downcast_ref<M: 'static>(&self) -> Option<&M> {
        self.payload.as_ref().downcast_ref::<M>()
    }

    /// Returns a shared handle to the payload if it is of type `M`.
    pub fn downcast<M>(&self) -> Option<Arc<M>>
    where
        M: Send + Sync + 'static,
    {
        Arc::clone(&self.payload).downcast::<M>().ok()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id)
            .field("payload_type", &self.payload_type_name())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Message {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Message", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("payload_type", &self.payload_type_name())?;
        s.serialize_field("headers", &self.headers)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct OrderPlaced {
        id: u32,
    }

    #[test]
    fn downcast_returns_payload_of_matching_type() {
        let message = Message::new(OrderPlaced { id: 7 }, None);

        assert!(message.is::<OrderPlaced>());
        assert_eq!(message.downcast_ref::<OrderPlaced>(), Some(&OrderPlaced { id: 7 }));
        assert_eq!(message.downcast::<OrderPlaced>().map(|p| p.id), Some(7));
    }

    #[test]
    fn downcast_rejects_other_types() {
        let message = Message::new(vec![1u8, 2, 3], None);

        assert!(!message.is::<Vec<u16>>());
        assert!(message.downcast_ref::<Vec<u16>>().is_none());
        assert!(message.downcast::<OrderPlaced>().is_none());
        assert_eq!(message.payload_type_id(), TypeId::of::<Vec<u8>>());
    }

    #[test]
    fn header_lookup() {
        let message = Message::new("hi", Some(headers([("header", "header-value")])));

        assert_eq!(message.header("header"), Some("header-value"));
        assert_eq!(message.header("missing"), None);
        assert_eq!(message.headers().map(|h| h.len()), Some(1));
    }

    #[test]
    fn no_headers_is_none() {
        let message = Message::new(1u64, None);
        assert!(message.headers().is_none());
        assert_eq!(message.header("any"), None);
    }

    #[test]
    fn payload_type_name_strips_paths() {
        let message = Message::new((String::new(), String::new()), None);
        assert_eq!(message.payload_type_name(), "(String, String)");
    }

    #[test]
    fn clones_share_payload_and_id() {
        let message = Message::new(OrderPlaced { id: 1 }, None);
        let clone = message.clone();
        assert_eq!(message.id(), clone.id());

        let a = message.downcast::<OrderPlaced>().unwrap();
        let b = clone.downcast::<OrderPlaced>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn debug_shows_payload_type() {
        let message = Message::new(OrderPlaced { id: 1 }, None);
        let debug = format!("{message:?}");
        assert!(debug.contains("OrderPlaced"));
        assert!(!debug.contains("message::tests"));
    }
}

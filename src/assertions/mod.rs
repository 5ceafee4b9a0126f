//! Fluent assertions over the event log recorded by a [`FakeBus`](crate::FakeBus).
//!
//! # Example
//!
//! ```rust
//! use fakebus_assertions::{FakeBus, Itinerary, OperationKind, Should, headers};
//!
//! let bus = FakeBus::new();
//! bus.send(("key".to_string(), "value".to_string()), Some(headers([("header", "header-value")])));
//! bus.routing().send_routing_slip(Itinerary::new(["a", "b"]), 3u32, None);
//!
//! // Count checks chain on the whole log
//! bus.should().not_be_empty().have_message_count(2);
//!
//! // Filters narrow to one operation kind and payload type
//! bus.should()
//!     .have_sent_with_routing_slip_messages::<u32>()
//!     .satisfy_respectively(&[&|m| {
//!         assert_eq!(m.itinerary().map(|i| i.destinations().len()), Some(2));
//!     }]);
//!
//! // Or query the log directly
//! let sent = bus.query().of_kind(OperationKind::Sent).count();
//! assert_eq!(sent, 1);
//! ```
//!
//! # Note
//!
//! [`BusQuery`] uses `Rc` internally and is `!Send`. It is meant for
//! single-threaded test code.

mod bus_assertions;
mod bus_query;
mod classify;
mod message_assertions;
mod message_entry;
mod should;
pub(crate) mod verdict;

pub use bus_assertions::BusAssertions;
pub use bus_query::BusQuery;
pub use classify::classify;
pub use message_assertions::{Inspector, MessageAssertions};
pub use message_entry::MessageEntry;
pub use should::Should;

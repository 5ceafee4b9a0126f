#![cfg_attr(docsrs, feature(doc_cfg))]
//! # fakebus-assertions
//!
//! Fluent assertions for the event log of an in-memory fake message bus.
//!
//! Code under test talks to a [`FakeBus`] the way it would talk to a real
//! message bus: it sends, publishes and defers messages. The bus does not
//! deliver anything; it records every operation as a [`BusEvent`] in an
//! append-only log. Tests then assert on that log through [`Should`].
//!
//! ## Quick Start
//!
//! ```rust
//! use fakebus_assertions::{FakeBus, Should, headers};
//!
//! let bus = FakeBus::new();
//! bus.send(
//!     ("key".to_string(), "value".to_string()),
//!     Some(headers([("header", "header-value")])),
//! );
//!
//! bus.should()
//!     .have_message_count(1)
//!     .have_sent_messages::<(String, String)>()
//!     .satisfy_respectively(&[&|m| {
//!         assert_eq!(m.header("header"), Some("header-value"));
//!         assert_eq!(m.payload(), &("key".to_string(), "value".to_string()));
//!     }]);
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FakeBus`] | Records bus operations instead of delivering them |
//! | [`BusEvent`] | One recorded operation, tagged by [`OperationKind`] |
//! | [`Message`] | The payload, headers and id carried by an event |
//! | [`Should`] | Entry point for assertions on a bus or a log snapshot |
//! | [`BusAssertions`] | Count checks and per-kind filters over the whole log |
//! | [`MessageAssertions`] | Inspectors and predicates over one kind of message |
//! | [`BusQuery`] | Chainable filters for ad-hoc queries on the log |
//! | [`AssertionError`] | Failure returned by the `try_*` assertion variants |
//!
//! ## Operation Kinds
//!
//! Each filter matches one [`OperationKind`] and an exact payload type:
//!
//! | Bus operation | Kind | Filter |
//! |---------------|------|--------|
//! | [`FakeBus::send`] | `Sent` | `have_sent_messages` |
//! | [`FakeBus::send_local`] | `SentToSelf` | `have_sent_to_self_messages` |
//! | [`Routing::send`] | `SentToDestination` | `have_sent_to_destination_messages` |
//! | [`FakeBus::publish`] | `Published` | `have_published_messages` |
//! | [`Topics::publish`] | `PublishedToTopic` | `have_published_to_topic_messages` |
//! | [`Routing::send_routing_slip`] | `SentWithRoutingSlip` | `have_sent_with_routing_slip_messages` |
//! | [`FakeBus::defer`] | `Deferred` | `have_deferred_messages` |
//! | [`FakeBus::defer_local`] | `DeferredToSelf` | `have_deferred_to_self_messages` |
//! | [`Routing::defer`] | `DeferredToDestination` | `have_deferred_to_destination_messages` |
//!
//! ## Features
//!
//! - **`serde`** - JSON serialization of the recorded log (`FakeBus::to_json()`)

mod bus_event;
mod error;
mod fake_bus;
mod itinerary;
mod label;
mod message;
mod message_id;
mod operation_kind;
mod reason;
mod type_name;

pub mod assertions;

pub use assertions::{
    BusAssertions, BusQuery, Inspector, MessageAssertions, MessageEntry, Should, classify,
};
pub use bus_event::BusEvent;
pub use error::{AssertionError, Failures, Indices};
pub use fake_bus::{FakeBus, Routing, Topics};
pub use itinerary::Itinerary;
pub use label::Label;
pub use message::{Headers, Message, headers};
pub use message_id::MessageId;
pub use operation_kind::OperationKind;
pub use reason::Reason;
pub use type_name::friendly_type_name;

/// Convenience alias for `Result<T, AssertionError>`.
pub type Result<T = (), E = AssertionError> = std::result::Result<T, E>;

/// A shared, immutable snapshot of a bus's event log.
pub type BusRecords = std::sync::Arc<Vec<BusEvent>>;

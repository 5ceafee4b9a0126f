use std::sync::Arc;

use crate::{BusEvent, BusRecords, FakeBus, assertions::BusAssertions};

/// Entry point for fluent assertions on a recorded event log.
///
/// Implemented for the bus itself and for any snapshot of its log. Calling
/// `should()` captures the log as it is at that moment; later operations on
/// the bus are not seen by the returned [`BusAssertions`].
///
/// ```rust
/// use fakebus_assertions::{FakeBus, Should};
///
/// let bus = FakeBus::new();
/// bus.publish(7u32, None);
///
/// bus.should().have_message_count(1).have_published_messages::<u32>();
/// bus.events().should().not_be_empty();
/// ```
pub trait Should {
    fn should(&self) -> BusAssertions;
}

impl Should for FakeBus {
    fn should(&self) -> BusAssertions {
        BusAssertions::new(self.events())
    }
}

impl Should for BusRecords {
    fn should(&self) -> BusAssertions {
        BusAssertions::new(Arc::clone(self))
    }
}

impl Should for [BusEvent] {
    fn should(&self) -> BusAssertions {
        BusAssertions::new(Arc::new(self.to_vec()))
    }
}

/// The route of a message sent with a routing slip.
///
/// Lists the destination addresses the message visits in order, and whether
/// it returns to the sender after the last one.
///
/// ```rust
/// use fakebus_assertions::Itinerary;
///
/// let itinerary = Itinerary::new(["billing", "shipping"]).return_to_sender();
/// assert_eq!(itinerary.destinations(), ["billing", "shipping"]);
/// assert!(itinerary.returns_to_sender());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    destinations: Vec<String>,
    return_to_sender: bool,
}

impl Itinerary {
    pub fn new<I, S>(destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            destinations: destinations.into_iter().map(Into::into).collect(),
            return_to_sender: false,
        }
    }

    /// Route the message back to the sender after the last destination.
    pub fn return_to_sender(mut self) -> Self {
        self.return_to_sender = true;
        self
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    pub fn returns_to_sender(&self) -> bool {
        self.return_to_sender
    }

    /// Returns true if the itinerary has no destinations.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

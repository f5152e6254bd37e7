use parking_lot::Mutex;
use tether_core::SessionDescription;

/// A stored value and the slot version it was written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

#[derive(Default)]
struct SlotInner {
    offer: Option<Versioned<SessionDescription>>,
    answer: Option<Versioned<SessionDescription>>,
    last_version: u64,
}

impl SlotInner {
    fn next_version(&mut self) -> u64 {
        self.last_version += 1;
        self.last_version
    }
}

/// Single offer / single answer storage behind the polling endpoints.
///
/// Every write gets a fresh version, so a poller can tell a replaced answer
/// from an unchanged one even when the payloads happen to be equal. Storing an
/// offer always drops the answer.
#[derive(Default)]
pub struct SessionSlot {
    inner: Mutex<SlotInner>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offer(&self, offer: SessionDescription) -> u64 {
        let mut inner = self.inner.lock();
        let version = inner.next_version();
        inner.offer = Some(Versioned {
            version,
            value: offer,
        });
        inner.answer = None;
        version
    }

    /// Stores an answer as-is. It is assumed to answer the current offer.
    pub fn set_answer(&self, answer: SessionDescription) -> u64 {
        let mut inner = self.inner.lock();
        let version = inner.next_version();
        inner.answer = Some(Versioned {
            version,
            value: answer,
        });
        version
    }

    pub fn offer(&self) -> Option<Versioned<SessionDescription>> {
        self.inner.lock().offer.clone()
    }

    pub fn answer(&self) -> Option<Versioned<SessionDescription>> {
        self.inner.lock().answer.clone()
    }

    pub fn is_empty(&self) -> bool {
        let inner = self.inner.lock();
        inner.offer.is_none() && inner.answer.is_none()
    }
}

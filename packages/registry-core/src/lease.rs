//! Scoped borrow of a payload.

use std::sync::Arc;

use crate::coordinator::CoordinatorInner;
use crate::descriptor::Descriptor;
use crate::identifier::Identifier;

/// A scoped borrow of a map file's payload.
///
/// Leases are move-only: the payload slot is exclusive, owned either by a
/// `Lease` or by the payload cache, never both. A "null" lease (returned
/// when a region is unknown, a descriptor is not up to date, or a stale
/// registration is rejected) carries no payload and does nothing on drop.
/// Dropping an active lease returns the payload to the cache, or destroys
/// it if the descriptor was marked for deregistration while the lease was
/// outstanding.
pub struct Lease<P: Send + 'static> {
    inner: Option<LeaseInner<P>>,
}

struct LeaseInner<P: Send + 'static> {
    coordinator: Arc<CoordinatorInner<P>>,
    id: Identifier,
    payload: Option<P>,
}

impl<P: Send + 'static> Lease<P> {
    pub(crate) fn null() -> Self {
        Self { inner: None }
    }

    pub(crate) fn new(coordinator: Arc<CoordinatorInner<P>>, id: Identifier, payload: Option<P>) -> Self {
        Self {
            inner: Some(LeaseInner { coordinator, id, payload }),
        }
    }

    /// `true` iff this lease carries a payload.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(&self.inner, Some(i) if i.payload.is_some())
    }

    /// The identifier this lease was acquired for, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&Identifier> {
        self.inner.as_ref().map(|i| &i.id)
    }

    /// Borrows the descriptor this lease refers to, if any.
    #[must_use]
    pub fn descriptor(&self) -> Option<&Descriptor> {
        self.inner.as_ref().map(|i| i.id.descriptor())
    }

    /// Borrows the leased payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        self.inner.as_ref().and_then(|i| i.payload.as_ref())
    }
}

impl<P: Send + 'static> Drop for Lease<P> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.coordinator.release(inner.id, inner.payload);
        }
    }
}

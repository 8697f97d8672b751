//! The facade combining Registry + Cache + Lease issuance under one lock.
//!
//! [`Coordinator`] is the only entry point an embedder uses. It owns a
//! single `parking_lot::Mutex` guarding both the region-name history map
//! and the payload cache, and implements the state-machine transitions
//! described in the design notes. The version probe, payload factory, and
//! on-deregistered hook run while this lock is held -- callers must not
//! re-enter the `Coordinator` from inside one of those callbacks.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::PayloadCache;
use crate::callbacks::{DeregisterHook, PayloadFactory, VersionProbe};
use crate::descriptor::{classify, Descriptor, Status};
use crate::error::RegistryError;
use crate::file::{LocalFileDescriptor, ProbedMetadata};
use crate::identifier::Identifier;
use crate::lease::Lease;

struct CoordinatorState<P: Send + 'static> {
    history: HashMap<String, Vec<Arc<Descriptor>>>,
    cache: PayloadCache<P>,
}

impl<P: Send + 'static> CoordinatorState<P> {
    fn current(&self, region_name: &str) -> Option<Arc<Descriptor>> {
        self.history.get(region_name).and_then(|v| v.last().cloned())
    }

    fn remove(&mut self, desc: &Arc<Descriptor>) {
        if let Some(v) = self.history.get_mut(&desc.region_name) {
            v.retain(|d| !Arc::ptr_eq(d, desc));
        }
    }
}

/// Internal shared state behind the public [`Coordinator`] handle. Split out
/// so a [`Lease`] can hold a reference back to it without also threading the
/// probe/factory/hook generic parameters through `Lease`'s type.
pub(crate) struct CoordinatorInner<P: Send + 'static> {
    probe: Arc<dyn VersionProbe>,
    factory: Arc<dyn PayloadFactory<Payload = P>>,
    hook: Arc<dyn DeregisterHook>,
    capacity: usize,
    state: parking_lot::Mutex<CoordinatorState<P>>,
}

impl<P: Send + 'static> CoordinatorInner<P> {
    fn internal_register(
        state: &mut CoordinatorState<P>,
        file: LocalFileDescriptor,
        metadata: ProbedMetadata,
    ) -> Arc<Descriptor> {
        let region = file.region_name.clone();
        let desc = Descriptor::new(file, metadata.min_scale, metadata.max_scale);
        state.history.entry(region).or_default().push(desc.clone());
        desc
    }

    /// Returns `true` if deregistration completed immediately, `false` if
    /// deferred because leases were outstanding.
    fn internal_deregister(&self, state: &mut CoordinatorState<P>, desc: &Arc<Descriptor>) -> bool {
        let lease_count = desc.state.lock().lease_count;
        if lease_count == 0 {
            desc.state.lock().status = Status::Deregistered;
            state.remove(desc);
            self.hook.on_deregistered(&desc.source_file);
            true
        } else {
            desc.state.lock().status = Status::MarkedForDeregister;
            false
        }
    }

    /// Acquires a lease for `id`. Precondition enforced internally: if the
    /// descriptor is not up to date, returns a null lease rather than an
    /// error.
    fn acquire_locked(
        self: &Arc<Self>,
        state: &mut CoordinatorState<P>,
        id: Identifier,
    ) -> Result<Lease<P>, RegistryError> {
        let desc = id.0.clone();
        if !desc.is_up_to_date() {
            return Ok(Lease::null());
        }

        desc.state.lock().lease_count += 1;

        if let Some(payload) = state.cache.take(&id) {
            return Ok(Lease::new(self.clone(), id, Some(payload)));
        }

        match self.factory.open(&desc.source_file) {
            Ok(payload) => Ok(Lease::new(self.clone(), id, Some(payload))),
            Err(source) => {
                // Compensate the increment made above before the error escapes.
                desc.state.lock().lease_count -= 1;
                Err(RegistryError::PayloadFactory {
                    region: desc.region_name.clone(),
                    source,
                })
            }
        }
    }

    pub(crate) fn release(&self, id: Identifier, payload: Option<P>) {
        let Some(payload) = payload else { return };
        let desc = id.0.clone();
        let mut state = self.state.lock();

        let (should_deregister, up_to_date) = {
            let mut mstate = desc.state.lock();
            debug_assert!(mstate.lease_count > 0, "release with zero lease_count");
            mstate.lease_count = mstate.lease_count.saturating_sub(1);
            let should_deregister =
                mstate.lease_count == 0 && mstate.status == Status::MarkedForDeregister;
            (should_deregister, mstate.status == Status::Registered)
        };

        if should_deregister {
            let completed = self.internal_deregister(&mut state, &desc);
            debug_assert!(completed, "deregister deferred twice at zero lease count");
        } else if up_to_date {
            state.cache.put(id, payload);
        }
        // Otherwise the descriptor is already `Deregistered` (a concurrent
        // `deregister_all` finished it while this lease was outstanding) --
        // the payload is simply dropped.
    }
}

impl<P: Send + 'static> Drop for CoordinatorInner<P> {
    fn drop(&mut self) {
        let cache_len = self.state.lock().cache.len();
        debug_assert_eq!(
            cache_len, 0,
            "Coordinator dropped with a non-empty payload cache -- call cleanup() first"
        );
    }
}

/// Registry and handle-lifecycle manager for versioned, on-disk map data
/// files.
///
/// Cheap to clone: cloning shares the same underlying lock and state, so
/// embedders typically hold one `Coordinator` and clone it per worker
/// thread rather than wrapping it in an extra `Arc`.
pub struct Coordinator<P: Send + 'static> {
    inner: Arc<CoordinatorInner<P>>,
}

impl<P: Send + 'static> Clone for Coordinator<P> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<P: Send + 'static> Coordinator<P> {
    /// Builds a coordinator with a fixed payload-cache capacity and the
    /// three embedder-supplied callbacks.
    pub fn new(
        capacity: usize,
        probe: impl VersionProbe + 'static,
        factory: impl PayloadFactory<Payload = P> + 'static,
        hook: impl DeregisterHook + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                probe: Arc::new(probe),
                factory: Arc::new(factory),
                hook: Arc::new(hook),
                capacity,
                state: parking_lot::Mutex::new(CoordinatorState {
                    history: HashMap::new(),
                    cache: PayloadCache::new(capacity),
                }),
            }),
        }
    }

    /// Configured payload-cache capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Registers a local file descriptor, returning a lease on the
    /// resulting (or pre-existing) descriptor and whether a new descriptor
    /// was created.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidFile`] if the version probe fails or
    /// yields scale metadata that does not classify -- nothing is mutated
    /// in that case. Returns [`RegistryError::PayloadFactory`] if the
    /// payload factory fails while materializing the lease this call
    /// returns; in that case the new (or superseding) descriptor has
    /// already been registered and stays registered (and, on an upgrade,
    /// the superseded descriptor has already been deregistered) -- only
    /// the lease-count increment made for this call is rolled back.
    pub fn register(&self, file: LocalFileDescriptor) -> Result<(Lease<P>, bool), RegistryError> {
        if file.region_name.is_empty() {
            return Err(RegistryError::InvalidFile {
                region: String::new(),
                reason: "region name must not be empty".to_string(),
            });
        }

        let metadata = self.inner.probe.probe(&file)?;
        if classify(metadata.min_scale, metadata.max_scale).is_none() {
            return Err(RegistryError::InvalidFile {
                region: file.region_name,
                reason: format!(
                    "scale range ({}, {}) does not classify as Country/World/Coast",
                    metadata.min_scale, metadata.max_scale
                ),
            });
        }

        let region = file.region_name.clone();
        let mut state = self.inner.state.lock();
        let current = state.current(&region);

        match current {
            Some(current_desc) => match file.version.cmp(&current_desc.version) {
                Ordering::Greater => {
                    self.inner.internal_deregister(&mut state, &current_desc);
                    state.cache.purge(&Identifier::new(current_desc));
                    let desc = CoordinatorInner::internal_register(&mut state, file, metadata);
                    let id = Identifier::new(desc);
                    let lease = self.inner.acquire_locked(&mut state, id)?;
                    Ok((lease, true))
                }
                Ordering::Equal => {
                    current_desc.state.lock().status = Status::Registered;
                    let id = Identifier::new(current_desc);
                    let lease = self.inner.acquire_locked(&mut state, id)?;
                    Ok((lease, false))
                }
                Ordering::Less => {
                    tracing::warn!(
                        region = %region,
                        incoming_version = file.version,
                        current_version = current_desc.version,
                        "rejecting registration of a stale map file"
                    );
                    Ok((Lease::null(), false))
                }
            },
            None => {
                let desc = CoordinatorInner::internal_register(&mut state, file, metadata);
                let id = Identifier::new(desc);
                let lease = self.inner.acquire_locked(&mut state, id)?;
                Ok((lease, true))
            }
        }
    }

    /// Deregisters the current descriptor for `region_name`, if any.
    ///
    /// Purges any cached payload for it regardless of whether the
    /// deregistration completed immediately or was deferred. Returns `true`
    /// if it completed immediately (or there was nothing to deregister),
    /// `false` if it was deferred pending outstanding leases.
    pub fn deregister(&self, region_name: &str) -> bool {
        let mut state = self.inner.state.lock();
        let Some(desc) = state.current(region_name) else {
            return true;
        };
        let completed = self.inner.internal_deregister(&mut state, &desc);
        state.cache.purge(&Identifier::new(desc));
        completed
    }

    /// Deregisters every region's current and superseded descriptors,
    /// iterating over a snapshot of each region's history so that
    /// mutations performed by `internal_deregister` do not disturb the
    /// iteration. Clears the payload cache once all regions are processed.
    pub fn deregister_all(&self) {
        let mut state = self.inner.state.lock();
        let regions: Vec<String> = state.history.keys().cloned().collect();
        for region in regions {
            let snapshot: Vec<Arc<Descriptor>> =
                state.history.get(&region).cloned().unwrap_or_default();
            for desc in snapshot {
                self.inner.internal_deregister(&mut state, &desc);
            }
        }
        state.cache.clear();
    }

    /// `true` iff the current descriptor for `region_name` exists and is
    /// `Registered`.
    #[must_use]
    pub fn is_loaded(&self, region_name: &str) -> bool {
        let state = self.inner.state.lock();
        state
            .current(region_name)
            .is_some_and(|d| d.status() == Status::Registered)
    }

    /// Returns the current (last) descriptor for every non-empty history
    /// sequence. Order is unspecified.
    #[must_use]
    pub fn enumerate_descriptors(&self) -> Vec<Arc<Descriptor>> {
        let state = self.inner.state.lock();
        state.history.values().filter_map(|v| v.last().cloned()).collect()
    }

    /// Resolves the current [`Identifier`] for a region, or `None` if the
    /// region is unknown or its history is empty.
    #[must_use]
    pub fn resolve(&self, region_name: &str) -> Option<Identifier> {
        let state = self.inner.state.lock();
        state.current(region_name).map(Identifier::new)
    }

    /// Resolves the current descriptor for `region_name` and acquires a
    /// lease on it. Equivalent to [`Coordinator::resolve`] followed by
    /// lease acquisition. Returns a null lease (never an error) if the
    /// region is unknown or its current descriptor is not up to date.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PayloadFactory`] if the payload factory
    /// fails while materializing the payload.
    pub fn lease_by_region(&self, region_name: &str) -> Result<Lease<P>, RegistryError> {
        let mut state = self.inner.state.lock();
        let Some(desc) = state.current(region_name) else {
            return Ok(Lease::null());
        };
        self.inner.acquire_locked(&mut state, Identifier::new(desc))
    }

    /// Acquires a lease for an already-resolved [`Identifier`]. Returns a
    /// null lease if the descriptor is not up to date.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PayloadFactory`] if the payload factory
    /// fails while materializing the payload.
    pub fn acquire(&self, id: Identifier) -> Result<Lease<P>, RegistryError> {
        let mut state = self.inner.state.lock();
        self.inner.acquire_locked(&mut state, id)
    }

    /// Drops all idle payloads from the cache. Does not affect descriptors
    /// or lease counts.
    pub fn clear_cache(&self) {
        self.inner.state.lock().cache.clear();
    }

    /// Equivalent to [`Coordinator::clear_cache`]. Embedders must call this
    /// (or otherwise ensure the cache is empty) before the last
    /// `Coordinator` handle is dropped -- see the teardown discipline in
    /// the design notes.
    pub fn cleanup(&self) {
        self.clear_cache();
    }

    /// Number of idle payloads currently held in the cache. Exposed for
    /// tests exercising the LRU bound.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.inner.state.lock().cache.len()
    }
}

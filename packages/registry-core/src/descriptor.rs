//! Per-map-file metadata record.
//!
//! A [`Descriptor`] is the in-memory record for one registered map file.
//! Its identity fields (region name, version, source file, scale range) are
//! fixed at creation; its mutable fields (status, lease count) are touched
//! only while the owning [`Coordinator`](crate::coordinator::Coordinator)'s
//! lock is held.

use crate::file::LocalFileDescriptor;

/// Registration status of a [`Descriptor`].
///
/// `Registered` is the only status from which a payload may be leased.
/// `MarkedForDeregister` is a deferred-deregistration holding pattern,
/// entered only while leases are outstanding at the time deregistration was
/// requested. `Deregistered` is terminal: the descriptor is removed from
/// the registry the moment it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Registered,
    MarkedForDeregister,
    Deregistered,
}

/// Coarse classification of a map file, derived purely from its scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Country,
    World,
    Coast,
}

/// Maximum scale carried by a world (low-resolution overview) map file.
pub const UPPER_WORLD_SCALE: i32 = 10;

/// Maximum scale carried by a coastline backdrop map file.
pub const UPPER_SCALE: i32 = 17;

/// Classifies a scale range, or `None` if it does not correspond to any
/// known map file kind. A descriptor whose range classifies to `None` is
/// invalid and registration of it must fail.
#[must_use]
pub fn classify(min_scale: i32, max_scale: i32) -> Option<Classification> {
    if min_scale > 0 {
        Some(Classification::Country)
    } else if max_scale == UPPER_WORLD_SCALE {
        Some(Classification::World)
    } else if max_scale == UPPER_SCALE {
        Some(Classification::Coast)
    } else {
        None
    }
}

/// Mutable state of a [`Descriptor`].
///
/// Lives behind a `parking_lot::Mutex` purely so the descriptor can be
/// shared (via `Arc`) between the Registry, the payload cache, and
/// outstanding Leases. Every write happens from inside a Coordinator method
/// that already holds the Coordinator's own state lock, so this inner lock
/// is never contended -- see the design notes on lock granularity.
#[derive(Debug)]
pub(crate) struct MutableState {
    pub status: Status,
    pub lease_count: u32,
}

/// In-memory metadata record for one registered map file.
#[derive(Debug)]
pub struct Descriptor {
    /// Stable region-name key, unique within one history chain.
    pub region_name: String,
    /// Monotonic version; higher means newer.
    pub version: u64,
    /// The caller-supplied file this descriptor was registered from.
    pub source_file: LocalFileDescriptor,
    pub min_scale: i32,
    pub max_scale: i32,
    pub(crate) state: parking_lot::Mutex<MutableState>,
}

impl Descriptor {
    pub(crate) fn new(
        source_file: LocalFileDescriptor,
        min_scale: i32,
        max_scale: i32,
    ) -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            region_name: source_file.region_name.clone(),
            version: source_file.version,
            source_file,
            min_scale,
            max_scale,
            state: parking_lot::Mutex::new(MutableState {
                status: Status::Registered,
                lease_count: 0,
            }),
        })
    }

    /// `true` iff `status == Registered`. Callers may not materialize
    /// payloads for descriptors that are not up to date.
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.state.lock().status == Status::Registered
    }

    /// Current registration status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.state.lock().status
    }

    /// Number of outstanding leases against this descriptor.
    #[must_use]
    pub fn lease_count(&self) -> u32 {
        self.state.lock().lease_count
    }

    /// Scale-range classification of this descriptor.
    #[must_use]
    pub fn classification(&self) -> Option<Classification> {
        classify(self.min_scale, self.max_scale)
    }
}

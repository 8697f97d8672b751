//! Extension points supplied by the embedder.
//!
//! These three traits are the registry core's only dependency on the
//! outside world: parsing map-file contents, the physical I/O that opens a
//! file, and any notification side effects are all out of scope for the
//! core itself (see the design notes) and are pushed out here.

use crate::error::RegistryError;
use crate::file::{LocalFileDescriptor, ProbedMetadata};

/// Extracts version/scale metadata from a local file.
///
/// Implementations return `Err` for unreadable or malformed files. The
/// Coordinator never mutates the registry when a probe fails.
pub trait VersionProbe: Send + Sync {
    fn probe(&self, file: &LocalFileDescriptor) -> Result<ProbedMetadata, RegistryError>;
}

/// Materializes a map file's in-memory payload.
///
/// May perform arbitrary I/O. The registry core currently invokes this
/// while holding its lock -- see the design notes on the factory-under-lock
/// simplification.
pub trait PayloadFactory: Send + Sync {
    type Payload: Send + 'static;

    fn open(&self, file: &LocalFileDescriptor) -> anyhow::Result<Self::Payload>;
}

/// Notification hook fired exactly once per descriptor that reaches
/// `Deregistered`.
pub trait DeregisterHook: Send + Sync {
    fn on_deregistered(&self, file: &LocalFileDescriptor);
}

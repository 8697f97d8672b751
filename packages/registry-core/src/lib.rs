//! Registry and handle-lifecycle manager for versioned, on-disk map data
//! files.
//!
//! This crate mediates between code that wishes to query map data and the
//! set of currently-known map files on local storage:
//!
//! - **Descriptor** ([`descriptor`]): per-file metadata record plus status
//!   and lease-count state.
//! - **Identifier** ([`identifier`]): a stable handle to a `Descriptor`,
//!   independent of whether it is currently registered.
//! - **Coordinator** ([`coordinator`]): the facade combining the registry
//!   map, the payload cache, and lease issuance under a single lock.
//! - **Lease** ([`lease`]): a scoped borrow of a payload, returned to the
//!   cache (or destroyed) on drop.
//!
//! Parsing map-file contents, the physical I/O that materializes a
//! payload, and the classification of map files into country/world/coast
//! consumers are all external collaborators -- see [`callbacks`].

mod cache;
pub mod callbacks;
pub mod coordinator;
pub mod descriptor;
pub mod error;
pub mod file;
pub mod identifier;
pub mod lease;

pub use callbacks::{DeregisterHook, PayloadFactory, VersionProbe};
pub use coordinator::Coordinator;
pub use descriptor::{classify, Classification, Descriptor, Status, UPPER_SCALE, UPPER_WORLD_SCALE};
pub use error::RegistryError;
pub use file::{LocalFileDescriptor, ProbedMetadata};
pub use identifier::Identifier;
pub use lease::Lease;

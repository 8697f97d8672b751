//! Caller-facing description of an on-disk map file.

use std::path::PathBuf;

/// Caller-supplied identity of a map file on local storage.
///
/// `region_name` must be non-empty. `version` is a monotonic integer where
/// a higher value means a newer file. `path` is opaque to the registry
/// core: it is passed unmodified to the version probe, the payload
/// factory, and the on-deregistered hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileDescriptor {
    pub region_name: String,
    pub version: u64,
    pub path: PathBuf,
}

impl LocalFileDescriptor {
    #[must_use]
    pub fn new(region_name: impl Into<String>, version: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            region_name: region_name.into(),
            version,
            path: path.into(),
        }
    }
}

/// Scale-range metadata populated by a
/// [`VersionProbe`](crate::callbacks::VersionProbe).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbedMetadata {
    pub min_scale: i32,
    pub max_scale: i32,
}

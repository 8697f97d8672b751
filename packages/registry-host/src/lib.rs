//! `registry-host` -- filesystem-backed embedding of `registry-core`.
//!
//! Supplies concrete implementations of the three callbacks the core
//! leaves as extension points ([`fs_backend`]), a runtime config
//! ([`config`]), and a CLI binary (`src/main.rs`) for exercising the
//! Coordinator against a real directory of `*.mwm` files.

pub mod config;
pub mod fs_backend;

use std::path::Path;

use registry_core::{Coordinator, LocalFileDescriptor};

use fs_backend::{version_from_mtime, FsDeregisterHook, FsPayloadFactory, FsVersionProbe, MapFilePayload};

/// Convenience alias for the concrete Coordinator this embedding uses.
pub type HostCoordinator = Coordinator<MapFilePayload>;

/// Builds a [`HostCoordinator`] wired to the filesystem-backed callbacks.
#[must_use]
pub fn build_coordinator(cache_capacity: usize) -> HostCoordinator {
    Coordinator::new(cache_capacity, FsVersionProbe, FsPayloadFactory, FsDeregisterHook)
}

/// Derives a region name from a map file's path (its file stem) and builds
/// the [`LocalFileDescriptor`] `registry-core` expects, deriving `version`
/// from the file's modification time.
///
/// # Errors
///
/// Returns an error if the path has no file stem or its metadata cannot be
/// read.
pub fn describe_file(path: &Path) -> anyhow::Result<LocalFileDescriptor> {
    let region_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("{path:?} has no usable file stem"))?
        .to_string();
    let version = version_from_mtime(path)?;
    Ok(LocalFileDescriptor::new(region_name, version, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }

    #[test]
    fn describe_file_derives_region_from_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Germany_Berlin.mwm");
        std::fs::write(&path, b"data").unwrap();

        let file = describe_file(&path).unwrap();
        assert_eq!(file.region_name, "Germany_Berlin");
    }
}

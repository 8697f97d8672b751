//! Concrete `registry_core` callbacks backed by real filesystem metadata.
//!
//! This is the "external collaborator" layer the core deliberately leaves
//! out of scope: parsing map-file contents, the physical I/O that opens a
//! file, and notification side effects. Everything here is specific to this
//! embedding, not to the registry core.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use registry_core::{
    DeregisterHook, LocalFileDescriptor, PayloadFactory, ProbedMetadata, RegistryError, Status,
    UPPER_SCALE, UPPER_WORLD_SCALE, VersionProbe,
};

/// In-memory payload for a loaded map file: its raw bytes. Stands in for
/// the "opened indices, memory maps" a real payload factory would build.
#[derive(Debug)]
pub struct MapFilePayload {
    pub bytes: Vec<u8>,
}

/// Reads scale-range metadata from a file's name and a version from its
/// modification time, so re-registering an untouched file is idempotent.
///
/// Two filenames carry special meaning, matching the world-overview and
/// coastline-backdrop files every region export ships alongside its
/// country-specific data: `World.mwm` classifies as `World`, and
/// `WorldCoasts.mwm` classifies as `Coast`. Everything else with a `.mwm`
/// extension classifies as `Country`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsVersionProbe;

impl VersionProbe for FsVersionProbe {
    fn probe(&self, file: &LocalFileDescriptor) -> Result<ProbedMetadata, RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidFile {
            region: file.region_name.clone(),
            reason,
        };

        if file.path.extension().and_then(|e| e.to_str()) != Some("mwm") {
            return Err(invalid(format!("{:?} does not have a .mwm extension", file.path)));
        }

        fs::metadata(&file.path).map_err(|e| invalid(format!("cannot stat {:?}: {e}", file.path)))?;

        match file_stem(&file.path) {
            "World" => Ok(ProbedMetadata { min_scale: 0, max_scale: UPPER_WORLD_SCALE }),
            "WorldCoasts" => Ok(ProbedMetadata { min_scale: 0, max_scale: UPPER_SCALE }),
            _ => Ok(ProbedMetadata { min_scale: 1, max_scale: UPPER_SCALE }),
        }
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
}

/// Reads the modification time of `path` as a Unix-epoch second count, for
/// use as the `version` of a [`LocalFileDescriptor`].
pub fn version_from_mtime(path: &Path) -> anyhow::Result<u64> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(modified.duration_since(UNIX_EPOCH)?.as_secs())
}

/// Reads a map file's full contents into memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPayloadFactory;

impl PayloadFactory for FsPayloadFactory {
    type Payload = MapFilePayload;

    fn open(&self, file: &LocalFileDescriptor) -> anyhow::Result<MapFilePayload> {
        let bytes = fs::read(&file.path)?;
        Ok(MapFilePayload { bytes })
    }
}

/// Logs terminal deregistration. A real embedder might archive or unlink
/// the backing file here instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDeregisterHook;

impl DeregisterHook for FsDeregisterHook {
    fn on_deregistered(&self, file: &LocalFileDescriptor) {
        tracing::info!(region = %file.region_name, version = file.version, path = ?file.path, "map file deregistered");
    }
}

/// `true` iff `status` permits new leases to be acquired.
#[must_use]
pub fn is_leasable(status: Status) -> bool {
    status == Status::Registered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn touch(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn probes_country_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "Germany_Berlin.mwm", b"data");
        let file = LocalFileDescriptor::new("Germany_Berlin", 1, path);

        let metadata = FsVersionProbe.probe(&file).unwrap();
        assert_eq!(metadata, ProbedMetadata { min_scale: 1, max_scale: UPPER_SCALE });
    }

    #[test]
    fn probes_world_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "World.mwm", b"data");
        let file = LocalFileDescriptor::new("World", 1, path);

        let metadata = FsVersionProbe.probe(&file).unwrap();
        assert_eq!(metadata, ProbedMetadata { min_scale: 0, max_scale: UPPER_WORLD_SCALE });
    }

    #[test]
    fn rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "notes.txt", b"data");
        let file = LocalFileDescriptor::new("notes", 1, path);

        assert!(FsVersionProbe.probe(&file).is_err());
    }

    #[test]
    fn factory_reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "Germany_Berlin.mwm", b"hello map data");
        let file = LocalFileDescriptor::new("Germany_Berlin", 1, path);

        let payload = FsPayloadFactory.open(&file).unwrap();
        assert_eq!(payload.bytes, b"hello map data");
    }
}

//! Shared test fixtures: fake callback implementations standing in for the
//! real version-probe/payload-factory/on-deregistered collaborators that
//! are out of scope for the registry core itself.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use registry_core::{DeregisterHook, LocalFileDescriptor, PayloadFactory, ProbedMetadata, RegistryError, VersionProbe};

/// Always reports the same scale range, regardless of file.
pub struct FixedProbe {
    pub min_scale: i32,
    pub max_scale: i32,
}

impl FixedProbe {
    pub fn country() -> Self {
        Self { min_scale: 1, max_scale: UPPER_SCALE_FOR_TESTS }
    }
}

/// Matches `registry_core::descriptor::UPPER_SCALE`, duplicated here so the
/// fixture doesn't need to depend on the crate's internals module path.
const UPPER_SCALE_FOR_TESTS: i32 = 17;

impl VersionProbe for FixedProbe {
    fn probe(&self, _file: &LocalFileDescriptor) -> Result<ProbedMetadata, RegistryError> {
        Ok(ProbedMetadata {
            min_scale: self.min_scale,
            max_scale: self.max_scale,
        })
    }
}

/// Always fails, standing in for an unreadable or malformed map file.
pub struct FailingProbe;

impl VersionProbe for FailingProbe {
    fn probe(&self, file: &LocalFileDescriptor) -> Result<ProbedMetadata, RegistryError> {
        Err(RegistryError::InvalidFile {
            region: file.region_name.clone(),
            reason: "simulated unreadable file".to_string(),
        })
    }
}

/// Produces a distinct payload (an incrementing counter) on every call, so
/// tests can tell a cache hit (same value) from a fresh materialization
/// (a new value) by equality.
#[derive(Clone, Default)]
pub struct CountingFactory {
    calls: Arc<AtomicUsize>,
}

impl CountingFactory {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PayloadFactory for CountingFactory {
    type Payload = usize;

    fn open(&self, _file: &LocalFileDescriptor) -> anyhow::Result<usize> {
        Ok(self.calls.fetch_add(1, Ordering::SeqCst))
    }
}

/// A factory that always fails, for exercising `PayloadFactoryFailure`.
#[derive(Default)]
pub struct FailingFactory;

impl PayloadFactory for FailingFactory {
    type Payload = usize;

    fn open(&self, file: &LocalFileDescriptor) -> anyhow::Result<usize> {
        anyhow::bail!("simulated I/O failure opening {:?}", file.path)
    }
}

/// Records every file passed to `on_deregistered`, for asserting I5 (the
/// hook fires exactly once per terminal deregistration).
#[derive(Clone, Default)]
pub struct RecordingHook {
    fired: Arc<Mutex<Vec<LocalFileDescriptor>>>,
}

impl RecordingHook {
    pub fn fired(&self) -> Vec<LocalFileDescriptor> {
        self.fired.lock().unwrap().clone()
    }

    pub fn fire_count_for(&self, region_name: &str, version: u64) -> usize {
        self.fired()
            .iter()
            .filter(|f| f.region_name == region_name && f.version == version)
            .count()
    }
}

impl DeregisterHook for RecordingHook {
    fn on_deregistered(&self, file: &LocalFileDescriptor) {
        self.fired.lock().unwrap().push(file.clone());
    }
}

pub fn file(region_name: &str, version: u64) -> LocalFileDescriptor {
    LocalFileDescriptor::new(region_name, version, format!("/maps/{region_name}-{version}.mwm"))
}

//! Runtime configuration for the filesystem-backed embedding.

use std::path::PathBuf;

/// Configuration for [`crate::fs_backend`] and the CLI entry point.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Maximum number of idle payloads kept in memory at once.
    pub cache_capacity: usize,
    /// Directory scanned for `*.mwm` files by `registry-host list`/`register`.
    pub watch_dir: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 16,
            watch_dir: PathBuf::from("."),
        }
    }
}

impl HostConfig {
    /// Overlays CLI-supplied overrides onto the defaults, for subcommands
    /// that let either flag go unset.
    #[must_use]
    pub fn with_overrides(cache_capacity: Option<usize>, watch_dir: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: cache_capacity.unwrap_or(defaults.cache_capacity),
            watch_dir: watch_dir.unwrap_or(defaults.watch_dir),
        }
    }
}

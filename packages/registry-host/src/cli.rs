//! Command-line surface for the `registry-host` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "registry-host", about = "Filesystem-backed map file registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register every `*.mwm` file found directly under a directory.
    Scan {
        /// Directory to scan for `*.mwm` files. Defaults to
        /// [`HostConfig::default`](crate::config::HostConfig)'s `watch_dir`.
        #[arg(long, env = "REGISTRY_HOST_DIR")]
        dir: Option<PathBuf>,

        /// Maximum number of idle payloads kept cached at once. Defaults to
        /// [`HostConfig::default`](crate::config::HostConfig)'s
        /// `cache_capacity`.
        #[arg(long, env = "REGISTRY_HOST_CACHE_CAPACITY")]
        cache_capacity: Option<usize>,
    },

    /// Register a single map file and report the outcome.
    Register {
        /// Path to the `.mwm` file to register.
        path: PathBuf,

        /// Maximum number of idle payloads kept cached at once. Defaults to
        /// [`HostConfig::default`](crate::config::HostConfig)'s
        /// `cache_capacity`.
        #[arg(long, env = "REGISTRY_HOST_CACHE_CAPACITY")]
        cache_capacity: Option<usize>,
    },
}

//! CLI front-end exercising [`registry_core::Coordinator`] against a real
//! directory of `*.mwm` files.
//!
//! The registry is in-memory only and holds no state across process
//! invocations (see the design notes' persistence non-goal), so each
//! subcommand runs a complete scan-register-report-cleanup cycle in one
//! process rather than simulating a long-lived daemon.

mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use registry_host::config::HostConfig;
use registry_host::{build_coordinator, describe_file, HostCoordinator};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan { dir, cache_capacity } => {
            scan(&HostConfig::with_overrides(cache_capacity, dir))
        }
        Command::Register { path, cache_capacity } => {
            let config = HostConfig::with_overrides(cache_capacity, None);
            register_one(&path, config.cache_capacity)
        }
    }
}

/// Registers every `*.mwm` file directly under `config.watch_dir`, prints
/// the resulting catalogue, then deregisters everything before the
/// coordinator is dropped (the teardown discipline the core requires).
fn scan(config: &HostConfig) -> Result<()> {
    let dir = config.watch_dir.as_path();
    let coordinator = build_coordinator(config.cache_capacity);
    let mut registered = 0usize;
    let mut rejected = 0usize;

    for entry in fs::read_dir(dir).with_context(|| format!("reading {dir:?}"))? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("mwm") {
            continue;
        }

        let file = describe_file(&path)?;
        let region = file.region_name.clone();
        match coordinator.register(file) {
            Ok((lease, is_new)) => {
                registered += 1;
                let size = lease.payload().map(|p| p.bytes.len()).unwrap_or(0);
                println!("{region}: registered (new={is_new}, bytes={size})");
            }
            Err(err) => {
                rejected += 1;
                println!("{region}: rejected ({err})");
            }
        }
    }

    println!("--- {registered} registered, {rejected} rejected ---");
    for desc in coordinator.enumerate_descriptors() {
        println!(
            "{}: version={} status={:?} classification={:?}",
            desc.region_name,
            desc.version,
            desc.status(),
            desc.classification()
        );
    }

    coordinator.deregister_all();
    coordinator.cleanup();
    Ok(())
}

/// Registers a single file and reports its outcome, for quick manual
/// testing of the version probe and payload factory against one file.
fn register_one(path: &Path, cache_capacity: usize) -> Result<()> {
    let coordinator: HostCoordinator = build_coordinator(cache_capacity);
    let file = describe_file(path)?;
    let region = file.region_name.clone();

    let (lease, is_new) = coordinator.register(file)?;
    if let Some(desc) = lease.descriptor() {
        println!(
            "{region}: version={} classification={:?} new={is_new} bytes={}",
            desc.version,
            desc.classification(),
            lease.payload().map(|p| p.bytes.len()).unwrap_or(0)
        );
    } else {
        println!("{region}: registration produced no lease (stale version?)");
    }

    drop(lease);
    coordinator.deregister(&region);
    coordinator.cleanup();
    Ok(())
}

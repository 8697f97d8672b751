//! Domain error type for the registry core.
//!
//! Expected negative outcomes -- stale version, duplicate version, unknown
//! region, not-up-to-date -- are *not* represented here. Per the error
//! policy in the design notes, those surface as `None`/null leases/boolean
//! returns, never as `Err`. Only conditions that genuinely escape the
//! external callbacks reach this type.

/// Errors that can escape the public API.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The version probe rejected the file, or returned scale metadata that
    /// does not classify into Country/World/Coast.
    #[error("invalid map file for region `{region}`: {reason}")]
    InvalidFile { region: String, reason: String },

    /// The payload factory failed while materializing a payload.
    #[error("payload factory failed for region `{region}`")]
    PayloadFactory {
        region: String,
        #[source]
        source: anyhow::Error,
    },
}

//! Error types for sybilglass.

use thiserror::Error;

/// Sybilglass error types.
///
/// Nearly everything in this crate is a total function over canonical
/// addresses. Malformed entries are expected noise in real-world lists and
/// are skipped, never surfaced as errors; the single terminal failure is an
/// input that leaves no valid address to analyze.
#[derive(Error, Debug)]
pub enum SybilError {
    /// No candidate string survived validation
    #[error("no valid addresses after filtering")]
    NoValidAddresses,
}

/// Result type alias for sybilglass operations.
pub type Result<T> = std::result::Result<T, SybilError>;

//! Cross-cutting error types for mjt.
//!
//! Domain-specific errors (`MeshError`, `CheckerError`, `ConfigError`) live in
//! their own crates. The CLI converges all of them into `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A platform name did not match any known path rule set.
    #[error("Unknown platform '{0}' (expected linux, windows, macos or universal)")]
    InvalidPlatform(String),

    /// A check report could not be encoded or decoded.
    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

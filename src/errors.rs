//! Shared error types for cfglint analyses.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by CFG construction, fixture loading, and the
/// per-method analysis driver.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The collaborator could not supply a valid CFG for one method
    /// (abstract, native, bytecode analysis failed, ...). Aborts analysis
    /// for that method only; other methods proceed independently.
    #[error("method {method} cannot be analyzed: {reason}")]
    UnanalyzableMethod { method: String, reason: String },

    /// Structural defect in a supplied CFG (duplicate labels, dangling
    /// edges, missing entry block).
    #[error("malformed control-flow graph: {0}")]
    MalformedCfg(String),

    /// Failed to read a method-set fixture file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a method-set fixture file.
    #[error("failed to parse {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    pub fn unanalyzable(method: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::UnanalyzableMethod {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

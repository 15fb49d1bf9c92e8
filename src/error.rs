//! Document-boundary errors
//!
//! Only parsing at the system boundary can fail; corpus mutation never does.
//! Missing-but-optional fields inside an otherwise well-formed document are
//! tolerated by serde defaults and never reach this type.

use thiserror::Error;

/// Failure to accept an externally supplied document.
///
/// Raised only for fundamentally non-document input (not a structured
/// object at all, or unreadable), so the host can surface a retry/ignore
/// choice instead of silently dropping tester data.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("not a structured document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

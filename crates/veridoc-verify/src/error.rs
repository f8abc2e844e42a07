//! Verification error types.
//!
//! The rule tables are fixed at compile time, so errors can only surface
//! while the engines are being constructed; classification, extraction, and
//! policy evaluation themselves are infallible.

/// Unified error type for engine construction.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// A field-extraction regex failed to compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The classifier marker automaton could not be built.
    #[error("failed to build marker automaton: {reason}")]
    AutomatonBuild { reason: String },
}

/// Convenience alias used throughout the verify crate.
pub type Result<T> = std::result::Result<T, VerifyError>;

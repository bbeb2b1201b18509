//! Errors raised when a retry policy or a file size is rejected.

use thiserror::Error;

/// A retry policy that breaks one of its cross-field invariants, or a file
/// that falls outside the configured size bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// `min_file_size > max_file_size` while size validation is on; no file can pass.
    #[error("minimum file size {min} exceeds maximum file size {max}")]
    InvertedSizeBounds { min: u64, max: u64 },
    /// Base retry interval is larger than the backoff cap.
    #[error("retry interval {base_ms}ms exceeds maximum retry interval {max_ms}ms")]
    InvertedIntervals { base_ms: u64, max_ms: u64 },
    /// Backoff multiplier is NaN, infinite, or shrinks the interval.
    #[error("backoff multiplier must be finite and >= 1.0, got {0}")]
    InvalidMultiplier(f64),
    /// A concrete file size failed `is_file_size_valid`.
    #[error("file size {size} bytes rejected: {limits}")]
    FileSize { size: u64, limits: String },
}

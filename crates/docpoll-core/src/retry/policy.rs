use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::error::PolicyError;
use super::size::format_file_size;

/// Default maximum file size accepted for parsing (100 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Default minimum file size (1 byte; empty files are rejected).
pub const DEFAULT_MIN_FILE_SIZE: u64 = 1;

/// Category used when none is configured.
pub const DEFAULT_CATEGORY_ID: &str = "default";

/// How long and how often to re-poll a remote parsing job, plus the file-size
/// bounds a document must satisfy before it is submitted.
///
/// Immutable once built; share it by reference (or `Arc`) across pollers.
/// Deserializes from the `[document-reader]` config section with camelCase
/// keys; snake_case spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryPolicy {
    #[serde(alias = "category_id")]
    category_id: String,
    /// 0 means "use the remote default"; the poll loop treats it as unbounded.
    #[serde(alias = "max_retry_attempts")]
    max_retry_attempts: u32,
    #[serde(alias = "retry_interval_millis")]
    retry_interval_millis: u64,
    #[serde(alias = "max_retry_interval_millis")]
    max_retry_interval_millis: u64,
    #[serde(alias = "use_exponential_backoff")]
    use_exponential_backoff: bool,
    #[serde(alias = "backoff_multiplier")]
    backoff_multiplier: f64,
    #[serde(alias = "max_file_size")]
    max_file_size: u64,
    #[serde(alias = "min_file_size")]
    min_file_size: u64,
    #[serde(alias = "enable_file_size_validation")]
    enable_file_size_validation: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            max_retry_attempts: 0,
            retry_interval_millis: 30_000,
            max_retry_interval_millis: 300_000,
            use_exponential_backoff: true,
            backoff_multiplier: 1.5,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            min_file_size: DEFAULT_MIN_FILE_SIZE,
            enable_file_size_validation: true,
        }
    }
}

impl RetryPolicy {
    /// Default policy targeting a specific category.
    pub fn with_category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            ..Self::default()
        }
    }

    /// Start a builder seeded with the defaults.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Start a builder seeded with this policy's values.
    pub fn to_builder(&self) -> RetryPolicyBuilder {
        RetryPolicyBuilder {
            policy: self.clone(),
        }
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn max_retry_attempts(&self) -> u32 {
        self.max_retry_attempts
    }

    pub fn retry_interval_millis(&self) -> u64 {
        self.retry_interval_millis
    }

    pub fn max_retry_interval_millis(&self) -> u64 {
        self.max_retry_interval_millis
    }

    pub fn use_exponential_backoff(&self) -> bool {
        self.use_exponential_backoff
    }

    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn min_file_size(&self) -> u64 {
        self.min_file_size
    }

    pub fn enable_file_size_validation(&self) -> bool {
        self.enable_file_size_validation
    }

    /// True when `size` lies within `[min_file_size, max_file_size]`, or when
    /// size validation is disabled.
    pub fn is_file_size_valid(&self, size: u64) -> bool {
        if !self.enable_file_size_validation {
            return true;
        }
        size >= self.min_file_size && size <= self.max_file_size
    }

    /// Like [`Self::is_file_size_valid`], but returns an error carrying the
    /// limits description so callers can show it as-is.
    pub fn check_file_size(&self, size: u64) -> Result<(), PolicyError> {
        if self.is_file_size_valid(size) {
            Ok(())
        } else {
            Err(PolicyError::FileSize {
                size,
                limits: self.describe_file_size_limits(),
            })
        }
    }

    pub fn describe_file_size_limits(&self) -> String {
        format!(
            "File size must be between {} and {}",
            format_file_size(self.min_file_size),
            format_file_size(self.max_file_size)
        )
    }

    /// Wait before retry number `attempt` (0 = first retry).
    ///
    /// Without backoff this is always `retry_interval_millis`. With backoff it
    /// is `retry_interval_millis * backoff_multiplier^attempt`, capped at
    /// `max_retry_interval_millis`; huge or non-finite products saturate at the cap.
    pub fn next_interval(&self, attempt: u32) -> Duration {
        if !self.use_exponential_backoff {
            return Duration::from_millis(self.retry_interval_millis);
        }
        let cap = self.max_retry_interval_millis;
        let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
        let raw = self.retry_interval_millis as f64 * self.backoff_multiplier.powi(exp);
        let millis = if raw.is_finite() && raw < cap as f64 {
            raw.max(0.0).round() as u64
        } else {
            cap
        };
        Duration::from_millis(millis.min(cap))
    }

    /// Check the cross-field invariants. Construction never calls this, so a
    /// degenerate policy (e.g. inverted size bounds) is still usable.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.enable_file_size_validation && self.min_file_size > self.max_file_size {
            return Err(PolicyError::InvertedSizeBounds {
                min: self.min_file_size,
                max: self.max_file_size,
            });
        }
        if self.retry_interval_millis > self.max_retry_interval_millis {
            return Err(PolicyError::InvertedIntervals {
                base_ms: self.retry_interval_millis,
                max_ms: self.max_retry_interval_millis,
            });
        }
        if self.use_exponential_backoff
            && !(self.backoff_multiplier.is_finite() && self.backoff_multiplier >= 1.0)
        {
            return Err(PolicyError::InvalidMultiplier(self.backoff_multiplier));
        }
        Ok(())
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RetryPolicy {{ category_id: {:?}, max_retry_attempts: {}, retry_interval_millis: {}, \
             max_retry_interval_millis: {}, use_exponential_backoff: {}, backoff_multiplier: {}, \
             max_file_size: {}, min_file_size: {}, enable_file_size_validation: {} }}",
            self.category_id,
            self.max_retry_attempts,
            self.retry_interval_millis,
            self.max_retry_interval_millis,
            self.use_exponential_backoff,
            self.backoff_multiplier,
            format_file_size(self.max_file_size),
            format_file_size(self.min_file_size),
            self.enable_file_size_validation,
        )
    }
}

/// Fluent builder for [`RetryPolicy`]. Each setter consumes and returns the
/// builder, so a finished policy is never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    pub fn category_id(mut self, category_id: impl Into<String>) -> Self {
        self.policy.category_id = category_id.into();
        self
    }

    pub fn max_retry_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_retry_attempts = attempts;
        self
    }

    pub fn retry_interval_millis(mut self, millis: u64) -> Self {
        self.policy.retry_interval_millis = millis;
        self
    }

    pub fn retry_interval_secs(self, secs: u64) -> Self {
        self.retry_interval_millis(secs.saturating_mul(1000))
    }

    pub fn max_retry_interval_millis(mut self, millis: u64) -> Self {
        self.policy.max_retry_interval_millis = millis;
        self
    }

    pub fn max_retry_interval_secs(self, secs: u64) -> Self {
        self.max_retry_interval_millis(secs.saturating_mul(1000))
    }

    pub fn use_exponential_backoff(mut self, enabled: bool) -> Self {
        self.policy.use_exponential_backoff = enabled;
        self
    }

    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.policy.backoff_multiplier = multiplier;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.policy.max_file_size = bytes;
        self
    }

    pub fn max_file_size_mb(self, megabytes: u64) -> Self {
        self.max_file_size(megabytes.saturating_mul(1024 * 1024))
    }

    pub fn min_file_size(mut self, bytes: u64) -> Self {
        self.policy.min_file_size = bytes;
        self
    }

    /// Same as [`Self::min_file_size`]; reads better next to `max_file_size_mb`.
    pub fn min_file_size_bytes(self, bytes: u64) -> Self {
        self.min_file_size(bytes)
    }

    pub fn enable_file_size_validation(mut self, enabled: bool) -> Self {
        self.policy.enable_file_size_validation = enabled;
        self
    }

    pub fn without_file_size_validation(self) -> Self {
        self.enable_file_size_validation(false)
    }

    /// Finish without checking invariants.
    pub fn build(self) -> RetryPolicy {
        self.policy
    }

    /// Finish, rejecting policies that fail [`RetryPolicy::validate`].
    pub fn build_validated(self) -> Result<RetryPolicy, PolicyError> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}

//! Backend failure classification
//!
//! The worker attempt loop keys off `is_retryable`: transient transport
//! conditions spend iteration budget, everything else surfaces immediately
//! as the task's failure cause.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider asked us to back off; carries the server's hint
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Non-success HTTP status from the provider
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Transport failure before a response arrived
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived but not in a shape we can use
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request exceeded the configured deadline
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration names a provider this build does not implement
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
}

impl GenerationError {
    /// Whether the worker attempt loop should try again
    ///
    /// Rate limits, network faults, timeouts, and 5xx statuses are
    /// transient. Anything else would fail identically on a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network(_) | Self::Timeout(_) => true,
            Self::ApiError { status, .. } => *status >= 500,
            Self::InvalidResponse(_) | Self::UnsupportedProvider(_) => false,
        }
    }

    /// Server-suggested pause before the next attempt, when one was given
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_transient_conditions_spend_iteration_budget() {
        // The shapes the Anthropic client emits for conditions worth retrying
        let overloaded = GenerationError::ApiError {
            status: 529,
            message: "overloaded".to_string(),
        };
        let rate_limited = GenerationError::RateLimited {
            retry_after: Duration::from_secs(5),
        };
        let timed_out = GenerationError::Timeout(Duration::from_secs(300));

        assert!(overloaded.is_retryable());
        assert!(rate_limited.is_retryable());
        assert!(timed_out.is_retryable());
    }

    #[test]
    fn test_permanent_failures_surface_immediately() {
        let rejected = GenerationError::ApiError {
            status: 400,
            message: "prompt too long".to_string(),
        };
        let garbled = GenerationError::InvalidResponse("response contained no text block".to_string());
        let misconfigured = GenerationError::UnsupportedProvider("openai".to_string());

        assert!(!rejected.is_retryable());
        assert!(!garbled.is_retryable());
        assert!(!misconfigured.is_retryable());
    }

    #[test]
    fn test_retry_after_only_from_rate_limits() {
        let rate_limited = GenerationError::RateLimited {
            retry_after: Duration::from_secs(30),
        };
        assert_eq!(rate_limited.retry_after(), Some(Duration::from_secs(30)));

        let overloaded = GenerationError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(overloaded.retry_after(), None);
    }

    #[test]
    fn test_cause_reads_through_task_failure() {
        // How a backend cause appears in the run-level failure report
        let err = Error::TaskExecution {
            task: "fact-check".to_string(),
            source: GenerationError::ApiError {
                status: 400,
                message: "invalid request".to_string(),
            },
        };

        assert_eq!(err.to_string(), "task 'fact-check' failed: API error 400: invalid request");
        assert_eq!(err.task_name(), Some("fact-check"));
    }
}

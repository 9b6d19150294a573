//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Core
//! code never reads process-wide environment variables while handling a call.

use crate::constants::DEFAULT_MAX_IDENTIFIER_ATTEMPTS;
use crate::{QuoteError, QuoteResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    max_identifier_attempts: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_identifier_attempts: DEFAULT_MAX_IDENTIFIER_ATTEMPTS,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidInput`] if `max_identifier_attempts` is zero.
    pub fn new(max_identifier_attempts: u32) -> QuoteResult<Self> {
        if max_identifier_attempts == 0 {
            return Err(QuoteError::InvalidInput(
                "max_identifier_attempts must be at least 1".into(),
            ));
        }

        Ok(Self {
            max_identifier_attempts,
        })
    }

    /// How many identifiers [`crate::allocate_identifier`] may try before failing.
    pub fn max_identifier_attempts(&self) -> u32 {
        self.max_identifier_attempts
    }
}

/// Parse the identifier attempt limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default limit.
pub fn max_identifier_attempts_from_env_value(value: Option<String>) -> QuoteResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_MAX_IDENTIFIER_ATTEMPTS),
        Some(v) => v.parse::<u32>().map_err(|e| {
            QuoteError::InvalidInput(format!(
                "identifier attempt limit must be a positive integer, got '{}': {}",
                v, e
            ))
        }),
    }
}

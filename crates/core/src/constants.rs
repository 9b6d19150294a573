//! Constants used throughout the core crate.

/// Identifier allocation attempts before giving up when no limit is configured.
pub const DEFAULT_MAX_IDENTIFIER_ATTEMPTS: u32 = 8;

/// Environment variable the binaries read at startup to override the attempt limit.
pub const MAX_IDENTIFIER_ATTEMPTS_ENV: &str = "SOLARQ_MAX_IDENTIFIER_ATTEMPTS";

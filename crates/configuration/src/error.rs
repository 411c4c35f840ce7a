//! Errors raised while validating a table configuration.

use thiserror::Error;

/// A construction-time contract violation. Request-time problems never
/// surface here; the compiler degrades silently instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("table name must not be empty")]
    EmptyTableName,
    #[error("date bounds were provided but no date column is configured")]
    DateBoundsWithoutColumn,
}

//! The closed set of SQL dialects we can emit statements for.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ast::{Expression, Pagination};
use super::string::Sql;

/// Fallback page length when the request supplies none.
pub const DEFAULT_PAGE_LENGTH: u64 = 100;

/// The SQL syntax variant, chosen once per table configuration. Governs
/// pagination shape, schema-switch shape, and the free-text predicate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL-like syntax.
    #[default]
    Generic,
    Postgres,
    Oracle,
}

impl Dialect {
    /// The statement that switches the active database or schema.
    pub fn schema_switch(&self, name: &str) -> String {
        let mut sql = Sql::new();
        match self {
            Dialect::Oracle => {
                sql.append_syntax("ALTER SESSION SET CURRENT_SCHEMA = ");
                sql.append_identifier(name);
            }
            Dialect::Generic | Dialect::Postgres => {
                sql.append_syntax("USE ");
                sql.append_identifier(name);
            }
        }
        sql.append_syntax(";");
        sql.sql
    }

    /// The pagination clause for a page window. `start` must already be
    /// non-negative; `length` must already be positive. Oracle paginates
    /// only when both are given, the others fall back to
    /// [`DEFAULT_PAGE_LENGTH`] rows.
    pub fn pagination(&self, start: Option<u64>, length: Option<u64>) -> Pagination {
        match self {
            Dialect::Generic => match start {
                Some(start) => Pagination::LimitCommaOffset {
                    start,
                    length: length.unwrap_or(DEFAULT_PAGE_LENGTH),
                },
                None => Pagination::None,
            },
            Dialect::Postgres => match start {
                Some(start) => Pagination::OffsetLimit {
                    start,
                    length: length.unwrap_or(DEFAULT_PAGE_LENGTH),
                },
                None => Pagination::None,
            },
            Dialect::Oracle => match (start, length) {
                (Some(start), Some(length)) => Pagination::RowNumBetween {
                    lower: start + 1,
                    upper: start + length,
                },
                _ => Pagination::None,
            },
        }
    }

    /// A free-text containment predicate on a column. The pattern must
    /// already be sanitized.
    pub fn text_search(&self, column: &str, pattern: &str) -> Expression {
        Expression::TextSearch {
            column: column.to_string(),
            pattern: pattern.to_string(),
            cast_to_text: matches!(self, Dialect::Postgres),
        }
    }
}

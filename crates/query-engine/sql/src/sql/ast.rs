//! Type definitions of a SQL AST representation.
//!
//! This is a clause-level AST: select lists and FROM targets may be raw
//! fragments supplied by the caller's configuration, which are opaque to us.

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub select_list: SelectList,
    pub from: From,
    pub where_: Where,
    pub order_by: OrderBy,
    pub pagination: Pagination,
}

/// A select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    SelectStar,
    Count(CountType),
    /// Raw SQL written by a user which is opaque to us.
    RawFragment(String),
}

/// COUNT clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountType {
    Star,
    Column(String),
}

/// A FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum From {
    Table(String),
    /// Raw SQL written by a user which is opaque to us.
    RawFragment(String),
}

/// A WHERE clause: a list of conjuncts, each printed in its own
/// parentheses and joined with `AND`. Empty means no WHERE at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Where(pub Vec<Expression>);

/// A scalar expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// AND over the operands; composite operands are parenthesized.
    And(Vec<Expression>),
    /// OR over the operands; composite operands are parenthesized.
    Or(Vec<Expression>),
    /// A free-text containment predicate: `LIKE '%pattern%'`, or
    /// `CAST(column AS TEXT) ILIKE '%pattern%'` when `cast_to_text` is set.
    TextSearch {
        column: String,
        pattern: String,
        cast_to_text: bool,
    },
    /// `column BETWEEN 'low' AND 'high'`.
    Between {
        column: String,
        low: String,
        high: String,
    },
    /// A one-sided comparison against a string literal.
    Comparison {
        column: String,
        operator: ComparisonOperator,
        value: String,
    },
    /// Raw SQL written by a user which is opaque to us.
    RawFragment(String),
}

/// Comparison operators used by the one-sided date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

/// An ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByElement {
    pub column: String,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// Dialect-specific pagination of a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    None,
    /// MySQL-style `LIMIT start, length`.
    LimitCommaOffset { start: u64, length: u64 },
    /// Postgres-style `OFFSET start LIMIT length`.
    OffsetLimit { start: u64, length: u64 },
    /// Oracle has no LIMIT; the whole SELECT is wrapped in a ROWNUM
    /// subquery selecting rows `lower..=upper` (1-based, inclusive).
    RowNumBetween { lower: u64, upper: u64 },
}

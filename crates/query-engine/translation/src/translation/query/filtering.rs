//! WHERE clause construction: search, caller fragments, and date bounds.

use chrono::{DateTime, SecondsFormat, Utc};

use datatable_configuration::TableConfig;
use query_engine_sql::sql::ast::{ComparisonOperator, Expression};
use query_engine_sql::sql::sanitize;

use super::Skip;
use crate::translation::request::TableRequest;

/// Conjuncts present on every statement: the caller's raw filter and the
/// configured date window. Never includes search, so the unfiltered count
/// stays unfiltered.
pub fn permanent_filters(config: &TableConfig) -> Vec<Expression> {
    let mut conjuncts = vec![];
    if let Some(where_and) = &config.where_and_sql {
        conjuncts.push(Expression::RawFragment(where_and.clone()));
    }
    if let Some(date) = date_filter(config) {
        conjuncts.push(date);
    }
    conjuncts
}

/// Conjuncts for the select and filtered-count statements, in the fixed
/// order: search clause, caller fragment, date window. Absent pieces are
/// omitted entirely.
pub fn request_filters(
    config: &TableConfig,
    request: &TableRequest,
    search_value: &str,
    skipped: &mut Vec<Skip>,
) -> Vec<Expression> {
    let mut conjuncts = vec![];
    if let Some(search) = search_filter(config, request, search_value, skipped) {
        conjuncts.push(search);
    }
    if let Some(where_and) = &config.where_and_sql {
        conjuncts.push(Expression::RawFragment(where_and.clone()));
    }
    if let Some(date) = date_filter(config) {
        conjuncts.push(date);
    }
    conjuncts
}

/// The search clause: every active per-column filter must match (AND),
/// and any searchable column may match the global value (OR). When a
/// column is targeted by both, both predicates are emitted independently.
fn search_filter(
    config: &TableConfig,
    request: &TableRequest,
    search_value: &str,
    skipped: &mut Vec<Skip>,
) -> Option<Expression> {
    let mut column_scoped = vec![];
    for (index, column) in request.columns.iter().enumerate() {
        if !column.is_searchable() || column.search.value.is_empty() {
            continue;
        }
        let Some(name) = column.target() else {
            skipped.push(Skip::UnnamedSearchColumn { index });
            continue;
        };
        match sanitize::sanitize(&column.search.value) {
            Some(value) if !value.is_empty() => {
                column_scoped.push(config.dialect.text_search(name, &value));
            }
            Some(_) => {}
            None => skipped.push(Skip::OversizedColumnSearchValue {
                column: name.to_string(),
            }),
        }
    }

    let mut global = vec![];
    if !search_value.is_empty() {
        match &config.search_columns {
            // The configured allow-list wins over request-derived columns.
            Some(columns) => {
                for name in columns {
                    global.push(config.dialect.text_search(name, search_value));
                }
            }
            None => {
                for column in &request.columns {
                    if !column.is_searchable() {
                        continue;
                    }
                    if let Some(name) = column.target() {
                        global.push(config.dialect.text_search(name, search_value));
                    }
                }
            }
        }
    }

    match (column_scoped.is_empty(), global.is_empty()) {
        (true, true) => None,
        (false, true) => Some(Expression::And(column_scoped)),
        (true, false) => Some(Expression::Or(global)),
        (false, false) => {
            let mut conjuncts = column_scoped;
            conjuncts.push(Expression::Or(global));
            Some(Expression::And(conjuncts))
        }
    }
}

/// The configured date window as a predicate, when any bound is set.
fn date_filter(config: &TableConfig) -> Option<Expression> {
    let column = config.date_column.as_ref()?;
    match (&config.date_from, &config.date_to) {
        (Some(from), Some(to)) => Some(Expression::Between {
            column: column.clone(),
            low: timestamp_literal(from),
            high: timestamp_literal(to),
        }),
        (Some(from), None) => Some(Expression::Comparison {
            column: column.clone(),
            operator: ComparisonOperator::GreaterThanOrEqualTo,
            value: timestamp_literal(from),
        }),
        (None, Some(to)) => Some(Expression::Comparison {
            column: column.clone(),
            operator: ComparisonOperator::LessThanOrEqualTo,
            value: timestamp_literal(to),
        }),
        (None, None) => None,
    }
}

/// ISO-8601 with milliseconds and a `Z` suffix, e.g.
/// `2024-01-01T00:00:00.000Z`.
fn timestamp_literal(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

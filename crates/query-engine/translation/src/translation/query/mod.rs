//! Translate an incoming table request into executable SQL statements.

pub mod filtering;
pub mod sorting;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use datatable_configuration::TableConfig;
use query_engine_sql::sql::ast::{CountType, From, SelectList, Where};
use query_engine_sql::sql::helpers;
use query_engine_sql::sql::sanitize;

use super::request::TableRequest;

/// Logical names for the statements a plan may contain. The serialized
/// forms are the keys the UI protocol uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatementKey {
    #[serde(rename = "changeDatabaseOrSchema")]
    ChangeDatabaseOrSchema,
    #[serde(rename = "recordsTotal")]
    RecordsTotal,
    #[serde(rename = "recordsFiltered")]
    RecordsFiltered,
    #[serde(rename = "select")]
    Select,
}

impl std::fmt::Display for StatementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            StatementKey::ChangeDatabaseOrSchema => "changeDatabaseOrSchema",
            StatementKey::RecordsTotal => "recordsTotal",
            StatementKey::RecordsFiltered => "recordsFiltered",
            StatementKey::Select => "select",
        };
        write!(f, "{}", name)
    }
}

/// A request field the compiler dropped rather than fail the whole
/// request. The UI contract requires a parseable response even for bad
/// input, so these are recorded, not raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("global search value rejected by the sanitizer")]
    OversizedSearchValue,
    #[error("search value for column '{column}' rejected by the sanitizer")]
    OversizedColumnSearchValue { column: String },
    #[error("column {index} has an active filter but no usable name")]
    UnnamedSearchColumn { index: usize },
    #[error("order entry {index} references a column with no usable name")]
    UnnamedOrderColumn { index: usize },
    #[error("order entry {index} is out of range of the column list")]
    OrderColumnOutOfRange { index: usize },
    #[error("order entry {index} references a column that is not orderable")]
    ColumnNotOrderable { index: usize },
    #[error("request parameters were not a JSON object")]
    MalformedRequest,
}

/// The compiled statements for one request, plus the request context the
/// response mapper needs.
///
/// Threading this value from [`translate`] to
/// [`super::response::map_response`] is what lets one [`TableConfig`] serve
/// concurrent requests: no per-request state is written back to the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Statements in execution order. An empty map means "nothing to
    /// execute".
    pub statements: IndexMap<StatementKey, String>,
    /// Every field that was silently dropped during compilation.
    pub skipped: Vec<Skip>,
    /// The request's draw token, already parsed (0 when absent).
    pub draw: u64,
}

impl QueryPlan {
    fn empty() -> Self {
        QueryPlan {
            statements: IndexMap::new(),
            skipped: vec![],
            draw: 0,
        }
    }
}

/// Compile the statements for one request against one table configuration.
pub fn translate(config: &TableConfig, request: &TableRequest) -> QueryPlan {
    let mut plan = QueryPlan {
        statements: IndexMap::new(),
        skipped: vec![],
        draw: request.draw_token(),
    };

    if let Some(database) = &config.database {
        plan.statements.insert(
            StatementKey::ChangeDatabaseOrSchema,
            config.dialect.schema_switch(database),
        );
    }

    let search_value = match sanitize::sanitize(&request.search.value) {
        Some(value) => value,
        None => {
            plan.skipped.push(Skip::OversizedSearchValue);
            String::new()
        }
    };

    // The unfiltered total reflects the whole universe modulo the caller's
    // static constraints, so its WHERE never includes search.
    let mut total = helpers::count_select(count_type(config), from_target(config));
    total.where_ = Where(filtering::permanent_filters(config));
    plan.statements
        .insert(StatementKey::RecordsTotal, total.to_statement_string());

    let filters = filtering::request_filters(config, request, &search_value, &mut plan.skipped);

    if !search_value.is_empty() {
        let mut filtered = helpers::count_select(count_type(config), from_target(config));
        filtered.where_ = Where(filters.clone());
        plan.statements
            .insert(StatementKey::RecordsFiltered, filtered.to_statement_string());
    }

    let mut select = helpers::simple_select(select_list(config), from_target(config));
    select.where_ = Where(filters);
    select.order_by = sorting::translate_order_by(request, &mut plan.skipped);
    select.pagination = config
        .dialect
        .pagination(request.start_offset(), request.page_length());
    plan.statements
        .insert(StatementKey::Select, select.to_statement_string());

    tracing::debug!(
        table = %config.table,
        statements = plan.statements.len(),
        skipped = plan.skipped.len(),
        "compiled table query plan"
    );
    plan
}

/// Compile from a raw JSON value. Anything that is not a deserializable
/// object yields an empty plan rather than an error; callers must treat an
/// empty statement map as "nothing to execute".
pub fn translate_value(config: &TableConfig, raw: &serde_json::Value) -> QueryPlan {
    if !raw.is_object() {
        let mut plan = QueryPlan::empty();
        plan.skipped.push(Skip::MalformedRequest);
        return plan;
    }
    match serde_json::from_value::<TableRequest>(raw.clone()) {
        Ok(request) => translate(config, &request),
        Err(error) => {
            tracing::debug!(%error, "request parameters failed to deserialize");
            let mut plan = QueryPlan::empty();
            plan.skipped.push(Skip::MalformedRequest);
            plan
        }
    }
}

fn select_list(config: &TableConfig) -> SelectList {
    match &config.select_sql {
        Some(fragment) => SelectList::RawFragment(fragment.clone()),
        None => SelectList::SelectStar,
    }
}

fn from_target(config: &TableConfig) -> From {
    match &config.from_sql {
        Some(fragment) => From::RawFragment(fragment.clone()),
        None => From::Table(config.table.clone()),
    }
}

fn count_type(config: &TableConfig) -> CountType {
    // A raw select list may not expose the count column, so fall back to *.
    match config.select_sql {
        Some(_) => CountType::Star,
        None => CountType::Column(config.count_column.clone()),
    }
}

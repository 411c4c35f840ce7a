//! Map executed statement results back into the response envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::query::{QueryPlan, StatementKey};

/// Raw result rows per executed statement, keyed like the statement map.
pub type ResultMap = BTreeMap<StatementKey, Vec<Value>>;

/// The server-side-processing envelope the grid expects. Serializes with
/// the exact wire keys (`recordsTotal`, `recordsFiltered`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub draw: u64,
    pub records_total: i64,
    pub records_filtered: i64,
    pub data: Vec<Value>,
}

/// Shape the results of the executed statements into the response the
/// grid expects. Missing or malformed results degrade to zeroed fields;
/// rows under `select` are passed through unmodified, since pagination
/// already happened in SQL.
pub fn map_response(plan: &QueryPlan, results: &ResultMap) -> TableResponse {
    let mut response = TableResponse {
        draw: plan.draw,
        ..TableResponse::default()
    };

    // A lone entry cannot hold both a count and rows; treat it as
    // "nothing executed yet".
    if results.len() <= 1 {
        return response;
    }

    response.records_total = results
        .get(&StatementKey::RecordsTotal)
        .map_or(0, |rows| extract_count(rows));
    response.records_filtered = match results.get(&StatementKey::RecordsFiltered) {
        Some(rows) => extract_count(rows),
        None => response.records_total,
    };
    if let Some(rows) = results.get(&StatementKey::Select) {
        response.data = rows.clone();
    }
    response
}

/// The first scalar of the first row: object rows yield their first
/// value, array rows their first element, scalar rows themselves.
fn extract_count(rows: &[Value]) -> i64 {
    let Some(first) = rows.first() else {
        return 0;
    };
    let scalar = match first {
        Value::Object(fields) => fields.values().next().cloned(),
        Value::Array(items) => items.first().cloned(),
        other => Some(other.clone()),
    };
    match scalar {
        // Some drivers hand counts back as floats.
        Some(Value::Number(count)) => count
            .as_i64()
            .or_else(|| count.as_f64().map(|count| count as i64))
            .unwrap_or(0),
        Some(Value::String(count)) => count.parse().unwrap_or(0),
        _ => 0,
    }
}

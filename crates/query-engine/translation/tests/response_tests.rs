//! Mapping raw statement results back into the response envelope.

use serde_json::json;
use similar_asserts::assert_eq;

use datatable_configuration::TableConfig;
use query_engine_translation::translation::query::{self, StatementKey};
use query_engine_translation::translation::request::TableRequest;
use query_engine_translation::translation::response::{self, ResultMap, TableResponse};

fn plan_with_draw(draw: &str) -> query::QueryPlan {
    let request = TableRequest {
        draw: Some(draw.to_string()),
        ..TableRequest::default()
    };
    query::translate(&TableConfig::new("Orgs"), &request)
}

#[test]
fn counts_and_rows_are_mapped_through() {
    let plan = plan_with_draw("3");
    let mut results = ResultMap::new();
    results.insert(
        StatementKey::RecordsTotal,
        vec![json!({ "COUNT(id)": 42 })],
    );
    results.insert(
        StatementKey::Select,
        vec![json!({ "o": "acme", "cn": "Acme Corp" }), json!({ "o": "umbrella" })],
    );

    let response = response::map_response(&plan, &results);
    assert_eq!(response.draw, 3);
    assert_eq!(response.records_total, 42);
    // No filtered count was executed, so it mirrors the total.
    assert_eq!(response.records_filtered, 42);
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0]["o"], "acme");
}

#[test]
fn filtered_count_is_used_when_present() {
    let plan = plan_with_draw("4");
    let mut results = ResultMap::new();
    results.insert(StatementKey::RecordsTotal, vec![json!([42])]);
    results.insert(StatementKey::RecordsFiltered, vec![json!([7])]);
    results.insert(StatementKey::Select, vec![json!({ "o": "acme" })]);

    let response = response::map_response(&plan, &results);
    assert_eq!(response.records_total, 42);
    assert_eq!(response.records_filtered, 7);
}

#[test]
fn stringly_counts_are_parsed() {
    let plan = plan_with_draw("1");
    let mut results = ResultMap::new();
    results.insert(StatementKey::RecordsTotal, vec![json!({ "count": "19" })]);
    results.insert(StatementKey::Select, vec![]);

    let response = response::map_response(&plan, &results);
    assert_eq!(response.records_total, 19);
    assert_eq!(response.data, Vec::<serde_json::Value>::new());
}

#[test]
fn float_counts_are_truncated_not_zeroed() {
    let plan = plan_with_draw("6");
    let mut results = ResultMap::new();
    results.insert(StatementKey::RecordsTotal, vec![json!({ "count": 42.0 })]);
    results.insert(StatementKey::Select, vec![]);

    let response = response::map_response(&plan, &results);
    assert_eq!(response.records_total, 42);
}

#[test]
fn too_few_results_degrade_to_the_zeroed_response() {
    let plan = plan_with_draw("5");
    let mut results = ResultMap::new();
    results.insert(StatementKey::RecordsTotal, vec![json!([42])]);

    let response = response::map_response(&plan, &results);
    assert_eq!(
        response,
        TableResponse {
            draw: 5,
            ..TableResponse::default()
        }
    );
    let response = response::map_response(&plan, &ResultMap::new());
    assert_eq!(response.records_total, 0);
    assert_eq!(response.draw, 5);
}

#[test]
fn malformed_count_rows_degrade_to_zero() {
    let plan = plan_with_draw("2");
    let mut results = ResultMap::new();
    results.insert(StatementKey::RecordsTotal, vec![json!({})]);
    results.insert(StatementKey::Select, vec![]);
    let response = response::map_response(&plan, &results);
    assert_eq!(response.records_total, 0);

    results.insert(StatementKey::RecordsTotal, vec![json!(null)]);
    let response = response::map_response(&plan, &results);
    assert_eq!(response.records_total, 0);
}

#[test]
fn response_serializes_with_the_wire_keys() {
    let response = TableResponse {
        draw: 9,
        records_total: 100,
        records_filtered: 25,
        data: vec![json!({ "o": "acme" })],
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({
            "draw": 9,
            "recordsTotal": 100,
            "recordsFiltered": 25,
            "data": [{ "o": "acme" }]
        })
    );
}

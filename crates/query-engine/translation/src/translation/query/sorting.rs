//! ORDER BY clause construction from the request's ordering list.

use query_engine_sql::sql::ast::{OrderBy, OrderByDirection, OrderByElement};

use super::Skip;
use crate::translation::request::TableRequest;

/// Resolve each order entry against the request's column list, keeping
/// the given precedence (first entry is the primary sort key). Entries
/// that cannot be resolved are recorded and dropped, never an error.
pub fn translate_order_by(request: &TableRequest, skipped: &mut Vec<Skip>) -> OrderBy {
    let mut elements = vec![];
    for (index, entry) in request.order.iter().enumerate() {
        let Some(column_index) = entry.column_index() else {
            skipped.push(Skip::OrderColumnOutOfRange { index });
            continue;
        };
        let Some(column) = request.columns.get(column_index) else {
            skipped.push(Skip::OrderColumnOutOfRange { index });
            continue;
        };
        if !column.is_orderable() {
            skipped.push(Skip::ColumnNotOrderable { index });
            continue;
        }
        let Some(name) = column.target() else {
            skipped.push(Skip::UnnamedOrderColumn { index });
            continue;
        };
        let direction = if entry.is_descending() {
            OrderByDirection::Desc
        } else {
            OrderByDirection::Asc
        };
        elements.push(OrderByElement {
            column: name.to_string(),
            direction,
        });
    }
    OrderBy { elements }
}

//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

/// An empty `WHERE` clause.
pub fn empty_where() -> Where {
    Where(vec![])
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Build a simple select with no filters, ordering, or paging.
pub fn simple_select(select_list: SelectList, from: From) -> Select {
    Select {
        select_list,
        from,
        where_: empty_where(),
        order_by: empty_order_by(),
        pagination: Pagination::None,
    }
}

/// Build a `SELECT COUNT(...)` over the same FROM target.
pub fn count_select(count_type: CountType, from: From) -> Select {
    simple_select(SelectList::Count(count_type), from)
}

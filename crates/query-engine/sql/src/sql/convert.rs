//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::string::Sql;

impl Select {
    /// Render the statement as the caller will execute it, including the
    /// terminating semicolon.
    pub fn to_statement_string(&self) -> String {
        let mut sql = Sql::new();
        self.to_sql(&mut sql);
        sql.append_syntax(";");
        sql.sql
    }

    pub fn to_sql(&self, sql: &mut Sql) {
        if let Pagination::RowNumBetween { lower, upper } = self.pagination {
            sql.append_syntax("SELECT * FROM (SELECT a.*, ROWNUM rnum FROM (");
            self.core_to_sql(sql);
            sql.append_syntax(") a) WHERE rnum BETWEEN ");
            sql.append_syntax(&lower.to_string());
            sql.append_syntax(" AND ");
            sql.append_syntax(&upper.to_string());
        } else {
            self.core_to_sql(sql);
            self.pagination.to_sql(sql);
        }
    }

    /// Everything except pagination, so the Oracle wrapper can reuse it.
    fn core_to_sql(&self, sql: &mut Sql) {
        sql.append_syntax("SELECT ");
        self.select_list.to_sql(sql);
        sql.append_syntax(" FROM ");
        self.from.to_sql(sql);
        self.where_.to_sql(sql);
        self.order_by.to_sql(sql);
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut Sql) {
        match self {
            SelectList::SelectStar => sql.append_syntax("*"),
            SelectList::Count(count_type) => {
                sql.append_syntax("COUNT(");
                count_type.to_sql(sql);
                sql.append_syntax(")");
            }
            SelectList::RawFragment(fragment) => sql.append_syntax(fragment),
        }
    }
}

impl CountType {
    pub fn to_sql(&self, sql: &mut Sql) {
        match self {
            CountType::Star => sql.append_syntax("*"),
            CountType::Column(name) => sql.append_identifier(name),
        }
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut Sql) {
        match self {
            From::Table(name) => sql.append_identifier(name),
            From::RawFragment(fragment) => sql.append_syntax(fragment),
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut Sql) {
        let Where(conjuncts) = self;
        if conjuncts.is_empty() {
            return;
        }
        sql.append_syntax(" WHERE ");
        for (index, conjunct) in conjuncts.iter().enumerate() {
            sql.append_syntax("(");
            conjunct.to_sql(sql);
            sql.append_syntax(")");
            if index < (conjuncts.len() - 1) {
                sql.append_syntax(" AND ");
            }
        }
    }
}

impl Expression {
    pub fn to_sql(&self, sql: &mut Sql) {
        match self {
            Expression::And(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.to_sql_grouped(sql);
                    if index < (items.len() - 1) {
                        sql.append_syntax(" AND ");
                    }
                }
            }
            Expression::Or(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.to_sql_grouped(sql);
                    if index < (items.len() - 1) {
                        sql.append_syntax(" OR ");
                    }
                }
            }
            Expression::TextSearch {
                column,
                pattern,
                cast_to_text,
            } => {
                if *cast_to_text {
                    sql.append_syntax("CAST(");
                    sql.append_identifier(column);
                    sql.append_syntax(" AS TEXT) ILIKE ");
                } else {
                    sql.append_identifier(column);
                    sql.append_syntax(" LIKE ");
                }
                sql.append_string_literal(&format!("%{}%", pattern));
            }
            Expression::Between { column, low, high } => {
                sql.append_identifier(column);
                sql.append_syntax(" BETWEEN ");
                sql.append_string_literal(low);
                sql.append_syntax(" AND ");
                sql.append_string_literal(high);
            }
            Expression::Comparison {
                column,
                operator,
                value,
            } => {
                sql.append_identifier(column);
                match operator {
                    ComparisonOperator::GreaterThanOrEqualTo => sql.append_syntax(" >= "),
                    ComparisonOperator::LessThanOrEqualTo => sql.append_syntax(" <= "),
                }
                sql.append_string_literal(value);
            }
            Expression::RawFragment(fragment) => sql.append_syntax(fragment),
        }
    }

    /// Print the expression, parenthesizing it when it is itself a
    /// conjunction or disjunction, so nesting keeps its meaning.
    fn to_sql_grouped(&self, sql: &mut Sql) {
        match self {
            Expression::And(_) | Expression::Or(_) => {
                sql.append_syntax("(");
                self.to_sql(sql);
                sql.append_syntax(")");
            }
            _ => self.to_sql(sql),
        }
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut Sql) {
        if self.elements.is_empty() {
            return;
        }
        sql.append_syntax(" ORDER BY ");
        for (index, element) in self.elements.iter().enumerate() {
            element.to_sql(sql);
            if index < (self.elements.len() - 1) {
                sql.append_syntax(", ");
            }
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut Sql) {
        sql.append_identifier(&self.column);
        match self.direction {
            OrderByDirection::Asc => sql.append_syntax(" ASC"),
            OrderByDirection::Desc => sql.append_syntax(" DESC"),
        }
    }
}

impl Pagination {
    /// Inline pagination clauses. `RowNumBetween` is a statement wrapper
    /// and is handled by [`Select::to_sql`].
    pub fn to_sql(&self, sql: &mut Sql) {
        match self {
            Pagination::None | Pagination::RowNumBetween { .. } => {}
            Pagination::LimitCommaOffset { start, length } => {
                sql.append_syntax(" LIMIT ");
                sql.append_syntax(&start.to_string());
                sql.append_syntax(", ");
                sql.append_syntax(&length.to_string());
            }
            Pagination::OffsetLimit { start, length } => {
                sql.append_syntax(" OFFSET ");
                sql.append_syntax(&start.to_string());
                sql.append_syntax(" LIMIT ");
                sql.append_syntax(&length.to_string());
            }
        }
    }
}

//! Configuration for a single table or view exposed to the grid.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use query_engine_sql::sql::dialect::Dialect;

use crate::error::ConfigError;

/// The `TableConfig` type collects everything needed to compile statements
/// for one table or view.
///
/// A value is built once at startup and shared read-only across requests;
/// per-request state travels inside the compiled plan instead of being
/// written back here, so one instance can serve concurrent requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// The table or view name queried in FROM clauses.
    pub table: String,
    /// Raw SELECT-list override. When set, count statements use `COUNT(*)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_sql: Option<String>,
    /// Raw FROM override, replacing the table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_sql: Option<String>,
    /// A caller-written filter ANDed into every WHERE clause. Opaque to us.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_and_sql: Option<String>,
    /// Column counted by the unfiltered total statement.
    #[serde(default = "default_count_column")]
    pub count_column: String,
    /// Explicit allow-list for the global search. When present it overrides
    /// the searchable flags sent with the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_columns: Option<Vec<String>>,
    /// Column the date window below applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    /// Database or schema to switch to before querying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default)]
    pub dialect: Dialect,
}

fn default_count_column() -> String {
    "id".to_string()
}

impl TableConfig {
    /// A configuration for the given table with every option at its default.
    pub fn new(table: impl Into<String>) -> Self {
        TableConfig {
            table: table.into(),
            select_sql: None,
            from_sql: None,
            where_and_sql: None,
            count_column: default_count_column(),
            search_columns: None,
            date_column: None,
            date_from: None,
            date_to: None,
            database: None,
            dialect: Dialect::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_select_sql(mut self, select_sql: impl Into<String>) -> Self {
        self.select_sql = Some(select_sql.into());
        self
    }

    pub fn with_from_sql(mut self, from_sql: impl Into<String>) -> Self {
        self.from_sql = Some(from_sql.into());
        self
    }

    pub fn with_where_and_sql(mut self, where_and_sql: impl Into<String>) -> Self {
        self.where_and_sql = Some(where_and_sql.into());
        self
    }

    pub fn with_count_column(mut self, count_column: impl Into<String>) -> Self {
        self.count_column = count_column.into();
        self
    }

    pub fn with_search_columns(mut self, columns: Vec<String>) -> Self {
        self.search_columns = Some(columns);
        self
    }

    /// Restrict results to a date window on `column`. Either bound may be
    /// `None` for a one-sided window.
    pub fn with_date_range(
        mut self,
        column: impl Into<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_column = Some(column.into());
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Check construction-time invariants the compiler relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        if (self.date_from.is_some() || self.date_to.is_some()) && self.date_column.is_none() {
            return Err(ConfigError::DateBoundsWithoutColumn);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    #[test]
    fn minimal_document_parses_with_defaults() {
        let config: TableConfig = serde_json::from_str(r#"{ "table": "Orgs" }"#).unwrap();
        assert_eq!(config, TableConfig::new("Orgs"));
        assert_eq!(config.count_column, "id");
        assert_eq!(config.dialect, Dialect::Generic);
    }

    #[test]
    fn camel_case_keys_round_trip() {
        let config = TableConfig::new("Orgs")
            .with_dialect(Dialect::Postgres)
            .with_where_and_sql("org_id = 7")
            .with_search_columns(vec!["o".to_string(), "cn".to_string()]);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["whereAndSql"], "org_id = 7");
        assert_eq!(value["dialect"], "postgres");
        let parsed: TableConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn validation_rejects_bad_configs() {
        assert_eq!(
            TableConfig::new("  ").validate(),
            Err(ConfigError::EmptyTableName)
        );
        let mut config = TableConfig::new("Orgs");
        config.date_from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).latest();
        assert_eq!(config.validate(), Err(ConfigError::DateBoundsWithoutColumn));
        config.date_column = Some("created_at".to_string());
        assert_eq!(config.validate(), Ok(()));
    }
}

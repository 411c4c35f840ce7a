//! Type definitions of a low-level SQL string representation.

/// A SQL statement string under construction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Sql {
    pub sql: String,
}

impl Sql {
    pub fn new() -> Sql {
        Sql { sql: String::new() }
    }

    /// Append a fragment of SQL syntax verbatim.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a table or column identifier. Identifiers come from the
    /// table configuration, not from request input, and are emitted
    /// unquoted so raw fragments like `a.id` keep working.
    pub fn append_identifier(&mut self, name: &str) {
        self.sql.push_str(name);
    }

    /// Append a single-quoted string literal. Contents must already have
    /// passed through [`super::sanitize::sanitize`].
    pub fn append_string_literal(&mut self, value: &str) {
        self.sql.push('\'');
        self.sql.push_str(value);
        self.sql.push('\'');
    }
}

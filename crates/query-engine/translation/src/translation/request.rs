//! The server-side-processing request wire format.
//!
//! The UI layer sends booleans as the strings `"true"`/`"false"` and
//! numbers as numeric strings. The deserializers here also tolerate native
//! JSON numbers and booleans, normalizing everything to strings; the
//! accessor methods then parse leniently, treating anything unparseable as
//! absent.

use serde::{Deserialize, Deserializer, Serialize};

/// One incoming request from the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    /// Opaque echo token; the client uses it to discard stale responses.
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub draw: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub length: Option<String>,
    #[serde(default)]
    pub search: SearchTerm,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub order: Vec<OrderInstruction>,
}

/// A free-text search value, global or per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
    #[serde(default)]
    pub value: String,
}

/// One column as described by the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// The column's data source, used as the column name when `name` is
    /// empty (the grid omits `name` unless explicitly configured).
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub data: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub searchable: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub orderable: Option<String>,
    #[serde(default)]
    pub search: SearchTerm,
}

/// One sort instruction; `column` indexes into the request's column list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInstruction {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub column: Option<String>,
    #[serde(default)]
    pub dir: String,
}

impl TableRequest {
    /// The draw token as an integer, 0 when absent or unparseable.
    pub fn draw_token(&self) -> u64 {
        parse_integer(self.draw.as_deref())
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0)
    }

    /// The page start offset. Negative or unparseable values mean
    /// "no pagination", matching the grid's `start = -1` convention.
    pub fn start_offset(&self) -> Option<u64> {
        parse_integer(self.start.as_deref()).and_then(|n| u64::try_from(n).ok())
    }

    /// The page length; only positive values count.
    pub fn page_length(&self) -> Option<u64> {
        parse_integer(self.length.as_deref()).and_then(|n| u64::try_from(n).ok().filter(|n| *n > 0))
    }
}

impl ColumnDescriptor {
    pub fn is_searchable(&self) -> bool {
        flag_is_true(self.searchable.as_deref())
    }

    pub fn is_orderable(&self) -> bool {
        flag_is_true(self.orderable.as_deref())
    }

    /// The SQL column name this descriptor refers to, if it has one.
    pub fn target(&self) -> Option<&str> {
        if !self.name.is_empty() {
            return Some(&self.name);
        }
        self.data.as_deref().filter(|data| !data.is_empty())
    }
}

impl OrderInstruction {
    /// The referenced column index, when in parseable non-negative form.
    pub fn column_index(&self) -> Option<usize> {
        parse_integer(self.column.as_deref()).and_then(|n| usize::try_from(n).ok())
    }

    pub fn is_descending(&self) -> bool {
        self.dir.eq_ignore_ascii_case("desc")
    }
}

fn flag_is_true(flag: Option<&str>) -> bool {
    matches!(flag, Some("true"))
}

fn parse_integer(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}

/// Accept a string, number, boolean, or null where the wire contract says
/// "string". Everything is normalized to its string form.
fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        String(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(|scalar| match scalar {
        Scalar::String(value) => value,
        Scalar::Integer(value) => value.to_string(),
        Scalar::Float(value) => value.to_string(),
        Scalar::Bool(value) => value.to_string(),
    }))
}

/// Like [`lenient_scalar`], for fields where absence means the empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_scalar(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn wire_shape_parses_with_stringly_scalars() -> anyhow::Result<()> {
        let request: TableRequest = serde_json::from_str(
            r#"{
                "draw": "3",
                "start": "0",
                "length": "10",
                "search": { "value": "hello" },
                "columns": [
                    { "name": "o", "searchable": "true", "orderable": "true",
                      "search": { "value": "" } },
                    { "data": "cn", "searchable": "false", "orderable": "true" }
                ],
                "order": [ { "column": "0", "dir": "asc" } ]
            }"#,
        )?;
        assert_eq!(request.draw_token(), 3);
        assert_eq!(request.start_offset(), Some(0));
        assert_eq!(request.page_length(), Some(10));
        assert!(request.columns[0].is_searchable());
        assert!(!request.columns[1].is_searchable());
        assert_eq!(request.columns[1].target(), Some("cn"));
        assert_eq!(request.order[0].column_index(), Some(0));
        assert!(!request.order[0].is_descending());
        Ok(())
    }

    #[test]
    fn native_numbers_and_booleans_are_tolerated() -> anyhow::Result<()> {
        let request: TableRequest = serde_json::from_str(
            r#"{
                "draw": 7,
                "start": 30,
                "length": 15,
                "columns": [ { "name": "o", "orderable": true }, { "name": 0 } ],
                "order": [ { "column": 0, "dir": "desc" } ]
            }"#,
        )?;
        assert_eq!(request.draw_token(), 7);
        assert_eq!(request.start_offset(), Some(30));
        assert_eq!(request.page_length(), Some(15));
        assert!(request.columns[0].is_orderable());
        assert_eq!(request.columns[1].target(), Some("0"));
        assert!(request.order[0].is_descending());
        Ok(())
    }

    #[test]
    fn missing_and_malformed_fields_degrade_to_absent() {
        let request = TableRequest {
            draw: Some("not a number".to_string()),
            start: Some("-1".to_string()),
            length: Some("0".to_string()),
            ..Default::default()
        };
        assert_eq!(request.draw_token(), 0);
        assert_eq!(request.start_offset(), None);
        assert_eq!(request.page_length(), None);
        assert_eq!(TableRequest::default().start_offset(), None);
    }
}

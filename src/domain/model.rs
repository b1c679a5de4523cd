use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single table row as returned by the backend. Field names follow the
/// store's wire schema (`Id`, `Name`, plus the suffixed `*_c` columns).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn id(&self) -> Option<i64> {
        self.data.get("Id").and_then(|v| v.as_i64())
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(|v| v.as_str())
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.data.get(field).and_then(|v| v.as_f64())
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.data.get(field).and_then(|v| v.as_bool())
    }
}

/// A scalar that callers may supply either as a number or as its string
/// form (`12.5` or `"12.5"`). Strings that fail to parse coerce to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> f64 {
        match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Number(value as f64)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Numeric::Text(value)
    }
}

/// Resolves a logical field from its canonical column and its deprecated
/// alias. Canonical wins; the alias is accepted only until callers migrate.
pub fn resolve_field<T: Clone>(canonical: &Option<T>, alias: &Option<T>) -> Option<T> {
    canonical.clone().or_else(|| alias.clone())
}

/// Numeric variant of [`resolve_field`]: absent on both sides coerces to 0.
pub fn resolve_number(canonical: &Option<Numeric>, alias: &Option<Numeric>) -> f64 {
    resolve_field(canonical, alias)
        .map(|n| n.as_f64())
        .unwrap_or(0.0)
}

/// Leading-integer id coercion for callers holding string ids (route
/// params, CLI args). `"42"` and `"42abc"` both yield 42; `"abc"` yields
/// nothing. The services themselves only ever see `i64`.
pub fn parse_record_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Wire shape `{"field": {"Name": "..."}}` used in query projections.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub field: FieldName,
}

impl FieldSpec {
    pub fn named(name: &str) -> Self {
        Self {
            field: FieldName {
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub sorttype: SortDirection,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PagingInfo {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "Values")]
    pub values: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryParams {
    pub fields: Vec<FieldSpec>,
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderBy>>,
    #[serde(rename = "pagingInfo", skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
}

/// Batch create/update body. The store treats every write as a batch even
/// when this crate only ever sends a single record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordParams {
    pub records: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteParams {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

/// The store's uniform response wrapper. `data` carries a record or a list
/// of records; `results` carries per-record outcomes for batch writes.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub results: Option<Vec<BatchResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Record>,
}

impl Envelope {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// `data` as a list, tolerating both an array and a bare object.
    pub fn data_records(&self) -> Vec<Record> {
        match &self.data {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            Some(value) => serde_json::from_value(value.clone())
                .map(|record| vec![record])
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn data_record(&self) -> Option<Record> {
        self.data
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// First successful sub-result's payload, if any.
    pub fn first_successful(&self) -> Option<Record> {
        self.results
            .as_ref()?
            .iter()
            .filter(|r| r.success)
            .find_map(|r| r.data.clone())
    }
}

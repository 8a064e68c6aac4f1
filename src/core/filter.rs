//! Filter requests as they arrive from clients
//!
//! Every field is optional and every value is read leniently: a malformed
//! value degrades to the field's default instead of failing the request.
//! The accepted keys mirror the list endpoints:
//!
//! ```text
//! ?q=hello&status=draft&orders=views_count:desc,title&only_trashed=1&page=2
//! ```
//!
//! `orders` may also be given as a JSON list (`[{"field": "title",
//! "direction": "asc"}]` or `["title:asc"]`) or as an object
//! (`{"views_count": "desc"}`), key order preserved.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Direction of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction; anything that is not a descending keyword is ascending
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" | "-1" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One requested `(field, direction)` sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse `field`, `field:asc` or `field:desc`
    ///
    /// Returns `None` for an empty field name.
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (field, SortDirection::parse_lenient(direction)),
            None => (raw, SortDirection::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, direction))
    }

    /// Parse a comma separated list such as `views_count:desc,title`
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::parse).collect()
    }
}

/// Requested status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Publish,
    Draft,
    /// Published and drafts; also what any unrecognized value means
    #[default]
    Any,
}

impl StatusFilter {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "publish" => StatusFilter::Publish,
            "draft" => StatusFilter::Draft,
            _ => StatusFilter::Any,
        }
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(raw)) => StatusFilter::parse_lenient(&raw),
            _ => StatusFilter::Any,
        })
    }
}

/// Filter parameters of one list request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    /// Free-text search term
    #[serde(rename = "q", alias = "query", deserialize_with = "lenient_string")]
    pub query: Option<String>,

    /// Status filter
    pub status: StatusFilter,

    /// Requested sort keys, in priority order
    #[serde(rename = "orders", alias = "sort", deserialize_with = "lenient_orders")]
    pub sort_orders: Vec<SortOrder>,

    /// Requested entity subtype (e.g. "post" or "page")
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub entity_type: Option<String>,

    /// Include soft-deleted records alongside live ones
    #[serde(deserialize_with = "lenient_bool")]
    pub include_trashed: bool,

    /// List soft-deleted records only
    #[serde(deserialize_with = "lenient_bool")]
    pub only_trashed: bool,

    /// Page number (starts at 1)
    #[serde(deserialize_with = "lenient_usize")]
    pub page: Option<usize>,

    /// Items per page
    #[serde(deserialize_with = "lenient_usize")]
    pub per_page: Option<usize>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.sort_orders.push(order);
        self
    }

    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn with_trashed(mut self) -> Self {
        self.include_trashed = true;
        self
    }

    pub fn only_trashed(mut self) -> Self {
        self.only_trashed = true;
        self
    }

    pub fn with_page(mut self, page: usize, per_page: usize) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// The search term, trimmed; `None` when absent or blank
    pub fn search_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes"
        ),
        _ => false,
    })
}

fn lenient_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_orders<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<SortOrder>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(orders_from_value).unwrap_or_default())
}

fn orders_from_value(value: Value) -> Vec<SortOrder> {
    match value {
        Value::String(raw) => SortOrder::parse_list(&raw),
        Value::Array(items) => items.into_iter().filter_map(order_from_item).collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(field, direction)| {
                let direction = direction
                    .as_str()
                    .map(SortDirection::parse_lenient)
                    .unwrap_or_default();
                let field = field.trim();
                (!field.is_empty()).then(|| SortOrder::new(field, direction))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn order_from_item(item: Value) -> Option<SortOrder> {
    match item {
        Value::String(raw) => SortOrder::parse(&raw),
        Value::Object(map) => {
            let field = map.get("field")?.as_str()?.trim();
            if field.is_empty() {
                return None;
            }
            let direction = map
                .get("direction")
                .and_then(Value::as_str)
                .map(SortDirection::parse_lenient)
                .unwrap_or_default();
            Some(SortOrder::new(field, direction))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("title"), Some(SortOrder::asc("title")));
        assert_eq!(
            SortOrder::parse(" views_count : DESC "),
            Some(SortOrder::desc("views_count"))
        );
        assert_eq!(SortOrder::parse("title:sideways"), Some(SortOrder::asc("title")));
        assert_eq!(SortOrder::parse(":desc"), None);
    }

    #[test]
    fn test_sort_order_parse_list_skips_blanks() {
        let orders = SortOrder::parse_list("views_count:desc,,title");
        assert_eq!(
            orders,
            vec![SortOrder::desc("views_count"), SortOrder::asc("title")]
        );
    }

    #[test]
    fn test_status_filter_lenient() {
        assert_eq!(StatusFilter::parse_lenient("publish"), StatusFilter::Publish);
        assert_eq!(StatusFilter::parse_lenient("DRAFT"), StatusFilter::Draft);
        assert_eq!(StatusFilter::parse_lenient("deleted"), StatusFilter::Any);
        assert_eq!(StatusFilter::parse_lenient(""), StatusFilter::Any);
    }

    #[test]
    fn test_deserialize_full_request() {
        let request: FilterRequest = serde_json::from_value(json!({
            "q": "hello",
            "status": "draft",
            "orders": "views_count:desc,title",
            "type": "page",
            "only_trashed": "1",
            "page": "2",
            "per_page": 5
        }))
        .unwrap();

        assert_eq!(request.query.as_deref(), Some("hello"));
        assert_eq!(request.status, StatusFilter::Draft);
        assert_eq!(
            request.sort_orders,
            vec![SortOrder::desc("views_count"), SortOrder::asc("title")]
        );
        assert_eq!(request.entity_type.as_deref(), Some("page"));
        assert!(request.only_trashed);
        assert!(!request.include_trashed);
        assert_eq!(request.page, Some(2));
        assert_eq!(request.per_page, Some(5));
    }

    #[test]
    fn test_deserialize_malformed_values_degrade() {
        let request: FilterRequest = serde_json::from_value(json!({
            "q": ["not", "a", "string"],
            "status": 17,
            "orders": 3.5,
            "only_trashed": "maybe",
            "page": "first",
            "unknown_key": true
        }))
        .unwrap();

        assert_eq!(request.query, None);
        assert_eq!(request.status, StatusFilter::Any);
        assert!(request.sort_orders.is_empty());
        assert!(!request.only_trashed);
        assert_eq!(request.page, None);
    }

    #[test]
    fn test_deserialize_orders_list_and_object() {
        let from_list: FilterRequest = serde_json::from_value(json!({
            "orders": [{"field": "title", "direction": "desc"}, "top:asc", 5, {"direction": "asc"}]
        }))
        .unwrap();
        assert_eq!(
            from_list.sort_orders,
            vec![SortOrder::desc("title"), SortOrder::asc("top")]
        );

        let from_object: FilterRequest = serde_json::from_value(json!({
            "orders": {"views_count": "desc", "title": "asc"}
        }))
        .unwrap();
        assert_eq!(
            from_object.sort_orders,
            vec![SortOrder::desc("views_count"), SortOrder::asc("title")]
        );
    }

    #[test]
    fn test_search_term_trims_and_drops_blank() {
        assert_eq!(FilterRequest::new().search_term(), None);
        assert_eq!(FilterRequest::new().with_query("   ").search_term(), None);
        assert_eq!(
            FilterRequest::new().with_query("  hello ").search_term(),
            Some("hello")
        );
    }

    #[test]
    fn test_empty_object_is_default() {
        let request: FilterRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, FilterRequest::default());
    }
}

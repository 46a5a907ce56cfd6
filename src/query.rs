use serde_json::{json, Map, Value};

/// How a single [`QueryItem`] matches its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Full-text `match` query.
    Match,
    /// Exact `term` query.
    Term,
    /// `wildcard` query (`*`/`?` patterns).
    Wildcard,
}

impl MatchType {
    fn key(self) -> &'static str {
        match self {
            MatchType::Match => "match",
            MatchType::Term => "term",
            MatchType::Wildcard => "wildcard",
        }
    }
}

/// One field/value constraint of a [`QueryDoc`].
#[derive(Debug, Clone)]
pub struct QueryItem {
    pub field: String,
    pub value: Value,
    pub match_type: MatchType,
}

impl QueryItem {
    pub fn new(field: impl Into<String>, value: impl Into<Value>, match_type: MatchType) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            match_type,
        }
    }

    fn clause(&self) -> Value {
        let mut inner = Map::new();
        inner.insert(self.field.clone(), self.value.clone());
        let mut outer = Map::new();
        outer.insert(self.match_type.key().to_string(), Value::Object(inner));
        Value::Object(outer)
    }
}

/// Structured query description dispatched by
/// [`ElkStore::search`](crate::ElkStore::search).
///
/// Items in `and` are combined with boolean AND (`bool.must`); items in
/// `not` are excluded (`bool.must_not`). A query with no items at all
/// matches everything. The store stamps `index` with its own index name
/// before dispatch and performs no other mutation.
#[derive(Debug, Clone, Default)]
pub struct QueryDoc {
    /// Target index; set by the store, not the caller.
    pub index: Option<String>,
    /// Maximum number of hits to return (server default when `None`).
    pub size: Option<u64>,
    pub and: Vec<QueryItem>,
    pub not: Vec<QueryItem>,
}

impl QueryDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint that must match.
    pub fn and(mut self, item: QueryItem) -> Self {
        self.and.push(item);
        self
    }

    /// Add a constraint that must not match.
    pub fn not(mut self, item: QueryItem) -> Self {
        self.not.push(item);
        self
    }

    /// Cap the number of returned hits.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Render the request body in the Elasticsearch Query DSL.
    pub fn body(&self) -> Value {
        let query = if self.and.is_empty() && self.not.is_empty() {
            json!({ "match_all": {} })
        } else {
            let mut bool_query = Map::new();
            if !self.and.is_empty() {
                bool_query.insert(
                    "must".to_string(),
                    Value::Array(self.and.iter().map(QueryItem::clause).collect()),
                );
            }
            if !self.not.is_empty() {
                bool_query.insert(
                    "must_not".to_string(),
                    Value::Array(self.not.iter().map(QueryItem::clause).collect()),
                );
            }
            json!({ "bool": bool_query })
        };

        let mut body = Map::new();
        if let Some(size) = self.size {
            body.insert("size".to_string(), json!(size));
        }
        body.insert("query".to_string(), query);
        Value::Object(body)
    }
}

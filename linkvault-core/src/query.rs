use std::collections::HashMap;

use rusqlite::types::Value;
use serde::Serialize;

use crate::data::UrlRecord;
use crate::error::{Result, StoreError};

/// How a `url` criterion should match when not in substring-search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlMatch {
    Exact(String),
    AnyOf(Vec<String>),
}

/// Typed filter for URL queries.
///
/// Loosely typed request criteria are coerced exactly once, at
/// [`UrlFilter::from_params`]; everything past that boundary is strongly
/// typed. `visited` and `scope` apply as exact boolean filters regardless
/// of `search` mode; only the `url` criterion switches matching strategy.
#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    pub url: Option<UrlMatch>,
    pub visited: Option<bool>,
    pub scope: Option<bool>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub search: bool,
}

/// Result envelope for server-driven paged tables: the unfiltered namespace
/// size, the filter match count ignoring pagination, and one page of data.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub records_total: u64,
    pub records_filtered: u64,
    pub data: Vec<UrlRecord>,
}

impl UrlFilter {
    /// Coerce decoded query-string criteria (scalar-or-list values) into a
    /// typed filter. Unknown keys are ignored and booleans are parsed
    /// best-effort from the first value; a non-integer `offset`/`limit` is
    /// the one criteria error that is loud.
    pub fn from_params(params: &HashMap<String, Vec<String>>) -> Result<Self> {
        let first = |key: &str| params.get(key).and_then(|values| values.first());

        let url = params.get("url").and_then(|values| match values.as_slice() {
            [] => None,
            [single] => Some(UrlMatch::Exact(single.clone())),
            many => Some(UrlMatch::AnyOf(many.to_vec())),
        });

        Ok(UrlFilter {
            url,
            visited: first("visited").map(|raw| parse_bool(raw)),
            scope: first("scope").map(|raw| parse_bool(raw)),
            offset: first("offset").map(|raw| parse_index("offset", raw)).transpose()?,
            limit: first("limit").map(|raw| parse_index("limit", raw)).transpose()?,
            search: first("search").map(|raw| parse_bool(raw)).unwrap_or(false),
        })
    }

    /// Render the filter as SQL fragments for a namespace-scoped query.
    /// Placeholder numbering starts at `?2`; `?1` is reserved for the
    /// target id. Stats plans never paginate, so the filtered count always
    /// reflects the full matching set.
    pub(crate) fn plan(&self, for_stats: bool) -> QueryPlan {
        let mut where_sql = String::new();
        let mut tail_sql = String::new();
        let mut params: Vec<Value> = Vec::new();
        let mut next = 2usize;

        match (&self.url, self.search) {
            (Some(matcher), true) => {
                // Substring mode uses the first value even when a set was given.
                let needle = match matcher {
                    UrlMatch::Exact(value) => value.as_str(),
                    UrlMatch::AnyOf(values) => {
                        values.first().map(String::as_str).unwrap_or("")
                    }
                };
                where_sql.push_str(&format!(" AND url LIKE ?{next}"));
                params.push(Value::from(format!("%{needle}%")));
                next += 1;
            }
            (Some(UrlMatch::Exact(value)), false) => {
                where_sql.push_str(&format!(" AND url = ?{next}"));
                params.push(Value::from(value.clone()));
                next += 1;
            }
            (Some(UrlMatch::AnyOf(values)), false) => {
                if values.is_empty() {
                    // Membership in the empty set matches nothing.
                    where_sql.push_str(" AND 0");
                } else {
                    let placeholders: Vec<String> =
                        (0..values.len()).map(|i| format!("?{}", next + i)).collect();
                    where_sql.push_str(&format!(" AND url IN ({})", placeholders.join(", ")));
                    params.extend(values.iter().cloned().map(Value::from));
                    next += values.len();
                }
            }
            (None, _) => {}
        }

        if let Some(visited) = self.visited {
            where_sql.push_str(&format!(" AND visited = ?{next}"));
            params.push(Value::from(visited));
            next += 1;
        }
        if let Some(scope) = self.scope {
            where_sql.push_str(&format!(" AND scope = ?{next}"));
            params.push(Value::from(scope));
            next += 1;
        }

        if !for_stats {
            match (self.limit, self.offset) {
                (Some(limit), Some(offset)) => {
                    tail_sql.push_str(&format!(" LIMIT ?{} OFFSET ?{}", next, next + 1));
                    params.push(Value::from(limit as i64));
                    params.push(Value::from(offset as i64));
                }
                (Some(limit), None) => {
                    tail_sql.push_str(&format!(" LIMIT ?{next}"));
                    params.push(Value::from(limit as i64));
                }
                (None, Some(offset)) => {
                    // SQLite requires a LIMIT clause before OFFSET.
                    tail_sql.push_str(&format!(" LIMIT -1 OFFSET ?{next}"));
                    params.push(Value::from(offset as i64));
                }
                (None, None) => {}
            }
        }

        QueryPlan {
            where_sql,
            tail_sql,
            params,
        }
    }
}

/// SQL fragments and bind values produced from a [`UrlFilter`].
pub(crate) struct QueryPlan {
    pub(crate) where_sql: String,
    pub(crate) tail_sql: String,
    pub(crate) params: Vec<Value>,
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

fn parse_index(param: &'static str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| StoreError::InvalidParameterType {
            param,
            value: raw.to_string(),
        })
}

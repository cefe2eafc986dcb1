//! Converts the loosely-typed wire shape of a listing request into the
//! canonical [`ListQuery`]. All input leniency lives here: lone objects where
//! a list is expected, JSON-encoded string sections and malformed clauses are
//! resolved before any other component sees the query.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::model::list_filter::FilterCondition;
use crate::model::list_query::{ListPagination, ListQuery, ListSorting, SearchClause};

/// wire shape of a listing request; every section is optional and kept raw
/// so that one malformed section never fails the whole request
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawListQuery {
    pub pagination: Option<Value>,
    pub sort: Option<Value>,
    pub filters: Option<Value>,
    pub search: Option<Value>,
    pub relations: Option<Value>,
    pub with_deleted: Option<Value>,
}

impl From<RawListQuery> for ListQuery {
    fn from(raw: RawListQuery) -> Self {
        normalize(raw)
    }
}

/// canonicalizes a raw listing request. Sections that cannot be interpreted
/// degrade to "no effect" instead of failing the request.
pub fn normalize(raw: RawListQuery) -> ListQuery {
    ListQuery {
        pagination: raw.pagination.and_then(single_clause::<ListPagination>),
        sorting: raw
            .sort
            .map(clause_list::<ListSorting>)
            .unwrap_or_default(),
        filtering: raw
            .filters
            .map(clause_list::<FilterCondition>)
            .unwrap_or_default(),
        search: raw.search.and_then(single_clause::<SearchClause>),
        relations: raw.relations.map(relation_list).unwrap_or_default(),
        include_soft_deleted: raw.with_deleted.map(as_bool).unwrap_or(false),
    }
}

/// a string section is assumed to carry a JSON-encoded clause; when it does
/// not parse, the original value is kept and falls through the per-clause
/// conversion below
fn decoded(value: Value) -> Value {
    match value {
        Value::String(encoded) => match serde_json::from_str(&encoded) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(encoded),
        },
        other => other,
    }
}

fn clause<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!("dropping malformed query clause: {err}");
            None
        }
    }
}

fn single_clause<T: DeserializeOwned>(value: Value) -> Option<T> {
    clause(decoded(value))
}

fn clause_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match decoded(value) {
        Value::Array(items) => items.into_iter().filter_map(clause::<T>).collect(),
        Value::Null => vec![],
        lone => clause(lone).into_iter().collect(),
    }
}

fn relation_list(value: Value) -> Vec<String> {
    match decoded(value) {
        Value::Array(items) => items.into_iter().filter_map(clause::<String>).collect(),
        Value::String(path) => vec![path],
        other => {
            tracing::debug!("dropping malformed relations section: {other}");
            vec![]
        }
    }
}

fn as_bool(value: Value) -> bool {
    matches!(decoded(value), Value::Bool(true))
}

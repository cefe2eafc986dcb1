use serde::Deserialize;

use super::common::SortDirection;
use super::list_filter::{FilterCondition, SearchCombinator};

/// canonical, immutable description of a single listing request; constructed
/// per request (usually through the normalizer) and discarded after the query
/// executes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub pagination: Option<ListPagination>,
    pub sorting: Vec<ListSorting>,
    pub filtering: Vec<FilterCondition>,
    pub search: Option<SearchClause>,
    pub relations: Vec<String>,
    pub include_soft_deleted: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct ListPagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ListPagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// one sorting clause; position in the `sorting` sequence determines
/// tie-break precedence
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ListSorting {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// case-insensitive substring search over a set of fields, combined with
/// AND or OR (wire name of the combinator is `operator`)
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SearchClause {
    #[serde(default)]
    pub fields: Vec<String>,
    pub query: String,
    #[serde(default, rename = "operator")]
    pub combinator: SearchCombinator,
}

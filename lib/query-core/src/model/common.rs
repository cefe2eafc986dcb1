use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

/// page-derived metadata attached to every paginated listing
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

impl<T> Paginated<T> {
    /// packages fetched rows with recomputed pagination metadata; caller-supplied
    /// totals are never trusted beyond the raw count
    pub fn assemble(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = calculate_pages_count(total, limit as u64);
        Self {
            data,
            meta: ListMeta {
                total,
                page,
                limit,
                total_pages,
                has_next_page: (page as u64) < total_pages,
                has_prev_page: page > 1,
            },
        }
    }
}

pub fn calculate_pages_count(total_items_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }

    (total_items_count / page_size) + std::cmp::min(total_items_count % page_size, 1)
}

pub mod error;

use error::DataLayerError;

use crate::model::common::Paginated;
use crate::model::list_query::ListQuery;

/// read-side operations every entity-access layer exposes; implemented
/// generically by the sql provider
#[async_trait::async_trait]
pub trait EntityReader<T> {
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<T>, DataLayerError>;

    async fn find_many_paginated(&self, query: &ListQuery)
        -> Result<Paginated<T>, DataLayerError>;

    async fn count(&self, query: &ListQuery) -> Result<u64, DataLayerError>;

    /// single-entity lookup; fails with [`DataLayerError::RecordNotFound`]
    /// when nothing matches
    async fn find_one(&self, query: &ListQuery) -> Result<T, DataLayerError>;
}

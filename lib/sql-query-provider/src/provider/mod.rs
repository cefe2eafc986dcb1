use std::marker::PhantomData;

use query_core::model::common::Paginated;
use query_core::model::list_query::{ListPagination, ListQuery};
use query_core::repository::error::DataLayerError;
use query_core::repository::EntityReader;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Select,
    TransactionTrait,
};

use crate::error_mapper::to_data_layer_error;
use crate::list_query::SelectWithListQuery;
use crate::queryable::QueryableEntity;


/// whether the row count of a paginated read shares a transaction snapshot
/// with the row fetch
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CountConsistency {
    /// count and fetch run as two independent statements derived from the
    /// same query shape; under concurrent writes the total may reflect a
    /// slightly different snapshot than the returned rows
    #[default]
    BestEffort,
    /// count and fetch run inside a single transaction
    Snapshot,
}

/// generic read engine over one entity. Stateless apart from the shared
/// connection handle, so concurrent calls are fully independent; dropping an
/// in-flight call cancels the backend round trip and returns the connection
/// to the pool.
#[derive(Clone)]
pub struct EntityQueryProvider<E>
where
    E: QueryableEntity,
{
    db: DatabaseConnection,
    consistency: CountConsistency,
    entity: PhantomData<E>,
}

impl<E> EntityQueryProvider<E>
where
    E: QueryableEntity,
    E::Model: Send + Sync,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            consistency: CountConsistency::default(),
            entity: PhantomData,
        }
    }

    pub fn with_count_consistency(mut self, consistency: CountConsistency) -> Self {
        self.consistency = consistency;
        self
    }

    fn build(query: &ListQuery, operation: &'static str) -> Result<Select<E>, DataLayerError> {
        E::find().with_list_query(query, operation)
    }

    async fn count_and_fetch<C: ConnectionTrait>(
        select: Select<E>,
        conn: &C,
        operation: &'static str,
    ) -> Result<(u64, Vec<E::Model>), DataLayerError> {
        let total = select
            .clone()
            .count(conn)
            .await
            .map_err(|err| to_data_layer_error(operation, err))?;

        let rows = select
            .all(conn)
            .await
            .map_err(|err| to_data_layer_error(operation, err))?;

        Ok((total, rows))
    }
}

#[async_trait::async_trait]
impl<E> EntityReader<E::Model> for EntityQueryProvider<E>
where
    E: QueryableEntity,
    E::Model: Send + Sync,
{
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<E::Model>, DataLayerError> {
        let operation = "find_many";
        let mut select = Self::build(query, operation)?;

        if let Some(pagination) = &query.pagination {
            select = select
                .offset(offset_of(pagination))
                .limit(pagination.limit as u64);
        }

        select
            .all(&self.db)
            .await
            .map_err(|err| to_data_layer_error(operation, err))
    }

    async fn find_many_paginated(
        &self,
        query: &ListQuery,
    ) -> Result<Paginated<E::Model>, DataLayerError> {
        let operation = "find_many_paginated";
        let pagination = query.pagination.unwrap_or_default();

        let select = Self::build(query, operation)?
            .offset(offset_of(&pagination))
            .limit(pagination.limit as u64);

        let (total, rows) = match self.consistency {
            CountConsistency::BestEffort => {
                Self::count_and_fetch(select, &self.db, operation).await?
            }
            CountConsistency::Snapshot => {
                let txn = self
                    .db
                    .begin()
                    .await
                    .map_err(|err| to_data_layer_error(operation, err))?;
                let result = Self::count_and_fetch(select, &txn, operation).await?;
                txn.commit()
                    .await
                    .map_err(|err| to_data_layer_error(operation, err))?;
                result
            }
        };

        Ok(Paginated::assemble(
            rows,
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn count(&self, query: &ListQuery) -> Result<u64, DataLayerError> {
        let operation = "count";
        Self::build(query, operation)?
            .count(&self.db)
            .await
            .map_err(|err| to_data_layer_error(operation, err))
    }

    async fn find_one(&self, query: &ListQuery) -> Result<E::Model, DataLayerError> {
        let operation = "find_one";
        Self::build(query, operation)?
            .one(&self.db)
            .await
            .map_err(|err| to_data_layer_error(operation, err))?
            .ok_or(DataLayerError::RecordNotFound)
    }
}

/// pages are 1-based; bounds are applied only after filters, search and
/// relations, so the count reflects the fully-filtered set
fn offset_of(pagination: &ListPagination) -> u64 {
    (pagination.page as u64).saturating_sub(1) * pagination.limit as u64
}

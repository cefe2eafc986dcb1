use query_core::model::common::SortDirection;
use query_core::model::list_query::ListQuery;
use query_core::repository::error::DataLayerError;
use sea_orm::sea_query::Alias;
use sea_orm::{
    ColumnTrait, JoinType, Order, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::predicate::{filter_conditions, search_condition};
use crate::queryable::{resolve_column, QueryableEntity};
use crate::relation::expand_relations;

pub(crate) fn order_from_sort_direction(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Ascending => Order::Asc,
        SortDirection::Descending => Order::Desc,
    }
}

pub trait SelectWithListQuery<E: QueryableEntity>: Sized {
    /// applies all `query` declared constraints (joins, filtering, search,
    /// soft-delete visibility and sorting) on the select; pagination bounds
    /// stay with the caller
    fn with_list_query(
        self,
        query: &ListQuery,
        operation: &'static str,
    ) -> Result<Self, DataLayerError>;
}

impl<E: QueryableEntity> SelectWithListQuery<E> for Select<E> {
    fn with_list_query(
        self,
        query: &ListQuery,
        operation: &'static str,
    ) -> Result<Self, DataLayerError> {
        let mut result = self;

        let joins = expand_relations::<E>(&query.relations, operation)?;
        let joined = !joins.is_empty();
        for join in joins {
            result = result.join_as(JoinType::LeftJoin, join.def, Alias::new(join.alias.as_str()));
        }
        if joined {
            // to-many joins would otherwise repeat the root row
            result = result.distinct();
        }

        if !query.filtering.is_empty() {
            result = result.filter(filter_conditions::<E>(&query.filtering, operation)?);
        }

        if let Some(search) = &query.search {
            if let Some(group) = search_condition::<E>(search, operation)? {
                result = result.filter(group);
            }
        }

        if !query.include_soft_deleted {
            if let Some(column) = E::soft_delete_column() {
                result = result.filter(column.is_null());
            }
        }

        for sorting in &query.sorting {
            let column = resolve_column::<E>(&sorting.field, operation)?;
            result = result.order_by(column, order_from_sort_direction(sorting.direction));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use query_core::model::common::SortDirection;
    use query_core::model::list_query::{ListQuery, ListSorting};
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    use super::SelectWithListQuery;
    use crate::test_utilities::{order, product};

    fn sql_for<E: crate::queryable::QueryableEntity>(query: &ListQuery) -> String {
        E::find()
            .with_list_query(query, "find_many")
            .unwrap()
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_relation_paths_render_three_left_joins() {
        let query = ListQuery {
            relations: vec![
                "items.product".to_string(),
                "items.customizations".to_string(),
            ],
            ..Default::default()
        };

        let sql = sql_for::<order::Entity>(&query);
        assert_eq!(3, sql.matches("LEFT JOIN").count());
        assert_eq!(1, sql.matches("AS \"items\"").count());
        assert!(sql.contains("DISTINCT"));
    }

    #[test]
    fn test_no_relations_means_no_joins_and_no_distinct() {
        let sql = sql_for::<order::Entity>(&ListQuery::default());
        assert!(!sql.contains("JOIN"));
        assert!(!sql.contains("DISTINCT"));
    }

    #[test]
    fn test_soft_delete_guard_is_applied_by_default() {
        let sql = sql_for::<product::Entity>(&ListQuery::default());
        assert!(sql.contains("\"deleted_at\" IS NULL"));

        let sql = sql_for::<product::Entity>(&ListQuery {
            include_soft_deleted: true,
            ..Default::default()
        });
        assert!(!sql.contains("\"deleted_at\" IS NULL"));
    }

    #[test]
    fn test_sorting_order_follows_clause_sequence() {
        let query = ListQuery {
            sorting: vec![
                ListSorting {
                    field: "price".to_string(),
                    direction: SortDirection::Descending,
                },
                ListSorting {
                    field: "name".to_string(),
                    direction: SortDirection::Ascending,
                },
            ],
            ..Default::default()
        };

        let sql = sql_for::<product::Entity>(&query);
        let price_position = sql.find("\"price\" DESC").unwrap();
        let name_position = sql.find("\"name\" ASC").unwrap();
        assert!(price_position < name_position);
    }

    #[test]
    fn test_camel_case_field_names_resolve() {
        let query = ListQuery {
            sorting: vec![ListSorting {
                field: "createdDate".to_string(),
                direction: SortDirection::Descending,
            }],
            ..Default::default()
        };

        let sql = sql_for::<product::Entity>(&query);
        assert!(sql.contains("\"created_date\" DESC"));
    }
}

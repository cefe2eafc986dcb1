use std::str::FromStr;

use convert_case::{Case, Casing};
use query_core::repository::error::DataLayerError;
use sea_orm::{EntityTrait, RelationDef};

/// one step in an entity's relation graph: the join definition for a path
/// segment plus the graph of the entity it leads to
pub struct RelationNode {
    pub def: RelationDef,
    pub related: &'static dyn RelationGraph,
}

/// per-entity resolver turning relation path segments into joins
pub trait RelationGraph: Send + Sync {
    fn relation(&self, segment: &str) -> Option<RelationNode>;
}

/// graph of an entity with no expandable relations
pub struct NoRelations;

impl RelationGraph for NoRelations {
    fn relation(&self, _segment: &str) -> Option<RelationNode> {
        None
    }
}

/// entity usable by the generic query provider; client-supplied field names
/// resolve into typed columns, never into interpolated identifiers
pub trait QueryableEntity: EntityTrait {
    fn column(name: &str) -> Option<Self::Column>;

    /// column holding the soft-delete timestamp, when the entity has one
    fn soft_delete_column() -> Option<Self::Column> {
        None
    }

    fn relations() -> &'static dyn RelationGraph {
        &NoRelations
    }
}

/// resolves a field name through the derived column reflection, accepting
/// both the wire casing and the column's snake_case name
pub fn column_from_name<E>(name: &str) -> Option<E::Column>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    if let Ok(column) = E::Column::from_str(name) {
        return Some(column);
    }

    E::Column::from_str(&name.to_case(Case::Snake)).ok()
}

pub(crate) fn resolve_column<E: QueryableEntity>(
    field: &str,
    operation: &str,
) -> Result<E::Column, DataLayerError> {
    E::column(field).ok_or_else(|| {
        tracing::warn!("unknown field `{field}` in `{operation}` query");
        DataLayerError::operation_failed(operation)
    })
}

use query_core::repository::error::DataLayerError;
use sea_orm::sea_query::Alias;
use sea_orm::RelationDef;

use crate::queryable::QueryableEntity;

pub(crate) struct ResolvedJoin {
    pub def: RelationDef,
    pub alias: String,
}

/// expands dot-separated relation paths into the minimal join sequence:
/// first-seen order, deduplicated by fully-qualified path, each join aliased
/// by its own segment and chained onto the previous segment's alias
pub(crate) fn expand_relations<E: QueryableEntity>(
    paths: &[String],
    operation: &str,
) -> Result<Vec<ResolvedJoin>, DataLayerError> {
    let mut joins: Vec<ResolvedJoin> = vec![];
    let mut seen: Vec<String> = vec![];

    for path in paths {
        let mut graph = E::relations();
        let mut qualified = String::new();
        let mut left_alias: Option<&str> = None;

        for segment in path.split('.') {
            let node = graph.relation(segment).ok_or_else(|| {
                tracing::warn!("unknown relation `{segment}` in `{operation}` query");
                DataLayerError::operation_failed(operation)
            })?;

            if !qualified.is_empty() {
                qualified.push('.');
            }
            qualified.push_str(segment);

            if !seen.contains(&qualified) {
                let def = match left_alias {
                    Some(alias) => node.def.from_alias(Alias::new(alias)),
                    None => node.def,
                };
                joins.push(ResolvedJoin {
                    def,
                    alias: segment.to_owned(),
                });
                seen.push(qualified.clone());
            }

            left_alias = Some(segment);
            graph = node.related;
        }
    }

    Ok(joins)
}

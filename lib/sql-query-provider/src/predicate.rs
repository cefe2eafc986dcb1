use query_core::model::list_filter::{
    FilterCondition, FilterOperator, FilterValue, SearchCombinator,
};
use query_core::model::list_query::SearchClause;
use query_core::repository::error::DataLayerError;
use sea_orm::sea_query::{Expr, ExprTrait, Func, IntoCondition, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, IntoSimpleExpr, Value};

use crate::queryable::{resolve_column, QueryableEntity};

/// translates all filter conditions into one AND-combined condition; clauses
/// that carry no usable operand degrade to "filter not applied"
pub(crate) fn filter_conditions<E: QueryableEntity>(
    filtering: &[FilterCondition],
    operation: &str,
) -> Result<Condition, DataLayerError> {
    let mut combined = Condition::all();

    for condition in filtering {
        let column = resolve_column::<E>(&condition.field, operation)?;
        if let Some(predicate) = translate_condition(column, condition) {
            combined = combined.add(predicate);
        }
    }

    Ok(combined)
}

/// builds the parenthesized search group: one case-insensitive substring
/// predicate per field, combined with the requested combinator
pub(crate) fn search_condition<E: QueryableEntity>(
    search: &SearchClause,
    operation: &str,
) -> Result<Option<Condition>, DataLayerError> {
    if search.query.is_empty() || search.fields.is_empty() {
        return Ok(None);
    }

    let mut group = match search.combinator {
        SearchCombinator::And => Condition::all(),
        SearchCombinator::Or => Condition::any(),
    };

    for field in &search.fields {
        let column = resolve_column::<E>(field, operation)?;
        group = group.add(case_insensitive_contains(
            column.into_simple_expr(),
            &search.query,
        ));
    }

    Ok(Some(group))
}

fn translate_condition<C: ColumnTrait>(column: C, condition: &FilterCondition) -> Option<Condition> {
    match condition.operator {
        FilterOperator::Eq => Some(column.eq(bound_value(condition)?).into_condition()),
        FilterOperator::Ne => Some(column.ne(bound_value(condition)?).into_condition()),
        FilterOperator::Gt => Some(column.gt(bound_value(condition)?).into_condition()),
        FilterOperator::Gte => Some(column.gte(bound_value(condition)?).into_condition()),
        FilterOperator::Lt => Some(column.lt(bound_value(condition)?).into_condition()),
        FilterOperator::Lte => Some(column.lte(bound_value(condition)?).into_condition()),
        FilterOperator::Like => {
            // caller-supplied wildcard characters inside the value pass
            // through unescaped
            let text = text_value(condition)?;
            Some(column.like(format!("%{text}%").as_str()).into_condition())
        }
        FilterOperator::ILike => {
            let text = text_value(condition)?;
            Some(case_insensitive_contains(column.into_simple_expr(), &text))
        }
        FilterOperator::In => Some(column.is_in(bound_values(condition)?).into_condition()),
        FilterOperator::Nin => Some(column.is_not_in(bound_values(condition)?).into_condition()),
        FilterOperator::Between => match condition.values.as_deref() {
            Some([low, high]) => {
                Some(column.between(to_value(low), to_value(high)).into_condition())
            }
            _ => {
                tracing::debug!(
                    "skipping `{}` filter on `{}`: expected exactly two values",
                    condition.operator,
                    condition.field
                );
                None
            }
        },
        FilterOperator::IsNull => Some(column.is_null().into_condition()),
        FilterOperator::IsNotNull => Some(column.is_not_null().into_condition()),
    }
}

/// case-insensitive substring match, rendered as LOWER(expr) LIKE '%…%' so it
/// behaves the same on every backend
fn case_insensitive_contains(expr: SimpleExpr, query: &str) -> Condition {
    Expr::expr(Func::lower(expr))
        .like(format!("%{}%", query.to_lowercase()))
        .into_condition()
}

fn to_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Bool(value) => (*value).into(),
        FilterValue::Int(value) => (*value).into(),
        FilterValue::Float(value) => (*value).into(),
        FilterValue::String(value) => value.clone().into(),
        FilterValue::Null => Value::String(None),
    }
}

fn bound_value(condition: &FilterCondition) -> Option<Value> {
    match &condition.value {
        Some(value) => Some(to_value(value)),
        None => {
            tracing::debug!(
                "skipping `{}` filter on `{}`: no value supplied",
                condition.operator,
                condition.field
            );
            None
        }
    }
}

fn bound_values(condition: &FilterCondition) -> Option<Vec<Value>> {
    match condition.values.as_deref() {
        Some(values) if !values.is_empty() => Some(values.iter().map(to_value).collect()),
        _ => {
            tracing::debug!(
                "skipping `{}` filter on `{}`: empty value list",
                condition.operator,
                condition.field
            );
            None
        }
    }
}

fn text_value(condition: &FilterCondition) -> Option<String> {
    match &condition.value {
        Some(FilterValue::Null) | None => {
            tracing::debug!(
                "skipping `{}` filter on `{}`: no usable value",
                condition.operator,
                condition.field
            );
            None
        }
        Some(value) => Some(value.to_string()),
    }
}

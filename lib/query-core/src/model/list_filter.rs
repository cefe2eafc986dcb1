use std::fmt;

use serde::Deserialize;

/// closed set of comparison operators a filter condition may use; every
/// consumer matches exhaustively so extending the set is a compile-time
/// checked change
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum FilterOperator {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "ne")]
    Ne,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "gte")]
    Gte,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "ilike")]
    ILike,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "nin")]
    Nin,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "isNull")]
    IsNull,
    #[serde(rename = "isNotNull")]
    IsNotNull,
}

/// scalar value carried by a filter condition, as it arrives on the wire
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Null => Ok(()),
        }
    }
}

/// a single declarative constraint against one field of the queried entity.
///
/// `In`/`Nin`/`Between` take their operands from `values`, `IsNull`/`IsNotNull`
/// take none, everything else reads `value`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Option<FilterValue>,
    #[serde(default)]
    pub values: Option<Vec<FilterValue>>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub enum SearchCombinator {
    #[serde(rename = "AND")]
    And,
    #[default]
    #[serde(rename = "OR")]
    Or,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FilterCondition, FilterOperator, FilterValue};

    #[test]
    fn test_operator_wire_tokens() {
        for (token, operator) in [
            ("eq", FilterOperator::Eq),
            ("ilike", FilterOperator::ILike),
            ("in", FilterOperator::In),
            ("nin", FilterOperator::Nin),
            ("isNull", FilterOperator::IsNull),
            ("isNotNull", FilterOperator::IsNotNull),
        ] {
            let parsed: FilterOperator = serde_json::from_value(json!(token)).unwrap();
            assert_eq!(operator, parsed);
        }

        assert!(serde_json::from_value::<FilterOperator>(json!("matches")).is_err());
    }

    #[test]
    fn test_filter_condition_deserialization() {
        let condition: FilterCondition = serde_json::from_value(json!({
            "field": "price",
            "operator": "between",
            "values": [100, 250.5]
        }))
        .unwrap();

        assert_eq!("price", condition.field);
        assert_eq!(FilterOperator::Between, condition.operator);
        assert_eq!(
            Some(vec![FilterValue::Int(100), FilterValue::Float(250.5)]),
            condition.values
        );
        assert_eq!(None, condition.value);
    }

    #[test]
    fn test_filter_value_shapes() {
        let values: Vec<FilterValue> =
            serde_json::from_value(json!([true, 7, 7.5, "text", null])).unwrap();
        assert_eq!(
            vec![
                FilterValue::Bool(true),
                FilterValue::Int(7),
                FilterValue::Float(7.5),
                FilterValue::String("text".to_string()),
                FilterValue::Null,
            ],
            values
        );
    }
}

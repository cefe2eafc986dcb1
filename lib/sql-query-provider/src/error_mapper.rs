use std::sync::OnceLock;

use query_core::repository::error::DataLayerError;
use regex::Regex;
use sea_orm::{DbErr, SqlErr};

/// backend message fragments indicating a malformed identifier literal
const INVALID_IDENTIFIER_SIGNATURES: &[&str] = &[
    "invalid input syntax for type uuid",
    "invalid input syntax for type bigint",
    "invalid input syntax for type integer",
    "incorrect integer value",
    "malformed uuid",
    "uuid parsing failed",
];

/// maps a backend failure onto the stable error surface. Constraint
/// violations and malformed identifiers become their dedicated kinds;
/// everything unrecognized is logged here and leaves only as an opaque
/// failure named after the attempted operation.
pub fn to_data_layer_error(operation: &str, err: DbErr) -> DataLayerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DataLayerError::AlreadyExists,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => DataLayerError::InvalidReference,
        _ => {
            let message = err.to_string();
            let lowered = message.to_lowercase();
            if INVALID_IDENTIFIER_SIGNATURES
                .iter()
                .any(|signature| lowered.contains(signature))
            {
                return DataLayerError::InvalidIdentifier {
                    literal: quoted_literal(&message),
                };
            }

            tracing::error!("data layer operation `{operation}` failed: {err:?}");
            DataLayerError::operation_failed(operation)
        }
    }
}

/// pulls the offending literal out of a backend message, e.g.
/// `invalid input syntax for type uuid: "abc"`
fn quoted_literal(message: &str) -> Option<String> {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let regex =
        QUOTED.get_or_init(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("invalid regex"));

    regex.captures(message).and_then(|captures| {
        captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|literal| literal.as_str().to_owned())
    })
}

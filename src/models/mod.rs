//! Diesel row models and their conversions to and from domain types.

pub mod account;
pub mod chain;
pub mod config;
pub mod group;
pub mod location;
pub mod matchup;
pub mod user;

use serde_json::Value;

use crate::domain::types::TypeConstraintError;

/// Decode a JSON text column into an opaque payload.
pub(crate) fn parse_json(raw: &str, field: &'static str) -> Result<Value, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("{field} is not valid JSON: {e}")))
}

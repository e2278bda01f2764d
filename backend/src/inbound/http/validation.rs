//! Shared validation helpers for the HTTP adapter.
//!
//! Request DTOs carry `Option<String>` fields so a missing field can be
//! reported with its name instead of failing JSON deserialisation wholesale.

use serde_json::json;

use crate::domain::{Error, UserDraft};

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Extract and validate the name/email pair from a request payload.
pub(crate) fn parse_user_payload(
    name: Option<String>,
    email: Option<String>,
) -> Result<UserDraft, Error> {
    let name = name.ok_or_else(|| missing_field_error("name"))?;
    let email = email.ok_or_else(|| missing_field_error("email"))?;
    UserDraft::parse(name, email).map_err(Error::from)
}

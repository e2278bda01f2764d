//! Client-side data shapes and field validation.
//!
//! Validation here is a UX optimisation: it reports per-field problems before
//! any network call is attempted. The server re-validates independently, so
//! nothing security-relevant hangs off these predicates.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A user record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: u64,
    /// The user's name.
    pub name: String,
    /// The user's email address.
    pub email: String,
}

/// Name/email pair submitted for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    /// The user's name, trimmed and non-empty.
    pub name: String,
    /// The user's email address, trimmed and shape-checked.
    pub email: String,
}

/// The form fields a validation failure can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The name input.
    Name,
    /// The email input.
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
        }
    }
}

/// A per-field validation failure shown next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field the message applies to.
    pub field: Field,
    /// The user-visible message.
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// True when the input contains anything beyond whitespace.
#[must_use]
pub fn is_not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// True when the input looks like `local@domain.tld`.
///
/// Shape check only, mirroring the server's boundary validation.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    });
    re.is_match(value.trim())
}

/// Validate raw form input into a trimmed [`UserDraft`].
///
/// Collects every field failure rather than stopping at the first, so the
/// caller can surface all of them at once.
pub fn validate_draft(name: &str, email: &str) -> Result<UserDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    if !is_not_empty(name) {
        errors.push(FieldError::new(Field::Name, "Name is required"));
    }
    if !is_not_empty(email) {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, "Email address is invalid"));
    }

    if errors.is_empty() {
        Ok(UserDraft {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
        })
    } else {
        Err(errors)
    }
}

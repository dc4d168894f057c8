//! The user record stored by the service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single user record.
///
/// `id` is assigned by the caller and must be unique at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

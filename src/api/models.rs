//! Wire types for the database API

use serde::{Deserialize, Serialize};

/// A database as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub name: String,
}

/// Key/value entry scoped to one database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseItem {
    pub key: String,
    pub value: String,
}

impl DatabaseItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDatabaseRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateItemRequest<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Envelope of `GET /database`
#[derive(Debug, Deserialize)]
pub(crate) struct ListDatabasesResponse {
    pub databases: Vec<Database>,
}

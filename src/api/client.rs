//! Database API Client
//!
//! One method per backend action. Each serializes its request, delegates to
//! [`HttpTransport`] and decodes the typed response.

use super::credentials::Credentials;
use super::http::HttpTransport;
use super::models::{
    CreateDatabaseRequest, CreateItemRequest, Database, DatabaseItem, ListDatabasesResponse,
};
use crate::error::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the database REST API
///
/// Holds no mutable state, so a single instance can be shared across tasks.
#[derive(Clone)]
pub struct BdccClient {
    http: HttpTransport,
}

impl BdccClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self {
            http: HttpTransport::new(credentials)?,
        })
    }

    /// Same as [`BdccClient::new`] with a custom per-call timeout
    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpTransport::with_timeout(credentials, timeout)?,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        self.http.credentials()
    }

    pub async fn create_database(&self, name: &str) -> Result<Database> {
        let body = CreateDatabaseRequest { name };
        let response = self.http.send(Method::POST, "/database", Some(&body)).await?;
        decode(&response)
    }

    pub async fn get_database(&self, id: &str) -> Result<Database> {
        let response = self
            .http
            .send::<()>(Method::GET, &database_path(id), None)
            .await?;
        decode(&response)
    }

    /// List every database, in backend order
    pub async fn list_databases(&self) -> Result<Vec<Database>> {
        let response = self.http.send::<()>(Method::GET, "/database", None).await?;
        let envelope: ListDatabasesResponse = decode(&response)?;
        Ok(envelope.databases)
    }

    /// Delete a database. The response body is ignored.
    pub async fn delete_database(&self, id: &str) -> Result<()> {
        self.http
            .send::<()>(Method::DELETE, &database_path(id), None)
            .await?;
        Ok(())
    }

    /// Create one item. The backend answers with the database's full item collection.
    pub async fn create_item(
        &self,
        database_id: &str,
        key: &str,
        value: &str,
    ) -> Result<Vec<DatabaseItem>> {
        let body = CreateItemRequest { key, value };
        let path = format!("{}/items", database_path(database_id));
        let response = self.http.send(Method::POST, &path, Some(&body)).await?;
        decode(&response)
    }
}

fn database_path(id: &str) -> String {
    format!("/database/{}", urlencoding::encode(id))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_encodes_id() {
        assert_eq!(database_path("abc-123"), "/database/abc-123");
        assert_eq!(database_path("a/b c"), "/database/a%2Fb%20c");
    }

    #[test]
    fn test_decode_failure_is_decode_error() {
        let err = decode::<Database>("<html>oops</html>").unwrap_err();
        assert!(matches!(err, crate::error::BdccError::Decode(_)));
    }
}

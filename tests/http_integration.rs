//! Integration tests for the API client using wiremock
//!
//! These tests verify the transport and client behavior against mocked endpoints:
//! authentication header, status mapping, decoding and timeouts.

mod common;

use bdcc::api::{ApiKey, BdccClient, Credentials, Database, DatabaseItem};
use bdcc::BdccError;
use common::{client_for, TEST_KEY};
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod client_tests {
    use super::*;

    /// Create database sends the name and returns the backend's record
    #[tokio::test]
    async fn test_create_database_sends_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/database"))
            .and(header("api_key", TEST_KEY))
            .and(body_json(json!({"name": "orders"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "db-1", "name": "orders"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let db = client.create_database("orders").await.unwrap();

        assert_eq!(
            db,
            Database {
                id: "db-1".into(),
                name: "orders".into()
            }
        );
    }

    /// Requests without the expected key header do not match the mock
    #[tokio::test]
    async fn test_api_key_header_is_required() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/database/db-1"))
            .and(header("api_key", "another-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "db-1", "name": "x"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_database("db-1").await.unwrap_err();

        assert!(matches!(err, BdccError::Remote { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_get_database() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/database/db-7"))
            .and(header("api_key", TEST_KEY))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "db-7", "name": "users"})),
            )
            .mount(&server)
            .await;

        let db = assert_ok!(client_for(&server).get_database("db-7").await);
        assert_eq!(db.name, "users");
    }

    /// Non-200 status keeps status and raw body exactly
    #[tokio::test]
    async fn test_500_maps_to_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/database"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_databases().await.unwrap_err();

        match err {
            BdccError::Remote { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "server error");
            }
            other => panic!("expected Remote error, got {other:?}"),
        }
    }

    /// Only 200 counts as success, even for other 2xx codes
    #[tokio::test]
    async fn test_non_200_success_codes_are_errors() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/database/db-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).delete_database("db-1").await);
        assert!(matches!(err, BdccError::Remote { status: 204, ref body } if body.is_empty()));
    }

    /// Delete ignores an empty body
    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/database/db-1"))
            .and(header("api_key", TEST_KEY))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert_ok!(client_for(&server).delete_database("db-1").await);
    }

    /// List preserves backend order, duplicates included
    #[tokio::test]
    async fn test_list_preserves_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/database"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "databases": [
                    {"id": "b", "name": "beta"},
                    {"id": "a", "name": "alpha"},
                    {"id": "b", "name": "beta"}
                ]
            })))
            .mount(&server)
            .await;

        let dbs = client_for(&server).list_databases().await.unwrap();
        let ids: Vec<_> = dbs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "b"]);
    }

    /// Create item returns the full collection
    #[tokio::test]
    async fn test_create_item_returns_collection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/database/db-1/items"))
            .and(body_json(json!({"key": "k2", "value": "v2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"key": "k1", "value": "v1"},
                {"key": "k2", "value": "v2"}
            ])))
            .mount(&server)
            .await;

        let items = client_for(&server)
            .create_item("db-1", "k2", "v2")
            .await
            .unwrap();

        assert_eq!(
            items,
            vec![DatabaseItem::new("k1", "v1"), DatabaseItem::new("k2", "v2")]
        );
    }

    /// Malformed 200 payload is a decode error
    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/database"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}])))
            .mount(&server)
            .await;

        let err = client_for(&server).list_databases().await.unwrap_err();
        assert!(matches!(err, BdccError::Decode(_)));
    }

    /// A slow backend trips the per-call timeout
    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/database/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "slow", "name": "slow"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let creds = Credentials::new(Some(&server.uri()), ApiKey::new(TEST_KEY).unwrap()).unwrap();
        let client = BdccClient::with_timeout(creds, Duration::from_millis(50)).unwrap();

        let err = client.get_database("slow").await.unwrap_err();
        assert!(matches!(err, BdccError::Transport(_)));
        assert!(err.is_timeout());
    }

    /// Unreachable host is a transport error, attempted once
    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let creds =
            Credentials::new(Some("http://127.0.0.1:1"), ApiKey::new(TEST_KEY).unwrap()).unwrap();
        let client = BdccClient::new(creds).unwrap();

        let err = client.list_databases().await.unwrap_err();
        assert!(matches!(err, BdccError::Transport(_)));
    }
}

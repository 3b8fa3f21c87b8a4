#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockroom_api::{CatalogClient, Error, NumberOrText};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let client = CatalogClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products() {
    let (server, client) = setup().await;

    let body = json!([
        { "name": "Bluetooth", "category": "Electronic", "price": "$150", "quantity": 5 },
        { "name": "Edifier M43560", "category": "Electronic", "price": "$0", "quantity": 0 },
        { "name": "Sony 4K ultra 55 inch TV", "category": "ELECTRONICS", "price": 1190, "quantity": "17" }
    ]);

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let products = client.list_products("inventory").await.unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].name, "Bluetooth");
    assert_eq!(products[0].price, NumberOrText::Text("$150".into()));
    assert_eq!(products[2].price, NumberOrText::Number(1190.0));
    assert_eq!(products[2].quantity, NumberOrText::Text("17".into()));
}

#[tokio::test]
async fn test_list_products_empty_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let products = client.list_products("/inventory").await.unwrap();
    assert!(products.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client.list_products("inventory").await.unwrap_err();
    match &err {
        Error::Status { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Status, got {other:?}"),
    }
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_not_found() {
    let (_server, client) = setup().await;

    let err = client.list_products("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_products("inventory").await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_object_instead_of_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = client.list_products("inventory").await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

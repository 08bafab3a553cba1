//! Integration tests for `InventoryClient` using wiremock HTTP mocks.

use invsync_api::{Credentials, InventoryClient, NewProduct, SessionToken};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> InventoryClient {
    InventoryClient::new(base_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn list_products_parses_mixed_style_code_types() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "_id": "653a0",
            "style_code": 14321,
            "style_id": 12345678,
            "style_name": "Jacket A",
            "color": "RED",
            "mrp": 1499.0,
            "rack_space": "A-12"
        },
        {
            "_id": "653a1",
            "style_code": "36789",
            "style_name": "Jacket B"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products(None).await.expect("should parse products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].style_code, "14321");
    assert_eq!(products[0].rack_space.as_deref(), Some("A-12"));
    assert_eq!(products[1].style_code, "36789");
    assert!(products[1].rack_space.is_none());
}

#[tokio::test]
async fn list_products_passes_style_code_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product"))
        .and(query_param("style_code", "14321"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client
        .list_products(Some("14321"))
        .await
        .expect("filtered listing should succeed");
    assert!(products.is_empty());
}

#[tokio::test]
async fn create_product_posts_coerced_payload() {
    let server = MockServer::start().await;

    let expected = serde_json::json!({
        "style_id": 12345678,
        "style_name": "Jacket A",
        "color": "RED",
        "mrp": 1499.0,
        "style_code": 14321
    });

    Mock::given(method("POST"))
        .and(path("/api/product"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"msg": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .create_product(&NewProduct {
            style_id: 12345678,
            style_name: "Jacket A".to_string(),
            color: "RED".to_string(),
            mrp: 1499.0,
            rack_space: None,
            style_code: 14321,
        })
        .await
        .expect("create should succeed");
}

#[tokio::test]
async fn create_product_surfaces_server_msg_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/product"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"msg": "style_code already exists"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .create_product(&NewProduct {
            style_id: 1,
            style_name: "X".to_string(),
            color: "other".to_string(),
            mrp: 1.0,
            rack_space: None,
            style_code: 14321,
        })
        .await
        .expect_err("should fail");

    assert_eq!(err.row_message(), "style_code already exists");
}

#[tokio::test]
async fn update_rack_space_returns_echoed_product() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/product/653a0"))
        .and(body_json(serde_json::json!({"rack_space": "B-07"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "product": {"_id": "653a0", "rack_space": "B-07"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let echoed = client
        .update_rack_space("653a0", "B-07")
        .await
        .expect("update should succeed");
    assert!(echoed.is_some(), "server echo should be surfaced");
}

#[tokio::test]
async fn update_rack_space_without_echo_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/product/653a0"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let echoed = client
        .update_rack_space("653a0", "B-07")
        .await
        .expect("2xx without echo is not a transport error");
    assert!(echoed.is_none());
}

#[tokio::test]
async fn update_rack_space_prefers_server_msg_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/product/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"msg": "Product not found"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .update_rack_space("missing", "B-07")
        .await
        .expect_err("should fail");
    assert_eq!(err.row_message(), "Product not found");
}

#[tokio::test]
async fn list_colors_unwraps_data_envelope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {"_id": "c1", "style_code": 14321, "color": "RED"},
            {"_id": "c2", "style_code": 36789, "color": "NAVY"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/colors/get-colors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let colors = client.list_colors().await.expect("should parse colors");
    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0].style_code, 14321);
    assert_eq!(colors[1].color, "NAVY");
}

#[tokio::test]
async fn login_captures_session_token_for_later_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Logged in",
            "token": "abc123"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/product"))
        .and(header("cookie", "token=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server.uri());
    let message = client
        .login(&Credentials {
            username: "ops".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("login should succeed");
    assert_eq!(message, "Logged in");
    assert!(client.session().is_some());

    client.list_products(None).await.expect("listing with cookie");
}

#[tokio::test]
async fn preinstalled_session_token_is_sent_as_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product"))
        .and(header("cookie", "token=preset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server.uri());
    client.set_session(SessionToken::new("preset"));
    client.list_products(None).await.expect("listing with cookie");
}

#[tokio::test]
async fn logout_drops_local_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "bye"})))
        .mount(&server)
        .await;

    let mut client = test_client(&server.uri());
    client.set_session(SessionToken::new("abc123"));
    client.logout().await.expect("logout should succeed");
    assert!(client.session().is_none());
}

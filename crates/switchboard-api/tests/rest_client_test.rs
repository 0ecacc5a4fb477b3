#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use switchboard_api::{AuthScheme, BearerToken, Error, RestClient};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct Bot {
    id: u64,
    full_name: String,
    webhook: Option<String>,
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient, reqwest::header::HeaderValue) {
    let server = MockServer::start().await;
    let client =
        RestClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new())
            .unwrap();
    let auth = AuthScheme::Bearer
        .header_value(&BearerToken::new("t0ken"))
        .unwrap();
    (server, client, auth)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_plain_array() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "full_name": "Bot1", "webhook": null },
            { "id": 2, "full_name": "Bot2", "webhook": "https://hook" },
        ])))
        .mount(&server)
        .await;

    let bots: Vec<Bot> = client.list("bots", &auth).await.unwrap();

    assert_eq!(bots.len(), 2);
    assert_eq!(bots[0].full_name, "Bot1");
    assert_eq!(bots[1].webhook.as_deref(), Some("https://hook"));
}

#[tokio::test]
async fn test_list_paginated_envelope() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "results": [{ "id": 7, "full_name": "Paged", "webhook": null }]
        })))
        .mount(&server)
        .await;

    let bots: Vec<Bot> = client.list("bots", &auth).await.unwrap();

    assert_eq!(bots.len(), 1);
    assert_eq!(bots[0].id, 7);
}

#[tokio::test]
async fn test_get_item() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "full_name": "Three", "webhook": null
        })))
        .mount(&server)
        .await;

    let bot: Bot = client
        .get(&RestClient::item_path("bots", "3").unwrap(), &auth)
        .await
        .unwrap();
    assert_eq!(bot.id, 3);
}

#[tokio::test]
async fn test_post_and_patch_send_json() {
    let (server, client, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/bots"))
        .and(body_json(json!({ "full_name": "New" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "full_name": "New", "webhook": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/bots/9"))
        .and(body_json(json!({ "webhook": "https://x" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "full_name": "New", "webhook": "https://x"
        })))
        .mount(&server)
        .await;

    let created: Bot = client
        .post("bots", &json!({ "full_name": "New" }), &auth)
        .await
        .unwrap();
    assert_eq!(created.id, 9);

    let patched: Bot = client
        .patch("bots/9", &json!({ "webhook": "https://x" }), &auth)
        .await
        .unwrap();
    assert_eq!(patched.webhook.as_deref(), Some("https://x"));
}

#[tokio::test]
async fn test_delete_no_content() {
    let (server, client, auth) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/bots/4"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete("bots/4", &auth).await.unwrap();
}

#[tokio::test]
async fn test_token_scheme_header() {
    let (server, client, _) = setup().await;
    let auth = AuthScheme::Token
        .header_value(&BearerToken::new("drf"))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/lights"))
        .and(header("authorization", "Token drf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let lights: Vec<serde_json::Value> = client.list("lights", &auth).await.unwrap();
    assert!(lights.is_empty());
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Invalid token." })),
        )
        .mount(&server)
        .await;

    let result: Result<Vec<Bot>, _> = client.list("bots", &auth).await;
    match result {
        Err(Error::Unauthorized { message }) => assert_eq!(message, "Invalid token."),
        other => panic!("expected Unauthorized, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden() {
    let (server, client, auth) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/bots/1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
        .mount(&server)
        .await;

    let result: Result<Bot, _> = client.patch("bots/1", &json!({}), &auth).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }), "got: {err:?}");
    assert!(err.is_auth_rejected());
}

#[tokio::test]
async fn test_validation_keeps_field_details() {
    let (server, client, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/bots"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "webhook": ["Enter a valid URL."] })),
        )
        .mount(&server)
        .await;

    let result: Result<Bot, _> = client
        .post("bots", &json!({ "webhook": "nope" }), &auth)
        .await;

    match result {
        Err(Error::Validation {
            status, details, ..
        }) => {
            assert_eq!(status, 400);
            assert_eq!(
                details.unwrap()["webhook"][0],
                json!("Enter a valid URL.")
            );
        }
        other => panic!("expected Validation, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result: Result<Bot, _> = client.get("bots/404", &auth).await;
    let err = result.unwrap_err();
    assert!(err.is_not_found(), "got: {err:?}");
    match err {
        Error::NotFound { path } => assert_eq!(path, "/api/bots/404"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result: Result<Vec<Bot>, _> = client.list("bots", &auth).await;
    let err = result.unwrap_err();
    assert!(err.is_transient(), "got: {err:?}");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bots/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result: Result<Bot, _> = client.get("bots/1", &auth).await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}

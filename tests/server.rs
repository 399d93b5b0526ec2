//! End-to-end tests against a running server.

use std::time::Duration;

use radix_router::routing::{HttpMethod, Router};
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{client, route, start_server};

#[tokio::test]
async fn test_match_returns_route_and_captures() {
    let server = start_server(vec![
        route("user", HttpMethod::Get, "/users/:id"),
        route("assets", HttpMethod::All, "/assets/*"),
    ])
    .await;
    let client = client();

    let res = client.get(server.url("/users/42")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "route": "user",
            "method": "GET",
            "pattern": "/users/:id",
            "params": {"id": "42"},
        })
    );

    let res = client
        .post(server.url("/assets/css/site.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["route"], "assets");
    assert_eq!(body["catch_all"], "css/site.css");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unmatched_request_is_not_found() {
    let server = start_server(vec![route("user", HttpMethod::Get, "/users/:id")]).await;
    let client = client();

    let res = client.get(server.url("/users/42/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "no matching route");
    assert_eq!(body["path"], "/users/42/posts");

    let res = client.delete(server.url("/users/42")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let server = start_server(vec![route("root", HttpMethod::Get, "/")]).await;
    let res = client()
        .get(server.url("/"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_route_table_hot_swap() {
    let server = start_server(vec![route("old", HttpMethod::Get, "/old")]).await;
    let client = client();

    let router = Router::from_config(&[route("new", HttpMethod::Get, "/new/:slug")]).unwrap();
    server.updates.send(router).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/new/hello")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["params"]["slug"], "hello");

    let res = client.get(server.url("/old")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_prefix_route_beside_capture() {
    let server = start_server(vec![
        route("users", HttpMethod::Get, "/users/"),
        route("user", HttpMethod::Get, "/users/:id"),
    ])
    .await;
    let client = client();

    let body: Value = client.get(server.url("/users/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["route"], "users");

    let body: Value = client.get(server.url("/users/7")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["route"], "user");
    assert_eq!(body["params"]["id"], "7");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = start_server(vec![route("root", HttpMethod::Get, "/")]).await;
    server.shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

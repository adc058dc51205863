//! Common test utilities for file server testing.
//!
//! - [`fixtures`] - Temporary storage trees
//! - this module - App construction and raw request helpers

#![allow(dead_code)]

pub mod fixtures;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, header::HOST},
};
use axum_test::TestServer;
use siteserve_rest::config::{MultitenancyConfig, TenantRoutingMode};
use siteserve_rest::{ServerConfig, create_app_with_config};
use siteserve_storage::LocalFileStore;
use tower::ServiceExt;

pub use fixtures::SiteTree;

/// The body of every 404.
pub const NOT_FOUND_BODY: &str = r#"{"status":404,"error":"not-found"}"#;

pub const X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Test configuration over `tree` with the given routing mode.
pub fn config_for(tree: &SiteTree, routing_mode: TenantRoutingMode) -> ServerConfig {
    ServerConfig {
        storage_root: tree.storage_root(),
        multitenancy: MultitenancyConfig {
            routing_mode,
            ..Default::default()
        },
        ..ServerConfig::for_testing()
    }
}

/// Builds the app over the local filesystem.
pub fn app(config: ServerConfig) -> Router {
    create_app_with_config(LocalFileStore::new(), config)
}

/// Creates an axum-test server.
pub fn test_server(config: ServerConfig) -> TestServer {
    TestServer::new(app(config)).expect("Failed to create test server")
}

/// A raw response, collected.
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn assert_uniform_not_found(&self) {
        assert_eq!(self.status, StatusCode::NOT_FOUND);
        assert_eq!(self.text(), NOT_FOUND_BODY);
    }
}

/// Sends a request with a verbatim URI through the router, bypassing any
/// client-side URL normalization.
pub async fn send(app: &Router, method: Method, uri: &str, headers: &[(HeaderName, &str)]) -> RawResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(name, HeaderValue::from_str(value).expect("valid header value"));
    }
    let request = builder.body(Body::empty()).expect("valid request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    RawResponse {
        status,
        headers,
        body,
    }
}

/// `GET uri` with the given Host header.
pub async fn get_with_host(app: &Router, uri: &str, host: &str) -> RawResponse {
    send(app, Method::GET, uri, &[(HOST, host)]).await
}

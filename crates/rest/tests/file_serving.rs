//! Integration tests for serving files to legitimate requests.

mod common;

use axum::http::{HeaderValue, StatusCode, header};
use siteserve_rest::ServerConfig;
use siteserve_rest::config::TenantRoutingMode;

use common::fixtures::LOGO_BYTES;
use common::{NOT_FOUND_BODY, SiteTree, X_TENANT_ID, config_for, test_server};

/// Config pinned to `acme.test`, so requests need no Host or header.
fn pinned_config(tree: &SiteTree) -> ServerConfig {
    ServerConfig {
        site: Some("acme.test".to_string()),
        ..config_for(tree, TenantRoutingMode::HostOnly)
    }
}

// =============================================================================
// Served Files
// =============================================================================

#[tokio::test]
async fn test_serves_file_with_headers() {
    let tree = SiteTree::new();
    let server = test_server(pinned_config(&tree));

    let response = server.get("/files/img/logo.png").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), LOGO_BYTES);
    assert_eq!(response.header(header::CONTENT_TYPE), "image/png");
    assert_eq!(
        response.header(header::CONTENT_LENGTH),
        LOGO_BYTES.len().to_string().as_str()
    );
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "inline; filename=\"logo.png\"; filename*=UTF-8''logo.png"
    );
    assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
}

#[tokio::test]
async fn test_serves_percent_encoded_name() {
    let tree = SiteTree::new();
    let server = test_server(pinned_config(&tree));

    let response = server.get("/files/docs/annual%20report.pdf").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.7");
    assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "inline; filename=\"annual report.pdf\"; filename*=UTF-8''annual%20report.pdf"
    );
}

#[tokio::test]
async fn test_unknown_extension_is_octet_stream() {
    let tree = SiteTree::new();
    std::fs::write(tree.files_dir("acme.test").join("blob.xyz"), b"??").unwrap();
    let server = test_server(pinned_config(&tree));

    let response = server.get("/files/blob.xyz").await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "application/octet-stream");
}

#[tokio::test]
async fn test_large_file_is_streamed_intact() {
    let tree = SiteTree::new();
    let data: Vec<u8> = (0..(1024 * 1024 + 17)).map(|i| (i % 251) as u8).collect();
    std::fs::write(tree.files_dir("acme.test").join("big.bin"), &data).unwrap();
    let server = test_server(pinned_config(&tree));

    let response = server.get("/files/big.bin").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().len(), data.len());
    assert_eq!(response.as_bytes().as_ref(), data.as_slice());
}

#[tokio::test]
async fn test_custom_files_prefix() {
    let tree = SiteTree::new();
    let server = test_server(ServerConfig {
        files_prefix: "/assets/uploads".to_string(),
        ..pinned_config(&tree)
    });

    server.get("/assets/uploads/img/logo.png").await.assert_status_ok();
    server.get("/files/img/logo.png").await.assert_status_not_found();
}

#[tokio::test]
async fn test_request_id_is_set_when_enabled() {
    let tree = SiteTree::new();
    let server = test_server(ServerConfig {
        enable_request_id: true,
        ..pinned_config(&tree)
    });

    let response = server.get("/files/img/logo.png").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

// =============================================================================
// Not Found
// =============================================================================

#[tokio::test]
async fn test_missing_file_is_uniform_not_found() {
    let tree = SiteTree::new();
    let server = test_server(pinned_config(&tree));

    let response = server.get("/files/img/missing.png").await;

    response.assert_status_not_found();
    assert_eq!(response.text(), NOT_FOUND_BODY);
    assert_eq!(response.header(header::CONTENT_TYPE), "application/json");
}

#[tokio::test]
async fn test_directory_is_uniform_not_found() {
    let tree = SiteTree::new();
    let server = test_server(pinned_config(&tree));

    let response = server.get("/files/img").await;

    response.assert_status_not_found();
    assert_eq!(response.text(), NOT_FOUND_BODY);
}

#[tokio::test]
async fn test_prefix_without_path_is_uniform_not_found() {
    let tree = SiteTree::new();
    let server = test_server(pinned_config(&tree));

    for path in ["/files", "/files/", "/", "/nope", "/files-evil/x"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        assert_eq!(response.text(), NOT_FOUND_BODY, "{}", path);
    }
}

// =============================================================================
// Header Routing Through The Test Client
// =============================================================================

#[tokio::test]
async fn test_header_selects_site() {
    let tree = SiteTree::new();
    let server = test_server(config_for(&tree, TenantRoutingMode::HeaderOnly));

    let response = server
        .get("/files/img/globex.png")
        .add_header(X_TENANT_ID, HeaderValue::from_static("globex.test"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"globex");

    // Same path, other site
    let response = server
        .get("/files/img/globex.png")
        .add_header(X_TENANT_ID, HeaderValue::from_static("acme.test"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), NOT_FOUND_BODY);
}

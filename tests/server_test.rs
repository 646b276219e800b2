use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use swagger_declare::demo;
use swagger_declare::serializer::serialize_json;
use swagger_declare::server::{DocumentServer, ServerConfig};
use tempfile::tempdir;
use tower::util::ServiceExt; // for `oneshot`

fn request(uri: &str) -> Result<Request<Body>> {
    Ok(Request::builder().method("GET").uri(uri).body(Body::empty())?)
}

#[tokio::test]
async fn document_endpoint_serves_generated_bytes() -> Result<()> {
    let document = demo::document()?;
    let server = DocumentServer::new(&document, ServerConfig::default())?;

    let resp: Response = server.router().oneshot(request("/swagger/doc.json")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

    let body_bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    assert_eq!(&body_bytes[..], serialize_json(&document)?.as_bytes());

    let v: Value = serde_json::from_slice(&body_bytes)?;
    assert_eq!(v["swagger"], "2.0");
    assert!(v["paths"]["/product"]["get"].is_object());

    Ok(())
}

#[tokio::test]
async fn repeated_reads_return_identical_bytes() -> Result<()> {
    let server = DocumentServer::new(&demo::document()?, ServerConfig::default())?;

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let resp = server.router().oneshot(request("/swagger/doc.json")?).await?;
        bodies.push(body::to_bytes(resp.into_body(), 10_485_760).await?);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(&bodies[0][..], server.document_bytes());
    Ok(())
}

#[tokio::test]
async fn custom_paths_redirect_and_serve_assets() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("index.html"), "<html>viewer</html>")?;
    std::fs::create_dir_all(dir.path().join("css"))?;
    std::fs::write(dir.path().join("css").join("ui.css"), "body {}")?;

    let config = ServerConfig {
        doc_path: "/api/docs.json".to_string(),
        ui_path: "/docs/".to_string(),
        assets_dir: Some(dir.path().to_path_buf()),
    };
    let server = DocumentServer::new(&demo::document()?, config)?;
    assert_eq!(server.redirect_location(), "/docs/index.html?url=/api/docs.json");

    let resp = server.router().oneshot(request("/docs/")?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/docs/index.html?url=/api/docs.json");

    let resp = server.router().oneshot(request("/docs/css/ui.css")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body_bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    assert_eq!(&body_bytes[..], b"body {}");

    let resp = server.router().oneshot(request("/api/docs.json")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

//! HTTP surface for a generated document.
//!
//! [`DocumentServer`] owns the serialized document as an immutable buffer. The buffer is
//! produced once, before the router exists, so every request reads the same bytes and a
//! failed generation never reaches the network. Three routes are exposed:
//!
//! - `GET <doc_path>` returns the document as `application/json`
//! - `GET <ui_path>` redirects (303) to `<ui_path>/index.html?url=<doc_path>`
//! - `<ui_path>/*` is handed to [`ServeDir`] rooted at the configured viewer assets

use crate::document::SwaggerDocument;
use crate::error::{Error, Result};
use crate::serializer::serialize_json;
use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use log::{debug, info};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Default path of the JSON document
pub const DEFAULT_DOC_PATH: &str = "/swagger/doc.json";
/// Default path of the viewer UI
pub const DEFAULT_UI_PATH: &str = "/swagger";

/// Where the document and the viewer are mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub doc_path: String,
    pub ui_path: String,
    /// Directory holding the viewer's static files; `None` disables asset serving
    pub assets_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            doc_path: DEFAULT_DOC_PATH.to_string(),
            ui_path: DEFAULT_UI_PATH.to_string(),
            assets_dir: None,
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<()> {
        for (label, path) in [("doc_path", &self.doc_path), ("ui_path", &self.ui_path)] {
            if !path.starts_with('/') {
                return Err(Error::InvalidServerConfig(format!(
                    "{} must start with '/', got '{}'",
                    label, path
                )));
            }
            // Mount paths are literal; captures and wildcards are not routable here
            if let Some(c) = path.chars().find(|c| matches!(c, '*' | ':' | '{' | '}')) {
                return Err(Error::InvalidServerConfig(format!(
                    "{} must be a literal path, '{}' contains '{}'",
                    label, path, c
                )));
            }
        }
        if self.doc_path == self.ui_path {
            return Err(Error::InvalidServerConfig(format!(
                "doc_path and ui_path are both '{}'",
                self.doc_path
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct ServerState {
    document: Bytes,
    doc_path: String,
    ui_path: String,
    /// `ui_path` without its trailing slash, used to strip asset requests
    ui_prefix: String,
    redirect: String,
    assets_dir: Option<PathBuf>,
}

/// Serves one generated document and its viewer
#[derive(Debug, Clone)]
pub struct DocumentServer {
    state: Arc<ServerState>,
}

impl DocumentServer {
    /// Serialize `doc` once and hold the bytes for the lifetime of the server
    pub fn new(doc: &SwaggerDocument, config: ServerConfig) -> Result<Self> {
        let json = serialize_json(doc)?;
        Self::from_bytes(json, config)
    }

    /// Serve an already serialized document verbatim
    pub fn from_bytes(document: impl Into<Bytes>, config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let ui_prefix = config.ui_path.trim_end_matches('/').to_string();
        let redirect = format!("{}/index.html?url={}", ui_prefix, config.doc_path);
        let document = document.into();
        debug!("Holding {} document bytes for {}", document.len(), config.doc_path);

        Ok(Self {
            state: Arc::new(ServerState {
                document,
                doc_path: config.doc_path,
                ui_path: config.ui_path,
                ui_prefix,
                redirect,
                assets_dir: config.assets_dir,
            }),
        })
    }

    pub fn document_bytes(&self) -> &[u8] {
        &self.state.document
    }

    /// Target of the UI redirect
    pub fn redirect_location(&self) -> &str {
        &self.state.redirect
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.state.doc_path, get(serve_document))
            .route(&self.state.ui_path, get(redirect_to_viewer))
            .fallback(serve_asset)
            .with_state(Arc::clone(&self.state))
    }

    /// Bind `addr` and serve until the process is stopped
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local = listener.local_addr()?;
        info!("Serving document at http://{}{}", local, self.state.doc_path);
        info!("Viewer available at http://{}{}", local, self.state.ui_path);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn serve_document(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], state.document.clone())
}

async fn redirect_to_viewer(State(state): State<Arc<ServerState>>) -> Redirect {
    Redirect::to(&state.redirect)
}

async fn serve_asset(State(state): State<Arc<ServerState>>, req: Request) -> Response {
    let Some(dir) = state.assets_dir.as_ref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    // Only `<ui_path>/...` belongs to the viewer
    let rest = match req.uri().path().strip_prefix(state.ui_prefix.as_str()) {
        Some(rest) if rest.starts_with('/') => rest,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    let target = match req.uri().query() {
        Some(query) => format!("{}?{}", rest, query),
        None => rest.to_string(),
    };
    let uri: Uri = match target.parse() {
        Ok(uri) => uri,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    debug!("Serving viewer asset {}", uri.path());

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;
    match ServeDir::new(dir).oneshot(Request::from_parts(parts, body)).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

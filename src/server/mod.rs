//! The `/tree` endpoint — download a GitHub repository archive, unpack it
//! into a temporary directory and answer with its [`TreeNode`] as JSON.
//!
//! Everything the request touched on disk lives under one
//! [`tempfile::TempDir`] and is removed when the handler returns.

pub mod archive;
pub mod error;
pub mod github;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::core::{fs, tree::TreeNode};

use self::error::ServeError;

/// Shared by all requests.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub http: reqwest::Client,
    /// Host archives are downloaded from (normally `https://github.com`).
    pub github_base: String,
}

impl ServerState {
    pub fn new(github_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            github_base: github_base.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TreeQuery {
    pub url: Option<String>,
}

/// Router with `/tree`, plus static files from `static_dir` for every other
/// path when one is given.
pub fn router(state: ServerState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/tree", get(repo_tree))
        .with_state(state);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };
    router.layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until the process is stopped.
pub async fn run(
    addr: SocketAddr,
    state: ServerState,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("listening on {addr}");
    println!("Server running at http://localhost:{port}");
    axum::serve(listener, router(state, static_dir)).await?;
    Ok(())
}

async fn repo_tree(
    State(state): State<ServerState>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<TreeNode>, ServeError> {
    let repo_url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or(ServeError::MissingUrl)?;
    let zip_url =
        github::archive_url(&repo_url, &state.github_base).ok_or(ServeError::InvalidUrl)?;

    let tmp = tempfile::Builder::new()
        .prefix("repo")
        .tempdir()
        .map_err(ServeError::TempDir)?;

    let zip_path = tmp.path().join("repo.zip");
    archive::download(&state.http, &zip_url, &zip_path)
        .await
        .map_err(ServeError::Download)?;

    let workdir = tmp.path().to_path_buf();
    let tree = tokio::task::spawn_blocking(move || unpack_tree(&zip_path, &workdir))
        .await
        .map_err(ServeError::Worker)??;

    tracing::info!("served tree for {repo_url}");
    Ok(Json(tree))
}

/// Extract into `<workdir>/unzipped` and build the tree of its first entry
/// (the archive's top-level `<repo>-<branch>` directory).
fn unpack_tree(archive: &Path, workdir: &Path) -> Result<TreeNode, ServeError> {
    let dest = workdir.join("unzipped");
    archive::extract(archive, &dest).map_err(ServeError::Unzip)?;
    let root = fs::first_entry(&dest).ok_or(ServeError::EmptyRepo)?;
    fs::build_tree(&root).map_err(|e| {
        tracing::warn!("{e:#}");
        ServeError::EmptyRepo
    })
}

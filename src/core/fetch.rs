//! The fetcher — one `GET /tree?url=…` against the tree server.
//!
//! There is no timeout, retry or cancellation.  Every failure ends the fetch
//! and is reported through the sink as `Error: <message>`.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use super::output::{DisplayState, OutputSink};
use super::render::render_tree;
use super::tree::TreeNode;

/// Message shown for any transport or status failure.
pub const FETCH_FAILED: &str = "Gagal mengambil data";

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("{}", FETCH_FAILED)]
    Status(StatusCode),
    /// The request never produced a complete response.
    #[error("{}", FETCH_FAILED)]
    Transport(#[source] reqwest::Error),
    /// The body was not a valid tree.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    /// The server base URL could not be parsed.
    #[error("{0}")]
    Request(#[from] url::ParseError),
}

impl FetchError {
    fn log(&self) {
        match self {
            FetchError::Status(status) => tracing::warn!("tree server answered {status}"),
            FetchError::Transport(e) => tracing::warn!("tree request failed: {e}"),
            FetchError::Decode(e) => tracing::warn!("response is not a tree: {e}"),
            FetchError::Request(e) => tracing::warn!("bad server URL: {e}"),
        }
    }
}

/// HTTP client bound to one tree server.
#[derive(Debug, Clone)]
pub struct TreeClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl TreeClient {
    /// Client for the server at `server` (e.g. `http://localhost:8080`).
    pub fn new(server: &str) -> Result<Self, FetchError> {
        Self::with_client(reqwest::Client::new(), server)
    }

    pub fn with_client(http: reqwest::Client, server: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(server)?.join("/tree")?;
        Ok(Self { http, endpoint })
    }

    /// `…/tree?url=<repo_url>`, with the value percent-encoded.
    pub fn request_url(&self, repo_url: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", repo_url);
        url
    }

    /// Request and decode the tree for `repo_url`.
    pub async fn fetch_tree(&self, repo_url: &str) -> Result<TreeNode, FetchError> {
        self.try_fetch(repo_url).await.inspect_err(FetchError::log)
    }

    async fn try_fetch(&self, repo_url: &str) -> Result<TreeNode, FetchError> {
        let url = self.request_url(repo_url);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let tree = TreeNode::from_json_slice(&body)?;
        Ok(tree)
    }
}

/// Drive one fetch through `sink`: `Loading`, then the rendered tree or the
/// error.  The error is also returned so callers can set an exit status.
pub async fn fetch_and_render<S>(
    client: &TreeClient,
    repo_url: &str,
    sink: &mut S,
) -> Result<(), FetchError>
where
    S: OutputSink + ?Sized,
{
    sink.show(DisplayState::Loading);
    match client.fetch_tree(repo_url).await {
        Ok(tree) => {
            sink.show(DisplayState::Tree(render_tree(&tree, 0)));
            Ok(())
        }
        Err(err) => {
            sink.show(DisplayState::Error(err.to_string()));
            Err(err)
        }
    }
}

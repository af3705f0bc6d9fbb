use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures of a `/tree` request.  The display text is what the client sees.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Missing 'url' parameter")]
    MissingUrl,
    #[error("Invalid GitHub URL")]
    InvalidUrl,
    #[error("Failed to create temp dir")]
    TempDir(#[source] std::io::Error),
    #[error("Failed to download repo")]
    Download(#[source] super::archive::DownloadError),
    #[error("Failed to unzip repo")]
    Unzip(#[source] zip::result::ZipError),
    #[error("Empty or invalid repo content")]
    EmptyRepo,
    #[error("Failed to build tree")]
    Worker(#[source] tokio::task::JoinError),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::MissingUrl | ServeError::InvalidUrl => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            // Log the cause server-side; the client only gets the summary.
            match std::error::Error::source(&self) {
                Some(cause) => tracing::error!("{self}: {cause}"),
                None => tracing::error!("{self}"),
            }
        } else {
            tracing::debug!("rejected request: {self}");
        }
        (status, format!("{self}\n")).into_response()
    }
}

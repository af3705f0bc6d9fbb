//! Download and unpack a repository archive.
//!
//! The archive is streamed to a file next to the extraction directory, so a
//! request never holds the whole zip in memory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Stream `url` into the file at `dest`, treating any non-2xx status as a
/// failure.  Returns the number of bytes written.
pub async fn download(
    http: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<u64, DownloadError> {
    tracing::debug!("downloading {url}");
    let mut response = http.get(url).send().await?.error_for_status()?;

    let mut file = tokio::fs::File::create(dest).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    tracing::debug!("saved {written} bytes to {}", dest.display());
    Ok(written)
}

/// Extract the zip archive at `archive` into `dest`.
///
/// Entries whose names would escape `dest` are rejected by the zip reader.
pub fn extract(archive: &Path, dest: &Path) -> zip::result::ZipResult<()> {
    let reader = BufReader::new(File::open(archive)?);
    let mut zip = zip::ZipArchive::new(reader)?;
    tracing::debug!("extracting {} entries into {}", zip.len(), dest.display());
    zip.extract(dest)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn download_streams_body_to_file() {
        let body: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("repo.zip");
        let written = download(
            &reqwest::Client::new(),
            &format!("{}/a.zip", server.uri()),
            &dest,
        )
        .await
        .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn download_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("repo.zip");
        let err = download(&reqwest::Client::new(), &server.uri(), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Http(_)));
        assert!(!dest.exists());
    }

    #[test]
    fn extract_missing_archive_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let res = extract(&tmp.path().join("nope.zip"), &tmp.path().join("out"));
        assert!(matches!(res, Err(zip::result::ZipError::Io(_))));
    }
}

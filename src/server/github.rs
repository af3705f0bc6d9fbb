//! GitHub repository URL → archive download URL.

const GITHUB_PREFIX: &str = "https://github.com/";

/// Archive URL of the `main` branch of the repository at `repo_url`.
///
/// `repo_url` must look like `https://github.com/<owner>/<repo>[/…]`; anything
/// after the repo segment (tree paths, query strings inside it) is ignored.
/// `base` is the host the archive is fetched from, normally
/// `https://github.com`.
pub fn archive_url(repo_url: &str, base: &str) -> Option<String> {
    let rest = repo_url.strip_prefix(GITHUB_PREFIX)?;
    let mut parts = rest.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    Some(format!(
        "{}/{owner}/{repo}/archive/refs/heads/main.zip",
        base.trim_end_matches('/')
    ))
}

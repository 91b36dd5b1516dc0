// file: src/github/client.rs
// description: GitHub metadata lookup and archive download over HTTP
// reference: https://docs.rs/reqwest

use crate::config::GithubConfig;
use crate::error::{PipelineError, Result};
use crate::github::RepositoryRef;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("repodoc/", env!("CARGO_PKG_VERSION"));

pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

/// Subset of the repository metadata returned by the GitHub API. The
/// metadata call doubles as the up-front existence/permission check.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    pub full_name: String,
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, config })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn metadata_url(&self, repo_ref: &RepositoryRef) -> String {
        format!(
            "{}/repos/{}/{}",
            self.config.api_base, repo_ref.owner, repo_ref.repo
        )
    }

    fn archive_url(&self, repo_ref: &RepositoryRef, branch: &str) -> String {
        format!(
            "{}/{}/{}/archive/refs/heads/{}.zip",
            self.config.archive_base, repo_ref.owner, repo_ref.repo, branch
        )
    }

    /// Confirm the repository exists and is accessible before any archive
    /// bytes are fetched. Authentication and not-found failures surface
    /// here as `RepositoryAccess`.
    pub async fn fetch_metadata(&self, repo_ref: &RepositoryRef) -> Result<RepositoryMetadata> {
        let url = self.metadata_url(repo_ref);
        debug!("Fetching repository metadata: {}", url);

        let response = self
            .authorize(self.http.get(&url))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let metadata: RepositoryMetadata = response.json().await?;
                info!(
                    "Repository {} accessible (default branch: {})",
                    metadata.full_name, metadata.default_branch
                );
                Ok(metadata)
            }
            StatusCode::NOT_FOUND => Err(PipelineError::RepositoryAccess(format!(
                "repository {} not found; it may not exist, or it is private and requires a token",
                repo_ref
            ))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(PipelineError::RepositoryAccess(format!(
                    "access to {} denied (HTTP {}); check the supplied token",
                    repo_ref,
                    response.status()
                )))
            }
            status => Err(PipelineError::RepositoryAccess(format!(
                "unexpected response for {}: HTTP {}",
                repo_ref, status
            ))),
        }
    }

    /// Download the branch snapshot as a zip archive. The whole body is
    /// buffered in memory; the caller hands it to the archive reader. No
    /// retry on failure.
    pub async fn download_archive(
        &self,
        repo_ref: &RepositoryRef,
        branch: &str,
        default_branch: Option<&str>,
    ) -> Result<Vec<u8>> {
        let url = self.archive_url(repo_ref, branch);
        info!("Downloading archive: {}", url);

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| PipelineError::Fetch(format!("request to {} failed: {}", url, e)))?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| PipelineError::Fetch(format!("reading archive body: {}", e)))?;
                debug!("Downloaded {} bytes", bytes.len());
                Ok(bytes.to_vec())
            }
            StatusCode::NOT_FOUND => {
                let hint = default_branch
                    .map(|d| format!("; the repository's default branch is '{}'", d))
                    .unwrap_or_default();
                Err(PipelineError::RepositoryAccess(format!(
                    "branch '{}' not found for {}{}",
                    branch, repo_ref, hint
                )))
            }
            status => Err(PipelineError::Fetch(format!(
                "archive download for {} returned HTTP {}",
                repo_ref, status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client() -> GithubClient {
        GithubClient::new(Config::default_config().github).unwrap()
    }

    fn repo_ref() -> RepositoryRef {
        RepositoryRef::parse("owner/repo").unwrap()
    }

    #[test]
    fn test_metadata_url() {
        assert_eq!(
            client().metadata_url(&repo_ref()),
            "https://api.github.com/repos/owner/repo"
        );
    }

    #[test]
    fn test_archive_url() {
        assert_eq!(
            client().archive_url(&repo_ref(), "main"),
            "https://github.com/owner/repo/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn test_metadata_deserialization() {
        let payload = r#"{
            "full_name": "owner/repo",
            "default_branch": "develop",
            "private": false,
            "stargazers_count": 42
        }"#;

        let metadata: RepositoryMetadata = serde_json::from_str(payload).unwrap();
        assert_eq!(metadata.full_name, "owner/repo");
        assert_eq!(metadata.default_branch, "develop");
        assert!(!metadata.private);
    }
}

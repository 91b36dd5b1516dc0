// file: src/github/repo_ref.rs
// description: repository identifier parsing and normalization
// reference: github URL and owner/repo shorthand formats

use crate::error::{PipelineError, Result};
use std::fmt;

const HOST_MARKER: &str = "github.com";

/// Normalized repository coordinates. Both fields are non-empty and contain
/// no path separators once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    /// Parse a user-supplied identifier: either a full GitHub URL
    /// (optionally with protocol, `www.` prefix or `.git` suffix) or a bare
    /// `owner/repo` shorthand.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(PipelineError::InvalidIdentifier(
                "identifier is empty".to_string(),
            ));
        }

        if let Some(marker) = trimmed.find(HOST_MARKER) {
            let path = &trimmed[marker + HOST_MARKER.len()..];
            let mut segments = path.split('/').filter(|s| !s.is_empty());

            let owner = segments.next();
            let repo = segments.next();

            return match (owner, repo) {
                (Some(owner), Some(repo)) => Self::from_segments(owner, repo),
                _ => Err(PipelineError::InvalidIdentifier(format!(
                    "URL does not contain owner and repository segments: {}",
                    input
                ))),
            };
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() == 2 && !segments[0].is_empty() && !segments[1].is_empty() {
            return Self::from_segments(segments[0], segments[1]);
        }

        Err(PipelineError::InvalidIdentifier(format!(
            "expected a GitHub URL or owner/repo shorthand, got: {}",
            input
        )))
    }

    fn from_segments(owner: &str, repo: &str) -> Result<Self> {
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if repo.is_empty() {
            return Err(PipelineError::InvalidIdentifier(
                "repository name is empty".to_string(),
            ));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> RepositoryRef {
        RepositoryRef::parse(input).unwrap()
    }

    #[test]
    fn test_parse_full_url() {
        let repo_ref = parsed("https://github.com/rust-lang/rust");
        assert_eq!(repo_ref.owner, "rust-lang");
        assert_eq!(repo_ref.repo, "rust");
    }

    #[test]
    fn test_equivalent_spellings_parse_identically() {
        let expected = parsed("owner/repo");

        for input in [
            "https://github.com/owner/repo",
            "https://github.com/owner/repo.git",
            "https://www.github.com/owner/repo",
            "http://github.com/owner/repo/",
            "github.com/owner/repo",
            "www.github.com/owner/repo.git",
        ] {
            assert_eq!(parsed(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_url_with_extra_segments_takes_first_two() {
        let repo_ref = parsed("https://github.com/owner/repo/tree/main/src");
        assert_eq!(repo_ref.owner, "owner");
        assert_eq!(repo_ref.repo, "repo");
    }

    #[test]
    fn test_shorthand_keeps_segments_verbatim() {
        let repo_ref = parsed("some-org/some.repo");
        assert_eq!(repo_ref.owner, "some-org");
        assert_eq!(repo_ref.repo, "some.repo");
    }

    #[test]
    fn test_invalid_identifiers_fail() {
        for input in ["", "   ", "owner", "owner/", "/repo", "a/b/c", "a//b"] {
            let result = RepositoryRef::parse(input);
            assert!(
                matches!(result, Err(PipelineError::InvalidIdentifier(_))),
                "input should fail: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        let repo_ref = parsed("owner/repo");
        assert_eq!(repo_ref.to_string(), "owner/repo");
    }
}

//! Tag listing against repository hosts.
//!
//! The [`TagSource`] trait abstracts over how tag names are fetched so that
//! version resolution can run against canned data in tests. [`GithubTags`]
//! talks to the GitHub REST API.

use serde::Deserialize;

use crate::error::{RegistryError, Result};
use crate::repository::{Repository, RepositoryKind};

/// Default GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Source of raw tag names for a repository.
pub trait TagSource {
    /// List the tag names the host reports for `repository`.
    fn list_tags(&self, repository: &Repository) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Unauthenticated GitHub tag client.
///
/// Issues a single `GET /repos/<owner>/<name>/tags` per query.
pub struct GithubTags {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl GithubTags {
    /// Create a client against the public GitHub API.
    pub fn new() -> Result<Self> {
        Self::with_api_url(GITHUB_API_URL)
    }

    /// Create a client against a different API root (e.g. GitHub Enterprise).
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cpm/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GithubTags {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn tags_url(&self, owner: &str, name: &str) -> String {
        format!("{}/repos/{owner}/{name}/tags", self.api_url)
    }
}

impl TagSource for GithubTags {
    fn list_tags(&self, repository: &Repository) -> Result<Vec<String>> {
        if repository.kind != RepositoryKind::GitHub {
            return Err(RegistryError::UnsupportedHost {
                kind: repository.kind,
            });
        }

        let url = self.tags_url(&repository.owner, &repository.name);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RegistryError::HttpStatus {
                owner: repository.owner.clone(),
                name: repository.name.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        parse_tag_list(&body)
    }
}

/// Parse a tag-listing response body: a JSON array of objects with a `name`.
fn parse_tag_list(body: &str) -> Result<Vec<String>> {
    let entries: Vec<TagEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().map(|entry| entry.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_url_layout() {
        let client = GithubTags::with_api_url("https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(
            client.tags_url("fmtlib", "fmt"),
            "https://ghe.example.com/api/v3/repos/fmtlib/fmt/tags"
        );

        let public = GithubTags::new().unwrap();
        assert_eq!(
            public.tags_url("foo", "bar"),
            "https://api.github.com/repos/foo/bar/tags"
        );
    }

    #[test]
    fn parse_tag_list_reads_names() {
        let body = r#"[
            {"name": "v1.0.0", "commit": {"sha": "abc"}},
            {"name": "latest", "zipball_url": "https://example.com"}
        ]"#;
        assert_eq!(parse_tag_list(body).unwrap(), ["v1.0.0", "latest"]);
    }

    #[test]
    fn parse_tag_list_rejects_unexpected_shape() {
        assert!(parse_tag_list(r#"{"message": "Not Found"}"#).is_err());
        assert!(parse_tag_list("not json").is_err());
        assert!(parse_tag_list(r#"[{"tag": "v1.0.0"}]"#).is_err());
    }

    #[test]
    fn non_github_repository_is_rejected_before_request() {
        let client = GithubTags::new().unwrap();
        let repo = Repository {
            kind: RepositoryKind::GitLab,
            uri: "https://gitlab.com/foo/bar".to_string(),
            owner: "foo".to_string(),
            name: "bar".to_string(),
        };
        assert!(matches!(
            client.list_tags(&repo),
            Err(RegistryError::UnsupportedHost {
                kind: RepositoryKind::GitLab
            })
        ));
    }
}

//! Typed repository references parsed from source URIs.
//!
//! A [`Repository`] knows which host it lives on, how to ask that host for
//! its version tags, and how to render itself as a CPM.cmake package source
//! (`gh:<owner>/<name>[@<version> | #<tag>]`).

use std::fmt;

use crate::client::TagSource;
use crate::error::{RegistryError, Result};
use crate::version::TaggedVersion;

/// The hosting service a repository lives on.
///
/// Only GitHub has a grammar and a renderer today. The other kinds exist so
/// that unsupported operations fail with [`RegistryError::UnsupportedHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryKind {
    GitHub,
    GitLab,
    Bitbucket,
    Other,
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepositoryKind::GitHub => "github",
            RepositoryKind::GitLab => "gitlab",
            RepositoryKind::Bitbucket => "bitbucket",
            RepositoryKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// A repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub kind: RepositoryKind,
    /// The URI the reference was parsed from.
    pub uri: String,
    pub owner: String,
    pub name: String,
}

/// Host grammars in priority order.
const GRAMMARS: &[fn(&str) -> Option<Repository>] = &[parse_github_https];

impl Repository {
    /// Parse a source URI against the known host grammars.
    ///
    /// Returns `None` when no grammar matches; the input is then not a
    /// recognized remote and callers must decide on a fallback themselves.
    pub fn parse(uri: &str) -> Option<Self> {
        GRAMMARS.iter().find_map(|grammar| grammar(uri))
    }

    /// Fail with `UnsupportedHost` unless this repository is on GitHub.
    fn require_github(&self) -> Result<()> {
        match self.kind {
            RepositoryKind::GitHub => Ok(()),
            kind => Err(RegistryError::UnsupportedHost { kind }),
        }
    }

    /// Query the host for version tags, sorted oldest to newest.
    ///
    /// Tags that do not parse as semantic versions (after prefix handling,
    /// see [`TaggedVersion::from_tag`]) are skipped. A failed remote query
    /// is logged and yields no versions; pinning is best-effort.
    pub fn query_versions(
        &self,
        tags: &dyn TagSource,
        version_prefix: &str,
    ) -> Result<Vec<TaggedVersion>> {
        self.require_github()?;

        let tag_names = match tags.list_tags(self) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("failed to query tags for {}/{}: {e}", self.owner, self.name);
                return Ok(Vec::new());
            }
        };

        let mut versions: Vec<TaggedVersion> = tag_names
            .iter()
            .filter_map(|tag| {
                let tagged = TaggedVersion::from_tag(tag, version_prefix);
                if tagged.is_none() {
                    tracing::debug!("ignoring non-version tag '{tag}'");
                }
                tagged
            })
            .collect();

        versions.sort_by(|a, b| a.version.cmp(&b.version));
        Ok(versions)
    }

    /// The newest version tag, if any.
    pub fn query_latest_version(
        &self,
        tags: &dyn TagSource,
        version_prefix: &str,
    ) -> Result<Option<TaggedVersion>> {
        Ok(self.query_versions(tags, version_prefix)?.pop())
    }

    /// Render the CPM package source, pinned to `version` when given.
    pub fn cpm_definition(&self, version: Option<&TaggedVersion>) -> Result<String> {
        self.require_github()?;

        let suffix = version.map(TaggedVersion::cpm_suffix).unwrap_or_default();
        Ok(format!("gh:{}/{}{}", self.owner, self.name, suffix))
    }

    /// Render the CPM package source pinned to the newest version tag.
    ///
    /// Falls back to an unpinned source when the host reports no versions.
    pub fn cpm_definition_for_latest_version(
        &self,
        tags: &dyn TagSource,
        version_prefix: &str,
    ) -> Result<String> {
        let latest = self.query_latest_version(tags, version_prefix)?;
        if latest.is_none() {
            tracing::warn!(
                "no version tags found for {}/{}, adding it unpinned",
                self.owner,
                self.name
            );
        }
        self.cpm_definition(latest.as_ref())
    }
}

/// `https://github.com/<owner>/<name>[.git | /...]`
fn parse_github_https(uri: &str) -> Option<Repository> {
    let path = uri.strip_prefix("https://github.com/")?;
    if path.chars().any(char::is_whitespace) {
        return None;
    }

    let mut segments = path.splitn(3, '/');
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let name_segment = segments.next()?;

    let name = name_segment.strip_suffix(".git").unwrap_or(name_segment);
    if name.is_empty() {
        return None;
    }

    Some(Repository {
        kind: RepositoryKind::GitHub,
        uri: uri.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

//! Semantic versions and the tags they are read from.
//!
//! Parsing follows SemVer 2.0 strictly and is delegated to the `semver`
//! crate. Precedence is implemented here because `semver::Version` orders
//! build metadata as a tiebreaker, while tags differing only in build
//! metadata must rank equal.

use std::cmp::Ordering;
use std::fmt;

pub use semver::{BuildMetadata, Prerelease};

/// A parsed `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Dot-separated pre-release identifiers, empty for a release.
    pub pre_release: Prerelease,
    /// Build metadata. Never participates in ordering or equality.
    pub build_metadata: BuildMetadata,
}

impl SemanticVersion {
    /// Create a release version with no pre-release or build metadata.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: Prerelease::EMPTY,
            build_metadata: BuildMetadata::EMPTY,
        }
    }

    /// Parse a version string, returning `None` on any deviation from the
    /// grammar. Leading zeros, empty identifiers, a `v` prefix and surrounding
    /// whitespace are all rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let parsed = semver::Version::parse(text).ok()?;
        Some(SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre_release: parsed.pre,
            build_metadata: parsed.build,
        })
    }

    /// Whether this version carries pre-release identifiers.
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // `Prerelease` already sorts the empty (release) value after any
        // non-empty one and compares numeric identifiers numerically.
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| self.pre_release.cmp(&other.pre_release))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

/// A version together with the exact tag it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedVersion {
    /// The tag as it appears in version control.
    pub tag: String,
    pub version: SemanticVersion,
}

impl TaggedVersion {
    /// Map a tag name to a version.
    ///
    /// With a non-empty `version_prefix` the tag must start with the prefix,
    /// which is stripped before parsing. With an empty prefix a single
    /// leading `v` is stripped if present.
    pub fn from_tag(tag: &str, version_prefix: &str) -> Option<Self> {
        let version_text = if version_prefix.is_empty() {
            tag.strip_prefix('v').unwrap_or(tag)
        } else {
            tag.strip_prefix(version_prefix)?
        };

        let version = SemanticVersion::parse(version_text)?;
        Some(TaggedVersion {
            tag: tag.to_string(),
            version,
        })
    }

    /// Suffix appended to a CPM source to pin this version.
    ///
    /// `v`-prefixed tags pin by release name (`@1.2.0`); anything else pins
    /// the exact tag (`#release-1.2.0`).
    pub fn cpm_suffix(&self) -> String {
        match self.tag.strip_prefix('v') {
            Some(release) => format!("@{release}"),
            None => format!("#{}", self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SemanticVersion {
        SemanticVersion::parse(text).unwrap()
    }

    #[test]
    fn parse_full_version() {
        let version = v("1.2.3-alpha.1+build.5");
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
        assert_eq!(version.pre_release.as_str(), "alpha.1");
        assert_eq!(version.build_metadata.as_str(), "build.5");
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in [
            "",
            "1",
            "1.2",
            "1.2.3.4",
            "01.2.3",
            "1.02.3",
            "1.2.03",
            "v1.2.3",
            " 1.2.3",
            "1.2.3-",
            "1.2.3-alpha..1",
            "1.2.3-01",
            "1.2.3+",
            "1.2.3-alpha_1",
            "latest",
        ] {
            assert!(SemanticVersion::parse(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parse_accepts_zero_components() {
        assert_eq!(v("0.0.0"), SemanticVersion::new(0, 0, 0));
        assert_eq!(v("10.20.30"), SemanticVersion::new(10, 20, 30));
    }

    #[test]
    fn release_ordering() {
        assert!(v("1.0.0") < v("1.0.1"));
        assert!(v("1.0.1") < v("1.1.0"));
        assert!(v("1.1.0") < v("2.0.0"));
        assert!(v("1.9.0") < v("1.10.0"));
    }

    #[test]
    fn pre_release_sorts_before_release() {
        assert!(v("1.0.0-alpha") < v("1.0.0"));
        assert!(v("1.0.0-rc.1") < v("1.0.0"));
        assert!(v("1.0.0") < v("1.0.1-alpha"));
    }

    #[test]
    fn pre_release_identifier_precedence() {
        let ordered = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for pair in ordered.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn build_metadata_ignored_for_precedence() {
        assert_eq!(v("1.0.0+a"), v("1.0.0+b"));
        assert_eq!(v("1.0.0+a").cmp(&v("1.0.0")), Ordering::Equal);
        assert!(!(v("1.0.0+zzz") < v("1.0.0+aaa")));
    }

    #[test]
    fn ordering_is_strict_weak() {
        let versions: Vec<SemanticVersion> = [
            "0.1.0", "1.0.0-alpha", "1.0.0", "1.0.0+meta", "1.0.1", "1.1.0-rc.1", "2.0.0",
        ]
        .iter()
        .map(|s| v(s))
        .collect();

        for a in &versions {
            assert!(!(a < a));
            for b in &versions {
                assert!(!(a < b && b < a));
                for c in &versions {
                    if a < b && b < c {
                        assert!(a < c);
                    }
                }
            }
        }
    }

    #[test]
    fn display_preserves_ordering() {
        for text in ["1.0.0", "1.0.0-alpha.1", "2.3.4+build", "0.0.1-rc.2+x.y"] {
            let version = v(text);
            let reparsed = v(&version.to_string());
            assert_eq!(version, reparsed);
            assert_eq!(version.to_string(), text);
        }
    }

    #[test]
    fn tag_with_v_prefix_and_no_version_prefix() {
        let tagged = TaggedVersion::from_tag("v2.3.0", "").unwrap();
        assert_eq!(tagged.tag, "v2.3.0");
        assert_eq!(tagged.version, SemanticVersion::new(2, 3, 0));
    }

    #[test]
    fn tag_without_v_prefix() {
        let tagged = TaggedVersion::from_tag("2.3.0", "").unwrap();
        assert_eq!(tagged.version, SemanticVersion::new(2, 3, 0));
    }

    #[test]
    fn tag_with_custom_version_prefix() {
        let tagged = TaggedVersion::from_tag("lib-2.3.0", "lib-").unwrap();
        assert_eq!(tagged.tag, "lib-2.3.0");
        assert_eq!(tagged.version, SemanticVersion::new(2, 3, 0));
    }

    #[test]
    fn tag_not_matching_version_prefix_is_excluded() {
        assert!(TaggedVersion::from_tag("v2.3.0", "lib-").is_none());
    }

    #[test]
    fn non_semver_tags_are_excluded() {
        assert!(TaggedVersion::from_tag("latest", "").is_none());
        assert!(TaggedVersion::from_tag("v1.2", "").is_none());
        assert!(TaggedVersion::from_tag("vv1.2.3", "").is_none());
    }

    #[test]
    fn cpm_suffix_for_v_tag() {
        let tagged = TaggedVersion::from_tag("v1.2.0", "").unwrap();
        assert_eq!(tagged.cpm_suffix(), "@1.2.0");
    }

    #[test]
    fn cpm_suffix_for_other_tag() {
        let tagged = TaggedVersion::from_tag("release-1.2.0", "release-").unwrap();
        assert_eq!(tagged.cpm_suffix(), "#release-1.2.0");

        let bare = TaggedVersion::from_tag("1.2.0", "").unwrap();
        assert_eq!(bare.cpm_suffix(), "#1.2.0");
    }
}

//! Version parsing and ordering
//!
//! Versions are `major.minor.patch` with an optional pre-release label. The
//! label may follow a hyphen (`2.0.0-rc1`) or, for versions written by older
//! releases, come straight after the patch number (`2.0.0a3`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use semver::{Prerelease, Version};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^v?(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z][0-9A-Za-z.\-]*)|([A-Za-z][0-9A-Za-z.\-]*))?$",
        )
        .expect("version pattern is valid")
    })
}

/// A parsed version
///
/// Ordering compares major, minor and patch numerically. At an equal triple a
/// pre-release sorts before the release, and two pre-release labels compare
/// lexicographically as plain strings. That last rule is simpler than full
/// SemVer precedence (`rc10 < rc9` here).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion {
    version: Version,
}

impl SemanticVersion {
    /// A release version with no pre-release label
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            version: Version::new(major, minor, patch),
        }
    }

    /// Parse `major.minor.patch[-prerelease]`, also accepting `2.0.0a3` and a
    /// leading `v`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let captures = version_pattern().captures(trimmed).ok_or_else(|| {
            SchemaError::malformed_version(input, "expected major.minor.patch[-prerelease]")
        })?;

        let label = captures.get(4).or_else(|| captures.get(5)).map(|m| m.as_str());
        let normalized = match label {
            Some(label) => format!("{}.{}.{}-{}", &captures[1], &captures[2], &captures[3], label),
            None => format!("{}.{}.{}", &captures[1], &captures[2], &captures[3]),
        };

        let version = Version::parse(&normalized)
            .map_err(|e| SchemaError::malformed_version(input, e.to_string()))?;
        Ok(Self { version })
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// The pre-release label, if any (`"a3"` for `2.0.0a3`)
    pub fn pre_release(&self) -> Option<&str> {
        if self.version.pre.is_empty() {
            None
        } else {
            Some(self.version.pre.as_str())
        }
    }

    pub fn is_pre_release(&self) -> bool {
        !self.version.pre.is_empty()
    }

    /// The same version with its pre-release label dropped
    pub fn release(&self) -> Self {
        let mut version = self.version.clone();
        version.pre = Prerelease::EMPTY;
        Self { version }
    }

    /// Equivalent strict SemVer value
    pub fn as_semver(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl FromStr for SemanticVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major(), self.minor(), self.patch())
            .cmp(&(other.major(), other.minor(), other.patch()))
            .then_with(|| match (self.pre_release(), other.pre_release()) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_version_parsing() {
        let version = v("1.2.3");
        assert_eq!((version.major(), version.minor(), version.patch()), (1, 2, 3));
        assert_eq!(version.pre_release(), None);
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn test_historical_pre_release_format() {
        let version = v("2.0.0a3");
        assert_eq!((version.major(), version.minor(), version.patch()), (2, 0, 0));
        assert_eq!(version.pre_release(), Some("a3"));
        assert_eq!(version.to_string(), "2.0.0-a3");
        assert_eq!(version, v("2.0.0-a3"));
    }

    #[test]
    fn test_version_with_v_prefix() {
        assert_eq!(v("v1.2.3"), SemanticVersion::new(1, 2, 3));
        assert_eq!(v(" 1.2.3 "), SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_malformed_versions() {
        let inputs = [
            "not-a-version",
            "",
            "1.2",
            "1.2.3.4",
            "1.2.x",
            "1.2.3-",
            "1.2.3+build",
            "01.2.3",
        ];
        for input in inputs {
            let err = SemanticVersion::parse(input).unwrap_err();
            match err {
                SchemaError::MalformedVersion {
                    input: recorded, ..
                } => assert_eq!(recorded, input),
                other => panic!("Expected MalformedVersion for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_ordering() {
        assert!(v("1.9.9") < v("2.0.0a3"));
        assert!(v("2.0.0a3") < v("2.0.0"));
        assert!(v("2.0.0") < v("2.0.1a1"));
        assert!(v("2.10.0") > v("2.9.0"));
        assert!(v("2.0.0a3") < v("2.0.0b1"));
        assert!(v("2.0.0rc1") > v("2.0.0b2"));
    }

    #[test]
    fn test_lexicographic_pre_release_labels() {
        assert!(v("2.0.0-rc10") < v("2.0.0-rc9"));
    }

    #[test]
    fn test_release() {
        assert_eq!(v("2.0.0a3").release(), SemanticVersion::new(2, 0, 0));
        assert!(!v("2.0.0a3").release().is_pre_release());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("2.0.0a3")).unwrap();
        assert_eq!(json, "\"2.0.0-a3\"");
        let back: SemanticVersion = serde_json::from_str("\"2.0.0a3\"").unwrap();
        assert_eq!(back, v("2.0.0a3"));
        assert!(serde_json::from_str::<SemanticVersion>("\"two\"").is_err());
    }
}

use crate::error::{NextVersionError, Result};
use std::fmt;

/// Severity of a version change, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionBump {
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version as it appears in a tag name: a free-form prefix followed by a
/// semantic version (e.g. "v1.2.3" or "release-2.0.0-rc.1").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVersion {
    pub prefix: String,
    pub version: semver::Version,
}

impl TagVersion {
    /// Create a version with the given prefix from numeric components
    pub fn new(prefix: impl Into<String>, major: u64, minor: u64, patch: u64) -> Self {
        TagVersion {
            prefix: prefix.into(),
            version: semver::Version::new(major, minor, patch),
        }
    }

    /// Split a tag name at its first digit and parse the remainder as semver.
    pub fn parse(tag: &str) -> Result<Self> {
        let start = tag.find(|c: char| c.is_ascii_digit()).ok_or_else(|| {
            NextVersionError::version(format!("Tag '{}' contains no version number", tag))
        })?;
        let (prefix, rest) = tag.split_at(start);

        let version = semver::Version::parse(rest).map_err(|e| {
            NextVersionError::version(format!("Invalid version in tag '{}': {}", tag, e))
        })?;

        Ok(TagVersion {
            prefix: prefix.to_string(),
            version,
        })
    }

    /// Apply a bump, keeping the prefix.
    ///
    /// Pre-release and build metadata are dropped. A pre-release that is
    /// already at the requested level is promoted instead of incremented,
    /// so `1.3.0-rc.1` bumped by minor becomes `1.3.0`.
    pub fn bump(&self, bump: VersionBump) -> Result<Self> {
        let v = &self.version;
        let pre = !v.pre.is_empty();

        let next = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                NextVersionError::version(format!(
                    "Cannot apply a {} bump to {}: component overflows",
                    bump, self
                ))
            })
        };

        let (major, minor, patch) = match bump {
            VersionBump::Major if pre && v.minor == 0 && v.patch == 0 => (v.major, 0, 0),
            VersionBump::Major => (next(v.major)?, 0, 0),
            VersionBump::Minor if pre && v.patch == 0 => (v.major, v.minor, 0),
            VersionBump::Minor => (v.major, next(v.minor)?, 0),
            VersionBump::Patch if pre => (v.major, v.minor, v.patch),
            VersionBump::Patch => (v.major, v.minor, next(v.patch)?),
            VersionBump::None => return Err(NextVersionError::NoBump),
        };

        Ok(TagVersion {
            prefix: self.prefix.clone(),
            version: semver::Version::new(major, minor, patch),
        })
    }

    /// The bare version without the tag prefix ("1.4.0").
    pub fn strict(&self) -> String {
        self.version.to_string()
    }
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_v_prefix() {
        let v = TagVersion::parse("v1.2.3").unwrap();
        assert_eq!(v.prefix, "v");
        assert_eq!(v.version, semver::Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_without_prefix() {
        let v = TagVersion::parse("1.2.3").unwrap();
        assert_eq!(v, TagVersion::new("", 1, 2, 3));
    }

    #[test]
    fn test_parse_long_prefix() {
        let v = TagVersion::parse("api-release-v0.9.12").unwrap();
        assert_eq!(v.prefix, "api-release-v");
        assert_eq!(v.strict(), "0.9.12");
    }

    #[test]
    fn test_parse_prerelease() {
        let v = TagVersion::parse("v2.0.0-rc.1").unwrap();
        assert_eq!(v.version.pre.as_str(), "rc.1");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TagVersion::parse("latest").is_err());
        assert!(TagVersion::parse("v1.2").is_err());
        assert!(TagVersion::parse("v1.2.3.4").is_err());
    }

    #[test]
    fn test_bump_major() {
        let v = TagVersion::new("v", 1, 2, 3);
        assert_eq!(v.bump(VersionBump::Major).unwrap().to_string(), "v2.0.0");
    }

    #[test]
    fn test_bump_minor() {
        let v = TagVersion::new("v", 1, 2, 3);
        assert_eq!(v.bump(VersionBump::Minor).unwrap().to_string(), "v1.3.0");
    }

    #[test]
    fn test_bump_patch() {
        let v = TagVersion::new("v", 1, 2, 3);
        assert_eq!(v.bump(VersionBump::Patch).unwrap().to_string(), "v1.2.4");
    }

    #[test]
    fn test_bump_none_is_an_error() {
        let v = TagVersion::new("v", 1, 2, 3);
        assert!(matches!(
            v.bump(VersionBump::None),
            Err(NextVersionError::NoBump)
        ));
    }

    #[test]
    fn test_bump_keeps_prefix_and_strict_form() {
        let v = TagVersion::parse("release-0.4.9").unwrap();
        let next = v.bump(VersionBump::Patch).unwrap();
        assert_eq!(next.to_string(), "release-0.4.10");
        assert_eq!(next.strict(), "0.4.10");
    }

    #[test]
    fn test_bump_promotes_prerelease() {
        let rc = TagVersion::parse("v1.3.0-rc.1").unwrap();
        assert_eq!(rc.bump(VersionBump::Minor).unwrap().to_string(), "v1.3.0");
        assert_eq!(rc.bump(VersionBump::Patch).unwrap().to_string(), "v1.3.0");
        assert_eq!(rc.bump(VersionBump::Major).unwrap().to_string(), "v2.0.0");

        let major_rc = TagVersion::parse("v2.0.0-beta").unwrap();
        assert_eq!(
            major_rc.bump(VersionBump::Major).unwrap().to_string(),
            "v2.0.0"
        );
    }

    #[test]
    fn test_bump_drops_build_metadata() {
        let v = TagVersion::parse("v1.0.0+build.5").unwrap();
        assert_eq!(v.bump(VersionBump::Patch).unwrap().to_string(), "v1.0.1");
    }

    #[test]
    fn test_bump_ordering() {
        assert!(VersionBump::Major > VersionBump::Minor);
        assert!(VersionBump::Minor > VersionBump::Patch);
        assert!(VersionBump::Patch > VersionBump::None);
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let v = TagVersion::parse("v18446744073709551615.0.0").unwrap();
        let err = v.bump(VersionBump::Major).unwrap_err();
        assert!(matches!(err, NextVersionError::Version(_)));
        assert!(err.to_string().contains("overflows"));

        let v = TagVersion::parse("1.18446744073709551615.0").unwrap();
        assert!(v.bump(VersionBump::Minor).is_err());
        assert_eq!(
            v.bump(VersionBump::Major).unwrap(),
            TagVersion::new("", 2, 0, 0)
        );

        let v = TagVersion::parse("1.0.18446744073709551615").unwrap();
        assert!(v.bump(VersionBump::Patch).is_err());
    }
}

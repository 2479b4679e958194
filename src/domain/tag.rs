use crate::domain::version::TagVersion;
use crate::error::Result;

/// A tag on the host together with the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_id: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit_id: commit_id.into(),
        }
    }

    /// Parse the tag name as a prefixed semantic version
    pub fn version(&self) -> Result<TagVersion> {
        TagVersion::parse(&self.name)
    }
}

/// Which tags count as release tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    prefix: Option<String>,
}

impl TagFilter {
    pub fn new(prefix: Option<String>) -> Self {
        TagFilter { prefix }
    }

    /// Tag name starts with the configured prefix and carries a version
    pub fn accepts(&self, tag: &Tag) -> bool {
        self.release_version(tag).is_some()
    }

    fn release_version(&self, tag: &Tag) -> Option<TagVersion> {
        let version = tag.version().ok()?;
        match &self.prefix {
            Some(prefix) if &version.prefix != prefix => None,
            _ => Some(version),
        }
    }

    /// Pick the tag with the highest version among those accepted.
    ///
    /// On equal versions (e.g. `v1.0.0` and `1.0.0`) the first one seen wins.
    pub fn latest<I>(&self, tags: I) -> Option<Tag>
    where
        I: IntoIterator<Item = Tag>,
    {
        let mut best: Option<(semver::Version, Tag)> = None;

        for tag in tags {
            let Some(version) = self.release_version(&tag) else {
                continue;
            };
            let newer = match &best {
                Some((current, _)) => version.version > *current,
                None => true,
            };
            if newer {
                best = Some((version.version, tag));
            }
        }

        best.map(|(_, tag)| tag)
    }
}

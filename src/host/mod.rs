//! Source-control host abstraction
//!
//! The tag resolver and the commit range fetcher are both expressed by the
//! [Host] trait so the release workflow can run against different backends:
//!
//! - [github::GitHubHost]: the GitHub REST API over `reqwest`
//! - [local::LocalHost]: a local clone read through `git2`
//! - [mock::MockHost]: an in-memory host for tests
//!
//! Commit ranges are paged. [pages::CommitPages] walks the pages lazily and
//! stops as soon as the host's reported total has been fetched.

pub mod github;
pub mod local;
pub mod mock;
pub mod pages;

pub use github::GitHubHost;
pub use local::LocalHost;
pub use mock::MockHost;
pub use pages::{fetch_all_commits, CommitPages};

use std::fmt;
use std::str::FromStr;

use crate::domain::{Commit, Tag, TagFilter};
use crate::error::{NextVersionError, Result};

/// `owner/name` of a repository on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepositoryId {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepositoryId {
    type Err = NextVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepositoryId::new(owner, name))
            }
            _ => Err(NextVersionError::config(format!(
                "repository must look like 'owner/name', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One page of a commit comparison
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparePage {
    pub commits: Vec<Commit>,
    /// Total number of commits in the whole range, as reported by the host
    pub total_count: usize,
}

/// Read-only operations the release workflow needs from a host
pub trait Host {
    /// List every tag of the repository with the commit it points at
    fn list_tags(&self, repository: &RepositoryId) -> Result<Vec<Tag>>;

    /// Fetch one page (1-based) of the commits reachable from `head` but not
    /// from `base`, oldest first
    fn compare_page(
        &self,
        repository: &RepositoryId,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<ComparePage>;

    /// Most recent release tag, or `None` when the repository has none
    fn latest_tag(&self, repository: &RepositoryId, filter: &TagFilter) -> Result<Option<Tag>> {
        Ok(filter.latest(self.list_tags(repository)?))
    }
}

use std::cell::RefCell;

use crate::domain::{Commit, Tag};
use crate::error::{NextVersionError, Result};
use crate::host::{ComparePage, Host, RepositoryId};

/// In-memory host for testing without network or git access.
///
/// Every commit added is part of the compared range regardless of the refs
/// passed in; pages are slices of `per_page` commits.
pub struct MockHost {
    tags: Vec<Tag>,
    commits: Vec<Commit>,
    per_page: usize,
    reported_total: Option<usize>,
    compare_error: Option<String>,
    requested_pages: RefCell<Vec<u32>>,
}

impl MockHost {
    /// Create a new empty mock host
    pub fn new() -> Self {
        MockHost {
            tags: Vec::new(),
            commits: Vec::new(),
            per_page: 100,
            reported_total: None,
            compare_error: None,
            requested_pages: RefCell::new(Vec::new()),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_commit(mut self, commit: Commit) -> Self {
        self.commits.push(commit);
        self
    }

    /// Add commits built from messages, with ids `c0`, `c1`, ...
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for message in messages {
            let id = format!("c{}", self.commits.len());
            self.commits.push(Commit::new(id, message));
        }
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Report a total that differs from the number of commits held
    pub fn with_reported_total(mut self, total: usize) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Make every compare request fail
    pub fn with_compare_error(mut self, message: impl Into<String>) -> Self {
        self.compare_error = Some(message.into());
        self
    }

    /// Pages requested so far, in order
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested_pages.borrow().clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MockHost {
    fn list_tags(&self, _repository: &RepositoryId) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn compare_page(
        &self,
        _repository: &RepositoryId,
        _base: &str,
        _head: &str,
        page: u32,
    ) -> Result<ComparePage> {
        self.requested_pages.borrow_mut().push(page);

        if let Some(message) = &self.compare_error {
            return Err(NextVersionError::host(message.clone()));
        }

        let start = (page.saturating_sub(1) as usize).saturating_mul(self.per_page);
        let commits = self
            .commits
            .iter()
            .skip(start)
            .take(self.per_page)
            .cloned()
            .collect();

        Ok(ComparePage {
            commits,
            total_count: self.reported_total.unwrap_or(self.commits.len()),
        })
    }
}

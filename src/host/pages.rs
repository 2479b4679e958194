use crate::boundary::BoundaryWarning;
use crate::domain::Commit;
use crate::error::{NextVersionError, Result};
use crate::host::{Host, RepositoryId};
use crate::ui;

/// Lazy sequence of commit pages for a `base...head` range.
///
/// Page 1 is always requested. After each page the cumulative count is
/// compared with the total the host reported; once it is reached no further
/// page is requested. An empty page also ends the sequence.
pub struct CommitPages<'a, H: Host + ?Sized> {
    host: &'a H,
    repository: &'a RepositoryId,
    base: &'a str,
    head: &'a str,
    next_page: u32,
    fetched: usize,
    total: Option<usize>,
    done: bool,
}

impl<'a, H: Host + ?Sized> CommitPages<'a, H> {
    pub fn new(host: &'a H, repository: &'a RepositoryId, base: &'a str, head: &'a str) -> Self {
        CommitPages {
            host,
            repository,
            base,
            head,
            next_page: 1,
            fetched: 0,
            total: None,
            done: false,
        }
    }

    /// Commits yielded so far
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Total reported by the most recent page, if one was fetched
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Number of pages requested so far
    pub fn pages_requested(&self) -> u32 {
        self.next_page - 1
    }
}

impl<H: Host + ?Sized> Iterator for CommitPages<'_, H> {
    type Item = Result<Vec<Commit>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let page = self.next_page;
        let result = self
            .host
            .compare_page(self.repository, self.base, self.head, page);
        self.next_page += 1;

        let compare = match result {
            Ok(compare) => compare,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.total = Some(compare.total_count);
        tracing::debug!(
            page,
            commits = compare.commits.len(),
            total = compare.total_count,
            "fetched commit page"
        );

        if compare.commits.is_empty() {
            self.done = true;
            return None;
        }

        self.fetched += compare.commits.len();
        if self.fetched >= compare.total_count {
            self.done = true;
        }

        Some(Ok(compare.commits))
    }
}

/// Fetch every commit in `base...head`.
///
/// Fails with [NextVersionError::NoCommits] when the first page is empty.
pub fn fetch_all_commits<H: Host + ?Sized>(
    host: &H,
    repository: &RepositoryId,
    base: &str,
    head: &str,
) -> Result<Vec<Commit>> {
    let mut pages = CommitPages::new(host, repository, base, head);
    let mut commits = Vec::new();

    for page in pages.by_ref() {
        commits.extend(page?);
    }

    if commits.is_empty() {
        return Err(NextVersionError::NoCommits {
            base: base.to_string(),
            head: head.to_string(),
        });
    }

    if let Some(total) = pages.total() {
        if pages.fetched() < total {
            ui::display_boundary_warning(&BoundaryWarning::IncompleteRange {
                fetched: pages.fetched(),
                total,
            });
        }
    }

    Ok(commits)
}

use git2::{Oid, Repository, Sort};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::domain::{Commit, Tag};
use crate::error::{NextVersionError, Result};
use crate::host::{ComparePage, Host, RepositoryId};

/// Host backed by a local clone.
///
/// The repository id passed to [Host] methods is ignored; the clone opened
/// at construction is always used. Ranges are served in pages of
/// `per_page` commits so the same paging contract applies as for remote
/// hosts. The walked range is kept for the last `(base, head)` pair, so
/// later pages neither repeat the revwalk nor see commits added meanwhile.
pub struct LocalHost {
    repo: Repository,
    per_page: usize,
    range_cache: RefCell<Option<CachedRange>>,
}

struct CachedRange {
    base: String,
    head: String,
    oids: Rc<Vec<Oid>>,
}

impl LocalHost {
    /// Open or discover a git repository at `path`
    pub fn open<P: AsRef<Path>>(path: P, per_page: u32) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self::from_git2(repo, per_page))
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Repository, per_page: u32) -> Self {
        LocalHost {
            repo,
            per_page: per_page.max(1) as usize,
            range_cache: RefCell::new(None),
        }
    }

    /// Resolve a ref, falling back to the `origin` remote-tracking branch
    /// for branch names that only exist remotely (typical in CI checkouts).
    fn resolve_commit(&self, reference: &str) -> Result<Oid> {
        let object = match self.repo.revparse_single(reference) {
            Ok(object) => object,
            Err(e) if e.code() == git2::ErrorCode::NotFound => self
                .repo
                .revparse_single(&format!("origin/{}", reference))
                .map_err(|_| {
                    NextVersionError::host(format!("Cannot resolve ref '{}': {}", reference, e))
                })?,
            Err(e) => return Err(e.into()),
        };

        Ok(object.peel_to_commit()?.id())
    }

    fn range(&self, base: &str, head: &str) -> Result<Rc<Vec<Oid>>> {
        if let Some(cached) = self.range_cache.borrow().as_ref() {
            if cached.base == base && cached.head == head {
                return Ok(Rc::clone(&cached.oids));
            }
        }

        let oids = Rc::new(self.walk(base, head)?);
        tracing::debug!(base, head, commits = oids.len(), "walked commit range");
        *self.range_cache.borrow_mut() = Some(CachedRange {
            base: base.to_string(),
            head: head.to_string(),
            oids: Rc::clone(&oids),
        });
        Ok(oids)
    }

    fn walk(&self, base: &str, head: &str) -> Result<Vec<Oid>> {
        let base = self.resolve_commit(base)?;
        let head = self.resolve_commit(head)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head)?;
        revwalk.hide(base)?;

        revwalk
            .map(|oid| oid.map_err(NextVersionError::from))
            .collect()
    }
}

impl Host for LocalHost {
    fn list_tags(&self, _repository: &RepositoryId) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(name, commit.id().to_string())),
                Err(e) => tracing::debug!(tag = name, error = %e, "tag does not point at a commit"),
            }
        }

        Ok(tags)
    }

    fn compare_page(
        &self,
        _repository: &RepositoryId,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<ComparePage> {
        let oids = self.range(base, head)?;
        let start = (page.saturating_sub(1) as usize).saturating_mul(self.per_page);

        let mut commits = Vec::new();
        for oid in oids.iter().skip(start).take(self.per_page) {
            let commit = self.repo.find_commit(*oid)?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            commits.push(Commit::new(oid.to_string(), message));
        }

        Ok(ComparePage {
            commits,
            total_count: oids.len(),
        })
    }
}

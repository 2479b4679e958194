use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{Commit, Tag};
use crate::error::{NextVersionError, Result};
use crate::host::{ComparePage, Host, RepositoryId};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct TagResponse {
    name: String,
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    total_commits: usize,
    #[serde(default)]
    commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
struct CompareCommit {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl From<TagResponse> for Tag {
    fn from(tag: TagResponse) -> Self {
        Tag::new(tag.name, tag.commit.sha)
    }
}

impl From<CompareResponse> for ComparePage {
    fn from(response: CompareResponse) -> Self {
        ComparePage {
            commits: response
                .commits
                .into_iter()
                .map(|c| Commit::new(c.sha, c.commit.message))
                .collect(),
            total_count: response.total_commits,
        }
    }
}

/// GitHub REST API client for tags and commit comparisons
pub struct GitHubHost {
    client: Client,
    api_url: String,
    per_page: u32,
}

impl GitHubHost {
    /// Build a client against `api_url` (e.g. `https://api.github.com`).
    ///
    /// The token, when given, is sent as a bearer credential on every request.
    pub fn new(api_url: &str, token: Option<&str>, per_page: u32) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers(token)?)
            .build()?;

        Ok(GitHubHost {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            per_page,
        })
    }

    pub fn tags_url(&self, repository: &RepositoryId, page: u32) -> String {
        format!(
            "{}/repos/{}/{}/tags?per_page={}&page={}",
            self.api_url, repository.owner, repository.name, self.per_page, page
        )
    }

    pub fn compare_url(&self, repository: &RepositoryId, base: &str, head: &str, page: u32) -> String {
        format!(
            "{}/repos/{}/{}/compare/{}...{}?per_page={}&page={}",
            self.api_url, repository.owner, repository.name, base, head, self.per_page, page
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let response = check_status(url, response)?;
        Ok(response.json()?)
    }
}

fn default_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("next-version/", env!("CARGO_PKG_VERSION"))),
    );

    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| NextVersionError::config("token contains invalid header characters"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// A tags page shorter than `per_page` is the last one
fn is_last_page(batch_len: usize, per_page: u32) -> bool {
    batch_len == 0 || batch_len < per_page as usize
}

fn check_status(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiError>()
        .map(|e| e.message)
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(NextVersionError::host(format!(
        "GET {} returned HTTP {} - {}",
        url, status, message
    )))
}

impl Host for GitHubHost {
    fn list_tags(&self, repository: &RepositoryId) -> Result<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut page = 1;

        loop {
            let batch: Vec<TagResponse> = self.get_json(&self.tags_url(repository, page))?;
            let last = is_last_page(batch.len(), self.per_page);
            tags.extend(batch.into_iter().map(Tag::from));
            if last {
                break;
            }
            page += 1;
        }

        tracing::debug!(count = tags.len(), %repository, "listed tags");
        Ok(tags)
    }

    fn compare_page(
        &self,
        repository: &RepositoryId,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<ComparePage> {
        let response: CompareResponse =
            self.get_json(&self.compare_url(repository, base, head, page))?;
        Ok(response.into())
    }
}

use std::fmt;

/// Non-fatal issues met while scanning a release range.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Commit message is not a conventional commit and was skipped
    InvalidCommit { commit_id: String, reason: String },
    /// Conventional commit whose type bumps nothing
    UnlistedType { commit_id: String, r#type: String },
    /// The host stopped returning commits before its reported total
    IncompleteRange { fetched: usize, total: usize },
}

fn short(commit_id: &str) -> &str {
    match commit_id.char_indices().nth(7) {
        Some((idx, _)) => &commit_id[..idx],
        None => commit_id,
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::InvalidCommit { commit_id, reason } => {
                write!(
                    f,
                    "Skipping invalid commit {}: {}",
                    short(commit_id),
                    reason
                )
            }
            BoundaryWarning::UnlistedType { commit_id, r#type } => {
                write!(
                    f,
                    "Commit {} has type '{}' which does not bump the version",
                    short(commit_id),
                    r#type
                )
            }
            BoundaryWarning::IncompleteRange { fetched, total } => {
                write!(
                    f,
                    "Host reported {} commits but only {} were returned",
                    total, fetched
                )
            }
        }
    }
}

use std::collections::HashMap;

use crate::config::Config;
use crate::domain::{Commit, CommitParseError, ParsedCommit, VersionBump};
use crate::error::Result;

/// Per-run counters of commits classified into each severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpTally {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
}

impl BumpTally {
    /// Return a tally with one more commit counted at `bump`
    pub fn increment(self, bump: VersionBump) -> Self {
        match bump {
            VersionBump::Major => BumpTally {
                major: self.major + 1,
                ..self
            },
            VersionBump::Minor => BumpTally {
                minor: self.minor + 1,
                ..self
            },
            VersionBump::Patch => BumpTally {
                patch: self.patch + 1,
                ..self
            },
            VersionBump::None => self,
        }
    }

    /// Fold one classified commit into the tally.
    ///
    /// The type-based count and the breaking-change count are independent,
    /// so a `fix` with a `BREAKING CHANGE` note counts once as patch and once
    /// as major.
    pub fn record(self, classification: &Classification) -> Self {
        match classification {
            Classification::Invalid(_) => self,
            Classification::Conventional {
                type_bump,
                breaking,
                ..
            } => {
                let tally = match type_bump {
                    Some(bump) => self.increment(*bump),
                    None => self,
                };
                if *breaking {
                    tally.increment(VersionBump::Major)
                } else {
                    tally
                }
            }
        }
    }

    /// Resolve by strict priority major > minor > patch > none
    pub fn decision(&self) -> VersionBump {
        if self.major > 0 {
            VersionBump::Major
        } else if self.minor > 0 {
            VersionBump::Minor
        } else if self.patch > 0 {
            VersionBump::Patch
        } else {
            VersionBump::None
        }
    }
}

/// Outcome of classifying a single commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a conventional commit; excluded from the tally
    Invalid(CommitParseError),
    Conventional {
        r#type: String,
        /// `None` when the type is not listed under any severity
        type_bump: Option<VersionBump>,
        breaking: bool,
    },
}

impl Classification {
    /// Strongest severity this commit contributes on its own
    pub fn bump(&self) -> VersionBump {
        match self {
            Classification::Invalid(_) => VersionBump::None,
            Classification::Conventional { breaking: true, .. } => VersionBump::Major,
            Classification::Conventional { type_bump, .. } => {
                type_bump.unwrap_or(VersionBump::None)
            }
        }
    }
}

/// A commit paired with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAnalysis {
    pub commit: Commit,
    pub classification: Classification,
}

/// Result of analysing a commit range
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    pub commits: Vec<CommitAnalysis>,
    pub tally: BumpTally,
}

impl Analysis {
    pub fn decision(&self) -> VersionBump {
        self.tally.decision()
    }

    pub fn invalid_count(&self) -> usize {
        self.commits
            .iter()
            .filter(|c| matches!(c.classification, Classification::Invalid(_)))
            .count()
    }
}

/// Classifies conventional commits and folds them into a bump decision
#[derive(Debug, Clone)]
pub struct VersionAnalyzer {
    types: HashMap<String, VersionBump>,
    exclamation_mark: bool,
}

impl VersionAnalyzer {
    /// Build an analyzer from the `[bump]` and `[breaking]` configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(VersionAnalyzer {
            types: config.bump.type_map()?,
            exclamation_mark: config.breaking.exclamation_mark,
        })
    }

    /// Severity configured for a commit type, if any
    pub fn severity_of(&self, r#type: &str) -> Option<VersionBump> {
        self.types.get(&r#type.to_ascii_lowercase()).copied()
    }

    /// Classify one commit message
    pub fn classify(&self, message: &str) -> Classification {
        let parsed = match ParsedCommit::parse(message) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(error = %err, "skipping non-conventional commit");
                return Classification::Invalid(err);
            }
        };

        let type_bump = match self.severity_of(&parsed.r#type) {
            Some(bump) => Some(bump),
            None => {
                tracing::debug!(commit_type = %parsed.r#type, "commit type is not listed for any bump");
                None
            }
        };

        let breaking = parsed.has_breaking_change_note()
            || (self.exclamation_mark && parsed.breaking_marker);

        Classification::Conventional {
            r#type: parsed.r#type,
            type_bump,
            breaking,
        }
    }

    /// Fold commit messages into a tally
    pub fn tally<I, S>(&self, messages: I) -> BumpTally
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        messages
            .into_iter()
            .fold(BumpTally::default(), |tally, message| {
                tally.record(&self.classify(message.as_ref()))
            })
    }

    /// Decide the bump for a list of commit messages
    pub fn analyze_messages<S: AsRef<str>>(&self, messages: &[S]) -> VersionBump {
        self.tally(messages).decision()
    }

    /// Classify every commit and keep the per-commit results for reporting
    pub fn analyze(&self, commits: &[Commit]) -> Analysis {
        commits
            .iter()
            .fold(Analysis::default(), |mut analysis, commit| {
                let classification = self.classify(&commit.message);
                analysis.tally = analysis.tally.record(&classification);
                analysis.commits.push(CommitAnalysis {
                    commit: commit.clone(),
                    classification,
                });
                analysis
            })
    }
}

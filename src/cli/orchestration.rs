//! Main workflow orchestration logic
//!
//! Resolves the latest tag, fetches the commits since, classifies them and
//! computes the next version. Kept separate from `main.rs` so the workflow
//! can run programmatically against any [Host] without depending on clap.

use crate::analyzer::{Analysis, VersionAnalyzer};
use crate::config::Config;
use crate::domain::{Tag, TagFilter, TagVersion, VersionBump};
use crate::error::{NextVersionError, Result};
use crate::host::{fetch_all_commits, Host, RepositoryId};
use crate::output::{emit_version, OutputSink};
use crate::ui;

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Repository on the host
    pub repository: RepositoryId,

    /// Branch or ref compared against the latest tag
    pub head: String,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag the range starts from
    pub previous_tag: Tag,

    /// Per-commit classification and tally
    pub analysis: Analysis,

    /// The bump applied
    pub bump: VersionBump,

    /// The computed version, carrying the previous tag's prefix
    pub next: TagVersion,
}

/// Main release workflow
///
/// 1. Resolve the latest release tag
/// 2. Fetch every commit between the tag and `head`
/// 3. Classify the commits and decide the bump
/// 4. Apply the bump to the tag's version
///
/// Halts with [NextVersionError::NoTag], [NextVersionError::NoCommits] or
/// [NextVersionError::NoBump] when there is nothing to release.
pub fn run_release_workflow<H: Host + ?Sized>(
    host: &H,
    args: &ReleaseWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let analyzer = VersionAnalyzer::from_config(config)?;
    let filter = TagFilter::new(config.tags.prefix.clone());

    ui::display_status(&format!("Resolving latest tag of {}", args.repository));
    let previous_tag = host
        .latest_tag(&args.repository, &filter)?
        .ok_or_else(|| NextVersionError::NoTag {
            repository: args.repository.to_string(),
        })?;
    let previous_version = previous_tag.version()?;
    tracing::debug!(tag = %previous_tag.name, commit = %previous_tag.commit_id, "latest tag");

    let commits = fetch_all_commits(host, &args.repository, &previous_tag.commit_id, &args.head)
        .map_err(|e| match e {
            NextVersionError::NoCommits { .. } => NextVersionError::NoCommits {
                base: previous_tag.name.clone(),
                head: args.head.clone(),
            },
            other => other,
        })?;
    ui::display_commit_analysis(&commits, &previous_tag.name, &args.head);

    let analysis = analyzer.analyze(&commits);
    ui::display_classifications(&analysis.commits);

    let bump = analysis.decision();
    ui::display_tally(&analysis.tally, bump);

    let next = previous_version.bump(bump)?;
    ui::display_proposed_version(&previous_tag.name, &next);

    Ok(WorkflowResult {
        previous_tag,
        analysis,
        bump,
        next,
    })
}

/// Run the workflow and report its outcome to `sink`.
///
/// On success both version outputs are set; on failure only the failure
/// message is reported and no output is set.
pub fn run_and_report<H, S>(
    host: &H,
    args: &ReleaseWorkflowArgs,
    config: &Config,
    sink: &mut S,
) -> Result<WorkflowResult>
where
    H: Host + ?Sized,
    S: OutputSink + ?Sized,
{
    let outcome = run_release_workflow(host, args, config)
        .and_then(|result| emit_version(sink, &result.next).map(|()| result));

    match outcome {
        Ok(result) => {
            ui::display_success(&format!("Next version is {}", result.next));
            Ok(result)
        }
        Err(e) => {
            sink.fail(&e.to_string());
            Err(e)
        }
    }
}

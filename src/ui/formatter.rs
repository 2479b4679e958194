//! Pure formatting functions for UI output.
//!
//! Line builders (`*_line`) return the text so it can be tested; the
//! `display_*` functions print it.

use console::style;

use crate::analyzer::{BumpTally, Classification, CommitAnalysis};
use crate::boundary::BoundaryWarning;
use crate::domain::{Commit, TagVersion, VersionBump};

const MAX_SUMMARY_LEN: usize = 60;

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the commits found since the latest tag.
///
/// Shows up to 10 commit summaries; the remainder is counted.
pub fn display_commit_analysis(commits: &[Commit], base_tag: &str, head: &str) {
    println!(
        "\n{}",
        style(format!("Analyzing commits from '{}' to '{}'", base_tag, head)).bold()
    );
    println!("{}", style(format!("{} commits:", commits.len())).underlined());

    for (i, commit) in commits.iter().take(10).enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            style(commit.short_id()).dim(),
            truncate(commit.summary(), MAX_SUMMARY_LEN)
        );
    }

    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }
}

/// One line describing how a commit was classified
pub fn classification_line(entry: &CommitAnalysis) -> String {
    let id = entry.commit.short_id();
    match &entry.classification {
        Classification::Invalid(reason) => format!("{} invalid ({})", id, reason),
        Classification::Conventional {
            r#type,
            type_bump,
            breaking,
        } => {
            let by_type = match type_bump {
                Some(bump) => format!("{} → {}", r#type, bump),
                None => format!("{} → no bump", r#type),
            };
            if *breaking {
                format!("{} {}, breaking change → major", id, by_type)
            } else {
                format!("{} {}", id, by_type)
            }
        }
    }
}

/// Narrate the classification of each commit; skipped commits become warnings
pub fn display_classifications(entries: &[CommitAnalysis]) {
    println!("\n{}", style("Classification:").bold());
    for entry in entries {
        match &entry.classification {
            Classification::Invalid(reason) => {
                display_boundary_warning(&BoundaryWarning::InvalidCommit {
                    commit_id: entry.commit.id.clone(),
                    reason: reason.to_string(),
                });
            }
            Classification::Conventional {
                r#type,
                type_bump: None,
                breaking: false,
            } => {
                display_boundary_warning(&BoundaryWarning::UnlistedType {
                    commit_id: entry.commit.id.clone(),
                    r#type: r#type.clone(),
                });
            }
            Classification::Conventional { .. } => {
                println!("  {}", classification_line(entry));
            }
        }
    }
}

pub fn tally_line(tally: &BumpTally) -> String {
    format!(
        "major: {}, minor: {}, patch: {}",
        tally.major, tally.minor, tally.patch
    )
}

/// Display the bump counters and the resulting decision
pub fn display_tally(tally: &BumpTally, decision: VersionBump) {
    println!(
        "\n{} {} → {}",
        style("Tally:").bold(),
        tally_line(tally),
        style(decision).cyan().bold()
    );
}

/// Display the version change: "From: old_tag -> To: next"
pub fn display_proposed_version(old_tag: &str, next: &TagVersion) {
    println!("\n{}", style("Next version:").bold());
    println!("  From: {}", style(old_tag).red());
    println!("  To:   {}", style(next).green());
}

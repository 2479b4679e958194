// tests/integration_test.rs
use next_version::cli::{run_and_report, ReleaseWorkflowArgs};
use next_version::config::Config;
use next_version::domain::{Tag, VersionBump};
use next_version::host::{MockHost, RepositoryId};
use next_version::output::{MemorySink, NEXT, NEXT_STRICT};
use next_version::NextVersionError;

fn args() -> ReleaseWorkflowArgs {
    ReleaseWorkflowArgs {
        repository: RepositoryId::new("acme", "widgets"),
        head: "main".to_string(),
    }
}

fn host_at_v123(messages: &[&str]) -> MockHost {
    MockHost::new()
        .with_tag(Tag::new("v1.2.3", "base"))
        .with_messages(messages.iter().copied())
}

#[test]
fn test_fix_and_feat_give_minor() {
    let host = host_at_v123(&["fix: a", "feat: b"]);
    let mut sink = MemorySink::new();

    let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(result.analysis.tally.major, 0);
    assert_eq!(result.analysis.tally.minor, 1);
    assert_eq!(result.analysis.tally.patch, 1);
    assert_eq!(result.bump, VersionBump::Minor);
    assert_eq!(sink.get(NEXT), Some("v1.3.0"));
    assert_eq!(sink.get(NEXT_STRICT), Some("1.3.0"));
    assert_eq!(sink.failure, None);
}

#[test]
fn test_two_fixes_give_patch() {
    let host = host_at_v123(&["fix: a", "fix: b"]);
    let mut sink = MemorySink::new();

    let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(result.bump, VersionBump::Patch);
    assert_eq!(sink.get(NEXT), Some("v1.2.4"));
    assert_eq!(sink.get(NEXT_STRICT), Some("1.2.4"));
}

#[test]
fn test_unlisted_type_fails_without_outputs() {
    let host = host_at_v123(&["chore: x"]);
    let mut sink = MemorySink::new();

    let err = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap_err();

    assert!(matches!(err, NextVersionError::NoBump));
    assert_eq!(
        sink.failure.as_deref(),
        Some("No commit resulted in a version bump")
    );
    assert!(sink.outputs.is_empty());
}

#[test]
fn test_breaking_change_note_gives_major() {
    let host = host_at_v123(&["fix: a\n\nBREAKING CHANGE: drops support"]);
    let mut sink = MemorySink::new();

    let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(result.bump, VersionBump::Major);
    assert_eq!(result.analysis.tally.patch, 1);
    assert_eq!(result.analysis.tally.major, 1);
    assert_eq!(sink.get(NEXT), Some("v2.0.0"));
    assert_eq!(sink.get(NEXT_STRICT), Some("2.0.0"));
}

#[test]
fn test_breaking_syntax_variants_give_major() {
    for message in [
        "feat!: drop v1 api",
        "chore!: drop node 14",
        "fix: a\n\nBREAKING-CHANGE: drops support",
    ] {
        let host = host_at_v123(&[message]);
        let mut sink = MemorySink::new();

        let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

        assert_eq!(result.bump, VersionBump::Major, "message {:?}", message);
        assert_eq!(sink.get(NEXT), Some("v2.0.0"));
    }
}

#[test]
fn test_overflowing_tag_fails_without_outputs() {
    let host = MockHost::new()
        .with_tag(Tag::new("v18446744073709551615.0.0", "base"))
        .with_messages(["feat!: one more"]);
    let mut sink = MemorySink::new();

    let err = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap_err();

    assert!(matches!(err, NextVersionError::Version(_)));
    assert!(sink.failure.is_some());
    assert!(sink.outputs.is_empty());
}

#[test]
fn test_missing_tag_fails() {
    let host = MockHost::new().with_messages(["feat: a"]);
    let mut sink = MemorySink::new();

    let err = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap_err();

    assert!(matches!(err, NextVersionError::NoTag { .. }));
    assert!(sink.failure.unwrap().contains("acme/widgets"));
    assert!(sink.outputs.is_empty());
    assert!(host.requested_pages().is_empty());
}

#[test]
fn test_empty_range_fails() {
    let host = MockHost::new().with_tag(Tag::new("v1.2.3", "base"));
    let mut sink = MemorySink::new();

    let err = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap_err();

    match err {
        NextVersionError::NoCommits { base, head } => {
            assert_eq!(base, "v1.2.3");
            assert_eq!(head, "main");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(
        sink.failure.as_deref(),
        Some("No commits found between v1.2.3 and main")
    );
    assert!(sink.outputs.is_empty());
}

#[test]
fn test_host_error_is_reported() {
    let host = host_at_v123(&["feat: a"]).with_compare_error("HTTP 404 - Not Found");
    let mut sink = MemorySink::new();

    let err = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap_err();

    assert!(matches!(err, NextVersionError::Host(_)));
    assert!(sink.failure.unwrap().contains("Not Found"));
}

#[test]
fn test_latest_tag_is_highest_version() {
    let host = MockHost::new()
        .with_tag(Tag::new("v1.10.0", "newest"))
        .with_tag(Tag::new("v1.9.7", "older"))
        .with_tag(Tag::new("nightly", "junk"))
        .with_messages(["fix: a"]);
    let mut sink = MemorySink::new();

    let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(result.previous_tag.name, "v1.10.0");
    assert_eq!(sink.get(NEXT), Some("v1.10.1"));
}

#[test]
fn test_prefix_is_reattached() {
    let host = MockHost::new()
        .with_tag(Tag::new("release-0.9.0", "base"))
        .with_messages(["feat(parser): support footers"]);
    let mut sink = MemorySink::new();

    run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(sink.get(NEXT), Some("release-0.10.0"));
    assert_eq!(sink.get(NEXT_STRICT), Some("0.10.0"));
}

#[test]
fn test_paginated_range_is_fully_analysed() {
    let mut messages: Vec<String> = (0..150).map(|i| format!("fix: bug {}", i)).collect();
    messages.push("feat: last page feature".to_string());
    let host = MockHost::new()
        .with_tag(Tag::new("v3.1.4", "base"))
        .with_messages(messages)
        .with_per_page(100);
    let mut sink = MemorySink::new();

    let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(result.analysis.commits.len(), 151);
    assert_eq!(host.requested_pages(), vec![1, 2]);
    assert_eq!(sink.get(NEXT), Some("v3.2.0"));
}

#[test]
fn test_invalid_commits_are_skipped() {
    let host = host_at_v123(&["Merge pull request #1", "WIP", "fix: real fix"]);
    let mut sink = MemorySink::new();

    let result = run_and_report(&host, &args(), &Config::default(), &mut sink).unwrap();

    assert_eq!(result.analysis.invalid_count(), 2);
    assert_eq!(sink.get(NEXT), Some("v1.2.4"));
}

#[test]
fn test_invalid_configuration_fails_before_host_calls() {
    let mut config = Config::default();
    config.bump.major = vec!["fix".to_string()];
    let host = host_at_v123(&["fix: a"]);
    let mut sink = MemorySink::new();

    let err = run_and_report(&host, &args(), &config, &mut sink).unwrap_err();

    assert!(matches!(err, NextVersionError::Config(_)));
    assert!(host.requested_pages().is_empty());
}

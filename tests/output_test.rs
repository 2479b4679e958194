use serial_test::serial;
use tempfile::NamedTempFile;

use next_version::domain::TagVersion;
use next_version::output::{emit_version, GithubActionsSink};

struct EnvGuard(&'static [&'static str]);

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in self.0 {
            std::env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_sink_from_env_writes_github_output() {
    let _guard = EnvGuard(&["GITHUB_OUTPUT", "GITHUB_ACTIONS"]);
    let file = NamedTempFile::new().unwrap();
    std::env::set_var("GITHUB_OUTPUT", file.path());
    std::env::set_var("GITHUB_ACTIONS", "true");

    let mut sink = GithubActionsSink::from_env();
    assert_eq!(
        sink,
        GithubActionsSink::new(Some(file.path().to_path_buf()), true)
    );

    emit_version(&mut sink, &TagVersion::new("v", 1, 4, 0)).unwrap();
    let contents = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(contents, "next=v1.4.0\nnextStrict=1.4.0\n");
}

#[test]
#[serial]
fn test_sink_from_env_without_actions() {
    let _guard = EnvGuard(&["GITHUB_OUTPUT", "GITHUB_ACTIONS"]);
    std::env::remove_var("GITHUB_OUTPUT");
    std::env::remove_var("GITHUB_ACTIONS");

    assert_eq!(GithubActionsSink::from_env(), GithubActionsSink::new(None, false));
}

#[test]
#[serial]
fn test_sink_from_env_ignores_empty_output_path() {
    let _guard = EnvGuard(&["GITHUB_OUTPUT", "GITHUB_ACTIONS"]);
    std::env::set_var("GITHUB_OUTPUT", "");
    std::env::remove_var("GITHUB_ACTIONS");

    assert_eq!(GithubActionsSink::from_env(), GithubActionsSink::new(None, false));
}

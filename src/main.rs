use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use next_version::cli::{run_and_report, ReleaseWorkflowArgs};
use next_version::config::{self, Config};
use next_version::host::{GitHubHost, Host, LocalHost, RepositoryId};
use next_version::output::{GithubActionsSink, OutputSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// GitHub REST API
    Github,
    /// Local clone read with libgit2
    Local,
}

#[derive(clap::Parser)]
#[command(
    name = "next-version",
    version,
    about = "Compute the next semantic version from conventional commits since the latest tag"
)]
struct Args {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Access token for the host API")]
    token: Option<String>,

    #[arg(
        short,
        long,
        env = "INPUT_BRANCH",
        default_value = "main",
        help = "Branch or ref to compare against the latest tag"
    )]
    branch: String,

    #[arg(short, long, env = "GITHUB_REPOSITORY", help = "Repository as owner/name")]
    repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", help = "Host API base URL")]
    api_url: Option<String>,

    #[arg(long, value_enum, default_value_t = Source::Github, help = "Where tags and commits are read from")]
    source: Source,

    #[arg(long, default_value = ".", help = "Path of the local clone for --source local")]
    path: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn repository_id(args: &Args) -> next_version::Result<RepositoryId> {
    match (&args.repository, args.source) {
        (Some(repository), _) => repository.parse(),
        (None, Source::Local) => Ok(RepositoryId::new("local", "repository")),
        (None, Source::Github) => Err(next_version::NextVersionError::config(
            "--repository (or GITHUB_REPOSITORY) is required for the GitHub source",
        )),
    }
}

fn build_host(args: &Args, config: &Config) -> next_version::Result<Box<dyn Host>> {
    let host: Box<dyn Host> = match args.source {
        Source::Github => Box::new(GitHubHost::new(
            &config.host.api_url,
            args.token.as_deref(),
            config.host.per_page,
        )?),
        Source::Local => Box::new(LocalHost::open(&args.path, config.host.per_page)?),
    };
    Ok(host)
}

fn setup(args: &Args) -> next_version::Result<(Box<dyn Host>, ReleaseWorkflowArgs, Config)> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(api_url) = &args.api_url {
        config.host.api_url = api_url.clone();
    }

    let workflow_args = ReleaseWorkflowArgs {
        repository: repository_id(args)?,
        head: args.branch.clone(),
    };
    let host = build_host(args, &config)?;

    Ok((host, workflow_args, config))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut sink = GithubActionsSink::from_env();

    let (host, workflow_args, config) = match setup(&args) {
        Ok(setup) => setup,
        Err(e) => {
            sink.fail(&e.to_string());
            std::process::exit(1);
        }
    };

    if run_and_report(host.as_ref(), &workflow_args, &config, &mut sink).is_err() {
        std::process::exit(1);
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use zcl::config::{DEFAULT_ORG, DEFAULT_REPO, DEFAULT_WORKERS};
use zcl::services::{get_github_token, progress_bar, ProgressSink};
use zcl::{
    commit_messages, AddLabelsConfig, ChangelogFormat, GenerateConfig, GitHubTracker, RepoTarget,
    Runner,
};

/// Changelog helper: label the issues referenced in a commit range and
/// render a changelog from a label
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RepoArgs {
    /// GitHub API token (falls back to `gh auth token`)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub organization
    #[arg(long, env = "ZCL_ORG", default_value = DEFAULT_ORG)]
    org: String,

    /// GitHub repository
    #[arg(long, env = "ZCL_REPO", default_value = DEFAULT_REPO)]
    repo: String,
}

impl RepoArgs {
    fn target(&self) -> RepoTarget {
        RepoTarget::new(&self.org, &self.repo)
    }

    fn tracker(&self) -> Result<GitHubTracker> {
        let token = match &self.token {
            Some(token) => token.clone(),
            None => get_github_token()?,
        };
        GitHubTracker::new(token).context("Failed to create GitHub client")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add GitHub labels to issues and PRs
    #[command(visible_alias = "a")]
    AddLabels {
        /// Git working directory
        #[arg(long = "gitDir", env = "ZCL_GIT_DIR", default_value = ".")]
        git_dir: PathBuf,

        /// GitHub label to attach to issues and PRs
        #[arg(long, env = "ZCL_LABEL")]
        label: String,

        /// Git revision to start processing
        #[arg(long, env = "ZCL_FROM_REV")]
        from: String,

        /// Git revision to stop commit processing
        #[arg(long, env = "ZCL_TARGET_REV")]
        target: String,

        #[command(flatten)]
        repo: RepoArgs,

        /// Number of concurrent workers for labeling
        #[arg(
            long,
            env = "ZCL_WORKERS",
            default_value_t = DEFAULT_WORKERS,
            allow_negative_numbers = true
        )]
        workers: i64,

        /// Print issues that would be labeled without making any changes
        #[arg(long, env = "ZCL_DRY_RUN")]
        dry_run: bool,
    },

    /// Generate change log
    #[command(visible_alias = "g")]
    Generate {
        /// GitHub label name to generate changelog from
        #[arg(long, env = "ZCL_LABEL")]
        label: String,

        #[command(flatten)]
        repo: RepoArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = ChangelogFormat::Markdown)]
        format: ChangelogFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::AddLabels {
            git_dir,
            label,
            from,
            target,
            repo,
            workers,
            dry_run,
        } => {
            let config = AddLabelsConfig::new(
                git_dir,
                label,
                from,
                target,
                repo.target(),
                workers,
                dry_run,
            )?;
            let runner = Runner::new(Arc::new(repo.tracker()?));

            tracing::info!(
                dir = %config.git_dir.display(),
                "Fetching git history for {}..{}",
                config.from,
                config.target
            );
            let messages = commit_messages(&config.git_dir, &config.from, &config.target)
                .context("Failed to read git history")?;

            let mut stdout = io::stdout();
            runner
                .add_labels(&config, &messages, &mut stdout, |total| {
                    Arc::new(progress_bar(total)) as Arc<dyn ProgressSink>
                })
                .await?;
        }
        Commands::Generate {
            label,
            repo,
            format,
        } => {
            let config = GenerateConfig {
                label,
                repo: repo.target(),
                format,
            };
            let runner = Runner::new(Arc::new(repo.tracker()?));

            let text = runner.generate(&config).await?;
            println!("{}", text);
        }
    }

    Ok(())
}

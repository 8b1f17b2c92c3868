use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod aggregator;
mod config;
mod github;
mod report;
mod source;

use config::Config;
use github::{GitHubClient, PullRequestStatus};
use report::RenderConfig;
use source::DataSource;

#[derive(Parser)]
#[command(name = "pr-reports")]
#[command(about = "Generate static HTML reports about a repository's pull requests")]
struct Cli {
    /// GitHub token (can also be set via GITHUB_TOKEN env var)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository owner (user or organization)
    #[arg(short, long, env = "GITHUB_OWNER")]
    owner: Option<String>,

    /// Repository name
    #[arg(short, long, env = "GITHUB_REPO")]
    repo: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the report templates
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Directory the reports are written to (must exist)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every report (the default)
    Generate {
        /// Read pull requests from a JSON snapshot instead of GitHub
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Save all pull requests to a JSON snapshot
    Fetch {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let render_config = render_config(&cli, &config);

    match &cli.command {
        Some(Commands::Generate { input: Some(input) }) => {
            let records = source::load_records(input)?;
            report::generate_all(&records, &render_config).await?;
        }
        Some(Commands::Generate { input: None }) | None => {
            let client = github_client(&cli, &config)?;
            report::generate_all(&client, &render_config).await?;
        }
        Some(Commands::Fetch { output }) => {
            let client = github_client(&cli, &config)?;
            let records = client.pull_requests().await?;
            source::save_records(output, &records)?;

            let count = |status: PullRequestStatus| records.iter().filter(|pr| pr.status() == status).count();
            println!(
                "Saved {} pull requests ({} open, {} closed, {} merged) to {}",
                records.len(),
                count(PullRequestStatus::Open),
                count(PullRequestStatus::Closed),
                count(PullRequestStatus::Merged),
                output.display()
            );
        }
    }

    Ok(())
}

/// Flags win over the config file, which wins over the built-in defaults.
fn render_config(cli: &Cli, config: &Config) -> RenderConfig {
    RenderConfig {
        template_dir: cli.template_dir.clone().unwrap_or_else(|| config.paths.templates.clone()),
        output_dir: cli.output_dir.clone().unwrap_or_else(|| config.paths.output.clone()),
    }
}

fn repo_target(cli: &Cli, config: &Config) -> Result<(String, String)> {
    let owner = cli
        .owner
        .clone()
        .or_else(|| config.github.owner.clone())
        .context("repository owner not set (use --owner, GITHUB_OWNER or [github] owner)")?;
    let repo = cli
        .repo
        .clone()
        .or_else(|| config.github.repo.clone())
        .context("repository name not set (use --repo, GITHUB_REPO or [github] repo)")?;
    Ok((owner, repo))
}

fn github_client(cli: &Cli, config: &Config) -> Result<GitHubClient> {
    let (owner, repo) = repo_target(cli, config)?;
    let api_url = cli.api_url.clone().or_else(|| config.github.api_url.clone());

    Ok(GitHubClient::new(cli.token.clone(), api_url, owner, repo)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_from(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn path_flags_override_config() {
        let cli = Cli::try_parse_from([
            "pr-reports",
            "--template-dir",
            "custom/templates",
            "--output-dir",
            "public",
        ])
        .unwrap();
        let config = config_from("[paths]\ntemplates = \"cfg/templates\"\noutput = \"site\"\n");

        let render = render_config(&cli, &config);

        assert_eq!(render.template_dir, PathBuf::from("custom/templates"));
        assert_eq!(render.output_dir, PathBuf::from("public"));
    }

    #[test]
    fn config_paths_override_defaults() {
        let cli = Cli::try_parse_from(["pr-reports", "generate"]).unwrap();

        let render = render_config(&cli, &config_from("[paths]\noutput = \"site\"\n"));

        assert_eq!(render.template_dir, PathBuf::from("templates"));
        assert_eq!(render.output_dir, PathBuf::from("site"));
    }

    #[test]
    fn repo_flags_override_config() {
        let cli = Cli::try_parse_from(["pr-reports", "--owner", "acme", "--repo", "widgets"]).unwrap();
        let config = config_from("[github]\nowner = \"other\"\nrepo = \"gadgets\"\n");

        let (owner, repo) = repo_target(&cli, &config).unwrap();

        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn repo_from_config_when_no_flags() {
        let cli = Cli::try_parse_from(["pr-reports", "--owner", "acme"]).unwrap();
        let config = config_from("[github]\nrepo = \"gadgets\"\n");

        let (owner, repo) = repo_target(&cli, &config).unwrap();

        assert_eq!(owner, "acme");
        assert_eq!(repo, "gadgets");
    }

    #[test]
    fn missing_owner_is_a_configuration_error() {
        let cli = Cli::try_parse_from(["pr-reports", "--repo", "widgets"]).unwrap();

        let err = repo_target(&cli, &Config::default()).unwrap_err();

        assert!(err.to_string().contains("--owner"));
    }

    #[test]
    fn missing_repo_is_a_configuration_error() {
        let cli = Cli::try_parse_from(["pr-reports", "--owner", "acme"]).unwrap();

        let err = repo_target(&cli, &Config::default()).unwrap_err();

        assert!(err.to_string().contains("--repo"));
    }
}

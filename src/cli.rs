//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pullrequest::DEFAULT_LIMIT;
use crate::transifex::DEFAULT_BASE_URL;

/// Transync - translation resource synchronizer
///
/// Upload localizable resources from source repositories to a translation
/// platform and download reviewed translations back.
#[derive(Parser, Debug)]
#[command(
    name = "transync",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Synchronize localizable resources with a translation platform",
    long_about = "Transync uploads resource files declared in source repositories to Transifex \
                  and downloads translations once their review is complete. Each run writes \
                  staged copies and downloads to a log directory and one stats record per \
                  operation to stdout.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  transync upload -c translation.yaml --log-dir logs\n    \
                  transync download -c translation.yaml --log-dir logs\n    \
                  transync stats -c translation.yaml\n    \
                  transync pull-requests --platform github --owner acme --name demo"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload resources to the translation platform
    Upload(UploadArgs),

    /// Download reviewed translations
    Download(DownloadArgs),

    /// Show translation project status
    Stats(StatsArgs),

    /// List pull requests opened by an author
    PullRequests(PullRequestArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Translation configuration and log directory of a run
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Translation configuration file (YAML)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: PathBuf,

    /// Directory for staged resources, downloads and markers
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub log_dir: PathBuf,
}

/// Transifex account settings
#[derive(Args, Debug, Clone, Default)]
pub struct TransifexArgs {
    /// Transifex user name
    #[arg(long = "tx-username", env = "TRANSIFEX_USERNAME")]
    pub username: Option<String>,

    /// Transifex password or API token
    #[arg(long = "tx-password", env = "TRANSIFEX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Prefix of every project slug
    #[arg(long, env = "TRANSIFEX_PROJECT_SLUG_PREFIX", default_value = "")]
    pub project_slug_prefix: String,

    /// Prefix of every resource slug
    #[arg(long, env = "TRANSIFEX_RESOURCE_SLUG_PREFIX", default_value = "")]
    pub resource_slug_prefix: String,

    /// Transifex API root
    #[arg(long, env = "TRANSIFEX_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,
}

/// Source platform credentials
#[derive(Args, Debug, Clone, Default)]
pub struct SourceCredentialArgs {
    #[arg(long, env = "GITHUB_USERNAME")]
    pub github_username: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "BITBUCKET_USERNAME")]
    pub bitbucket_username: Option<String>,

    #[arg(long, env = "BITBUCKET_PASSWORD", hide_env_values = true)]
    pub bitbucket_password: Option<String>,
}

/// Arguments for the upload command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Upload every configured resource:\n    transync upload -c translation.yaml --log-dir logs\n\n\
                  Keep the checkouts for inspection:\n    transync upload -c translation.yaml --work-dir checkouts")]
pub struct UploadArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Where source repositories are checked out (temporary if omitted)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    #[command(flatten)]
    pub transifex: TransifexArgs,

    #[command(flatten)]
    pub source: SourceCredentialArgs,
}

/// Arguments for the download command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Download reviewed translations:\n    transync download -c translation.yaml --log-dir logs")]
pub struct DownloadArgs {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub transifex: TransifexArgs,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub transifex: TransifexArgs,
}

/// Arguments for the pull-requests command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Pull requests by the GitHub user:\n    transync pull-requests --platform github --owner acme --name demo\n\n\
                  Last 10 Bitbucket pull requests by another author:\n    \
                  transync pull-requests --platform bitbucket --owner acme --name demo --author l10n-bot --limit 10")]
pub struct PullRequestArgs {
    /// Source platform (github, bitbucket)
    #[arg(long)]
    pub platform: String,

    /// Repository owner
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub name: String,

    /// Pull request author (defaults to the authenticated user)
    #[arg(long)]
    pub author: Option<String>,

    /// Maximum number of pull requests to list
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    #[command(flatten)]
    pub source: SourceCredentialArgs,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    transync completions --shell bash > ~/.bash_completion.d/transync\n\n\
                  Generate zsh completions:\n    transync completions --shell zsh > ~/.zfunc/_transync")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_upload() {
        let cli = Cli::try_parse_from([
            "transync",
            "upload",
            "-c",
            "translation.yaml",
            "--log-dir",
            "logs",
            "--tx-username",
            "alice",
        ])
        .unwrap();
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.run.config, PathBuf::from("translation.yaml"));
                assert_eq!(args.run.log_dir, PathBuf::from("logs"));
                assert!(args.work_dir.is_none());
                assert_eq!(args.transifex.username.as_deref(), Some("alice"));
            }
            _ => panic!("Expected Upload command"),
        }
    }

    #[test]
    fn test_cli_parsing_download_defaults() {
        let cli = Cli::try_parse_from(["transync", "download", "-c", "t.yaml"]).unwrap();
        match cli.command {
            Commands::Download(args) => {
                assert_eq!(args.run.log_dir, PathBuf::from("."));
            }
            _ => panic!("Expected Download command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_required() {
        assert!(Cli::try_parse_from(["transync", "upload"]).is_err());
        assert!(Cli::try_parse_from(["transync", "stats"]).is_err());
    }

    #[test]
    fn test_cli_parsing_pull_requests() {
        let cli = Cli::try_parse_from([
            "transync",
            "pull-requests",
            "--platform",
            "github",
            "--owner",
            "acme",
            "--name",
            "demo",
            "--limit",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::PullRequests(args) => {
                assert_eq!(args.platform, "github");
                assert_eq!(args.limit, 5);
                assert!(args.author.is_none());
            }
            _ => panic!("Expected PullRequests command"),
        }
    }

    #[test]
    fn test_cli_parsing_verbose_global() {
        let cli = Cli::try_parse_from(["transync", "version", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["transync", "completions", "--shell", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "bash"),
            _ => panic!("Expected Completions command"),
        }
    }
}

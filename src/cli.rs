use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use log::{error, info, warn};
use std::path::PathBuf;

use crate::auth::Token;
use crate::error::CadenceError;
use crate::providers::collect_repo_stats;
use crate::providers::github::{GitHubProvider, DEFAULT_API_URL};
use crate::report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// JSON report
    Json,
}

#[derive(Parser)]
#[command(name = "release-cadence")]
#[command(author, version, about = "Days between x.y.0 releases of GitHub repositories", long_about = None)]
pub struct Cli {
    /// Repos to query, as NAME or OWNER/NAME. If OWNER is omitted, falls back to --owner
    #[arg(short, long, value_delimiter = ',')]
    repos: Vec<String>,

    /// Default owner to use for repos not in the OWNER/NAME format
    #[arg(long)]
    owner: Option<String>,

    /// GitHub API token
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API base URL (e.g. "https://github.example.com/api/" for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, default_value_t = false)]
    pretty: bool,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let report = self.run().await?;

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, report)?;
            info!("Report written to: {}", output_path.display());
        } else {
            print!("{report}");
        }

        Ok(())
    }

    /// Collects stats for every requested repository and renders the report.
    async fn run(&self) -> Result<String> {
        let repos = self.requested_repos();
        if repos.is_empty() {
            error!("At least 1 repo must be specified");
            eprintln!("{}", Self::command().render_usage());
            return Err(CadenceError::Config("no repositories specified".to_string()).into());
        }

        let token = Token::from_optional(self.token.as_deref());
        if token.is_none() {
            warn!("No GitHub token configured; the GraphQL API requires authentication");
        }

        let provider = GitHubProvider::new(&self.api_url, token)?;
        let stats = collect_repo_stats(&provider, &repos, self.owner.as_deref()).await;

        info!(
            "Collected stats for {} of {} repositories",
            stats.len(),
            repos.len()
        );

        let report = match self.format {
            OutputFormat::Table => report::render_table(&stats),
            OutputFormat::Json => {
                let mut json = report::render_json(&stats, repos.len(), self.pretty)?;
                json.push('\n');
                json
            }
        };

        Ok(report)
    }

    fn requested_repos(&self) -> Vec<String> {
        self.repos
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod requests;
pub mod weekly;

/// Request-source breakdown and Confluence weekly reporting
#[derive(Parser)]
#[command(name = "reqlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Break collected requests down by source
    Requests(requests::RequestsArgs),

    /// Report wiki pages modified last week and their comments
    Weekly(weekly::WeeklyArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Requests(args) => requests::execute(args).await,
            Commands::Weekly(args) => weekly::execute(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_weekly_flags() {
        let cli = Cli::try_parse_from([
            "reqlens",
            "weekly",
            "--email",
            "pm@example.com",
            "--api-token",
            "secret",
            "--domain",
            "wiki.example.net",
            "--top",
            "5",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Weekly(args) => {
                assert_eq!(args.domain, "wiki.example.net");
                assert_eq!(args.top, 5);
                assert_eq!(args.limit, 20);
                assert_eq!(args.comment_pages, 5);
                assert!(args.json);
            }
            Commands::Requests(_) => panic!("expected weekly"),
        }
    }

    #[test]
    fn test_requests_url_override() {
        let cli =
            Cli::try_parse_from(["reqlens", "-v", "requests", "--url", "http://127.0.0.1:9/api"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Requests(args) => assert_eq!(args.url, "http://127.0.0.1:9/api"),
            Commands::Weekly(_) => panic!("expected requests"),
        }
    }
}

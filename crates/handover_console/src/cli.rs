use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(author, version, about = "Console for the handover job service", long_about = None)]
pub struct Cli {
    /// RON configuration file (default ./handover_console.ron)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the handover service
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Directory for CSV exports
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,
    /// Where log records go
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogDestination>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.url.clone(),
            export_dir: self.export_dir.clone(),
            log_destination: self.log,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the latest report of every handover
    List {
        /// Release to list (default: ENS_VERSION or config)
        #[arg(short, long)]
        release: Option<String>,
        /// Print the raw records as JSON
        #[arg(long, conflicts_with = "markup")]
        json: bool,
        /// Print HTML table rows
        #[arg(long)]
        markup: bool,
    },
    /// Show one handover in detail
    Show {
        token: String,
        /// Print the HTML detail panel
        #[arg(long)]
        markup: bool,
    },
    /// Poll a handover until it succeeds or fails
    Watch {
        token: String,
        /// Seconds between polls
        #[arg(long)]
        interval: Option<u64>,
        /// Give up after this many polls
        #[arg(long)]
        max_polls: Option<u32>,
    },
    /// Save the listed handovers as CSV
    Export {
        #[arg(short, long)]
        release: Option<String>,
        /// File name stem (default: release or "export")
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Search source database servers
    Hosts {
        name: String,
        #[arg(long)]
        markup: bool,
    },
    /// Search databases on a source server
    Databases {
        host: String,
        port: String,
        #[arg(default_value = "")]
        search: String,
    },
    /// Start a handover
    Submit {
        /// Server URI, e.g. mysql://user@host:port/
        #[arg(long)]
        host_uri: String,
        #[arg(long)]
        database: String,
        #[arg(long)]
        contact: String,
        #[arg(long)]
        comment: String,
    },
    /// Print the effective configuration as RON
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "handover_console",
            "list",
            "--release",
            "112",
            "--url",
            "http://h/",
        ])
        .expect("parse");
        assert_eq!(cli.url.as_deref(), Some("http://h/"));
        assert!(matches!(
            cli.command,
            Command::List { release: Some(ref r), json: false, markup: false } if r == "112"
        ));
    }

    #[test]
    fn json_and_markup_conflict() {
        let parsed =
            Cli::try_parse_from(["handover_console", "list", "--json", "--markup"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn databases_search_defaults_to_empty() {
        let cli = Cli::try_parse_from(["handover_console", "databases", "mysql-ens-sta-1", "4519"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Command::Databases { ref search, .. } if search.is_empty()
        ));
    }

    #[test]
    fn verifies_clap_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "travel-tui")]
#[command(about = "Terminal dashboard for corporate travel expenses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real travel-api server
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
    /// Download an analytics report without starting the UI
    Report {
        /// Report format: text or json
        format: String,
        /// Dataset: all, total_expenses, expenses_by_employee, ...
        dataset: String,
        /// Where to write the file (defaults to the download directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

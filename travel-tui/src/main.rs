mod api;
mod app;
mod cache;
mod cli;
mod config;
mod logging;
mod runtime;
mod types;
mod ui;

use anyhow::{Context, Result};
use api::ApiClient;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TravelConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use types::{ReportDataset, ReportFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = TravelConfig::config_path()?;
            if !path.exists() {
                TravelConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Report {
            format,
            dataset,
            output,
        } => {
            let config = TravelConfig::load()?;
            logging::init()?;
            download_report(&config, &format, &dataset, output).await
        }
        Commands::Run => {
            let config = TravelConfig::load()?;
            logging::init()?;
            let client = ApiClient::new(&config.api_url)?;
            tracing::info!(api_url = %config.api_url, "starting");
            run_tui(&config, &client).await
        }
        Commands::Dev => {
            let config = TravelConfig::load()?;
            logging::init()?;
            tracing::info!("starting in dev mode");
            let client = ApiClient::dev()?;
            run_tui(&config, &client).await
        }
    }
}

async fn download_report(
    config: &TravelConfig,
    format: &str,
    dataset: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let format = ReportFormat::parse(format)
        .with_context(|| format!("Unknown report format '{}', expected text or json", format))?;
    let dataset = ReportDataset::parse(dataset).with_context(|| {
        let known: Vec<&str> = ReportDataset::ALL.iter().map(|d| d.as_str()).collect();
        format!("Unknown dataset '{}', expected one of: {}", dataset, known.join(", "))
    })?;

    let client = ApiClient::new(&config.api_url)?;
    let report = client
        .download_report(format, dataset)
        .await
        .context("Failed to download report")?;

    let path = match output {
        Some(path) => {
            tokio::fs::write(&path, &report.content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
        None => api::save_report(&report, &config.download_dir)
            .await
            .context("Failed to save report")?,
    };
    println!("{}", path.display());
    Ok(())
}

async fn run_tui(config: &TravelConfig, client: &ApiClient) -> Result<()> {
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "event loop failed");
    }
    res
}

//! Adflow command line: deploys a plan file and prints the result log.
//!
//! Without a live platform transport the binary runs against the in-memory
//! client, which makes it a dry run that exercises every stage and prints
//! the log a real deployment would produce.

use std::path::PathBuf;
use std::sync::Arc;

use adflow::client::{InMemoryAdsClient, InMemoryConnector};
use adflow::config::{ClientSettings, DeployConfig};
use adflow::events::LoggingEventSink;
use adflow::input::DeploymentPlan;
use adflow::pipeline::DeploymentEngine;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adflow")]
#[command(about = "Deploy a search campaign hierarchy from tabular input")]
#[command(version)]
struct Cli {
    /// JSON plan with structure, keywords, ads and sitelink tables
    #[arg(short, long)]
    plan: PathBuf,

    /// JSON engine configuration (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target advertiser account, dashes allowed
    #[arg(long, env = "ADFLOW_CUSTOMER_ID")]
    customer_id: String,

    /// Platform developer token
    #[arg(long, env = "ADFLOW_DEVELOPER_TOKEN", hide_env_values = true)]
    developer_token: String,

    /// Manager account the calls are made through
    #[arg(long, env = "ADFLOW_LOGIN_CUSTOMER_ID")]
    login_customer_id: Option<String>,

    /// Write the full deployment report as JSON to this path
    #[arg(short, long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("adflow=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DeployConfig::from_file(path)?,
        None => DeployConfig::default(),
    };
    config.validate()?;

    let plan = DeploymentPlan::from_json_file(&cli.plan)
        .with_context(|| format!("failed to load plan {}", cli.plan.display()))?;
    let input = plan.into_input();
    info!(rows = input.row_count(), "Plan loaded");

    let mut settings = ClientSettings::new(cli.developer_token, cli.customer_id);
    if let Some(login) = cli.login_customer_id {
        settings = settings.with_login_customer_id(login);
    }

    let connector = InMemoryConnector::new(Arc::new(InMemoryAdsClient::new()));
    let engine =
        DeploymentEngine::new(config).with_event_sink(Arc::new(LoggingEventSink::default()));

    let report = match engine.deploy(&connector, &settings, &input).await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}", err.log_line());
            std::process::exit(1);
        }
    };

    for line in report.log.lines() {
        println!("{line}");
    }

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

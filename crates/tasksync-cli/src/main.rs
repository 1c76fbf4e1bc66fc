use anyhow::Result;
use clap::Parser;
use tasksync_cli::config::SyncConfig;
use tasksync_cli::controller;
use tasksync_tracker::{IssueTracker, JiraTracker, MockTracker};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = SyncConfig::parse();
    config.validate()?;

    // Dry-run never touches the network; the mock stands in so the rest
    // of the pipeline runs unchanged.
    let tracker: Box<dyn IssueTracker> = if config.dry_run {
        Box::new(MockTracker::new())
    } else {
        let base_url = config.base_url.as_deref().unwrap_or_default();
        Box::new(JiraTracker::new(
            base_url,
            config.email.clone().unwrap_or_default(),
            config.api_token.clone().unwrap_or_default(),
        ))
    };

    info!("tasksync starting (tracker: {})", tracker.name());
    controller::run(&config, tracker.as_ref()).await?;

    if config.dry_run {
        info!("dry run completed; no changes were made");
    }
    Ok(())
}

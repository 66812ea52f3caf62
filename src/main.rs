use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hockey_report_bot::config::Config;
use hockey_report_bot::console;
use hockey_report_bot::discord::Discord;
use hockey_report_bot::http::UreqTransport;
use hockey_report_bot::platform::{ChatPlatform, DestinationRegistry};
use hockey_report_bot::reports::{ReportSource, Reports};
use hockey_report_bot::scheduler::Scheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    let config = Config::from_env().context("loading configuration")?;

    let platform: Arc<dyn ChatPlatform> = Arc::new(Discord::new(config.discord_token.clone()));
    let destinations = {
        let platform = Arc::clone(&platform);
        let guild_id = config.guild_id.clone();
        tokio::task::spawn_blocking(move || DestinationRegistry::discover(platform.as_ref(), &guild_id))
            .await
            .context("channel discovery task")?
            .context("listing guild channels")?
    };

    let source: Arc<dyn ReportSource> = Arc::new(Reports::new(Arc::new(UreqTransport)));
    let scheduler = Scheduler::new(config.schedules(), destinations, Arc::clone(&source), platform);

    info!(poll_secs = config.poll_interval.as_secs(), "Bot started");

    // The scheduler never returns; the console ends when stdin closes.
    tokio::join!(scheduler.run(config.poll_interval), console::run(source));
    Ok(())
}

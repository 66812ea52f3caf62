use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::clock;
use crate::commands;
use crate::reports::ReportSource;

/// Local inbound channel: one command per stdin line, replies on stdout.
/// Returns when stdin closes.
pub async fn run(source: Arc<dyn ReportSource>) {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    info!("Console commands enabled (prefix '{}')", commands::PREFIX);

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let source = Arc::clone(&source);
        let reply = tokio::task::spawn_blocking(move || {
            commands::dispatch(source.as_ref(), &line, None, clock::today())
        })
        .await;
        match reply {
            Ok(Some(text)) => println!("\n{}\n", text),
            Ok(None) => {}
            Err(e) => error!(error = %e, "Command task failed"),
        }
    }
    info!("Console input closed");
}

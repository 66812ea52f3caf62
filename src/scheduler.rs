//! Once-a-day posting of scheduled reports.
//!
//! Each scheduled report is `Pending` until it has been delivered on the current
//! local date, then `Sent` until the date rolls over. Delivery happens when a
//! poll tick lands inside the report's trigger window.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::clock;
use crate::config::ScheduleConfig;
use crate::error::{DeliveryError, FetchError, TransportError};
use crate::model::ReportKind;
use crate::platform::{ChatPlatform, DestinationRegistry};
use crate::reports::{ReportRequest, ReportSource};
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Pending,
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Sent { kind: ReportKind, attempts: u32 },
    Failed { kind: ReportKind, error: String },
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("report task failed: {0}")]
    Task(String),
}

#[derive(Debug)]
struct ScheduledReport {
    config: ScheduleConfig,
    last_sent: Option<NaiveDate>,
}

/// `now` is inside `[at, at + window)`. Windows do not wrap past midnight.
pub fn in_trigger_window(at: NaiveTime, window: Duration, now: NaiveTime) -> bool {
    let window = chrono::Duration::from_std(window).unwrap_or_else(|_| chrono::Duration::zero());
    let elapsed = now.signed_duration_since(at);
    elapsed >= chrono::Duration::zero() && elapsed < window
}

pub struct Scheduler {
    reports: Vec<ScheduledReport>,
    destinations: DestinationRegistry,
    source: Arc<dyn ReportSource>,
    platform: Arc<dyn ChatPlatform>,
    retry: RetryPolicy,
}

impl Scheduler {
    pub fn new(
        schedules: Vec<ScheduleConfig>,
        destinations: DestinationRegistry,
        source: Arc<dyn ReportSource>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        let reports = schedules
            .into_iter()
            .map(|config| ScheduledReport { config, last_sent: None })
            .collect();
        Self { reports, destinations, source, platform, retry: RetryPolicy::default() }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Seed the last-sent date for a kind, e.g. to suppress a send after a restart.
    pub fn with_last_sent(mut self, kind: ReportKind, date: NaiveDate) -> Self {
        for r in self.reports.iter_mut().filter(|r| r.config.request.kind() == kind) {
            r.last_sent = Some(date);
        }
        self
    }

    pub fn last_sent(&self, kind: ReportKind) -> Option<NaiveDate> {
        self.reports
            .iter()
            .find(|r| r.config.request.kind() == kind)
            .and_then(|r| r.last_sent)
    }

    pub fn state(&self, kind: ReportKind, today: NaiveDate) -> ReportState {
        if self.last_sent(kind) == Some(today) {
            ReportState::Sent
        } else {
            ReportState::Pending
        }
    }

    pub async fn tick(&mut self) -> Vec<TickOutcome> {
        self.tick_at(clock::now()).await
    }

    /// Evaluate every scheduled report at `now` (reference timezone).
    pub async fn tick_at(&mut self, now: DateTime<Tz>) -> Vec<TickOutcome> {
        let today = now.date_naive();
        let time = now.time();
        let mut outcomes = Vec::new();

        for i in 0..self.reports.len() {
            let (request, channel) = {
                let r = &self.reports[i];
                if !in_trigger_window(r.config.at, r.config.window, time) || r.last_sent == Some(today) {
                    continue;
                }
                (r.config.request.clone(), r.config.channel.clone())
            };
            let kind = request.kind();
            info!(kind = %kind, channel = %channel, %today, "Scheduled report due");

            match self.deliver(&request, &channel, today).await {
                Ok(attempts) => {
                    self.reports[i].last_sent = Some(today);
                    info!(kind = %kind, attempts, "Scheduled report sent");
                    outcomes.push(TickOutcome::Sent { kind, attempts });
                }
                Err(e) => {
                    error!(error = %e, kind = %kind, "Scheduled report not sent; still pending");
                    outcomes.push(TickOutcome::Failed { kind, error: e.to_string() });
                }
            }
        }

        outcomes
    }

    /// Fetch, format and post with the retry policy. Returns the attempt count on success.
    async fn deliver(&self, request: &ReportRequest, channel: &str, today: NaiveDate) -> Result<u32, SendError> {
        let handle = self.destinations.get(channel)?.clone();
        let mut attempts = 0;

        self.retry
            .run(|attempt| {
                attempts = attempt;
                let source = Arc::clone(&self.source);
                let platform = Arc::clone(&self.platform);
                let request = request.clone();
                let handle = handle.clone();
                async move {
                    // Fetching and posting are blocking calls.
                    let task = tokio::task::spawn_blocking(move || {
                        let text = match source.render(&request, today) {
                            Ok(text) => text,
                            Err(FetchError::Parse(e)) => {
                                warn!(error = %e, "Source unparseable; posting apology instead");
                                e.user_message()
                            }
                            Err(FetchError::Transport(e)) => return Err(SendError::Transport(e)),
                        };
                        platform.send_message(&handle, &text).map_err(SendError::Delivery)
                    });
                    match task.await {
                        Ok(result) => result,
                        Err(e) => Err(SendError::Task(e.to_string())),
                    }
                }
            })
            .await?;

        Ok(attempts)
    }

    /// Poll forever. Ticks run one at a time; late ticks are skipped, not bunched.
    pub async fn run(mut self, every: Duration) {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(every_secs = every.as_secs(), reports = self.reports.len(), "Scheduler started");
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}

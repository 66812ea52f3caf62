mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use common::{FakePlatform, FakeSource, date};
use hockey_report_bot::clock::REFERENCE_TZ;
use hockey_report_bot::config::ScheduleConfig;
use hockey_report_bot::model::ReportKind;
use hockey_report_bot::platform::{ChannelHandle, ChatPlatform, DestinationRegistry};
use hockey_report_bot::reports::ReportRequest;
use hockey_report_bot::retry::RetryPolicy;
use hockey_report_bot::scheduler::{ReportState, Scheduler, TickOutcome};

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    REFERENCE_TZ.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn schedules() -> Vec<ScheduleConfig> {
    vec![
        ScheduleConfig {
            request: ReportRequest::StartingGoalies,
            channel: "starting-goalies".to_string(),
            at: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            window: Duration::from_secs(300),
        },
        ScheduleConfig {
            request: ReportRequest::InjuryReport,
            channel: "injury-report".to_string(),
            at: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            window: Duration::from_secs(300),
        },
    ]
}

fn scheduler(source: Arc<FakeSource>, platform: Arc<FakePlatform>) -> Scheduler {
    let destinations = DestinationRegistry::discover(platform.as_ref(), "guild").unwrap();
    Scheduler::new(schedules(), destinations, source, platform)
}

#[tokio::test(start_paused = true)]
async fn sends_once_inside_window_then_suppresses() {
    let source = Arc::new(FakeSource::ok("report"));
    let platform = Arc::new(FakePlatform::default());
    let mut sched = scheduler(source, platform.clone()).with_last_sent(ReportKind::InjuryReport, date(2026, 10, 17));

    let today = date(2026, 10, 18);
    assert_eq!(sched.state(ReportKind::InjuryReport, today), ReportState::Pending);

    let outcomes = sched.tick_at(local(2026, 10, 18, 22, 2)).await;
    assert_eq!(outcomes, vec![TickOutcome::Sent { kind: ReportKind::InjuryReport, attempts: 1 }]);
    assert_eq!(platform.attempts(), 1);
    assert_eq!(sched.state(ReportKind::InjuryReport, today), ReportState::Sent);
    assert_eq!(sched.last_sent(ReportKind::InjuryReport), Some(today));

    let sent = platform.sent();
    assert_eq!(sent[0].0, ChannelHandle("200".to_string()));
    assert_eq!(sent[0].1, "injury-report: report");

    let outcomes = sched.tick_at(local(2026, 10, 18, 22, 4)).await;
    assert!(outcomes.is_empty());
    assert_eq!(platform.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn nothing_happens_outside_the_window() {
    let source = Arc::new(FakeSource::ok("report"));
    let platform = Arc::new(FakePlatform::default());
    let mut sched = scheduler(source.clone(), platform.clone());

    for (h, m) in [(10, 59), (11, 5), (21, 59), (22, 5), (23, 0)] {
        assert!(sched.tick_at(local(2026, 10, 18, h, m)).await.is_empty());
    }
    assert_eq!(platform.attempts(), 0);
    assert_eq!(source.renders.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn new_day_resets_to_pending() {
    let source = Arc::new(FakeSource::ok("goalies"));
    let platform = Arc::new(FakePlatform::default());
    let mut sched = scheduler(source, platform.clone());

    sched.tick_at(local(2026, 10, 18, 11, 0)).await;
    sched.tick_at(local(2026, 10, 18, 11, 3)).await;
    assert_eq!(platform.attempts(), 1);

    assert_eq!(sched.state(ReportKind::StartingGoalies, date(2026, 10, 19)), ReportState::Pending);
    let outcomes = sched.tick_at(local(2026, 10, 19, 11, 1)).await;
    assert_eq!(outcomes, vec![TickOutcome::Sent { kind: ReportKind::StartingGoalies, attempts: 1 }]);
    assert_eq!(platform.attempts(), 2);
}

#[tokio::test(start_paused = true)]
async fn retries_delivery_with_fixed_delay() {
    let source = Arc::new(FakeSource::ok("report"));
    let platform = Arc::new(FakePlatform::failing(2));
    let mut sched = scheduler(source, platform.clone());

    let start = tokio::time::Instant::now();
    let outcomes = sched.tick_at(local(2026, 10, 18, 22, 0)).await;

    assert_eq!(outcomes, vec![TickOutcome::Sent { kind: ReportKind::InjuryReport, attempts: 3 }]);
    assert_eq!(platform.attempts(), 3);
    assert_eq!(platform.sent().len(), 1);
    // Two 60s delays between three attempts.
    assert_eq!(start.elapsed(), Duration::from_secs(120));
    assert_eq!(sched.state(ReportKind::InjuryReport, date(2026, 10, 18)), ReportState::Sent);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_stay_pending_and_retry_next_tick() {
    let source = Arc::new(FakeSource::ok("report"));
    let platform = Arc::new(FakePlatform::failing(3));
    let mut sched = scheduler(source, platform.clone());
    let today = date(2026, 10, 18);

    let outcomes = sched.tick_at(local(2026, 10, 18, 22, 0)).await;
    assert!(matches!(outcomes[0], TickOutcome::Failed { kind: ReportKind::InjuryReport, .. }));
    assert_eq!(platform.attempts(), 3);
    assert_eq!(sched.state(ReportKind::InjuryReport, today), ReportState::Pending);

    let outcomes = sched.tick_at(local(2026, 10, 18, 22, 3)).await;
    assert_eq!(outcomes, vec![TickOutcome::Sent { kind: ReportKind::InjuryReport, attempts: 1 }]);
    assert_eq!(platform.attempts(), 4);
    assert_eq!(sched.state(ReportKind::InjuryReport, today), ReportState::Sent);
}

#[tokio::test(start_paused = true)]
async fn transport_failures_are_retried() {
    let source = Arc::new(FakeSource::ok("report"));
    source.transport_failures.store(1, Ordering::SeqCst);
    let platform = Arc::new(FakePlatform::default());
    let mut sched = scheduler(source.clone(), platform.clone())
        .with_retry(RetryPolicy { max_attempts: 3, delay: Duration::from_secs(1) });

    let outcomes = sched.tick_at(local(2026, 10, 18, 11, 0)).await;
    assert_eq!(outcomes, vec![TickOutcome::Sent { kind: ReportKind::StartingGoalies, attempts: 2 }]);
    assert_eq!(source.renders.load(Ordering::SeqCst), 2);
    assert_eq!(platform.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn parse_failures_post_the_apology() {
    let mut source = FakeSource::ok("unused");
    source.parse_failure = true;
    let platform = Arc::new(FakePlatform::default());
    let mut sched = scheduler(Arc::new(source), platform.clone());

    let outcomes = sched.tick_at(local(2026, 10, 18, 11, 0)).await;
    assert_eq!(outcomes, vec![TickOutcome::Sent { kind: ReportKind::StartingGoalies, attempts: 1 }]);
    let sent = platform.sent();
    assert!(sent[0].1.starts_with("Sorry, I couldn't read the starting goalie data"), "message was: {}", sent[0].1);
}

#[tokio::test(start_paused = true)]
async fn missing_destination_leaves_report_pending() {
    let platform = Arc::new(FakePlatform::default());
    let mut channels = platform.list_channels("guild").unwrap();
    channels.remove("injury-report");
    let mut sched = Scheduler::new(
        schedules(),
        DestinationRegistry::new(channels),
        Arc::new(FakeSource::ok("report")),
        platform.clone(),
    );

    let outcomes = sched.tick_at(local(2026, 10, 18, 22, 1)).await;
    match &outcomes[0] {
        TickOutcome::Failed { kind, error } => {
            assert_eq!(*kind, ReportKind::InjuryReport);
            assert!(error.contains("injury-report"), "error was: {}", error);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(platform.attempts(), 0);
    assert_eq!(sched.state(ReportKind::InjuryReport, date(2026, 10, 18)), ReportState::Pending);
}

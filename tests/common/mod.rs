#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::NaiveDate;

use hockey_report_bot::error::{DeliveryError, FetchError, TransportError};
use hockey_report_bot::http::Transport;
use hockey_report_bot::platform::{ChannelHandle, ChatPlatform};
use hockey_report_bot::reports::{ReportRequest, ReportSource};

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/{}", name)).expect("failed to read fixture")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Serves canned bodies by URL; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct FakeTransport {
    pages: HashMap<String, String>,
    pub requests: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeTransport {
    pub fn with_page(mut self, url: &str, body: String) -> Self {
        self.pages.insert(url.to_string(), body);
        self
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, user_agent: Option<&str>) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push((url.to_string(), user_agent.map(str::to_string)));
        self.pages.get(url).cloned().ok_or_else(|| TransportError {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

/// Report source returning fixed text, optionally failing the first N renders.
pub struct FakeSource {
    pub text: String,
    pub transport_failures: AtomicU32,
    pub parse_failure: bool,
    pub renders: AtomicU32,
}

impl FakeSource {
    pub fn ok(text: &str) -> Self {
        Self {
            text: text.to_string(),
            transport_failures: AtomicU32::new(0),
            parse_failure: false,
            renders: AtomicU32::new(0),
        }
    }
}

impl ReportSource for FakeSource {
    fn render(&self, request: &ReportRequest, _today: NaiveDate) -> Result<String, FetchError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if self.parse_failure {
            return Err(hockey_report_bot::error::ParseError::new(request.kind(), "no script tag").into());
        }
        let remaining = self.transport_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transport_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(TransportError { url: "https://example.invalid".to_string(), reason: "timeout".to_string() }.into());
        }
        Ok(format!("{}: {}", request.kind(), self.text))
    }
}

/// Records every send; fails the first `failures` sends.
#[derive(Default)]
pub struct FakePlatform {
    pub failures: AtomicU32,
    pub attempts: AtomicU32,
    pub sent: Mutex<Vec<(ChannelHandle, String)>>,
}

impl FakePlatform {
    pub fn failing(n: u32) -> Self {
        Self { failures: AtomicU32::new(n), ..Default::default() }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(ChannelHandle, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ChatPlatform for FakePlatform {
    fn list_channels(&self, _guild_id: &str) -> Result<HashMap<String, ChannelHandle>, DeliveryError> {
        Ok(HashMap::from([
            ("starting-goalies".to_string(), ChannelHandle("100".to_string())),
            ("injury-report".to_string(), ChannelHandle("200".to_string())),
            ("general".to_string(), ChannelHandle("300".to_string())),
        ]))
    }

    fn send_message(&self, channel: &ChannelHandle, content: &str) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(DeliveryError::Rejected { channel: channel.to_string(), reason: "503".to_string() });
        }
        self.sent.lock().unwrap().push((channel.clone(), content.to_string()));
        Ok(())
    }
}

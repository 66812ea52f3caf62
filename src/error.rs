use thiserror::Error;

use crate::model::ReportKind;

/// Network, DNS, timeout or non-success status while fetching a source page.
#[derive(Debug, Clone, Error)]
#[error("request to {url} failed: {reason}")]
pub struct TransportError {
    pub url: String,
    pub reason: String,
}

/// The source page no longer has the structure we extract from.
#[derive(Debug, Clone, Error)]
#[error("could not parse {report} data{}: {detail}", team_suffix(.team))]
pub struct ParseError {
    pub report: ReportKind,
    pub team: Option<String>,
    pub detail: String,
}

fn team_suffix(team: &Option<String>) -> String {
    team.as_deref().map(|t| format!(" for {}", t)).unwrap_or_default()
}

impl ParseError {
    pub fn new(report: ReportKind, detail: impl Into<String>) -> Self {
        Self { report, team: None, detail: detail.into() }
    }

    pub fn for_team(report: ReportKind, team: &str, detail: impl Into<String>) -> Self {
        Self { report, team: Some(team.to_string()), detail: detail.into() }
    }

    /// Reply text safe to post in chat.
    pub fn user_message(&self) -> String {
        format!(
            "Sorry, I couldn't read the {} data{} right now. The source page may have changed.",
            self.report.label(),
            team_suffix(&self.team)
        )
    }
}

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// User-facing text for a failed fetch. Technical detail stays in the logs.
    pub fn apology(&self, report: ReportKind, team: Option<&str>) -> String {
        match self {
            FetchError::Parse(e) => e.user_message(),
            FetchError::Transport(_) => format!(
                "Sorry, I couldn't reach the {} source{} right now. Please try again later.",
                report.label(),
                team.map(|t| format!(" for {}", t)).unwrap_or_default()
            ),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("destination channel '{0}' is not registered")]
    ChannelMissing(String),
    #[error("delivery to channel {channel} failed: {reason}")]
    Rejected { channel: String, reason: String },
}

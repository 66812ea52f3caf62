use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, instrument};

use crate::cbs::{CbsInjuries, INJURIES_URL};
use crate::dailyfaceoff::{GOALIES_URL, LineCombinations, StartingGoalies, line_combinations_url};
use crate::error::FetchError;
use crate::format;
use crate::http::Transport;
use crate::model::ReportKind;

/// A concrete report to produce; line combinations carry their team slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    StartingGoalies,
    InjuryReport,
    LineCombinations { team: String },
}

impl ReportRequest {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRequest::StartingGoalies => ReportKind::StartingGoalies,
            ReportRequest::InjuryReport => ReportKind::InjuryReport,
            ReportRequest::LineCombinations { .. } => ReportKind::LineCombinations,
        }
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            ReportRequest::LineCombinations { team } => Some(team),
            _ => None,
        }
    }
}

/// Anything that can turn a request into message text. Blocking.
pub trait ReportSource: Send + Sync {
    fn render(&self, request: &ReportRequest, today: NaiveDate) -> Result<String, FetchError>;
}

/// Always yields chat text: the report, or an apology when it could not be built.
#[instrument(level = "info", skip(source))]
pub fn reply(source: &dyn ReportSource, request: &ReportRequest, today: NaiveDate) -> String {
    match source.render(request, today) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, kind = %request.kind(), "Report failed");
            e.apology(request.kind(), request.team())
        }
    }
}

/// Lower-case and hyphenate a team name: "San Jose  Sharks" -> "san-jose-sharks".
pub fn slugify(team: &str) -> String {
    team.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Fetch -> parse -> format for every report kind, over a pluggable transport.
#[derive(Clone)]
pub struct Reports {
    transport: Arc<dyn Transport>,
}

impl Reports {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn injury_report(&self, today: NaiveDate) -> Result<String, FetchError> {
        let injuries = CbsInjuries::fetch(self.transport.as_ref())?;
        let todays = injuries.todays_injuries(today);
        info!(total = injuries.entries().len(), today = todays.len(), "Filtered injuries to today");
        Ok(format::render_injuries(&todays, today, INJURIES_URL))
    }

    pub fn starting_goalies(&self, _today: NaiveDate) -> Result<String, FetchError> {
        let goalies = StartingGoalies::fetch(self.transport.as_ref())?;
        Ok(format::render_goalies(&goalies.title, &goalies.matchups, GOALIES_URL))
    }

    pub fn line_combinations(&self, team: &str, today: NaiveDate) -> Result<String, FetchError> {
        let slug = slugify(team);
        let lines = LineCombinations::fetch(self.transport.as_ref(), &slug)?;
        Ok(format::render_lines(&lines.title, today, &lines.players, &line_combinations_url(&slug)))
    }
}

impl ReportSource for Reports {
    fn render(&self, request: &ReportRequest, today: NaiveDate) -> Result<String, FetchError> {
        match request {
            ReportRequest::StartingGoalies => self.starting_goalies(today),
            ReportRequest::InjuryReport => self.injury_report(today),
            ReportRequest::LineCombinations { team } => self.line_combinations(team, today),
        }
    }
}

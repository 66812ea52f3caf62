use scraper::Html;
use tracing::{error, info, instrument};

use crate::error::{FetchError, ParseError};
use crate::http::{BROWSER_USER_AGENT, Transport};
use crate::model::ReportKind;
use crate::model::goalie::{GoalieMatchup, GoaliesPageProps};
use crate::model::lines::{LinePlayer, LinesPageProps};
use crate::model::next_data::NextData;
use crate::page::{EmbeddedJsonError, embedded_json, og_title};

pub const GOALIES_URL: &str = "https://www.dailyfaceoff.com/starting-goalies/";

pub fn line_combinations_url(slug: &str) -> String {
    format!("https://www.dailyfaceoff.com/teams/{}/line-combinations/", slug)
}

fn describe(e: EmbeddedJsonError) -> String {
    match e {
        EmbeddedJsonError::MissingScript => "embedded JSON script element not found".to_string(),
        EmbeddedJsonError::Decode(e) => format!("embedded JSON did not match expected shape: {}", e),
    }
}

/// Daily Faceoff projected starters for today's slate.
#[derive(Debug)]
pub struct StartingGoalies {
    pub title: String,
    pub matchups: Vec<GoalieMatchup>,
}

impl StartingGoalies {
    #[instrument(level = "info", skip(transport))]
    pub fn fetch(transport: &dyn Transport) -> Result<Self, FetchError> {
        let body = transport.get(GOALIES_URL, Some(BROWSER_USER_AGENT))?;
        let parsed = Self::from_html(&body)?;
        info!(title = %parsed.title, matchups = parsed.matchups.len(), "Parsed starting goalies");
        Ok(parsed)
    }

    pub fn from_html(body: &str) -> Result<Self, ParseError> {
        let doc = Html::parse_document(body);
        let title = og_title(&doc).unwrap_or_else(|| "Starting Goalies".to_string());

        let props: GoaliesPageProps = match embedded_json::<NextData<GoaliesPageProps>>(&doc) {
            Ok(data) => data.into_page_props(),
            Err(e) => {
                let detail = describe(e);
                error!(error = %detail, "Failed to extract starting goalie data");
                return Err(ParseError::new(ReportKind::StartingGoalies, detail));
            }
        };

        let matchups = props.data.into_iter().map(GoalieMatchup::from).collect();
        Ok(Self { title, matchups })
    }
}

/// One team's current line combinations.
#[derive(Debug)]
pub struct LineCombinations {
    pub team: String,
    pub title: String,
    pub players: Vec<LinePlayer>,
}

impl LineCombinations {
    #[instrument(level = "info", skip(transport))]
    pub fn fetch(transport: &dyn Transport, slug: &str) -> Result<Self, FetchError> {
        let body = transport.get(&line_combinations_url(slug), Some(BROWSER_USER_AGENT))?;
        let parsed = Self::from_html(&body, slug)?;
        info!(team = %slug, players = parsed.players.len(), "Parsed line combinations");
        Ok(parsed)
    }

    pub fn from_html(body: &str, slug: &str) -> Result<Self, ParseError> {
        let doc = Html::parse_document(body);
        let title = og_title(&doc).unwrap_or_else(|| "Line Combinations".to_string());

        let props: LinesPageProps = match embedded_json::<NextData<LinesPageProps>>(&doc) {
            Ok(data) => data.into_page_props(),
            Err(e) => {
                let detail = describe(e);
                error!(error = %detail, team = %slug, "Failed to extract line combination data");
                return Err(ParseError::for_team(ReportKind::LineCombinations, slug, detail));
            }
        };

        let players = props.combinations.players.into_iter().map(LinePlayer::from).collect();
        Ok(Self { team: slug.to_string(), title, players })
    }
}

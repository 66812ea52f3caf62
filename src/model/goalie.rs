use serde::Deserialize;

pub const UNCONFIRMED: &str = "Unconfirmed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalieMatchup {
    pub home_team: String,
    pub away_team: String,
    pub game_time: String,
    pub home_goalie: String,
    pub away_goalie: String,
    pub home_status: String,
    pub away_status: String,
}

#[derive(Debug, Deserialize)]
pub struct GoaliesPageProps {
    pub data: Vec<MatchupRecord>,
}

/// One entry of `props.pageProps.data` on the starting goalies page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRecord {
    pub home_team_name: String,
    pub away_team_name: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub home_goalie_name: Option<String>,
    #[serde(default)]
    pub away_goalie_name: Option<String>,
    #[serde(default)]
    pub home_news_strength_name: Option<String>,
    #[serde(default)]
    pub away_news_strength_name: Option<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl From<MatchupRecord> for GoalieMatchup {
    fn from(r: MatchupRecord) -> Self {
        GoalieMatchup {
            home_team: r.home_team_name,
            away_team: r.away_team_name,
            game_time: or_default(r.time, "TBD"),
            home_goalie: or_default(r.home_goalie_name, "TBD"),
            away_goalie: or_default(r.away_goalie_name, "TBD"),
            home_status: or_default(r.home_news_strength_name, UNCONFIRMED),
            away_status: or_default(r.away_news_strength_name, UNCONFIRMED),
        }
    }
}

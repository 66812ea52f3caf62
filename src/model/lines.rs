use serde::Deserialize;

/// Players arrive grouped (forwards line 1, line 2, ...) and must keep source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePlayer {
    pub group_name: String,
    pub name: String,
    pub position: String,
}

#[derive(Debug, Deserialize)]
pub struct LinesPageProps {
    pub combinations: Combinations,
}

#[derive(Debug, Deserialize)]
pub struct Combinations {
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub position_identifier: Option<String>,
}

impl From<PlayerRecord> for LinePlayer {
    fn from(r: PlayerRecord) -> Self {
        LinePlayer {
            group_name: r.group_name.unwrap_or_default(),
            name: r.name,
            position: r.position_identifier.unwrap_or_default().to_uppercase(),
        }
    }
}

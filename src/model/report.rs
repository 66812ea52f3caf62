use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    StartingGoalies,
    InjuryReport,
    LineCombinations,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::StartingGoalies => "starting-goalies",
            ReportKind::InjuryReport => "injury-report",
            ReportKind::LineCombinations => "line-combinations",
        }
    }

    /// Human label used in apologies, e.g. "starting goalie".
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::StartingGoalies => "starting goalie",
            ReportKind::InjuryReport => "injury report",
            ReportKind::LineCombinations => "line combination",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starting-goalies" => Ok(ReportKind::StartingGoalies),
            "injury-report" => Ok(ReportKind::InjuryReport),
            "line-combinations" => Ok(ReportKind::LineCombinations),
            other => Err(format!("unknown report kind: {}", other)),
        }
    }
}

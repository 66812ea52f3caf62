use std::env;
use std::time::Duration;

use chrono::NaiveTime;
use thiserror::Error;

use crate::reports::ReportRequest;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid { name: &'static str, value: String, reason: String },
}

/// When and where a report is posted automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub request: ReportRequest,
    pub channel: String,
    /// Local (reference timezone) time the trigger window opens.
    pub at: NaiveTime,
    pub window: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub guild_id: String,
    pub poll_interval: Duration,
    pub goalies_at: NaiveTime,
    pub injuries_at: NaiveTime,
    pub trigger_window: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty()).ok_or(ConfigError::Missing(name));

        let time = |name: &'static str, default: NaiveTime| -> Result<NaiveTime, ConfigError> {
            match lookup(name) {
                None => Ok(default),
                Some(v) => NaiveTime::parse_from_str(v.trim(), "%H:%M").map_err(|e| ConfigError::Invalid {
                    name,
                    value: v.clone(),
                    reason: e.to_string(),
                }),
            }
        };

        let number = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(name) {
                None => Ok(default),
                Some(v) => match v.trim().parse::<u64>() {
                    Ok(n) if n > 0 => Ok(n),
                    Ok(_) => Err(ConfigError::Invalid { name, value: v, reason: "must be positive".to_string() }),
                    Err(e) => Err(ConfigError::Invalid { name, value: v.clone(), reason: e.to_string() }),
                },
            }
        };

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            guild_id: required("DISCORD_GUILD_ID")?,
            poll_interval: Duration::from_secs(number("POLL_INTERVAL_SECS", 60)?),
            goalies_at: time("GOALIES_TRIGGER", NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default())?,
            injuries_at: time("INJURIES_TRIGGER", NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default())?,
            trigger_window: Duration::from_secs(60 * number("TRIGGER_WINDOW_MINUTES", 5)?),
        })
    }

    /// Scheduled reports. Line combinations are on-demand only.
    pub fn schedules(&self) -> Vec<ScheduleConfig> {
        vec![
            ScheduleConfig {
                request: ReportRequest::StartingGoalies,
                channel: "starting-goalies".to_string(),
                at: self.goalies_at,
                window: self.trigger_window,
            },
            ScheduleConfig {
                request: ReportRequest::InjuryReport,
                channel: "injury-report".to_string(),
                at: self.injuries_at,
                window: self.trigger_window,
            },
        ]
    }
}

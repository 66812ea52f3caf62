use chrono::NaiveDate;
use tracing::info;

use crate::format::{MESSAGE_LIMIT, char_len};
use crate::reports::{self, ReportRequest, ReportSource, slugify};

pub const PREFIX: char = '!';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Liveness check.
    Beep,
    Goalies,
    Injuries,
    Lines { team: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
}

impl CommandError {
    pub fn message(&self) -> String {
        match self {
            CommandError::Unknown(input) => format!("I don't know what \"{}\" means.", input),
            CommandError::MissingArgument(param) => format!("Missing required argument: \"{}\"", param),
        }
    }
}

/// `None` when the message is not addressed to the bot.
pub fn parse(input: &str) -> Option<Result<Command, CommandError>> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix(PREFIX)?;
    let mut words = body.split_whitespace();
    let name = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let cmd = match name.as_str() {
        "beep" => Ok(Command::Beep),
        "goalies" => Ok(Command::Goalies),
        "injuries" => Ok(Command::Injuries),
        "lines" if args.is_empty() => Err(CommandError::MissingArgument("team_name")),
        "lines" => Ok(Command::Lines { team: slugify(&args.join(" ")) }),
        _ => Err(CommandError::Unknown(trimmed.to_string())),
    };
    Some(cmd)
}

/// Append the caller's mention unless it would push the reply over the limit.
pub fn with_mention(text: String, author_id: Option<&str>) -> String {
    match author_id {
        Some(id) => {
            let mentioned = format!("{}\n<@{}>", text, id);
            if char_len(&mentioned) <= MESSAGE_LIMIT { mentioned } else { text }
        }
        None => text,
    }
}

/// Produce the reply for one inbound message. Blocking: report commands hit the network.
pub fn dispatch(source: &dyn ReportSource, input: &str, author_id: Option<&str>, today: NaiveDate) -> Option<String> {
    let command = match parse(input)? {
        Ok(command) => command,
        Err(e) => return Some(e.message()),
    };
    info!(?command, "Handling command");

    let request = match command {
        Command::Beep => return Some("boop".to_string()),
        Command::Goalies => ReportRequest::StartingGoalies,
        Command::Injuries => ReportRequest::InjuryReport,
        Command::Lines { team } => ReportRequest::LineCombinations { team },
    };
    Some(with_mention(reports::reply(source, &request, today), author_id))
}

//! Chat renderers for each report kind. Pure functions: same input, same bytes.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::clock::header_date;
use crate::model::goalie::GoalieMatchup;
use crate::model::injury::InjuryEntry;
use crate::model::lines::LinePlayer;

/// Hard ceiling on a single Discord message, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

const INJURY_TITLE: &str = "NHL Injury Report";

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn source_line(source_url: &str) -> String {
    format!("*Source: <{}>*\n", source_url)
}

/// Today's injury designations. Falls back to a condensed rendering (no details)
/// when the full text would not fit in one message.
pub fn render_injuries(entries: &[InjuryEntry], date: NaiveDate, source_url: &str) -> String {
    let full = render_injuries_full(entries, date, source_url);
    if char_len(&full) <= MESSAGE_LIMIT {
        return full;
    }
    render_injuries_condensed(entries, date, source_url)
}

pub fn render_injuries_full(entries: &[InjuryEntry], date: NaiveDate, source_url: &str) -> String {
    let mut out = format!("# ☠️ {} - {}\n\n", INJURY_TITLE, header_date(date));
    if entries.is_empty() {
        out.push_str("*No new injury designations today.*\n");
    }
    for e in entries {
        let _ = writeln!(out, "* {} ({}): {} - {}", e.name, e.position, e.injury_type, e.details);
    }
    out.push('\n');
    out.push_str(&source_line(source_url));
    out
}

fn more_line(remaining: usize) -> String {
    format!("* …and {} more\n", remaining)
}

pub fn render_injuries_condensed(entries: &[InjuryEntry], date: NaiveDate, source_url: &str) -> String {
    let header = format!(
        "# ☠️ {} - {} (Condensed)\n*Full injury report exceeds Discord message size limit. See source link for more info.*\n\n",
        INJURY_TITLE,
        header_date(date)
    );
    let footer = format!("\n{}", source_line(source_url));

    let lines: Vec<String> = entries
        .iter()
        .map(|e| format!("* {} ({}): {}\n", e.name, e.position, e.injury_type))
        .collect();

    let total = lines.len();
    let mut used = char_len(&header) + char_len(&footer);
    let mut body = String::new();
    for (i, line) in lines.iter().enumerate() {
        let remaining_after = total - i - 1;
        let tail = if remaining_after > 0 { char_len(&more_line(remaining_after)) } else { 0 };
        let len = char_len(line);
        if used + len + tail > MESSAGE_LIMIT {
            body.push_str(&more_line(total - i));
            break;
        }
        used += len;
        body.push_str(line);
    }

    let mut out = header;
    out.push_str(&body);
    out.push_str(&footer);
    out
}

pub fn render_goalies(title: &str, matchups: &[GoalieMatchup], source_url: &str) -> String {
    let mut out = format!("# 🥅 {}\n\n", title);
    if matchups.is_empty() {
        out.push_str("*No games on the schedule today.*\n\n");
    }
    for m in matchups {
        let _ = writeln!(out, "{} vs. {} ({})", m.home_team, m.away_team, m.game_time);
        let _ = writeln!(
            out,
            "{} ({}), {} ({})",
            m.home_goalie, m.home_status, m.away_goalie, m.away_status
        );
        out.push('\n');
    }
    out.push_str(&source_line(source_url));
    out
}

/// One `## group` header per contiguous run of players; source order is preserved.
pub fn render_lines(title: &str, date: NaiveDate, players: &[LinePlayer], source_url: &str) -> String {
    let mut out = format!("# 🧑‍🧒‍🧒 {} - {}\n\n", title, header_date(date));
    let mut current_group: Option<&str> = None;

    for p in players {
        if current_group != Some(p.group_name.as_str()) {
            if current_group.is_some() {
                out.push('\n');
            }
            if !p.group_name.is_empty() {
                let _ = write!(out, "## {}\n\n", p.group_name);
            }
            current_group = Some(p.group_name.as_str());
        }
        let _ = writeln!(out, "* {} ({})", p.name, p.position);
    }

    out.push('\n');
    out.push_str(&source_line(source_url));
    out
}

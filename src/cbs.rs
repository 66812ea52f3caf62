use scraper::Html;
use tracing::{info, instrument, warn};

use crate::clock::{is_same_calendar_day_ignoring_year, parse_month_day};
use crate::error::{FetchError, ParseError};
use crate::http::Transport;
use crate::model::ReportKind;
use crate::model::injury::InjuryEntry;
use crate::page::{select_all, text_of};

pub const INJURIES_URL: &str = "https://www.cbssports.com/nhl/injuries/";

const ROW_SELECTOR: &str = "tr.TableBase-bodyTr";
const LONG_NAME_SELECTOR: &str = "span.CellPlayerName--long";

/// Parsed CBS Sports NHL injury table.
#[derive(Debug)]
pub struct CbsInjuries {
    entries: Vec<InjuryEntry>,
}

impl CbsInjuries {
    /// Fetch and parse the live injury page.
    #[instrument(level = "info", skip(transport))]
    pub fn fetch(transport: &dyn Transport) -> Result<Self, FetchError> {
        let body = transport.get(INJURIES_URL, None)?;
        let parsed = Self::from_html(&body)?;
        info!(entries = parsed.entries.len(), "Parsed CBS injury table");
        Ok(parsed)
    }

    /// Parse a page body (no network).
    pub fn from_html(body: &str) -> Result<Self, ParseError> {
        let doc = Html::parse_document(body);
        let root = doc.root_element();

        let rows = select_all(root, ROW_SELECTOR);
        if rows.is_empty() {
            return Err(ParseError::new(
                ReportKind::InjuryReport,
                format!("no rows matched '{}'", ROW_SELECTOR),
            ));
        }

        let mut entries: Vec<InjuryEntry> = Vec::with_capacity(rows.len());
        for row in rows {
            let cells = select_all(row, "td");
            if cells.len() < 5 {
                warn!(cells = cells.len(), "Skipping malformed injury row");
                continue;
            }
            let date_text = text_of(cells[2]);
            entries.push(InjuryEntry {
                name: text_of(cells[0]),
                position: text_of(cells[1]),
                designation_date: parse_designation_date(&date_text),
                injury_type: text_of(cells[3]),
                details: text_of(cells[4]),
            });
        }

        // The name cell mixes short and long spellings; the long-form spans are cleaner.
        let long_names: Vec<String> = select_all(root, LONG_NAME_SELECTOR).into_iter().map(text_of).collect();
        overwrite_names(&mut entries, long_names);

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[InjuryEntry] {
        &self.entries
    }

    /// Entries designated on `today` (month/day), sorted by name.
    pub fn todays_injuries(&self, today: chrono::NaiveDate) -> Vec<InjuryEntry> {
        todays_injuries(&self.entries, today)
    }
}

/// The cell reads "Sat, Oct 18"; drop the weekday and parse the rest.
pub fn parse_designation_date(cell: &str) -> Option<chrono::NaiveDate> {
    let (_, month_day) = cell.trim().split_once(' ')?;
    parse_month_day(month_day)
}

/// Positional overwrite; names beyond the entry count are ignored.
pub fn overwrite_names(entries: &mut [InjuryEntry], names: Vec<String>) {
    for (entry, name) in entries.iter_mut().zip(names) {
        entry.name = name;
    }
}

pub fn todays_injuries(entries: &[InjuryEntry], today: chrono::NaiveDate) -> Vec<InjuryEntry> {
    let mut todays: Vec<InjuryEntry> = entries
        .iter()
        .filter(|e| {
            e.designation_date
                .map(|d| is_same_calendar_day_ignoring_year(d, today))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    todays.sort_by(|a, b| a.name.cmp(&b.name));
    todays
}

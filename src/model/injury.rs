use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjuryEntry {
    pub name: String,
    pub position: String,
    /// Month and day only; the year is the placeholder from `clock::PLACEHOLDER_YEAR`.
    /// `None` when the source cell could not be parsed.
    pub designation_date: Option<NaiveDate>,
    pub injury_type: String,
    pub details: String,
}

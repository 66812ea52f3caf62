pub mod goalie;
pub mod injury;
pub mod lines;
pub mod next_data;
pub mod report;

pub use report::ReportKind;

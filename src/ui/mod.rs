pub mod cli;
pub mod report;

pub use report::{JsonReport, Report, format_score};

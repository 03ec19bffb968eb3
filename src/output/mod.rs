//! Rendering of match results and rankings

pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};

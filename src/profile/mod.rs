//! Structured fields extracted from plain resume text

pub mod extractor;

pub use extractor::{PersonalInfo, ResumeProfile};

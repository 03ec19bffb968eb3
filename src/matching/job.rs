//! Job posting records supplied by the ingestion side

use serde::{Deserialize, Deserializer, Serialize};

/// Phrases marking a posting that no longer takes applicants
pub const CLOSED_POSTING_PHRASES: &[&str] = &[
    "no longer accepting applications",
    "position filled",
    "applications closed",
    "hiring closed",
    "position closed",
    "job closed",
    "hiring complete",
];

/// A job posting as handed over by the ingestion collaborator.
///
/// `description` is mandatory. Missing or null text fields other than the
/// description are coerced to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requirements: String,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, description: impl Into<String>, requirements: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            company: String::new(),
            description: description.into(),
            requirements: requirements.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Title, description and requirements joined and lower-cased
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.requirements).to_lowercase()
    }

    /// False once any closed-posting phrase appears in the posting text
    pub fn is_accepting_applications(&self) -> bool {
        let text = self.search_text();
        !CLOSED_POSTING_PHRASES.iter().any(|phrase| text.contains(phrase))
    }

    /// Human readable label for logs and reports
    pub fn label(&self) -> String {
        match (&self.id, self.title.is_empty()) {
            (Some(id), false) => format!("{} ({})", self.title, id),
            (Some(id), true) => id.clone(),
            (None, false) => self.title.clone(),
            (None, true) => "untitled job".to_string(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

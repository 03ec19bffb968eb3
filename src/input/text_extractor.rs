//! Plain text extraction from supported file formats

use crate::error::{JobMatcherError, Result};
use crate::matching::text::unescape_entities;
use lazy_static::lazy_static;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(JobMatcherError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(JobMatcherError::Io)?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render markdown to HTML and strip it back down to text lines
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n");

    // Escaped "<" and ">" only turn back into characters after the tags are gone
    let stripped = TAG_REGEX.replace_all(&text, "");
    let clean_text = unescape_entities(&stripped);

    clean_text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

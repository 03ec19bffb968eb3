//! Output formatters for match results and rankings

use crate::config::OutputFormat;
use crate::error::Result;
use crate::matching::ranking::RankingReport;
use crate::matching::scorer::MatchResult;
use crate::matching::text::{clean_description, DESCRIPTION_PREVIEW_LENGTH};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering scoring output
pub trait OutputFormatter {
    fn format_match(&self, result: &MatchResult) -> Result<String>;
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn score_label(score: f64) -> (&'static str, Color) {
    match score {
        s if s >= 90.0 => ("EXCELLENT", Color::Green),
        s if s >= 80.0 => ("VERY GOOD", Color::BrightGreen),
        s if s >= 70.0 => ("GOOD", Color::Yellow),
        s if s >= 60.0 => ("FAIR", Color::BrightYellow),
        s if s >= 50.0 => ("BELOW AVG", Color::Red),
        _ => ("POOR", Color::BrightRed),
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = score_label(score);
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_breakdown(&self, result: &MatchResult) -> String {
        let mut output = String::new();
        output.push_str(&format!("Skills:          {:>6.2}%\n", result.skills_score));
        output.push_str(&format!("Experience:      {:>6.2}%\n", result.experience_score));
        output.push_str(&format!("Education:       {:>6.2}%\n", result.education_score));
        output.push_str(&format!("Text similarity: {:>6.2}%\n", result.text_similarity_score));
        output.push_str(&format!(
            "Matched skills:  {}\n",
            self.colorize(&join_or_none(&result.matched_skills), Color::Green)
        ));
        output.push_str(&format!(
            "Missing skills:  {}\n",
            self.colorize(&join_or_none(&result.missing_skills), Color::Red)
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_match(&self, result: &MatchResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB MATCH", 1));
        output.push_str(&format!(
            "Final Score: {:.2}% {}\n",
            result.final_score,
            self.format_score_badge(result.final_score)
        ));
        output.push_str(&self.format_header("Score Breakdown", 2));
        output.push_str(&self.format_breakdown(result));

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB RANKING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));
        output.push_str(&format!(
            "Jobs: {} | Skipped: {} | Shown: {} | Best match: {:.2}%\n",
            report.total_jobs,
            report.skipped_jobs,
            report.matches.len(),
            report.best_match_score
        ));
        output.push_str(&format!("Resume skills: {}\n", join_or_none(&report.resume_skills)));

        if report.matches.is_empty() {
            output.push_str(&self.colorize("\nNo jobs met the minimum score.\n", Color::Yellow));
            return Ok(output);
        }

        for ranked in &report.matches {
            let title = format!("#{} {}", ranked.rank, ranked.job.label());
            output.push_str(&self.format_header(&title, 2));
            if !ranked.job.company.is_empty() {
                output.push_str(&format!("Company: {}\n", ranked.job.company));
            }
            output.push_str(&format!(
                "Match: {:.2}% {} | Quick score: {:.1}%",
                ranked.result.final_score,
                self.format_score_badge(ranked.result.final_score),
                ranked.quick_score
            ));
            if let Some(relevance) = ranked.relevance {
                output.push_str(&format!(" | Relevance: {:.0}%", relevance));
            }
            output.push('\n');

            if self.detailed {
                output.push_str(&self.format_breakdown(&ranked.result));
                let preview = clean_description(&ranked.job.description, DESCRIPTION_PREVIEW_LENGTH);
                if !preview.is_empty() {
                    output.push_str(&format!("{}\n", self.colorize(&preview, Color::BrightBlack)));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_match(&self, result: &MatchResult) -> Result<String> {
        self.to_json(result)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn breakdown_table(result: &MatchResult) -> String {
        let mut table = String::from("| Criterion | Score |\n|---|---|\n");
        table.push_str(&format!("| Skills | {:.2}% |\n", result.skills_score));
        table.push_str(&format!("| Experience | {:.2}% |\n", result.experience_score));
        table.push_str(&format!("| Education | {:.2}% |\n", result.education_score));
        table.push_str(&format!("| Text similarity | {:.2}% |\n", result.text_similarity_score));
        table
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_match(&self, result: &MatchResult) -> Result<String> {
        let mut md = String::from("# Job Match\n\n");
        md.push_str(&format!(
            "**Final score:** {:.2}% ({})\n\n",
            result.final_score,
            score_label(result.final_score).0
        ));
        md.push_str(&Self::breakdown_table(result));
        md.push_str(&format!("\n**Matched skills:** {}\n\n", join_or_none(&result.matched_skills)));
        md.push_str(&format!("**Missing skills:** {}\n", join_or_none(&result.missing_skills)));
        Ok(md)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut md = String::from("# Job Ranking\n\n");

        if self.include_metadata {
            md.push_str(&format!(
                "_Generated {} in {}ms_\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
        }

        md.push_str(&format!(
            "Scored **{}** of {} jobs, best match **{:.2}%**.\n\n",
            report.total_jobs - report.skipped_jobs,
            report.total_jobs,
            report.best_match_score
        ));

        md.push_str("| Rank | Job | Company | Match | Quick | Missing skills |\n|---|---|---|---|---|---|\n");
        for ranked in &report.matches {
            md.push_str(&format!(
                "| {} | {} | {} | {:.2}% | {:.1}% | {} |\n",
                ranked.rank,
                ranked.job.label().replace('|', "/"),
                ranked.job.company.replace('|', "/"),
                ranked.result.final_score,
                ranked.quick_score,
                join_or_none(&ranked.result.missing_skills)
            ));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_match(&self, result: &MatchResult, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_match(result)
    }

    pub fn generate_ranking(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

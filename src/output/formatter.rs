//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScorerError};
use crate::output::report::{ScoreBand, ScoreReport};
use crate::processing::matcher::DEFAULT_DENSITY_CAP;
use colored::{Color, Colorize};
use std::fmt::Write;
use std::path::Path;

/// Trait for formatting score reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored score bands
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    density_cap: f64,
}

/// JSON formatter for machine consumption
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    detailed: bool,
}

/// Picks the formatter matching the requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn fmt_err(e: std::fmt::Error) -> ResumeScorerError {
    ResumeScorerError::OutputFormatting(e.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            density_cap: DEFAULT_DENSITY_CAP,
        }
    }

    /// Scale keyword density against `cap` instead of the default.
    pub fn with_density_cap(mut self, cap: f64) -> Self {
        self.density_cap = cap;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn score_line(&self, label: &str, score: f64, max: f64) -> String {
        let relative = if max > 0.0 { score / max * 100.0 } else { 0.0 };
        let color = match ScoreBand::from_score(relative) {
            ScoreBand::Strong => Color::Green,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Weak => Color::Red,
        };
        let value = format!("{:>6.2}", score);
        format!("  {:<16} {} / {}", label, self.colorize(&value, color), max)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut out = String::new();
        let scores = &report.scores;

        out.push_str(&self.header("Resume Score"));
        writeln!(out, "  Resume:          {}", report.resume).map_err(fmt_err)?;
        writeln!(out, "  Job description: {}", report.job_description).map_err(fmt_err)?;

        out.push_str(&self.header("Scores"));
        let lines = [
            self.score_line("Keyword match", scores.keyword_match, 100.0),
            self.score_line("Section match", scores.section_match, 100.0),
            self.score_line("Keyword density", scores.keyword_density, self.density_cap),
            self.score_line("Overall", scores.overall_score, 100.0),
        ];
        for line in &lines {
            writeln!(out, "{}", line).map_err(fmt_err)?;
        }
        writeln!(out, "  Verdict: {}", report.band()).map_err(fmt_err)?;

        if self.detailed {
            let keywords = &report.keywords;
            out.push_str(&self.header("Keywords"));
            writeln!(out, "  Exact:   {}", join_or_none(&keywords.exact_matches))
                .map_err(fmt_err)?;
            let fuzzy: Vec<String> = keywords
                .fuzzy_matches
                .iter()
                .map(|m| format!("{} ~ {} ({})", m.keyword, m.matched_token, m.similarity))
                .collect();
            writeln!(out, "  Fuzzy:   {}", join_or_none(&fuzzy)).map_err(fmt_err)?;
            writeln!(
                out,
                "  Missing: {}",
                self.colorize(&join_or_none(&keywords.missing_keywords), Color::Red)
            )
            .map_err(fmt_err)?;

            out.push_str(&self.header("Sections"));
            for category in &report.sections.detected {
                writeln!(out, "  {} {}", self.colorize("+", Color::Green), category)
                    .map_err(fmt_err)?;
            }
            for category in &report.sections.missing {
                writeln!(out, "  {} {}", self.colorize("-", Color::Red), category)
                    .map_err(fmt_err)?;
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut out = String::new();
        let scores = &report.scores;

        writeln!(out, "# Resume Score Report\n").map_err(fmt_err)?;
        writeln!(out, "- **Resume:** {}", report.resume).map_err(fmt_err)?;
        writeln!(out, "- **Job description:** {}", report.job_description).map_err(fmt_err)?;
        writeln!(out, "- **Generated:** {}\n", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))
            .map_err(fmt_err)?;

        writeln!(out, "| Metric | Score |").map_err(fmt_err)?;
        writeln!(out, "|---|---|").map_err(fmt_err)?;
        writeln!(out, "| Keyword match | {:.2} |", scores.keyword_match).map_err(fmt_err)?;
        writeln!(out, "| Section match | {:.2} |", scores.section_match).map_err(fmt_err)?;
        writeln!(out, "| Keyword density | {:.2} |", scores.keyword_density).map_err(fmt_err)?;
        writeln!(out, "| **Overall** | **{:.2}** ({}) |", scores.overall_score, report.band())
            .map_err(fmt_err)?;

        if self.detailed {
            let keywords = &report.keywords;
            writeln!(out, "\n## Keywords\n").map_err(fmt_err)?;
            writeln!(out, "- Exact: {}", join_or_none(&keywords.exact_matches)).map_err(fmt_err)?;
            for m in &keywords.fuzzy_matches {
                writeln!(out, "- Fuzzy: `{}` ~ `{}` ({})", m.keyword, m.matched_token, m.similarity)
                    .map_err(fmt_err)?;
            }
            writeln!(out, "- Missing: {}", join_or_none(&keywords.missing_keywords))
                .map_err(fmt_err)?;

            writeln!(out, "\n## Sections\n").map_err(fmt_err)?;
            for category in &report.sections.detected {
                writeln!(out, "- [x] {}", category).map_err(fmt_err)?;
            }
            for category in &report.sections.missing {
                writeln!(out, "- [ ] {}", category).map_err(fmt_err)?;
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn with_density_cap(mut self, cap: f64) -> Self {
        self.console_formatter = self.console_formatter.with_density_cap(cap);
        self
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::ScoringEngine;

    fn sample_report() -> ScoreReport {
        let analysis = ScoringEngine::default().analyze(
            "Experience\nPython developer with AWS, Docker and postgres skills.",
            "Looking for a Python engineer skilled in AWS, Docker, Kubernetes and PostgreSQL.",
        );
        ScoreReport::new("resume.txt", "job.md", analysis)
    }

    #[test]
    fn test_console_plain() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("Resume:          resume.txt"));
        assert!(output.contains("Keyword match"));
        assert!(output.contains("postgresql ~ postgres"));
        assert!(output.contains("- Education"));
        assert!(output.contains("+ Experience"));
    }

    #[test]
    fn test_console_summary_hides_details() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("Overall"));
        assert!(!output.contains("Missing:"));
    }

    #[test]
    fn test_console_density_uses_configured_cap() {
        let report = sample_report();

        let default = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(default.contains(&format!("{:>6.2} / 5\n", report.scores.keyword_density)));

        let output = ReportGenerator::new(false, false)
            .with_density_cap(10.0)
            .generate_report(&report, OutputFormat::Console)
            .unwrap();
        assert!(output.contains(&format!("{:>6.2} / 10\n", report.scores.keyword_density)));
        assert!(!output.contains(" / 5\n"));
    }

    #[test]
    fn test_json_contains_scores() {
        let report = sample_report();
        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let overall = value["scores"]["overall_score"].as_f64().unwrap();
        assert!((overall - report.scores.overall_score).abs() < 1e-9);
        assert_eq!(value["sections"]["detected"][0], "experience");
        assert_eq!(value["keywords"]["exact_matches"][0], "python");
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Resume Score Report"));
        assert!(output.contains("| Metric | Score |"));
        assert!(output.contains("- [x] Experience"));
        assert!(output.contains("- [ ] Achievements"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false, false);
        let report = sample_report();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, format).unwrap().is_empty());
        }
        assert!(generator.generate_report(&report, OutputFormat::Json).unwrap().starts_with('{'));
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");

        save_report_to_file("# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi");
    }
}

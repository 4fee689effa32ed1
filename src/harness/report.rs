//! Verdict aggregation and final report rendering
//!
//! Verdicts are collected while the run progresses and only formatted once
//! it is over, so the same run can be printed as text or JSON.

use colored::Colorize;
use serde::Serialize;

use crate::common::Result;

use super::verdict::{Status, Verdict};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Human-readable, one line per test case
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
}

/// Counts derived from the recorded verdicts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Percentage of passed cases, absent when nothing ran
    pub pass_rate: Option<f64>,
    /// 0 if every case passed, 1 otherwise
    pub exit_code: i32,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Append-only list of verdicts in execution order
#[derive(Debug, Default)]
pub struct Report {
    verdicts: Vec<Verdict>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: Verdict) {
        match verdict.status {
            Status::Passed => tracing::info!(scenario = %verdict.scenario, "passed: {}", verdict.name),
            Status::Failed => tracing::info!(scenario = %verdict.scenario, "FAILED: {}", verdict.name),
            Status::Skipped => {
                tracing::warn!(scenario = %verdict.scenario, "skipped: {} ({})", verdict.name, verdict.detail)
            }
        }
        self.verdicts.push(verdict);
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn summarize(&self) -> RunSummary {
        let total = self.verdicts.len();
        let count = |status: Status| self.verdicts.iter().filter(|v| v.status == status).count();
        let passed = count(Status::Passed);
        let failed = count(Status::Failed);
        let skipped = count(Status::Skipped);

        let pass_rate = if total > 0 {
            Some(passed as f64 / total as f64 * 100.0)
        } else {
            None
        };

        RunSummary {
            total,
            passed,
            failed,
            skipped,
            pass_rate,
            exit_code: if passed == total { 0 } else { 1 },
        }
    }

    pub fn render(&self, format: Format, title: &str) -> Result<String> {
        match format {
            Format::Text => Ok(self.render_text(title)),
            Format::Json => self.render_json(title),
        }
    }

    /// Render the human-readable report
    pub fn render_text(&self, title: &str) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        out.push_str(&format!("{}\n{}\n", title.white().bold(), rule));

        let mut current: Option<&str> = None;
        for verdict in &self.verdicts {
            if current != Some(verdict.scenario.as_str()) {
                out.push_str(&format!("\n{}\n", verdict.scenario.cyan()));
                current = Some(verdict.scenario.as_str());
            }

            let mark = match verdict.status {
                Status::Passed => "✓".green(),
                Status::Failed => "✗".red(),
                Status::Skipped => "-".yellow(),
            };
            out.push_str(&format!("  {} {}\n", mark, verdict.name));
            if !verdict.detail.is_empty() {
                out.push_str(&format!("      {}\n", verdict.detail.dimmed()));
            }
        }

        let summary = self.summarize();
        out.push_str(&format!("\n{}\n{}\n{}\n", rule, "TEST SUMMARY".bold(), rule));
        out.push_str(&format!("Total tests run: {}\n", summary.total));
        out.push_str(&format!("Tests passed: {}\n", summary.passed));
        out.push_str(&format!("Tests failed: {}\n", summary.failed));
        if summary.skipped > 0 {
            out.push_str(&format!("Tests skipped: {}\n", summary.skipped));
        }
        match summary.pass_rate {
            Some(rate) => out.push_str(&format!("Success rate: {:.1}%\n", rate)),
            None => out.push_str("No tests run\n"),
        }

        if summary.all_passed() {
            out.push_str(&format!("{}\n", "All tests passed!".green().bold()));
        } else {
            out.push_str(&format!("{}\n", "Some tests failed!".red().bold()));
        }

        out
    }

    /// Render the machine-readable report
    pub fn render_json(&self, title: &str) -> Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            title: &'a str,
            summary: RunSummary,
            verdicts: &'a [Verdict],
        }

        let doc = JsonReport {
            title,
            summary: self.summarize(),
            verdicts: &self.verdicts,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

// Fri Oct 16 2026 - Alex

use crate::orchestration::Report;
use colored::*;
use std::fmt::Write;

pub const TITLE: &str = "LETTERBOXD POPULAR FILMS - STREAMING AVAILABILITY";
pub const RULE_WIDTH: usize = 70;

/// Renders the sectioned text report written to stdout.
pub struct ReportGenerator {
    use_color: bool,
    show_urls: bool,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            use_color: true,
            show_urls: true,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_urls(mut self, show: bool) -> Self {
        self.show_urls = show;
        self
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn rule(&self) -> String {
        self.paint(&"=".repeat(RULE_WIDTH), |s| s.cyan())
    }

    pub fn header(&self) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.rule(),
            self.paint(TITLE, |s| s.cyan().bold()),
            self.rule()
        )
    }

    pub fn generate(&self, report: &Report) -> String {
        let mut out = String::new();
        let summary = &report.summary;

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.rule());
        let _ = writeln!(out, "{}", self.paint("RESULTS", |s| s.bold()));
        let _ = writeln!(out, "{}", self.rule());
        let _ = writeln!(out);

        let mut line = format!(
            "Summary: {} from cache, {} newly fetched",
            summary.from_cache, summary.fetched
        );
        if summary.failed > 0 {
            let _ = write!(line, " ({} failed)", summary.failed);
        }
        let _ = writeln!(out, "{}", line);
        let _ = writeln!(out);

        for entry in &report.entries {
            let marker = if entry.served_from_cache {
                format!(" {}", self.paint("[CACHED]", |s| s.yellow()))
            } else {
                String::new()
            };

            let availability = entry.availability.to_string();
            let availability = if entry.availability.is_failed() {
                self.paint(&availability, |s| s.red())
            } else {
                availability
            };

            let _ = writeln!(
                out,
                "{}. {}{}",
                entry.ordinal,
                self.paint(&entry.display_name, |s| s.bold()),
                marker
            );
            if self.show_urls {
                let _ = writeln!(out, "   URL: {}", entry.identity);
            }
            let _ = writeln!(out, "   Streaming: {}", availability);
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{}", self.rule());
        out
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

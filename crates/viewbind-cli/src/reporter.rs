//! Diagnostic rendering for the terminal.

use anyhow::{Context, Result};
use colored::Colorize;
use viewbind_common::{Diagnostic, DiagnosticCategory};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// Diagnostics as a pretty-printed JSON array of
    /// `{ category, code, target, messageText }` objects.
    pub fn render_json(diagnostics: &[Diagnostic]) -> Result<String> {
        serde_json::to_string_pretty(diagnostics).context("failed to serialize diagnostics")
    }

    /// One-line summary, e.g. `2 errors, 1 warning`. Empty when nothing was reported.
    pub fn render_summary(&self, diagnostics: &[Diagnostic]) -> String {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let warnings = diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count();
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(plural(errors, "error"));
        }
        if warnings > 0 {
            parts.push(plural(warnings, "warning"));
        }
        if parts.is_empty() {
            return String::new();
        }
        let summary = format!("Found {}.", parts.join(", "));
        if self.color && errors > 0 {
            summary.red().bold().to_string()
        } else {
            summary
        }
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);
        let target = if diagnostic.target.is_empty() {
            "<unknown>"
        } else {
            diagnostic.target.as_str()
        };
        format!(
            "{} - {} {}: {}",
            target, category, code, diagnostic.message_text
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("VB{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

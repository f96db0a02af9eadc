//! Report generation with multiple output formats
//!
//! Architecture: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - ValidationReport and FixReport are converted to various external representations
//! - Each formatter encapsulates the rules for its specific output format

use crate::domain::{
    Correction, FixReport, Severity, ValidationReport, Violation, WardenError, WardenResult,
};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Supported output formats for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors and grouping
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions workflow annotations
    GitHub,
}

impl OutputFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "github" => Some(Self::GitHub),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json", "github"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Maximum number of violations to include
    pub max_violations: Option<usize>,
    /// Minimum severity level to include
    pub min_severity: Option<Severity>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, max_violations: None, min_severity: None }
    }
}

/// Main report formatter that dispatches to specific formatters
pub struct ReportFormatter {
    options: ReportOptions,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation report in the specified format
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> WardenResult<String> {
        let filtered = self.filter_violations(&report.violations);

        match format {
            OutputFormat::Human => Ok(self.format_human(report, &filtered)),
            OutputFormat::Json => self.format_json(report, &filtered),
            OutputFormat::GitHub => Ok(self.format_github(&filtered)),
        }
    }

    /// Format a fix report in the specified format
    pub fn format_fix_report(&self, report: &FixReport, format: OutputFormat) -> WardenResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_fix_human(report)),
            OutputFormat::Json => self.format_fix_json(report),
            OutputFormat::GitHub => Ok(self.format_fix_github(&report.corrections)),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
        mut writer: W,
    ) -> WardenResult<()> {
        let formatted = self.format_report(report, format)?;
        writer.write_all(formatted.as_bytes()).map_err(|e| WardenError::Io { source: e })?;
        Ok(())
    }

    /// Filter violations based on report options
    fn filter_violations<'a>(&self, violations: &'a [Violation]) -> Vec<&'a Violation> {
        let mut filtered: Vec<&Violation> = violations
            .iter()
            .filter(|v| match self.options.min_severity {
                Some(min) => v.severity >= min,
                None => true,
            })
            .collect();

        if let Some(max) = self.options.max_violations {
            filtered.truncate(max);
        }

        filtered
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
        }
    }

    /// Format report in human-readable format
    fn format_human(&self, report: &ValidationReport, violations: &[&Violation]) -> String {
        let mut output = String::new();

        if violations.is_empty() {
            if self.options.use_colors {
                output.push_str("✅ \x1b[32mNo tab indentation found\x1b[0m\n");
            } else {
                output.push_str("✅ No tab indentation found\n");
            }
        } else {
            let icon = if report.has_errors() { "❌" } else { "⚠️" };
            if self.options.use_colors {
                let color = if report.has_errors() { "31" } else { "33" };
                output.push_str(&format!("{icon} \x1b[{color}mIndentation Violations Found\x1b[0m\n\n"));
            } else {
                output.push_str(&format!("{icon} Indentation Violations Found\n\n"));
            }

            let mut by_file: BTreeMap<&Path, Vec<&Violation>> = BTreeMap::new();
            for violation in violations {
                by_file.entry(&violation.file_path).or_default().push(violation);
            }

            for (file_path, file_violations) in by_file {
                output.push_str(&format!("📁 {}\n", file_path.display()));

                for violation in file_violations {
                    if self.options.use_colors {
                        output.push_str(&format!(
                            "  \x1b[2m{}\x1b[0m [\x1b[{}m{}\x1b[0m] {}\n",
                            violation.location,
                            Self::severity_color(violation.severity),
                            violation.severity.as_str(),
                            violation.message
                        ));
                    } else {
                        output.push_str(&format!(
                            "  {} [{}] {}\n",
                            violation.location,
                            violation.severity.as_str(),
                            violation.message
                        ));
                    }
                }
                output.push('\n');
            }
        }

        output.push_str(&self.format_summary(report));
        output
    }

    /// Format report in JSON format
    fn format_json(
        &self,
        report: &ValidationReport,
        violations: &[&Violation],
    ) -> WardenResult<String> {
        let json_violations: Vec<JsonValue> = violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "rule_id": v.rule_id,
                    "severity": v.severity.as_str(),
                    "file_path": v.file_path.display().to_string(),
                    "line": v.location.line,
                    "column": v.location.column,
                    "offset": v.location.offset,
                    "message": v.message,
                    "detected_at": v.detected_at.to_rfc3339(),
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "violations": json_violations,
            "summary": {
                "total_files": report.summary.total_files,
                "violations_by_severity": {
                    "error": report.summary.violations_by_severity.error,
                    "warning": report.summary.violations_by_severity.warning,
                },
                "execution_time_ms": report.summary.execution_time_ms,
                "validated_at": report.summary.validated_at.to_rfc3339(),
            },
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| WardenError::config(format!("JSON serialization failed: {e}")))
    }

    /// Format report for GitHub Actions
    fn format_github(&self, violations: &[&Violation]) -> String {
        let mut output = String::new();

        for violation in violations {
            let level = match violation.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            output.push_str(&format!(
                "::{} file={},title={} line={},col={}::{}\n",
                level,
                violation.file_path.display(),
                violation.rule_id,
                violation.location.line,
                violation.location.column,
                violation.message
            ));
        }

        output
    }

    /// Format a fix report in human-readable format
    fn format_fix_human(&self, report: &FixReport) -> String {
        let mut output = String::new();

        if report.corrections.is_empty() {
            if self.options.use_colors {
                output.push_str("✅ \x1b[32mNothing to fix\x1b[0m\n");
            } else {
                output.push_str("✅ Nothing to fix\n");
            }
        } else {
            output.push_str("🔧 Corrections Applied\n\n");

            let mut by_file: BTreeMap<&Path, Vec<&Correction>> = BTreeMap::new();
            for correction in &report.corrections {
                by_file.entry(&correction.file_path).or_default().push(correction);
            }

            for (file_path, corrections) in by_file {
                output.push_str(&format!("📁 {}\n", file_path.display()));
                for correction in corrections {
                    output.push_str(&format!(
                        "  {} [{}] corrected\n",
                        correction.location, correction.rule_id
                    ));
                }
                output.push('\n');
            }
        }

        let seconds = (report.summary.execution_time_ms as f64) / 1000.0;
        output.push_str(&format!(
            "📊 Summary: {} correction{} in {} of {} files ({:.1}s)\n",
            report.corrections.len(),
            if report.corrections.len() == 1 { "" } else { "s" },
            report.summary.files_changed,
            report.summary.total_files,
            seconds
        ));

        output
    }

    /// Format a fix report in JSON format
    fn format_fix_json(&self, report: &FixReport) -> WardenResult<String> {
        let json_corrections: Vec<JsonValue> = report
            .corrections
            .iter()
            .map(|c| {
                serde_json::json!({
                    "rule_id": c.rule_id,
                    "file_path": c.file_path.display().to_string(),
                    "line": c.location.line,
                    "column": c.location.column,
                    "offset": c.location.offset,
                    "applied_at": c.applied_at.to_rfc3339(),
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "corrections": json_corrections,
            "summary": {
                "total_files": report.summary.total_files,
                "files_changed": report.summary.files_changed,
                "execution_time_ms": report.summary.execution_time_ms,
                "fixed_at": report.summary.fixed_at.to_rfc3339(),
            },
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| WardenError::config(format!("JSON serialization failed: {e}")))
    }

    /// Format corrections for GitHub Actions
    fn format_fix_github(&self, corrections: &[Correction]) -> String {
        let mut output = String::new();

        for correction in corrections {
            output.push_str(&format!(
                "::notice file={},title={} line={},col={}::corrected tab indentation\n",
                correction.file_path.display(),
                correction.rule_id,
                correction.location.line,
                correction.location.column,
            ));
        }

        output
    }

    /// Format the summary section of a validation report
    fn format_summary(&self, report: &ValidationReport) -> String {
        let mut summary = String::new();

        let total_violations = report.summary.violations_by_severity.total();
        let seconds = (report.summary.execution_time_ms as f64) / 1000.0;

        if self.options.use_colors {
            summary.push_str("📊 \x1b[1mSummary:\x1b[0m ");
        } else {
            summary.push_str("📊 Summary: ");
        }

        if total_violations == 0 {
            if self.options.use_colors {
                summary.push_str(&format!(
                    "\x1b[32m0 violations\x1b[0m in {} files ({:.1}s)\n",
                    report.summary.total_files, seconds
                ));
            } else {
                summary.push_str(&format!(
                    "0 violations in {} files ({:.1}s)\n",
                    report.summary.total_files, seconds
                ));
            }
        } else {
            let mut parts = Vec::new();

            if report.summary.violations_by_severity.error > 0 {
                let count = report.summary.violations_by_severity.error;
                let text = format!("{} error{}", count, if count == 1 { "" } else { "s" });
                if self.options.use_colors {
                    parts.push(format!("\x1b[31m{text}\x1b[0m"));
                } else {
                    parts.push(text);
                }
            }

            if report.summary.violations_by_severity.warning > 0 {
                let count = report.summary.violations_by_severity.warning;
                let text = format!("{} warning{}", count, if count == 1 { "" } else { "s" });
                if self.options.use_colors {
                    parts.push(format!("\x1b[33m{text}\x1b[0m"));
                } else {
                    parts.push(text);
                }
            }

            summary.push_str(&format!(
                "{} in {} files ({:.1}s)\n",
                parts.join(", "),
                report.summary.total_files,
                seconds
            ));
        }

        summary
    }
}

//! Core domain models for indentation violations and correction results
//!
//! Architecture: Rich Domain Models - Violations and corrections are entities with behavior
//! - Violations can classify themselves and format their own display
//! - ValidationReport and FixReport act as aggregate roots over their collections
//! - Corrections always carry locations resolved against the original, pre-rewrite text

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels recognized by the configuration surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warnings that should be addressed but don't block builds
    Warning,
    /// Errors that block commits and fail CI/CD builds
    Error,
}

impl Severity {
    /// Whether this severity level should cause validation to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Warning
    }
}

/// A resolved position within a source text
///
/// `offset` is the byte offset the location was resolved from. For locations
/// attached to a [`Correction`] it always refers to the original text as it
/// was before the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Line number, 1-indexed
    pub line: u32,
    /// Column number, 1-indexed, counted in characters
    pub column: u32,
    /// Byte offset into the text this location was resolved from
    pub offset: usize,
}

impl Location {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A style violation detected during validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the rule that detected this violation
    pub rule_id: String,
    /// Severity level of this violation
    pub severity: Severity,
    /// File where the violation was found
    pub file_path: PathBuf,
    /// Resolved position of the violation
    pub location: Location,
    /// Human-readable description of the violation
    pub message: String,
    /// When this violation was detected
    pub detected_at: DateTime<Utc>,
}

impl Violation {
    /// Create a new violation
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        file_path: PathBuf,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            file_path,
            location,
            message: message.into(),
            detected_at: Utc::now(),
        }
    }

    /// Whether this violation is blocking (prevents commits/builds)
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        format!(
            "{}:{} [{}] {}",
            self.file_path.display(),
            self.location,
            self.severity.as_str(),
            self.message
        )
    }
}

/// A record of one applied fix
///
/// Created only during a correction pass, one per violating range that was
/// actually rewritten. The location refers to the original text even though
/// the rewrite mutates the buffer incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    /// Identifier of the rule that applied this fix
    pub rule_id: String,
    /// File the fix was applied to
    pub file_path: PathBuf,
    /// Position of the fixed range in the original text
    pub location: Location,
    /// When this fix was applied
    pub applied_at: DateTime<Utc>,
}

impl Correction {
    /// Create a new correction record
    pub fn new(rule_id: impl Into<String>, file_path: PathBuf, location: Location) -> Self {
        Self {
            rule_id: rule_id.into(),
            file_path,
            location,
            applied_at: Utc::now(),
        }
    }

    /// Format correction for display
    pub fn format_display(&self) -> String {
        format!(
            "{}:{} [{}] corrected",
            self.file_path.display(),
            self.location,
            self.rule_id
        )
    }
}

/// Count of violations by severity level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub error: usize,
    pub warning: usize,
}

impl ViolationCounts {
    /// Total number of violations across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning
    }

    /// Whether there are any blocking violations
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a violation to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
        }
    }
}

/// Summary statistics for a validation report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Total number of files analyzed
    pub total_files: usize,
    /// Number of violations by severity level
    pub violations_by_severity: ViolationCounts,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when validation was performed
    pub validated_at: DateTime<Utc>,
}

/// Complete validation report containing all violations and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All violations found during validation
    pub violations: Vec<Violation>,
    /// Summary statistics
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
            summary: ValidationSummary { validated_at: Utc::now(), ..Default::default() },
        }
    }

    /// Add a violation to the report
    pub fn add_violation(&mut self, violation: Violation) {
        self.summary.violations_by_severity.add(violation.severity);
        self.violations.push(violation);
    }

    /// Whether the report contains any violations
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Whether the report contains blocking violations (errors)
    pub fn has_errors(&self) -> bool {
        self.summary.violations_by_severity.has_blocking()
    }

    /// Get violations of a specific severity
    pub fn violations_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    /// Set the number of files analyzed
    pub fn set_files_analyzed(&mut self, count: usize) {
        self.summary.total_files = count;
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        for violation in other.violations {
            self.add_violation(violation);
        }
        self.summary.total_files += other.summary.total_files;
    }

    /// Sort violations by file path and location for consistent output
    pub fn sort_violations(&mut self) {
        self.violations.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then_with(|| a.location.offset.cmp(&b.location.offset))
                .then_with(|| a.severity.cmp(&b.severity))
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a fix report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixSummary {
    /// Total number of files processed
    pub total_files: usize,
    /// Number of files that received at least one correction
    pub files_changed: usize,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when the fix pass was performed
    pub fixed_at: DateTime<Utc>,
}

/// Complete fix report containing all applied corrections and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixReport {
    /// All corrections applied during the fix pass
    pub corrections: Vec<Correction>,
    /// Summary statistics
    pub summary: FixSummary,
}

impl FixReport {
    /// Create a new empty fix report
    pub fn new() -> Self {
        Self {
            corrections: Vec::new(),
            summary: FixSummary { fixed_at: Utc::now(), ..Default::default() },
        }
    }

    /// Record the corrections applied to one file
    pub fn add_file_corrections(&mut self, corrections: Vec<Correction>) {
        if !corrections.is_empty() {
            self.summary.files_changed += 1;
        }
        self.corrections.extend(corrections);
    }

    /// Whether any corrections were applied
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }

    /// Set the number of files processed
    pub fn set_files_processed(&mut self, count: usize) {
        self.summary.total_files = count;
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }

    /// Sort corrections by file path and original offset for consistent output
    pub fn sort_corrections(&mut self) {
        self.corrections.sort_by(|a, b| {
            a.file_path.cmp(&b.file_path).then_with(|| a.location.offset.cmp(&b.location.offset))
        });
    }
}

impl Default for FixReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur in the calling layer
///
/// The scanning and rewriting core has no fatal error path of its own;
/// these variants cover configuration, I/O, and orchestration failures.
#[derive(Debug, thiserror::Error)]
pub enum WardenError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Path pattern compilation failed
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Analysis failed for a specific file
    #[error("Analysis error in {file}: {message}")]
    Analysis { file: String, message: String },

    /// Correction pass failed for a specific file
    #[error("Correction error in {file}: {message}")]
    Correction { file: String, message: String },
}

impl WardenError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern { message: message.into() }
    }

    /// Create an analysis error
    pub fn analysis(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Analysis { file: file.into(), message: message.into() }
    }

    /// Create a correction error
    pub fn correction(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Correction { file: file.into(), message: message.into() }
    }
}

/// Result type for Warden operations
pub type WardenResult<T> = Result<T, WardenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_violation_creation() {
        let violation = Violation::new(
            "spaces_not_tabs",
            Severity::Error,
            PathBuf::from("src/lib.rs"),
            Location::new(3, 1, 42),
            "Line begins with tab indentation",
        );

        assert_eq!(violation.rule_id, "spaces_not_tabs");
        assert_eq!(violation.severity, Severity::Error);
        assert_eq!(violation.file_path, Path::new("src/lib.rs"));
        assert_eq!(violation.location.line, 3);
        assert_eq!(violation.location.offset, 42);
        assert!(violation.is_blocking());
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(
            "spaces_not_tabs",
            Severity::Warning,
            PathBuf::from("src/lib.rs"),
            Location::new(7, 1, 120),
            "Line begins with tab indentation",
        );

        let display = violation.format_display();
        assert!(display.contains("src/lib.rs:7:1"));
        assert!(display.contains("[warning]"));
        assert!(!violation.is_blocking());
    }

    #[test]
    fn test_validation_report() {
        let mut report = ValidationReport::new();

        report.add_violation(Violation::new(
            "spaces_not_tabs",
            Severity::Error,
            PathBuf::from("src/main.rs"),
            Location::new(1, 1, 0),
            "Error message",
        ));

        report.add_violation(Violation::new(
            "spaces_not_tabs",
            Severity::Warning,
            PathBuf::from("src/lib.rs"),
            Location::new(2, 1, 15),
            "Warning message",
        ));

        assert!(report.has_violations());
        assert!(report.has_errors());
        assert_eq!(report.summary.violations_by_severity.total(), 2);
        assert_eq!(report.summary.violations_by_severity.error, 1);
        assert_eq!(report.summary.violations_by_severity.warning, 1);
    }

    #[test]
    fn test_report_sorting() {
        let mut report = ValidationReport::new();
        report.add_violation(Violation::new(
            "spaces_not_tabs",
            Severity::Warning,
            PathBuf::from("b.rs"),
            Location::new(5, 1, 80),
            "later",
        ));
        report.add_violation(Violation::new(
            "spaces_not_tabs",
            Severity::Warning,
            PathBuf::from("a.rs"),
            Location::new(9, 1, 200),
            "earlier file",
        ));
        report.add_violation(Violation::new(
            "spaces_not_tabs",
            Severity::Warning,
            PathBuf::from("b.rs"),
            Location::new(1, 1, 0),
            "earlier offset",
        ));

        report.sort_violations();

        assert_eq!(report.violations[0].file_path, Path::new("a.rs"));
        assert_eq!(report.violations[1].location.offset, 0);
        assert_eq!(report.violations[2].location.offset, 80);
    }

    #[test]
    fn test_fix_report() {
        let mut report = FixReport::new();

        report.add_file_corrections(vec![
            Correction::new("spaces_not_tabs", PathBuf::from("a.rs"), Location::new(1, 1, 0)),
            Correction::new("spaces_not_tabs", PathBuf::from("a.rs"), Location::new(2, 1, 20)),
        ]);
        report.add_file_corrections(vec![]);
        report.set_files_processed(2);

        assert!(report.has_corrections());
        assert_eq!(report.corrections.len(), 2);
        assert_eq!(report.summary.files_changed, 1);
        assert_eq!(report.summary.total_files, 2);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Error.is_blocking());
        assert!(!Severity::Warning.is_blocking());
        assert_eq!(Severity::default(), Severity::Warning);
    }
}

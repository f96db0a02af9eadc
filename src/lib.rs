//! Tab Warden - indentation style enforcement for codebases
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from infrastructure concerns
//! - Clean boundaries between the match-and-rewrite core and external collaborators
//! - The validator facade provides whole-tree check and fix workflows

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod report;
pub mod rules;
pub mod source;

// Re-export main types for convenient access
pub use domain::{
    Correction, FixReport, Location, Severity, ValidationReport, Violation, WardenError,
    WardenResult,
};

pub use config::{ConfigBuilder, PathConfig, WardenConfig, DEFAULT_CONFIG_FILES};

pub use analyzer::{AnalysisOptions, Analyzer, PathFilter};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use rules::{EnablementFilter, Rule, RuleDescription, SpacesNotTabs};

pub use source::{ExcludedSpan, LexicalClassifier, SourceFile, SpanClassifier, Writer};

use std::path::{Path, PathBuf};

/// Main validator providing high-level check and fix operations
pub struct WardenValidator {
    analyzer: Analyzer,
    report_formatter: ReportFormatter,
}

/// Options for validation workflows
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Report options
    pub report_options: ReportOptions,
    /// Analysis options
    pub analysis_options: AnalysisOptions,
}

impl WardenValidator {
    /// Create a new validator with the given configuration
    pub fn new_with_config(config: WardenConfig) -> WardenResult<Self> {
        let analyzer = Analyzer::new(config)?;
        Ok(Self { analyzer, report_formatter: ReportFormatter::default() })
    }

    /// Create a validator with default configuration
    pub fn new() -> WardenResult<Self> {
        Self::new_with_config(WardenConfig::default())
    }

    /// Create a validator loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> WardenResult<Self> {
        let config = WardenConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// Validate a single file
    pub fn validate_file<P: AsRef<Path>>(&self, file_path: P) -> WardenResult<ValidationReport> {
        let violations = self.analyzer.check_file(file_path)?;

        let mut report = ValidationReport::new();
        for violation in violations {
            report.add_violation(violation);
        }
        report.set_files_analyzed(1);

        Ok(report)
    }

    /// Validate files or directories with custom options
    pub fn validate_with_options<P: AsRef<Path>>(
        &self,
        paths: Vec<P>,
        options: &ValidationOptions,
    ) -> WardenResult<ValidationReport> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        self.analyzer.check_paths(&paths, &options.analysis_options)
    }

    /// Validate files or directories with default options
    pub fn validate_paths<P: AsRef<Path>>(&self, paths: Vec<P>) -> WardenResult<ValidationReport> {
        self.validate_with_options(paths, &ValidationOptions::default())
    }

    /// Validate an entire directory tree
    pub fn validate_directory<P: AsRef<Path>>(
        &self,
        root: P,
        options: &AnalysisOptions,
    ) -> WardenResult<ValidationReport> {
        self.analyzer.check_directory(root, options)
    }

    /// Fix a single file, writing corrected contents when anything applied
    pub fn fix_file<P: AsRef<Path>>(&self, file_path: P) -> WardenResult<Vec<Correction>> {
        self.analyzer.fix_file(file_path)
    }

    /// Fix files or directories, returning the applied corrections
    pub fn fix_paths<P: AsRef<Path>>(
        &self,
        paths: Vec<P>,
        options: &AnalysisOptions,
    ) -> WardenResult<FixReport> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        self.analyzer.fix_paths(&paths, options)
    }

    /// Format a validation report for output
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> WardenResult<String> {
        self.report_formatter.format_report(report, format)
    }

    /// Format a fix report for output
    pub fn format_fix_report(&self, report: &FixReport, format: OutputFormat) -> WardenResult<String> {
        self.report_formatter.format_fix_report(report, format)
    }

    /// Descriptions of the configured rules
    pub fn rule_descriptions(&self) -> impl Iterator<Item = &RuleDescription> {
        self.analyzer.rule_descriptions()
    }
}

/// Convenience function to create a validator with default settings
pub fn create_validator() -> WardenResult<WardenValidator> {
    WardenValidator::new()
}

/// Convenience function to validate paths with default settings
pub fn validate_paths<P: AsRef<Path>>(paths: Vec<P>) -> WardenResult<ValidationReport> {
    let validator = WardenValidator::new()?;
    validator.validate_paths(paths)
}

/// Convenience function to fix paths with default settings
pub fn fix_paths<P: AsRef<Path>>(paths: Vec<P>) -> WardenResult<FixReport> {
    let validator = WardenValidator::new()?;
    validator.fix_paths(paths, &AnalysisOptions::default())
}

//! Analysis orchestration
//!
//! Architecture: Domain Services - Analyzer coordinates validation and correction workflows
//! - Coordinates path filtering, rule dispatch, and result aggregation
//! - The check path is read-only and may run in parallel across files
//! - The fix path runs sequentially so no two invocations alias storage

pub mod path_filter;

pub use path_filter::PathFilter;

use crate::config::WardenConfig;
use crate::domain::{Correction, FixReport, ValidationReport, Violation, WardenResult};
use crate::rules::{builtin_rules, Rule, RuleDescription};
use crate::source::{FileWriter, LexicalClassifier, SourceFile, SpanClassifier};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Orchestrates validation and correction over files and directory trees
pub struct Analyzer {
    /// Rules dispatched against every analyzed file
    rules: Vec<Box<dyn Rule>>,
    /// Decides which files are analyzed
    path_filter: PathFilter,
    /// Classifies comment/string spans before rules run
    classifier: Box<dyn SpanClassifier>,
}

/// Options for customizing analysis behavior
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Whether the check path uses parallel processing
    pub parallel: bool,
    /// Maximum number of files to analyze
    pub max_files: Option<usize>,
    /// Whether to continue on errors or fail fast
    pub fail_fast: bool,
    /// Additional exclude patterns applied for this invocation only
    pub exclude_patterns: Vec<String>,
    /// Whether to skip .wardenignore files
    pub ignore_ignore_files: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_files: None,
            fail_fast: false,
            exclude_patterns: Vec::new(),
            ignore_ignore_files: false,
        }
    }
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: WardenConfig) -> WardenResult<Self> {
        let rules = builtin_rules(&config);

        let ignore_file = if config.paths.ignore_file.as_deref() == Some("") {
            None
        } else {
            config.paths.ignore_file.clone()
        };
        let path_filter = PathFilter::new(config.paths.patterns.clone(), ignore_file)?;

        Ok(Self { rules, path_filter, classifier: Box::new(LexicalClassifier) })
    }

    /// Create an analyzer with default configuration
    pub fn with_defaults() -> WardenResult<Self> {
        Self::new(WardenConfig::default())
    }

    /// Substitute the span classifier used for all subsequent analysis
    pub fn with_classifier(mut self, classifier: Box<dyn SpanClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Descriptions of every configured rule
    pub fn rule_descriptions(&self) -> impl Iterator<Item = &RuleDescription> {
        self.rules.iter().map(|rule| rule.description())
    }

    /// Check a single file and return violations
    pub fn check_file<P: AsRef<Path>>(&self, file_path: P) -> WardenResult<Vec<Violation>> {
        let file_path = file_path.as_ref();

        if !self.path_filter.should_analyze(file_path)? {
            return Ok(Vec::new());
        }

        let file = SourceFile::load(file_path, self.classifier.as_ref())?;
        Ok(self.rules.iter().flat_map(|rule| rule.validate(&file)).collect())
    }

    /// Fix a single file, writing corrected contents back when anything applied
    pub fn fix_file<P: AsRef<Path>>(&self, file_path: P) -> WardenResult<Vec<Correction>> {
        let file_path = file_path.as_ref();

        if !self.path_filter.should_analyze(file_path)? {
            return Ok(Vec::new());
        }

        // Every rule corrects against the snapshot taken at entry and writes
        // at most once through its own writer.
        let file = SourceFile::load(file_path, self.classifier.as_ref())?;
        let mut corrections = Vec::new();
        for rule in &self.rules {
            let mut writer = FileWriter::new(file_path);
            corrections.extend(rule.correct(&file, &mut writer)?);
        }
        Ok(corrections)
    }

    /// Check multiple files or directories and return a validation report
    pub fn check_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> WardenResult<ValidationReport> {
        let start_time = Instant::now();

        let files = self.collect_files(paths, options)?;
        let total_files = files.len();

        let violations = if options.parallel && files.len() > 1 {
            self.check_files_parallel(&files, options)?
        } else {
            self.check_files_sequential(&files, options)?
        };

        let mut report = ValidationReport::new();
        for violation in violations {
            report.add_violation(violation);
        }
        report.set_files_analyzed(total_files);
        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        report.sort_violations();

        Ok(report)
    }

    /// Fix multiple files or directories and return a fix report
    ///
    /// Files are processed one at a time; the correction pass owns each
    /// file's buffer exclusively for the duration of its rewrite.
    pub fn fix_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> WardenResult<FixReport> {
        let start_time = Instant::now();

        let files = self.collect_files(paths, options)?;
        let total_files = files.len();

        let mut report = FixReport::new();
        for file_path in &files {
            match self.fix_file(file_path) {
                Ok(corrections) => report.add_file_corrections(corrections),
                Err(e) => {
                    if options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("Failed to fix {}: {}", file_path.display(), e);
                }
            }
        }

        report.set_files_processed(total_files);
        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        report.sort_corrections();

        Ok(report)
    }

    /// Check a directory tree and return a validation report
    pub fn check_directory<P: AsRef<Path>>(
        &self,
        root: P,
        options: &AnalysisOptions,
    ) -> WardenResult<ValidationReport> {
        self.check_paths(&[root.as_ref()], options)
    }

    /// Expand the given paths into the filtered list of files to analyze
    fn collect_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> WardenResult<Vec<PathBuf>> {
        let mut filter = self.path_filter.clone();
        for pattern in &options.exclude_patterns {
            filter.add_pattern(pattern)?;
        }
        if options.ignore_ignore_files {
            filter.disable_ignore_files();
        }

        let mut files = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_file() {
                files.extend(filter.filter_paths(&[path])?);
            } else if path.is_dir() {
                files.extend(filter.find_files(path)?);
            }
        }

        if let Some(max_files) = options.max_files {
            files.truncate(max_files);
        }

        Ok(files)
    }

    fn check_files_sequential(
        &self,
        files: &[PathBuf],
        options: &AnalysisOptions,
    ) -> WardenResult<Vec<Violation>> {
        let mut all_violations = Vec::new();

        for file_path in files {
            match self.check_file(file_path) {
                Ok(violations) => all_violations.extend(violations),
                Err(e) => {
                    if options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("Failed to analyze {}: {}", file_path.display(), e);
                }
            }
        }

        Ok(all_violations)
    }

    fn check_files_parallel(
        &self,
        files: &[PathBuf],
        options: &AnalysisOptions,
    ) -> WardenResult<Vec<Violation>> {
        let results: Vec<(PathBuf, WardenResult<Vec<Violation>>)> = files
            .par_iter()
            .map(|file_path| (file_path.clone(), self.check_file(file_path)))
            .collect();

        let mut all_violations = Vec::new();
        for (file_path, result) in results {
            match result {
                Ok(violations) => all_violations.extend(violations),
                Err(e) => {
                    if options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("Failed to analyze {}: {}", file_path.display(), e);
                }
            }
        }

        Ok(all_violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::domain::Severity;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_single_file() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.c");
        fs::write(&file_path, "\tint x;\nint y;\n")?;

        let analyzer = Analyzer::with_defaults()?;
        let violations = analyzer.check_file(&file_path)?;

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "spaces_not_tabs");
        assert_eq!(violations[0].location.line, 1);

        Ok(())
    }

    #[test]
    fn test_check_directory() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src"))?;
        fs::create_dir_all(root.join("build"))?;
        fs::write(root.join("src/a.c"), "\tindented\n")?;
        fs::write(root.join("src/b.c"), "clean\n")?;
        fs::write(root.join("build/c.c"), "\tignored\n")?;

        let analyzer = Analyzer::with_defaults()?;
        let report = analyzer.check_directory(root, &AnalysisOptions::default())?;

        // build/ is excluded by the default patterns
        assert_eq!(report.summary.total_files, 2);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].file_path.ends_with("src/a.c"));

        Ok(())
    }

    #[test]
    fn test_fix_paths_rewrites_files() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.c"), "\tone\n\t\ttwo\n")?;
        fs::write(root.join("b.c"), "clean\n")?;

        let analyzer = Analyzer::with_defaults()?;
        let report = analyzer.fix_paths(&[root], &AnalysisOptions::default())?;

        assert_eq!(report.corrections.len(), 2);
        assert_eq!(report.summary.files_changed, 1);
        assert_eq!(report.summary.total_files, 2);
        assert_eq!(fs::read_to_string(root.join("a.c"))?, "    one\n        two\n");
        assert_eq!(fs::read_to_string(root.join("b.c"))?, "clean\n");

        // A second pass finds nothing left to fix
        let again = analyzer.fix_paths(&[root], &AnalysisOptions::default())?;
        assert!(!again.has_corrections());

        Ok(())
    }

    #[test]
    fn test_fix_respects_configured_width() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a.c");
        fs::write(&file_path, "\tx\n")?;

        let config = ConfigBuilder::new()
            .severity(Severity::Error)
            .indent_width(2)
            .build()?;
        let analyzer = Analyzer::new(config)?;
        let corrections = analyzer.fix_file(&file_path)?;

        assert_eq!(corrections.len(), 1);
        assert_eq!(fs::read_to_string(&file_path)?, "  x\n");

        Ok(())
    }

    #[test]
    fn test_unreadable_file_skipped_without_fail_fast() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("good.c"), "\tx\n")?;
        fs::write(root.join("bad.c"), [0xFF, 0xFE, 0xFD])?;

        let analyzer = Analyzer::with_defaults()?;

        let options = AnalysisOptions { parallel: false, ..Default::default() };
        let report = analyzer.check_paths(&[root], &options)?;
        assert_eq!(report.violations.len(), 1);

        let options = AnalysisOptions { parallel: false, fail_fast: true, ..Default::default() };
        assert!(analyzer.check_paths(&[root], &options).is_err());

        Ok(())
    }

    #[test]
    fn test_max_files_option() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.c"), "\tx\n")?;
        fs::write(root.join("b.c"), "\ty\n")?;

        let analyzer = Analyzer::with_defaults()?;
        let options = AnalysisOptions { max_files: Some(1), ..Default::default() };
        let report = analyzer.check_paths(&[root], &options)?;

        assert_eq!(report.summary.total_files, 1);

        Ok(())
    }

    #[test]
    fn test_invocation_exclude_patterns() -> WardenResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.c"), "\tx\n")?;
        fs::write(root.join("skip.c"), "\ty\n")?;

        let analyzer = Analyzer::with_defaults()?;
        let options = AnalysisOptions {
            exclude_patterns: vec!["skip.c".to_string()],
            ..Default::default()
        };
        let report = analyzer.check_paths(&[root], &options)?;

        assert_eq!(report.summary.total_files, 1);
        assert!(report.violations[0].file_path.ends_with("a.c"));

        Ok(())
    }

    #[test]
    fn test_rule_descriptions() {
        let analyzer = Analyzer::with_defaults().unwrap();
        let ids: Vec<&str> = analyzer.rule_descriptions().map(|d| d.id).collect();
        assert_eq!(ids, vec!["spaces_not_tabs"]);
    }
}

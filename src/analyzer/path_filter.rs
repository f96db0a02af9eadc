//! Path filtering using .gitignore-style patterns
//!
//! Architecture: Service Layer - PathFilter owns the include/exclude decision
//! - Patterns are evaluated in order; the last matching pattern wins
//! - `.wardenignore` files are discovered walking up from each candidate path

use crate::domain::{WardenError, WardenResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manages path filtering using gitignore-style patterns
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<FilterPattern>,
    ignore_filename: Option<String>,
}

/// A single compiled filter pattern
#[derive(Debug, Clone)]
struct FilterPattern {
    pattern: glob::Pattern,
    /// `!`-prefixed patterns re-include paths excluded earlier
    is_include: bool,
    original: String,
}

impl FilterPattern {
    fn parse(raw: &str) -> WardenResult<Self> {
        let (is_include, body) = match raw.strip_prefix('!') {
            Some(stripped) => (true, stripped),
            None => (false, raw),
        };

        let pattern = glob::Pattern::new(body)
            .map_err(|e| WardenError::pattern(format!("Invalid pattern '{body}': {e}")))?;

        Ok(Self { pattern, is_include, original: body.to_string() })
    }

    /// Patterns without a slash match the file name alone, like .gitignore
    fn matches(&self, path: &Path) -> bool {
        if self.original.contains('/') {
            self.pattern.matches(&path.to_string_lossy())
        } else {
            path.file_name()
                .map(|name| self.pattern.matches(&name.to_string_lossy()))
                .unwrap_or(false)
        }
    }
}

impl PathFilter {
    /// Create a new path filter with the given patterns
    pub fn new(patterns: Vec<String>, ignore_filename: Option<String>) -> WardenResult<Self> {
        let patterns = patterns
            .iter()
            .map(|raw| FilterPattern::parse(raw))
            .collect::<WardenResult<Vec<_>>>()?;

        Ok(Self { patterns, ignore_filename })
    }

    /// Create a default path filter with sensible exclusions
    pub fn with_defaults() -> WardenResult<Self> {
        Self::new(
            vec![
                "target/**".to_string(),
                "**/node_modules/**".to_string(),
                "**/.git/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
            ],
            Some(".wardenignore".to_string()),
        )
    }

    /// Add a pattern to the filter
    pub fn add_pattern(&mut self, pattern: &str) -> WardenResult<()> {
        self.patterns.push(FilterPattern::parse(pattern)?);
        Ok(())
    }

    /// Stop discovering and applying ignore files
    pub fn disable_ignore_files(&mut self) {
        self.ignore_filename = None;
    }

    /// Check whether a file should be analyzed
    pub fn should_analyze<P: AsRef<Path>>(&self, path: P) -> WardenResult<bool> {
        let path = path.as_ref();

        let mut include = true;
        for pattern in &self.patterns {
            if pattern.matches(path) {
                include = pattern.is_include;
            }
        }

        if !include {
            return Ok(false);
        }

        if self.ignore_filename.is_some() && self.is_ignored_by_files(path)? {
            return Ok(false);
        }

        Ok(true)
    }

    /// Walk up the directory tree applying every discovered ignore file
    fn is_ignored_by_files(&self, path: &Path) -> WardenResult<bool> {
        let filename = match &self.ignore_filename {
            Some(name) => name,
            None => return Ok(false),
        };

        let mut ignored = false;
        let mut current_dir = path.parent();

        while let Some(dir) = current_dir {
            let ignore_file = dir.join(filename);

            if ignore_file.exists() {
                for pattern in self.load_ignore_file(&ignore_file)? {
                    if let Ok(relative) = path.strip_prefix(dir) {
                        if pattern.matches(relative) {
                            ignored = !pattern.is_include;
                        }
                    }
                }
            }

            current_dir = dir.parent();
        }

        Ok(ignored)
    }

    /// Load patterns from an ignore file, skipping blanks, comments, and
    /// invalid entries
    fn load_ignore_file(&self, path: &Path) -> WardenResult<Vec<FilterPattern>> {
        let content = fs::read_to_string(path).map_err(|e| {
            WardenError::config(format!("Failed to read ignore file '{}': {}", path.display(), e))
        })?;

        let mut patterns = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match FilterPattern::parse(line) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    tracing::warn!("Skipping pattern '{}' in {}: {}", line, path.display(), e);
                }
            }
        }

        Ok(patterns)
    }

    /// Get all files that should be analyzed in a directory tree
    pub fn find_files<P: AsRef<Path>>(&self, root: P) -> WardenResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() && self.should_analyze(path)? {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Filter a list of paths to only those that should be analyzed
    pub fn filter_paths<P: AsRef<Path>>(&self, paths: &[P]) -> WardenResult<Vec<PathBuf>> {
        let mut filtered = Vec::new();
        for path in paths {
            if self.should_analyze(path)? {
                filtered.push(path.as_ref().to_path_buf());
            }
        }
        Ok(filtered)
    }
}

//! Configuration loading and management
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to clean domain values at the boundary
//! - Defaults are embedded in the domain, not infrastructure
//! - The rule description itself is not configurable; only severity, width,
//!   and path selection are

use crate::domain::{Severity, WardenError, WardenResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file names probed, in order, when none is given explicitly
pub const DEFAULT_CONFIG_FILES: &[&str] =
    &["tab_warden.yaml", "tab_warden.yml", ".tab_warden.yaml"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Configuration format version
    pub version: String,
    /// Severity assigned to reported violations
    #[serde(default)]
    pub severity: Severity,
    /// Spaces substituted per tab during correction
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Path filtering configuration
    #[serde(default)]
    pub paths: PathConfig,
}

/// Path filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Include/exclude patterns (gitignore-style, `!` prefix re-includes)
    pub patterns: Vec<String>,
    /// Optional ignore file name discovered up the directory tree
    pub ignore_file: Option<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                "target/**".to_string(),
                "**/node_modules/**".to_string(),
                "**/.git/**".to_string(),
                "**/*.generated.*".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
            ],
            ignore_file: Some(".wardenignore".to_string()),
        }
    }
}

fn default_indent_width() -> usize {
    4
}

impl WardenConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WardenResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            WardenError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            WardenError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> WardenResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| WardenError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            severity: Severity::Warning,
            indent_width: default_indent_width(),
            paths: PathConfig::default(),
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> WardenResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(WardenError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        if self.indent_width == 0 {
            return Err(WardenError::config(
                "indent_width must be at least 1".to_string(),
            ));
        }

        for pattern in &self.paths.patterns {
            let raw = pattern.strip_prefix('!').unwrap_or(pattern);
            glob::Pattern::new(raw).map_err(|e| {
                WardenError::config(format!("Invalid path pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> WardenResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| WardenError::config(format!("Failed to serialize config: {e}")))
    }
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: WardenConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self { config: WardenConfig::default() }
    }

    /// Set the violation severity
    pub fn severity(mut self, severity: Severity) -> Self {
        self.config.severity = severity;
        self
    }

    /// Set the number of spaces substituted per tab
    pub fn indent_width(mut self, width: usize) -> Self {
        self.config.indent_width = width;
        self
    }

    /// Add a path pattern
    pub fn add_path_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.paths.patterns.push(pattern.into());
        self
    }

    /// Set the ignore file name
    pub fn ignore_file(mut self, filename: impl Into<String>) -> Self {
        self.config.paths.ignore_file = Some(filename.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> WardenResult<WardenConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WardenConfig::default();

        assert_eq!(config.version, "1.0");
        assert_eq!(config.severity, Severity::Warning);
        assert_eq!(config.indent_width, 4);
        assert!(config.paths.patterns.iter().any(|p| p.contains("target")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
version: "1.0"
severity: error
indent_width: 2
paths:
  patterns:
    - "vendor/**"
  ignore_file: .wardenignore
"#;
        let config = WardenConfig::load_from_str(yaml).unwrap();

        assert_eq!(config.severity, Severity::Error);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.paths.patterns, vec!["vendor/**".to_string()]);
    }

    #[test]
    fn test_omitted_fields_take_defaults() {
        let config = WardenConfig::load_from_str("version: \"1.0\"\n").unwrap();

        assert_eq!(config.severity, Severity::Warning);
        assert_eq!(config.indent_width, 4);
        assert!(config.paths.ignore_file.is_some());
    }

    #[test]
    fn test_unrecognized_severity_rejected() {
        let result = WardenConfig::load_from_str("version: \"1.0\"\nseverity: info\n");
        assert!(matches!(result, Err(WardenError::Configuration { .. })));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let result = WardenConfig::load_from_str("version: \"2.0\"\n");
        assert!(matches!(result, Err(WardenError::Configuration { .. })));
    }

    #[test]
    fn test_zero_width_rejected() {
        let result = WardenConfig::load_from_str("version: \"1.0\"\nindent_width: 0\n");
        assert!(matches!(result, Err(WardenError::Configuration { .. })));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let yaml = "version: \"1.0\"\npaths:\n  patterns:\n    - \"[invalid\"\n  ignore_file: null\n";
        let result = WardenConfig::load_from_str(yaml);
        assert!(matches!(result, Err(WardenError::Configuration { .. })));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ConfigBuilder::new()
            .severity(Severity::Error)
            .indent_width(8)
            .add_path_pattern("generated/**")
            .build()
            .unwrap();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let rehydrated = WardenConfig::load_from_str(&yaml).unwrap();

        assert_eq!(rehydrated.severity, Severity::Error);
        assert_eq!(rehydrated.indent_width, 8);
        assert!(rehydrated.paths.patterns.contains(&"generated/**".to_string()));
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let result = ConfigBuilder::new().indent_width(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_to_json() {
        let json = WardenConfig::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["severity"], "warning");
    }
}

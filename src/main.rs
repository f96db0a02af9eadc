//! Tab Warden CLI - command-line interface for indentation enforcement
//!
//! Architecture: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like process exit codes and terminal output
//! - Provides clean separation between user interface and business logic

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use tab_warden::{
    AnalysisOptions, OutputFormat, ReportFormatter, ReportOptions, Severity, ValidationOptions,
    WardenConfig, WardenResult, WardenValidator, DEFAULT_CONFIG_FILES,
};

/// Tab Warden - flag and auto-fix tab indentation
#[derive(Parser)]
#[command(name = "tab-warden")]
#[command(version = "0.1.0")]
#[command(about = "Style enforcement that flags and auto-fixes tab indentation")]
#[command(
    long_about = "Tab Warden scans source files for lines indented with tab characters, reports their exact locations, and can rewrite the offending indentation to spaces. Designed for local workflows and CI/CD integration."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for tab indentation without modifying them
    Check {
        /// Paths to analyze (files or directories)
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Minimum severity level to report
        #[arg(short, long, value_enum)]
        severity: Option<SeverityArg>,

        /// Maximum number of violations to report
        #[arg(long)]
        max_violations: Option<usize>,

        /// Additional exclude patterns
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,

        /// Ignore .wardenignore files
        #[arg(long)]
        no_ignore: bool,

        /// Disable parallel processing
        #[arg(long)]
        no_parallel: bool,

        /// Fail on first error
        #[arg(long)]
        fail_fast: bool,
    },

    /// Rewrite tab indentation to spaces in place
    Fix {
        /// Paths to fix (files or directories)
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Additional exclude patterns
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,

        /// Ignore .wardenignore files
        #[arg(long)]
        no_ignore: bool,

        /// Fail on first error
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },

    /// Explain what a specific rule does
    Explain {
        /// Rule ID to explain
        rule_id: String,
    },

    /// List available rules
    Rules,
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum SeverityArg {
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> WardenResult<i32> {
    match cli.command {
        Commands::Check {
            paths,
            format,
            severity,
            max_violations,
            exclude,
            no_ignore,
            no_parallel,
            fail_fast,
        } => run_check(
            cli.config,
            paths,
            format,
            severity,
            max_violations,
            exclude,
            no_ignore,
            no_parallel,
            fail_fast,
            !cli.no_color,
        ),
        Commands::Fix { paths, format, exclude, no_ignore, fail_fast } => {
            run_fix(cli.config, paths, format, exclude, no_ignore, fail_fast, !cli.no_color)
        }
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
        Commands::Explain { rule_id } => run_explain(cli.config, rule_id),
        Commands::Rules => run_list_rules(cli.config),
    }
}

/// Load configuration from the given path or the first default config file
fn load_config(config_path: Option<PathBuf>) -> WardenResult<WardenConfig> {
    if let Some(path) = config_path {
        return WardenConfig::load_from_file(path);
    }

    for config_name in DEFAULT_CONFIG_FILES {
        if Path::new(config_name).exists() {
            return WardenConfig::load_from_file(config_name);
        }
    }

    Ok(WardenConfig::default())
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    config_path: Option<PathBuf>,
    paths: Vec<PathBuf>,
    format: OutputFormatArg,
    severity: Option<SeverityArg>,
    max_violations: Option<usize>,
    exclude_patterns: Vec<String>,
    no_ignore: bool,
    no_parallel: bool,
    fail_fast: bool,
    use_colors: bool,
) -> WardenResult<i32> {
    let config = load_config(config_path)?;
    let validator = WardenValidator::new_with_config(config)?;

    let paths = if paths.is_empty() { vec![PathBuf::from(".")] } else { paths };

    let report_options = ReportOptions {
        use_colors,
        max_violations,
        min_severity: severity.map(|s| s.into()),
    };
    let options = ValidationOptions {
        report_options: report_options.clone(),
        analysis_options: AnalysisOptions {
            parallel: !no_parallel,
            fail_fast,
            exclude_patterns,
            ignore_ignore_files: no_ignore,
            ..Default::default()
        },
    };

    let report = validator.validate_with_options(paths, &options)?;

    let formatter = ReportFormatter::new(report_options);
    let formatted = formatter.format_report(&report, format.into())?;
    println!("{formatted}");

    if report.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn run_fix(
    config_path: Option<PathBuf>,
    paths: Vec<PathBuf>,
    format: OutputFormatArg,
    exclude_patterns: Vec<String>,
    no_ignore: bool,
    fail_fast: bool,
    use_colors: bool,
) -> WardenResult<i32> {
    let config = load_config(config_path)?;
    let validator = WardenValidator::new_with_config(config)?;

    let paths = if paths.is_empty() { vec![PathBuf::from(".")] } else { paths };

    let options = AnalysisOptions {
        fail_fast,
        exclude_patterns,
        ignore_ignore_files: no_ignore,
        ..Default::default()
    };

    let report = validator.fix_paths(paths, &options)?;

    let formatter =
        ReportFormatter::new(ReportOptions { use_colors, ..Default::default() });
    let formatted = formatter.format_fix_report(&report, format.into())?;
    println!("{formatted}");

    Ok(0)
}

fn run_validate_config(config_path: Option<PathBuf>) -> WardenResult<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILES[0]));

    println!("Validating configuration: {}", config_path.display());

    match WardenConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("✅ Configuration is valid");
            println!("📊 Configuration summary:");
            println!("  Severity: {}", config.severity.as_str());
            println!("  Indent width: {}", config.indent_width);
            println!("  Path patterns: {}", config.paths.patterns.len());
            if let Some(ignore_file) = &config.paths.ignore_file {
                println!("  Ignore file: {ignore_file}");
            }
            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            Ok(1)
        }
    }
}

fn run_explain(config_path: Option<PathBuf>, rule_id: String) -> WardenResult<i32> {
    let config = load_config(config_path)?;
    let severity = config.severity;
    let indent_width = config.indent_width;
    let validator = WardenValidator::new_with_config(config)?;

    for description in validator.rule_descriptions() {
        if description.id == rule_id {
            println!("📖 Rule: {}", description.id);
            println!("🏷️  Name: {}", description.name);
            println!("⚠️  Severity: {}", severity.as_str());
            println!("↹  Indent width: {indent_width}");
            println!();
            println!("📝 Description:");
            println!("   {}", description.description);
            return Ok(0);
        }
    }

    eprintln!("❌ Rule '{rule_id}' not found");
    println!();
    println!("Available rules:");
    for description in validator.rule_descriptions() {
        println!("  - {}", description.id);
    }

    Ok(1)
}

fn run_list_rules(config_path: Option<PathBuf>) -> WardenResult<i32> {
    let config = load_config(config_path)?;
    let severity = config.severity;
    let validator = WardenValidator::new_with_config(config)?;

    println!("📋 Available Rules\n");
    for description in validator.rule_descriptions() {
        println!("  🔍 {} [{}] - {}", description.id, severity.as_str(), description.description);
    }

    Ok(0)
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}

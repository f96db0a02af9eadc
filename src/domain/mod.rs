//! Domain layer containing the core business entities
//!
//! Architecture: Domain Layer - Pure business logic with no infrastructure dependencies
//! - Violations, corrections, and reports are the ubiquitous language of the tool
//! - All other layers depend on this module, never the reverse

pub mod violations;

pub use violations::{
    Correction, FixReport, FixSummary, Location, Severity, ValidationReport, ValidationSummary,
    Violation, ViolationCounts, WardenError, WardenResult,
};

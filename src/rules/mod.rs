//! Rule protocol and the built-in rule registry
//!
//! Architecture: Capability Interface - Rules expose validate and correct, nothing more
//! - The analyzer dispatches dynamically over `Box<dyn Rule>`; no inheritance,
//!   only interface conformance
//! - Rule metadata is an immutable value handed in at construction, not a
//!   global description

pub mod spaces_not_tabs;

pub use spaces_not_tabs::SpacesNotTabs;

use crate::config::WardenConfig;
use crate::domain::{Correction, Location, Violation, WardenResult};
use crate::source::{SourceFile, Writer};

/// Immutable identity and documentation for a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescription {
    /// Stable identifier used to tag violations and corrections
    pub id: &'static str,
    /// Human-readable rule name
    pub name: &'static str,
    /// One-line description of what the rule enforces
    pub description: &'static str,
}

/// Per-location gate over the correction path
///
/// A collaborator may suppress correction at specific locations even though
/// the rule would otherwise report a violation there, e.g. via inline
/// suppression directives. Enablement filtering never affects validation.
pub trait EnablementFilter: Send + Sync {
    fn is_enabled(&self, location: &Location) -> bool;
}

/// Filter that enables correction everywhere
pub struct AlwaysEnabled;

impl EnablementFilter for AlwaysEnabled {
    fn is_enabled(&self, _location: &Location) -> bool {
        true
    }
}

/// The shared protocol every style rule conforms to
pub trait Rule: Send + Sync {
    /// Identity and documentation for this rule
    fn description(&self) -> &RuleDescription;

    /// Report violations in a file snapshot. Read-only, no side effects.
    fn validate(&self, file: &SourceFile) -> Vec<Violation>;

    /// Rewrite the file's violations and persist the result via `writer`
    ///
    /// Triggers exactly one write when at least one correction applies and
    /// zero writes otherwise. Returned corrections carry locations in the
    /// original, pre-rewrite text, in ascending offset order.
    fn correct(&self, file: &SourceFile, writer: &mut dyn Writer) -> WardenResult<Vec<Correction>>;
}

/// All rules shipped with the tool, configured from `config`
pub fn builtin_rules(config: &WardenConfig) -> Vec<Box<dyn Rule>> {
    vec![Box::new(SpacesNotTabs::from_config(config))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_enabled() {
        let filter = AlwaysEnabled;
        assert!(filter.is_enabled(&Location::new(1, 1, 0)));
        assert!(filter.is_enabled(&Location::new(999, 80, 12345)));
    }

    #[test]
    fn test_builtin_registry() {
        let rules = builtin_rules(&WardenConfig::default());

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].description().id, "spaces_not_tabs");
        assert!(!rules[0].description().description.is_empty());
    }
}

//! The `spaces_not_tabs` rule: flag and rewrite tab indentation
//!
//! Architecture: Pure Core - matching and rewriting are side-effect-free functions
//! - The matcher is a lazy iterator over violating ranges in ascending order
//! - The rewriter is a pure `(text, ranges, width) -> (text, offsets)` transform;
//!   the single Writer call happens at the `correct` call site

use crate::config::WardenConfig;
use crate::domain::{Correction, Severity, Violation, WardenResult};
use crate::rules::{AlwaysEnabled, EnablementFilter, Rule, RuleDescription};
use crate::source::{ExcludedSpan, SourceFile, Writer};
use lazy_static::lazy_static;
use regex::{Matches, Regex};

/// Stable identifier tagging every violation and correction from this rule
pub const RULE_ID: &str = "spaces_not_tabs";

/// Spaces substituted per tab during correction, unless configured otherwise
pub const DEFAULT_INDENT_WIDTH: usize = 4;

lazy_static! {
    /// Maximal runs of tab characters anchored at the start of a line
    static ref TAB_RUN: Regex = Regex::new(r"(?m)^\t+").expect("tab run pattern compiles");
}

/// A run of leading tab characters, identified by byte offset and length
///
/// Ranges are produced in ascending offset order and never overlap: the
/// matcher yields at most one range per line, anchored at column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    /// Byte offset of the first tab in the run
    pub offset: usize,
    /// Number of tab characters in the run
    pub length: usize,
}

impl MatchRange {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Byte offset one past the last tab in the run
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Lazy, finite sequence of violating tab runs in a text
///
/// A run that overlaps an excluded span in any way is discarded wholesale;
/// the policy is line-granular, so partial overlap also disqualifies the run.
pub struct TabRunMatcher<'t> {
    matches: Matches<'static, 't>,
    excluded: &'t [ExcludedSpan],
}

impl<'t> TabRunMatcher<'t> {
    pub fn new(text: &'t str, excluded: &'t [ExcludedSpan]) -> Self {
        Self { matches: TAB_RUN.find_iter(text), excluded }
    }
}

impl<'t> Iterator for TabRunMatcher<'t> {
    type Item = MatchRange;

    fn next(&mut self) -> Option<MatchRange> {
        for m in self.matches.by_ref() {
            let range = MatchRange::new(m.start(), m.end() - m.start());
            if self.excluded.iter().any(|span| span.overlaps(range.offset, range.end())) {
                continue;
            }
            return Some(range);
        }
        None
    }
}

/// Replace every range with `length × width` spaces in one coherent pass
///
/// Ranges are processed in descending start order. Replacing a range near the
/// end of the buffer never shifts the offsets of earlier, not-yet-processed
/// ranges, so every range stays valid without cumulative delta tracking;
/// ascending processing would invalidate every offset after the first
/// replacement whose length differs from the original.
///
/// A range that does not convert to a valid index range of the current buffer
/// is skipped and contributes no recorded offset. The returned offsets refer
/// to the original text and are in ascending order.
pub fn rewrite_tab_runs(text: &str, ranges: &[MatchRange], width: usize) -> (String, Vec<usize>) {
    let mut ordered: Vec<MatchRange> = ranges.to_vec();
    ordered.sort_by_key(|r| r.offset);

    let mut corrected = text.to_string();
    let mut applied_offsets = Vec::with_capacity(ordered.len());

    for range in ordered.iter().rev() {
        if corrected.get(range.offset..range.end()).is_none() {
            tracing::debug!(
                "Skipping range {}..{}: not a valid index range",
                range.offset,
                range.end()
            );
            continue;
        }
        let replacement = " ".repeat(range.length * width);
        corrected.replace_range(range.offset..range.end(), &replacement);
        applied_offsets.push(range.offset);
    }

    // Recorded back-to-front; one reversal restores ascending original order.
    applied_offsets.reverse();
    (corrected, applied_offsets)
}

/// Rule that reports and rewrites lines indented with tabs
pub struct SpacesNotTabs {
    description: RuleDescription,
    severity: Severity,
    indent_width: usize,
    filter: Box<dyn EnablementFilter>,
}

impl SpacesNotTabs {
    /// Create the rule with an explicit severity and indentation width
    pub fn new(severity: Severity, indent_width: usize) -> Self {
        Self {
            description: RuleDescription {
                id: RULE_ID,
                name: "Spaces Not Tabs",
                description: "Lines should be indented with spaces instead of tabs",
            },
            severity,
            indent_width,
            filter: Box::new(AlwaysEnabled),
        }
    }

    /// Create the rule from the tool configuration
    pub fn from_config(config: &WardenConfig) -> Self {
        Self::new(config.severity, config.indent_width)
    }

    /// Replace the per-location enablement filter gating the correction path
    pub fn with_filter(mut self, filter: Box<dyn EnablementFilter>) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for SpacesNotTabs {
    fn default() -> Self {
        Self::new(Severity::Warning, DEFAULT_INDENT_WIDTH)
    }
}

impl Rule for SpacesNotTabs {
    fn description(&self) -> &RuleDescription {
        &self.description
    }

    fn validate(&self, file: &SourceFile) -> Vec<Violation> {
        TabRunMatcher::new(file.contents(), file.excluded_spans())
            .filter_map(|range| {
                let location = file.resolve(range.offset)?;
                Some(Violation::new(
                    self.description.id,
                    self.severity,
                    file.path().to_path_buf(),
                    location,
                    "Line begins with tab indentation; use spaces instead",
                ))
            })
            .collect()
    }

    fn correct(&self, file: &SourceFile, writer: &mut dyn Writer) -> WardenResult<Vec<Correction>> {
        let ranges: Vec<MatchRange> = TabRunMatcher::new(file.contents(), file.excluded_spans())
            .filter(|range| match file.resolve(range.offset) {
                Some(location) => self.filter.is_enabled(&location),
                None => {
                    tracing::debug!("Suppressing correction at unresolvable offset {}", range.offset);
                    false
                }
            })
            .collect();

        let (corrected, applied_offsets) =
            rewrite_tab_runs(file.contents(), &ranges, self.indent_width);

        if applied_offsets.is_empty() {
            return Ok(Vec::new());
        }

        writer.write(&corrected)?;

        Ok(applied_offsets
            .into_iter()
            .filter_map(|offset| {
                let location = file.resolve(offset)?;
                Some(Correction::new(self.description.id, file.path().to_path_buf(), location))
            })
            .collect())
    }
}

//! Recoverable findings collected during a pass.

use quire_lists::MarkerMismatch;
use quire_nesting::RangeSplit;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A straddling style range in paragraph `paragraph` had to be split.
    MalformedRange { paragraph: usize, split: RangeSplit },
    /// A literal list marker disagreed with the rendered one.
    MarkerMismatch(MarkerMismatch),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

/// Counts per diagnostic kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub malformed_ranges: usize,
    pub marker_mismatches: usize,
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} malformed range(s), {} marker mismatch(es)",
            self.malformed_ranges, self.marker_mismatches
        )
    }
}

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn summary(&self) -> DiagnosticSummary {
        let mut summary = DiagnosticSummary::default();
        for entry in &self.entries {
            match entry {
                Diagnostic::MalformedRange { .. } => summary.malformed_ranges += 1,
                Diagnostic::MarkerMismatch(_) => summary.marker_mismatches += 1,
            }
        }
        summary
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

//! Collector for soft failures found during extraction.
//!
//! Every recoverable anomaly is logged through `tracing` and kept as data, so
//! callers can decide how to surface known-bad reports.

use std::fmt;

use serde::Serialize;

/// Classification of a soft failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// A document reference could not be parsed.
    UnparsedReference,
    /// A sub-document range had more than two bounds.
    SubDocumentRange,
    /// A printed vote count disagrees with the listed names.
    CountMismatch,
    /// Motion text groups could not be paired two by two.
    AmbiguousGrouping,
    /// A voter name is not in the politician directory.
    UnresolvedPolitician,
    /// An expected section of the report is absent.
    MissingSection,
    /// A proposal discussion was dropped because its headings disagree.
    DiscussionSkipped,
    /// No article discussion marker; the full text was used as description.
    DescriptionFallback,
}

impl DiagnosticKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnparsedReference => "UNPARSED_REFERENCE",
            Self::SubDocumentRange => "SUB_DOCUMENT_RANGE",
            Self::CountMismatch => "COUNT_MISMATCH",
            Self::AmbiguousGrouping => "AMBIGUOUS_GROUPING",
            Self::UnresolvedPolitician => "UNRESOLVED_POLITICIAN",
            Self::MissingSection => "MISSING_SECTION",
            Self::DiscussionSkipped => "DISCUSSION_SKIPPED",
            Self::DescriptionFallback => "DESCRIPTION_FALLBACK",
        }
    }
}

/// A single recorded soft failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Where it happened (plenary, motion or reference id).
    pub location: String,

    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.as_str(), self.location, self.message)
    }
}

/// Ordered collection of diagnostics for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a soft failure and emit it as a warning.
    pub fn warn(
        &mut self,
        kind: DiagnosticKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            location: location.into(),
            message: message.into(),
        };
        tracing::warn!(
            kind = diagnostic.kind.as_str(),
            location = %diagnostic.location,
            "{}",
            diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    /// Record an expected gap in the input, logged at info level only.
    pub fn note(
        &mut self,
        kind: DiagnosticKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            location: location.into(),
            message: message.into(),
        };
        tracing::info!(
            kind = diagnostic.kind.as_str(),
            location = %diagnostic.location,
            "{}",
            diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Iterate over diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(DiagnosticKind::CountMismatch, "55_298_1", "first");
        diagnostics.note(DiagnosticKind::MissingSection, "55_298", "second");

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.entries()[0].message, "first");
        assert_eq!(diagnostics.entries()[1].kind, DiagnosticKind::MissingSection);
    }

    #[test]
    fn test_diagnostics_of_kind() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(DiagnosticKind::CountMismatch, "a", "x");
        diagnostics.warn(DiagnosticKind::UnresolvedPolitician, "b", "y");
        diagnostics.warn(DiagnosticKind::CountMismatch, "c", "z");

        let locations: Vec<_> = diagnostics
            .of_kind(DiagnosticKind::CountMismatch)
            .map(|d| d.location.as_str())
            .collect();
        assert_eq!(locations, vec!["a", "c"]);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::UnparsedReference,
            location: "55_298_d01_p1".to_string(),
            message: "could not parse '1234-2345'".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "[UNPARSED_REFERENCE] 55_298_d01_p1: could not parse '1234-2345'"
        );
    }

    #[test]
    fn test_diagnostic_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&DiagnosticKind::CountMismatch).unwrap(),
            "\"COUNT_MISMATCH\""
        );
    }
}

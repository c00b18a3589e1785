//! Error types for plenary report extraction.
//!
//! Only hard failures are errors. Soft failures (count mismatches, unparsed
//! references, unresolved politicians, ambiguous groupings) never leave the
//! component that found them; they are recorded in
//! [`Diagnostics`](crate::diagnostics::Diagnostics) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extraction library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Report filename does not carry a plenary number.
    #[error("Invalid plenary report filename: '{0}'. Expected ipNNNx.html (e.g., ip298x.html)")]
    InvalidReportFilename(String),

    /// A fixed marker phrase that must be present was not found.
    #[error("Missing required marker '{marker}' in {context}")]
    MissingMarker { marker: String, context: String },

    /// The vote-type markers of a roll-call block are out of order.
    #[error("Vote markers out of order (expected Oui < Non < Abstentions) in {context}")]
    MarkerOrder { context: String },

    /// A token expected to hold a number did not parse.
    #[error("Invalid {what} '{token}' in {context}")]
    InvalidNumber {
        what: &'static str,
        token: String,
        context: String,
    },

    /// The French and Dutch heading of a proposal disagree.
    #[error("French and Dutch proposal headings disagree on {field}: '{french}' vs '{dutch}'")]
    BilingualMismatch {
        field: &'static str,
        french: String,
        dutch: String,
    },

    /// No session date could be found in the report header.
    #[error("Could not determine the plenary date for {0}")]
    MissingDate(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Politician directory could not be parsed.
    #[error("Failed to parse politician directory: {0}")]
    PoliticiansParse(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// Extraction of a single report failed.
    #[error("Failed to process {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: Box<ExtractorError>,
    },
}

impl ExtractorError {
    /// Wrap this error with the report it occurred in.
    #[must_use]
    pub fn in_report(self, path: impl Into<PathBuf>) -> Self {
        Self::Report {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

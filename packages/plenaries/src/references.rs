//! Document reference parsing.
//!
//! Proposals point to parliamentary documents with references like `1234`,
//! `1234/5` or `1234/2-5`: a main document number and an optional
//! sub-document range. Parsing never fails; a reference that cannot be
//! understood yields an "unparsed" reference with all numbers unset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::sub_document_pdf_url;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::types::Plenary;

/// Widest sub-document range accepted; wider ranges are typos.
pub const MAX_SUB_DOCUMENTS: u32 = 999;

/// A parsed document reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsReference {
    /// Main document number, `None` if the reference could not be parsed.
    pub document_reference: Option<u32>,

    /// The reference as found in the report.
    pub all_documents_reference: String,

    /// First referenced sub-document.
    pub main_document_reference: Option<u32>,

    /// All referenced sub-documents, with ranges expanded.
    pub sub_document_references: Vec<u32>,
}

impl DocumentsReference {
    /// Reference that could not be parsed; only the raw reference is kept.
    #[must_use]
    pub fn unparsed(reference: impl Into<String>) -> Self {
        Self {
            document_reference: None,
            all_documents_reference: reference.into(),
            main_document_reference: None,
            sub_document_references: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.document_reference.is_some()
    }

    /// One PDF URL per referenced sub-document.
    #[must_use]
    pub fn sub_document_pdf_urls(&self, legislature: u32) -> Vec<String> {
        let Some(document_number) = self.document_reference else {
            return Vec::new();
        };
        self.sub_document_references
            .iter()
            .map(|&sub| sub_document_pdf_url(legislature, document_number, sub))
            .collect()
    }
}

/// Parse a document reference.
///
/// Soft failures (unparsable references, ranges with more than two bounds) are
/// recorded in `diagnostics`.
///
/// # Examples
/// ```
/// use plenaries::diagnostics::Diagnostics;
/// use plenaries::references::parse_document_reference;
///
/// let mut diagnostics = Diagnostics::new();
/// let reference = parse_document_reference("1234/2-5", &mut diagnostics);
/// assert_eq!(reference.document_reference, Some(1234));
/// assert_eq!(reference.sub_document_references, vec![2, 3, 4, 5]);
/// ```
pub fn parse_document_reference(reference: &str, diagnostics: &mut Diagnostics) -> DocumentsReference {
    let parts: Vec<&str> = reference.split('/').collect();

    if parts.len() > 2 {
        diagnostics.warn(
            DiagnosticKind::UnparsedReference,
            reference,
            "more than one '/' in document reference",
        );
        return DocumentsReference::unparsed(reference);
    }

    let Ok(document_number) = parts[0].trim().parse::<u32>() else {
        diagnostics.warn(
            DiagnosticKind::UnparsedReference,
            reference,
            format!("document number '{}' is not a number", parts[0]),
        );
        return DocumentsReference::unparsed(reference);
    };

    let sub_documents = match parts.get(1) {
        None => vec![1],
        Some(range) => match parse_sub_document_range(range, reference, diagnostics) {
            Some(subs) => subs,
            None => return DocumentsReference::unparsed(reference),
        },
    };

    DocumentsReference {
        document_reference: Some(document_number),
        all_documents_reference: reference.to_string(),
        main_document_reference: sub_documents.first().copied(),
        sub_document_references: sub_documents,
    }
}

/// Expand `a`, `a-b` (inclusive) or `a-...-b` (first and last bound).
fn parse_sub_document_range(
    range: &str,
    reference: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<u32>> {
    let bounds: Vec<u32> = match range
        .split('-')
        .map(|part| part.trim().parse::<u32>())
        .collect()
    {
        Ok(bounds) => bounds,
        Err(_) => {
            diagnostics.warn(
                DiagnosticKind::UnparsedReference,
                reference,
                format!("sub-document range '{range}' is not numeric"),
            );
            return None;
        }
    };

    if bounds.len() > 2 {
        diagnostics.warn(
            DiagnosticKind::SubDocumentRange,
            reference,
            format!("invalid sub-document range '{range}', using first and last bound"),
        );
    }

    let (first, last) = (*bounds.first()?, *bounds.last()?);
    if last.saturating_sub(first) >= MAX_SUB_DOCUMENTS {
        diagnostics.warn(
            DiagnosticKind::SubDocumentRange,
            reference,
            format!("sub-document range '{range}' spans more than {MAX_SUB_DOCUMENTS} documents"),
        );
        return None;
    }
    Some((first..=last).collect())
}

/// Collect `(reference, location id)` pairs for every proposal carrying a reference.
pub fn collect_document_references(plenaries: &[Plenary]) -> Vec<(String, String)> {
    plenaries
        .iter()
        .flat_map(|plenary| plenary.proposals())
        .filter_map(|proposal| {
            proposal
                .document_reference
                .as_ref()
                .map(|reference| (reference.clone(), proposal.id.clone()))
        })
        .collect()
}

/// Parsed references of a set of plenaries, deduplicated by reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceAnalysis {
    /// Parsed reference and the ids of the proposals using it, sorted by reference.
    pub references: Vec<(DocumentsReference, Vec<String>)>,

    pub diagnostics: Diagnostics,
}

impl ReferenceAnalysis {
    /// References that could not be parsed.
    pub fn bad_references(&self) -> impl Iterator<Item = &(DocumentsReference, Vec<String>)> {
        self.references.iter().filter(|(r, _)| !r.is_parsed())
    }

    /// All sub-document PDF URLs, in reference order.
    #[must_use]
    pub fn sub_document_pdf_urls(&self, legislature: u32) -> Vec<String> {
        self.references
            .iter()
            .flat_map(|(r, _)| r.sub_document_pdf_urls(legislature))
            .collect()
    }
}

/// Parse every distinct document reference used by the given plenaries.
#[must_use]
pub fn analyse_document_references(plenaries: &[Plenary]) -> ReferenceAnalysis {
    let mut locations_by_reference: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (reference, location) in collect_document_references(plenaries) {
        locations_by_reference.entry(reference).or_default().push(location);
    }

    let mut diagnostics = Diagnostics::new();
    let references = locations_by_reference
        .into_iter()
        .map(|(reference, locations)| (parse_document_reference(&reference, &mut diagnostics), locations))
        .collect();

    ReferenceAnalysis {
        references,
        diagnostics,
    }
}

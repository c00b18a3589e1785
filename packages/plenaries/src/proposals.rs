//! Proposal discussion extraction.
//!
//! The proposals section starts at a fixed `h1` heading ("Projets de loi" or
//! a known variant) and runs until the next `h1`. Inside it, every proposal
//! is announced by two consecutive `h2` headings, French first, then Dutch,
//! each holding the agenda item number and the title with a trailing
//! document reference, e.g. `01 Projet de loi ... (3849/1-4)`.

use scraper::{ElementRef, Html};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{ExtractorError, Result};
use crate::html::{flat_text, has_class, has_tag, selector, siblings_until};
use crate::types::{Proposal, ProposalDiscussion};

/// Known texts of the heading that opens the proposals section.
pub const PROPOSALS_SECTION_HEADERS: &[&str] = &["Projets de loi", "Projets de loi et propositions"];

/// Headings announcing the discussion of the articles.
pub const ARTICLES_DISCUSSION_MARKERS: &[&str] =
    &["Bespreking van de artikelen", "Discussion des articles"];

const DESCRIPTION_MARKER_CLASSES: &[&str] = &["Titre3NL", "Titre3FR"];
const DUTCH_TEXT_CLASS: &str = "NormalNL";
const FRENCH_TEXT_CLASS: &str = "NormalFR";

/// Number, title and document reference of one proposal heading.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProposalHeader {
    number: String,
    title: String,
    document_reference: Option<String>,
}

/// A French heading with its matching Dutch heading.
struct HeadingPair<'a> {
    french: ElementRef<'a>,
    dutch: ElementRef<'a>,
}

/// Extract all proposal discussions of a report.
///
/// A discussion whose French and Dutch headings disagree is skipped and
/// recorded in `diagnostics`; the rest of the report is still extracted.
pub fn extract_proposal_discussions(
    html: &Html,
    plenary_id: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<ProposalDiscussion> {
    let Some(section_header) = find_proposals_section_header(html) else {
        diagnostics.note(
            DiagnosticKind::MissingSection,
            plenary_id,
            "no proposals section header found",
        );
        return Vec::new();
    };

    let headings: Vec<ElementRef<'_>> = siblings_until(section_header, "h1")
        .filter(|sibling| has_tag(*sibling, "h2"))
        .collect();

    if headings.len() % 2 != 0 {
        diagnostics.warn(
            DiagnosticKind::DiscussionSkipped,
            plenary_id,
            format!(
                "odd number of proposal headings ({}), ignoring the last one",
                headings.len()
            ),
        );
    }

    let pairs: Vec<HeadingPair<'_>> = headings
        .chunks_exact(2)
        .map(|pair| HeadingPair {
            french: pair[0],
            dutch: pair[1],
        })
        .collect();

    let mut discussions = Vec::new();
    for group in group_by_agenda_item(&pairs) {
        match extract_discussion(group, plenary_id, diagnostics) {
            Ok(discussion) => discussions.push(discussion),
            Err(e) => diagnostics.warn(
                DiagnosticKind::DiscussionSkipped,
                plenary_id,
                format!("skipping proposal discussion: {e}"),
            ),
        }
    }

    tracing::debug!(plenary_id, count = discussions.len(), "Extracted proposal discussions");
    discussions
}

fn find_proposals_section_header(html: &Html) -> Option<ElementRef<'_>> {
    let span = selector("span");
    html.select(&selector("h1")).find(|h1| {
        PROPOSALS_SECTION_HEADERS.contains(&flat_text(*h1).as_str())
            || h1
                .select(&span)
                .any(|s| PROPOSALS_SECTION_HEADERS.contains(&flat_text(s).as_str()))
    })
}

/// Group consecutive heading pairs announcing the same agenda item.
fn group_by_agenda_item<'p, 'a>(pairs: &'p [HeadingPair<'a>]) -> Vec<&'p [HeadingPair<'a>]> {
    let numbers: Vec<String> = pairs
        .iter()
        .map(|pair| split_proposal_header(pair.french).number)
        .collect();

    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=pairs.len() {
        if i == pairs.len() || numbers[i] != numbers[start] {
            groups.push(&pairs[start..i]);
            start = i;
        }
    }
    groups
}

fn extract_discussion(
    pairs: &[HeadingPair<'_>],
    plenary_id: &str,
    diagnostics: &mut Diagnostics,
) -> Result<ProposalDiscussion> {
    let mut headers = Vec::with_capacity(pairs.len());
    for pair in pairs {
        headers.push(match_heading_pair(pair)?);
    }

    let Some(((first, _), last_pair)) = headers.first().zip(pairs.last()) else {
        return Err(ExtractorError::MissingMarker {
            marker: "h2".to_string(),
            context: format!("proposals section of {plenary_id}"),
        });
    };
    let agenda_item_number: u32 = first.number.parse().map_err(|_| ExtractorError::InvalidNumber {
        what: "agenda item number",
        token: first.number.clone(),
        context: plenary_id.to_string(),
    })?;

    let discussion_id = format!("{plenary_id}_d{agenda_item_number:02}");
    let (description_nl, description_fr) =
        extract_descriptions(last_pair.dutch, &discussion_id, diagnostics);

    let proposals = headers
        .into_iter()
        .enumerate()
        .map(|(index, (french, dutch))| Proposal {
            id: format!("{discussion_id}_p{}", index + 1),
            number: agenda_item_number,
            plenary_id: plenary_id.to_string(),
            title_nl: dutch.title,
            title_fr: french.title,
            document_reference: french.document_reference,
            description_nl: description_nl.clone(),
            description_fr: description_fr.clone(),
        })
        .collect();

    Ok(ProposalDiscussion {
        id: discussion_id,
        plenary_id: plenary_id.to_string(),
        plenary_agenda_item_number: agenda_item_number,
        description_nl,
        description_fr,
        proposals,
    })
}

/// Parse both headings of a pair and check they describe the same proposal.
fn match_heading_pair(pair: &HeadingPair<'_>) -> Result<(ProposalHeader, ProposalHeader)> {
    let french = split_proposal_header(pair.french);
    let dutch = split_proposal_header(pair.dutch);

    if french.number != dutch.number {
        return Err(ExtractorError::BilingualMismatch {
            field: "proposal number",
            french: french.number,
            dutch: dutch.number,
        });
    }
    if french.document_reference != dutch.document_reference {
        return Err(ExtractorError::BilingualMismatch {
            field: "document reference",
            french: french.document_reference.unwrap_or_default(),
            dutch: dutch.document_reference.unwrap_or_default(),
        });
    }

    Ok((french, dutch))
}

/// Split a proposal heading into number, title and document reference.
///
/// The first text run is the number; the rest of the heading is the title,
/// whose trailing parenthesized token (if any) is the document reference.
fn split_proposal_header(heading: ElementRef<'_>) -> ProposalHeader {
    let full_text = collapse_whitespace(&flat_text(heading));

    // Leaf spans only: nested spans would repeat their text.
    let span_selector = selector("span");
    let number = heading
        .select(&span_selector)
        .filter(|span| span.select(&span_selector).next().is_none())
        .map(|span| collapse_whitespace(&flat_text(span)))
        .find(|text| !text.is_empty())
        .or_else(|| full_text.split(' ').next().map(str::to_string))
        .unwrap_or_default();

    let title = full_text
        .strip_prefix(number.as_str())
        .unwrap_or(&full_text)
        .trim();

    let (title, document_reference) = match title.rsplit_once(' ') {
        Some((rest, last)) if last.starts_with('(') && last.ends_with(')') && last.len() > 2 => {
            (rest.trim(), Some(last[1..last.len() - 1].to_string()))
        }
        _ => (title, None),
    };

    ProposalHeader {
        number,
        title: title.to_string(),
        document_reference,
    }
}

/// Recover the Dutch and French discussion text following a title heading,
/// up to the next title or section heading.
///
/// Without an article discussion marker, the whole following text is used
/// for both languages.
fn extract_descriptions(
    title: ElementRef<'_>,
    discussion_id: &str,
    diagnostics: &mut Diagnostics,
) -> (String, String) {
    let following: Vec<ElementRef<'_>> = siblings_until(title, "h2")
        .take_while(|sibling| !has_tag(*sibling, "h1"))
        .collect();

    match following.iter().position(|el| is_articles_discussion_marker(*el)) {
        Some(marker) => {
            let after_marker = &following[marker + 1..];
            (
                join_paragraphs(after_marker, Some(DUTCH_TEXT_CLASS)),
                join_paragraphs(after_marker, Some(FRENCH_TEXT_CLASS)),
            )
        }
        None => {
            diagnostics.note(
                DiagnosticKind::DescriptionFallback,
                discussion_id,
                "no article discussion marker, using the full text as description",
            );
            let text = join_paragraphs(&following, None);
            (text.clone(), text)
        }
    }
}

fn is_articles_discussion_marker(element: ElementRef<'_>) -> bool {
    DESCRIPTION_MARKER_CLASSES
        .iter()
        .any(|class| has_class(element, class))
        && {
            let text = collapse_whitespace(&flat_text(element));
            ARTICLES_DISCUSSION_MARKERS
                .iter()
                .any(|marker| text.eq_ignore_ascii_case(marker))
        }
}

fn join_paragraphs(elements: &[ElementRef<'_>], class: Option<&str>) -> String {
    elements
        .iter()
        .filter(|el| class.map_or(true, |class| has_class(**el, class)))
        .map(|el| flat_text(*el))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

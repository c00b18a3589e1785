//! Motion and roll-call vote extraction.
//!
//! Vote blocks are not reliably delimited by tags, so they are found in the
//! flat token stream of the whole document. A block looks like:
//!
//! ```text
//! Vote nominatif - Naamstemming: 001
//! Oui 079 Ja
//! Aouasti Khalil, Bacquelaine Daniel, ...
//! Non 050 Nee
//! Anseeuw Björn, Bruyère Robin, ...
//! Abstentions 004 Onthoudingen
//! Arens Josy, Daems Greet, ...
//! ```
//!
//! Each marker occurrence opens a window that runs until the next marker or
//! the end of the document.

use std::ops::Range;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{ExtractorError, Result};
use crate::politicians::PoliticianDirectory;
use crate::tokens::{find_occurrences, get_sequence, tokenize};
use crate::types::{Motion, Vote, VoteType};

/// Fixed token layout of a roll-call vote block.
///
/// The defaults describe the reports of legislature 55.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteBlockLayout {
    /// Phrase opening every block.
    pub marker: Vec<String>,

    /// Offset of the motion number from the start of the block.
    pub motion_number_offset: usize,

    /// Token range searched for the cancellation marker.
    pub cancelled_window: Range<usize>,

    /// Substring flagging a cancelled vote.
    pub cancelled_marker: String,

    /// Markers of the yes, no and abstention sub-blocks, in block order.
    pub vote_type_markers: [String; 3],

    /// Tokens between a vote-type marker and its first name (marker, count, translation).
    pub names_offset: usize,
}

impl Default for VoteBlockLayout {
    fn default() -> Self {
        Self {
            marker: ["Vote", "nominatif", "-", "Naamstemming:"]
                .map(String::from)
                .to_vec(),
            motion_number_offset: 4,
            cancelled_window: 4..8,
            cancelled_marker: "geannuleerd".to_string(),
            vote_type_markers: ["Oui", "Non", "Abstentions"].map(String::from),
            names_offset: 3,
        }
    }
}

/// Motions and votes found in one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionExtraction<'d> {
    pub motions: Vec<Motion>,
    pub votes: Vec<Vote<'d>>,
}

/// Extract every roll-call vote block from the document text.
///
/// Marker ordering violations, missing markers and unreadable numbers are
/// hard failures for the whole report: the offsets of everything that
/// follows would be meaningless.
pub fn extract_motions_and_votes<'d, D>(
    text: &str,
    plenary_id: &str,
    layout: &VoteBlockLayout,
    directory: &'d D,
    diagnostics: &mut Diagnostics,
) -> Result<MotionExtraction<'d>>
where
    D: PoliticianDirectory + ?Sized,
{
    let tokens = tokenize(text);
    let starts = find_occurrences(&tokens, layout.marker.as_slice());
    let ends = starts.iter().skip(1).copied().chain([tokens.len()]);

    let mut extraction = MotionExtraction::default();
    for (start, end) in starts.iter().copied().zip(ends) {
        let window = &tokens[start..end];
        let (motion, votes) = parse_voting_window(window, plenary_id, layout, directory, diagnostics)?;
        extraction.motions.push(motion);
        extraction.votes.extend(votes);
    }

    tracing::debug!(
        plenary_id,
        motions = extraction.motions.len(),
        votes = extraction.votes.len(),
        "Extracted motions"
    );
    Ok(extraction)
}

fn parse_voting_window<'d, D>(
    window: &[&str],
    plenary_id: &str,
    layout: &VoteBlockLayout,
    directory: &'d D,
    diagnostics: &mut Diagnostics,
) -> Result<(Motion, Vec<Vote<'d>>)>
where
    D: PoliticianDirectory + ?Sized,
{
    let number_token = window.get(layout.motion_number_offset).copied().unwrap_or_default();
    let number: u32 = number_token.parse().map_err(|_| ExtractorError::InvalidNumber {
        what: "motion number",
        token: number_token.to_string(),
        context: format!("roll-call vote in {plenary_id}"),
    })?;

    let cancelled_range = layout.cancelled_window.start.min(window.len())
        ..layout.cancelled_window.end.min(window.len());
    let cancelled = window[cancelled_range]
        .iter()
        .any(|token| token.contains(layout.cancelled_marker.as_str()));

    let mut motion = Motion::new(plenary_id, number, cancelled);
    let context = format!("motion {}", motion.id);

    let mut positions = [0; 3];
    for (position, marker) in positions.iter_mut().zip(&layout.vote_type_markers) {
        *position = get_sequence(window, &[marker], &context)?;
    }
    let [yes_start, no_start, abstention_start] = positions;
    if !(yes_start < no_start && no_start < abstention_start) {
        return Err(ExtractorError::MarkerOrder { context });
    }

    let bounds = [no_start, abstention_start, window.len()];
    let mut votes = Vec::new();
    for ((vote_type, start), end) in VoteType::ALL.into_iter().zip(positions).zip(bounds) {
        let count = parse_count(window, start, &context)?;
        let names_start = (start + layout.names_offset).min(end);
        let names = get_names(&window[names_start..end]);

        if names.len() != count {
            let problem = format!(
                "vote count ({count}) does not match voters {names:?} ({})",
                vote_type.as_str()
            );
            diagnostics.warn(DiagnosticKind::CountMismatch, &motion.id, &problem);
            motion.parse_problems.push(problem);
        }

        votes.extend(create_votes(names, vote_type, &motion.id, directory, diagnostics));
    }

    Ok((motion, votes))
}

fn parse_count(window: &[&str], marker: usize, context: &str) -> Result<usize> {
    let token = window.get(marker + 1).copied().unwrap_or_default();
    token.parse().map_err(|_| ExtractorError::InvalidNumber {
        what: "vote count",
        token: token.to_string(),
        context: context.to_string(),
    })
}

/// Split a comma-separated run of tokens into voter names.
///
/// Periods are dropped from names, so the list-closing period of the last
/// name does not end up in it.
#[must_use]
pub fn get_names(tokens: &[&str]) -> Vec<String> {
    tokens
        .join(" ")
        .split(',')
        .map(|name| name.replace('.', "").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// One vote per name; names missing from the directory keep an unresolved vote.
fn create_votes<'d, D>(
    names: Vec<String>,
    vote_type: VoteType,
    motion_id: &str,
    directory: &'d D,
    diagnostics: &mut Diagnostics,
) -> Vec<Vote<'d>>
where
    D: PoliticianDirectory + ?Sized,
{
    names
        .into_iter()
        .map(|voter_name| {
            let politician = directory.lookup(&voter_name);
            if politician.is_none() {
                diagnostics.warn(
                    DiagnosticKind::UnresolvedPolitician,
                    motion_id,
                    format!("unknown politician '{voter_name}'"),
                );
            }
            Vote {
                politician,
                voter_name,
                motion_id: motion_id.to_string(),
                vote_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::politicians::{Politician, Politicians};
    use pretty_assertions::assert_eq;

    fn directory() -> Politicians {
        Politicians::new(vec![
            Politician {
                id: 7124,
                full_name: "Aouasti Khalil".to_string(),
                party: None,
            },
            Politician {
                id: 7125,
                full_name: "Bacquelaine Daniel".to_string(),
                party: None,
            },
            Politician {
                id: 7126,
                full_name: "Anseeuw Björn".to_string(),
                party: None,
            },
        ])
    }

    fn extract<'d>(
        text: &str,
        directory: &'d Politicians,
    ) -> (Result<MotionExtraction<'d>>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let result = extract_motions_and_votes(
            text,
            "55_298",
            &VoteBlockLayout::default(),
            directory,
            &mut diagnostics,
        );
        (result, diagnostics)
    }

    const TWO_BLOCKS: &str = "Intro text.
Vote nominatif - Naamstemming: 001
Oui 002 Ja
Aouasti Khalil, Bacquelaine Daniel.
Non 001 Nee
Anseeuw Björn
Abstentions 000 Onthoudingen
Vote nominatif - Naamstemming: 002 (geannuleerd / annulé)
Oui 000 Ja
Non 000 Nee
Abstentions 001 Onthoudingen
Nobody Known";

    #[test]
    fn test_extracts_motions() {
        let politicians = directory();
        let (result, _) = extract(TWO_BLOCKS, &politicians);
        let extraction = result.unwrap();

        assert_eq!(extraction.motions.len(), 2);
        assert_eq!(extraction.motions[0].id, "55_298_1");
        assert!(!extraction.motions[0].cancelled);
        assert_eq!(extraction.motions[1].id, "55_298_2");
        assert!(extraction.motions[1].cancelled);
    }

    #[test]
    fn test_extracts_votes_in_order() {
        let politicians = directory();
        let (result, _) = extract(TWO_BLOCKS, &politicians);
        let votes = result.unwrap().votes;

        let summary: Vec<_> = votes
            .iter()
            .map(|v| (v.motion_id.as_str(), v.vote_type, v.full_name()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("55_298_1", VoteType::Yes, "Aouasti Khalil"),
                ("55_298_1", VoteType::Yes, "Bacquelaine Daniel"),
                ("55_298_1", VoteType::No, "Anseeuw Björn"),
                ("55_298_2", VoteType::Abstention, "Nobody Known"),
            ]
        );
        assert_eq!(votes[0].politician.map(|p| p.id), Some(7124));
    }

    #[test]
    fn test_unresolved_politician_keeps_vote() {
        let politicians = directory();
        let (result, diagnostics) = extract(TWO_BLOCKS, &politicians);
        let votes = result.unwrap().votes;

        let unknown: Vec<_> = votes.iter().filter(|v| !v.is_resolved()).collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].voter_name, "Nobody Known");
        assert_eq!(
            diagnostics.of_kind(DiagnosticKind::UnresolvedPolitician).count(),
            1
        );
    }

    #[test]
    fn test_count_mismatch_is_soft() {
        let politicians = directory();
        let text = "Vote nominatif - Naamstemming: 003
Oui 003 Ja Aouasti Khalil, Bacquelaine Daniel
Non 000 Nee
Abstentions 000 Onthoudingen";
        let (result, diagnostics) = extract(text, &politicians);
        let extraction = result.unwrap();

        assert_eq!(extraction.votes.len(), 2);
        assert_eq!(extraction.motions[0].parse_problems.len(), 1);
        assert!(extraction.motions[0].parse_problems[0].contains("vote count (3)"));
        assert_eq!(diagnostics.of_kind(DiagnosticKind::CountMismatch).count(), 1);
    }

    #[test]
    fn test_marker_order_violation_is_hard() {
        let politicians = directory();
        let text = "Vote nominatif - Naamstemming: 004
Non 000 Nee
Oui 000 Ja
Abstentions 000 Onthoudingen";
        let (result, _) = extract(text, &politicians);
        assert!(matches!(result, Err(ExtractorError::MarkerOrder { .. })));
    }

    #[test]
    fn test_missing_marker_is_hard() {
        let politicians = directory();
        let text = "Vote nominatif - Naamstemming: 005
Oui 000 Ja
Non 000 Nee";
        let (result, _) = extract(text, &politicians);
        assert!(matches!(
            result,
            Err(ExtractorError::MissingMarker { ref marker, .. }) if marker == "Abstentions"
        ));
    }

    #[test]
    fn test_invalid_motion_number_is_hard() {
        let politicians = directory();
        let (result, _) = extract("Vote nominatif - Naamstemming: (1)", &politicians);
        assert!(matches!(
            result,
            Err(ExtractorError::InvalidNumber { what: "motion number", .. })
        ));
    }

    #[test]
    fn test_no_vote_blocks() {
        let politicians = directory();
        let (result, _) = extract("Nothing to see here.", &politicians);
        assert_eq!(result.unwrap(), MotionExtraction::default());
    }

    #[test]
    fn test_partition_sizes_match_counts() {
        let politicians = Politicians::default();
        let names = |prefix: &str, n: usize| {
            (0..n)
                .map(|i| format!("{prefix} Member{i}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let text = format!(
            "Vote nominatif - Naamstemming: 001 Oui 079 Ja {} Non 050 Nee {} Abstentions 004 Onthoudingen {}",
            names("Yes", 79),
            names("No", 50),
            names("Abstain", 4)
        );

        let (result, diagnostics) = extract(&text, &politicians);
        let votes = result.unwrap().votes;

        assert_eq!(votes.len(), 79 + 50 + 4);
        for (vote_type, expected) in [(VoteType::Yes, 79), (VoteType::No, 50), (VoteType::Abstention, 4)] {
            assert_eq!(votes.iter().filter(|v| v.vote_type == vote_type).count(), expected);
        }
        assert_eq!(diagnostics.of_kind(DiagnosticKind::CountMismatch).count(), 0);
    }

    #[test]
    fn test_get_names_strips_periods_and_whitespace() {
        assert_eq!(
            get_names(&["Aouasti", "Khalil,", "Van", "der", "Donckt", "Wim."]),
            vec!["Aouasti Khalil", "Van der Donckt Wim"]
        );
        assert!(get_names(&[]).is_empty());
    }
}

//! Core data types for plenary reports.
//!
//! A [`Plenary`] owns its proposal discussions, motions and motion texts.
//! Votes are kept apart: they borrow politicians from the externally owned
//! [`PoliticianDirectory`](crate::politicians::PoliticianDirectory).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::politicians::Politician;

/// The choice of one member in a roll-call vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteType {
    Yes,
    No,
    Abstention,
}

impl VoteType {
    /// All vote types, in the order they appear in a roll-call block.
    pub const ALL: [VoteType; 3] = [Self::Yes, Self::No, Self::Abstention];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Abstention => "ABSTENTION",
        }
    }
}

/// Language tag of a fragment of motion text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Nl,
    Fr,
    Unknown,
}

impl Language {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nl => "nl",
            Self::Fr => "fr",
            Self::Unknown => "unknown",
        }
    }
}

/// A legislative proposal treated in a plenary session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique id, e.g. "55_298_d01_p1".
    pub id: String,

    /// Agenda item number of the proposal.
    pub number: u32,

    /// Id of the plenary this proposal was discussed in.
    pub plenary_id: String,

    pub title_nl: String,
    pub title_fr: String,

    /// Raw document reference (e.g. "3849/1-4"), when the title carries one.
    pub document_reference: Option<String>,

    pub description_nl: String,
    pub description_fr: String,
}

/// One agenda item's debate, covering one or more proposals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDiscussion {
    /// Unique id, e.g. "55_298_d01".
    pub id: String,

    /// Back-reference to the plenary, by id.
    pub plenary_id: String,

    pub plenary_agenda_item_number: u32,
    pub description_nl: String,
    pub description_fr: String,
    pub proposals: Vec<Proposal>,
}

/// A motion voted on by roll call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    /// Unique id within the plenary, e.g. "55_298_1".
    pub id: String,

    /// Number of the roll-call vote in the session.
    pub number: u32,

    /// Report item the motion belongs to, when it could be linked.
    pub proposal_id: Option<String>,

    pub cancelled: bool,

    /// Soft failures found while parsing this motion's votes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parse_problems: Vec<String>,
}

impl Motion {
    #[must_use]
    pub fn new(plenary_id: &str, number: u32, cancelled: bool) -> Self {
        Self {
            id: format!("{plenary_id}_{number}"),
            number,
            proposal_id: None,
            cancelled,
            parse_problems: Vec::new(),
        }
    }
}

/// One language-tagged fragment of motion text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTextPart {
    pub lang: Language,
    pub text: String,
}

/// Bilingual title and body text of one motion report item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionData {
    /// Grouping key, usually the report item number (e.g. "10").
    pub label: String,

    pub nl_title: String,
    pub fr_title: String,
    pub body_text_parts: Vec<BodyTextPart>,
}

impl MotionData {
    /// Concatenated text of all body parts.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body_text_parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A plenary session with everything extracted from its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plenary {
    /// Legislature and number, e.g. "55_298".
    pub id: String,

    pub number: u32,
    pub date: NaiveDate,
    pub legislature: u32,
    pub pdf_report_url: String,
    pub html_report_url: String,
    pub proposal_discussions: Vec<ProposalDiscussion>,
    pub motions: Vec<Motion>,
    pub motion_data: Vec<MotionData>,
}

impl Plenary {
    /// Look up a motion by id.
    #[must_use]
    pub fn motion(&self, id: &str) -> Option<&Motion> {
        self.motions.iter().find(|m| m.id == id)
    }

    /// All proposals over all discussions, in report order.
    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposal_discussions
            .iter()
            .flat_map(|discussion| discussion.proposals.iter())
    }
}

/// The vote of one member on one motion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote<'d> {
    /// Directory entry of the voter; `None` when the name could not be resolved.
    pub politician: Option<&'d Politician>,

    /// Name as printed in the report.
    pub voter_name: String,

    pub motion_id: String,
    pub vote_type: VoteType,
}

impl Vote<'_> {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.politician.is_some()
    }

    /// Full name of the voter, preferring the directory spelling.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.politician
            .map_or(self.voter_name.as_str(), |p| p.full_name.as_str())
    }
}

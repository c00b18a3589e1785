//! Plenaries - Extract structured records from Belgian Chamber plenary reports.
//!
//! This crate turns the bilingual (Dutch/French) HTML reports of the
//! Chamber's plenary sessions into proposal discussions, motions and
//! individual roll-call votes.
//!
//! # Example
//!
//! ```
//! use plenaries::diagnostics::Diagnostics;
//! use plenaries::references::parse_document_reference;
//!
//! let reference = parse_document_reference("1234/2-5", &mut Diagnostics::new());
//! assert_eq!(reference.sub_document_references, vec![2, 3, 4, 5]);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Configuration, constants and URL builders
//! - [`error`]: Error types and Result alias
//! - [`diagnostics`]: Soft failures recorded as data
//! - [`types`]: Core data types (Plenary, Proposal, Motion, Vote, etc.)
//! - [`references`]: Document reference parsing and analysis
//! - [`tokens`]: Token sequence matching
//! - [`html`]: Report decoding and element-tree helpers
//! - [`politicians`]: Politician directory
//! - [`proposals`]: Proposal discussion extraction
//! - [`votes`]: Motion and roll-call vote extraction
//! - [`motion_data`]: Motion body-text grouping
//! - [`plenary`]: Per-report assembly
//! - [`batch`]: Parallel extraction over a directory of reports
//! - [`yaml`]: YAML output generation
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod html;
pub mod motion_data;
pub mod plenary;
pub mod politicians;
pub mod proposals;
pub mod references;
pub mod tokens;
pub mod types;
pub mod votes;
pub mod yaml;

// Re-export main functions
pub use batch::{extract_from_directory, extract_from_html_plenary_reports, BatchOutcome};
pub use plenary::{extract_from_html_plenary_report, extract_plenary, PlenaryReport};

// Re-export commonly used items
pub use config::ExtractionConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{ExtractorError, Result};
pub use politicians::{Politician, PoliticianDirectory, Politicians};
pub use types::{Motion, MotionData, Plenary, Proposal, ProposalDiscussion, Vote, VoteType};

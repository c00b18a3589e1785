//! Assembling one plenary record per report.
//!
//! The proposal, vote and motion-text extractors each run over the same
//! parsed report. Their output is combined here with the plenary metadata
//! derived from the file name and the report header.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;

use crate::config::{
    html_report_url, pdf_report_url, plenary_number_from_filename, ExtractionConfig,
};
use crate::diagnostics::Diagnostics;
use crate::error::{ExtractorError, Result};
use crate::html::{document_text, parse_report, raw_text, read_plenary_html, selector};
use crate::motion_data::{extract_motion_data, BorderedSpanDetector};
use crate::politicians::PoliticianDirectory;
use crate::proposals::extract_proposal_discussions;
use crate::types::{Motion, MotionData, Plenary, Vote};
use crate::votes::{extract_motions_and_votes, MotionExtraction, VoteBlockLayout};

const DAYS_NL: [&str; 7] = [
    "maandag",
    "dinsdag",
    "woensdag",
    "donderdag",
    "vrijdag",
    "zaterdag",
    "zondag",
];

const MONTHS_NL: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

/// Numeric session date at the start of a header paragraph (e.g. "15-12-2022").
#[allow(clippy::expect_used)]
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)-(\d{4})").expect("valid regex"));

/// Reference from motion text to a roll-call vote, e.g. "(Stemming/vote 3)".
#[allow(clippy::expect_used)]
static VOTE_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:Stemming/vote|Vote/stemming)\s+\(?(\d+)\)").expect("valid regex")
});

/// Everything extracted from one plenary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlenaryReport<'d> {
    pub plenary: Plenary,

    /// Votes of all motions, in report order.
    pub votes: Vec<Vote<'d>>,

    /// Soft failures found while extracting this report.
    pub diagnostics: Diagnostics,
}

/// Extract a plenary from decoded report HTML.
///
/// `file_name` must follow the `ipNNNx.html` convention; the plenary number
/// is taken from it.
///
/// # Errors
///
/// Fails on structural violations in the vote blocks, a missing session date
/// or a file name without plenary number. Everything else is recorded in
/// [`PlenaryReport::diagnostics`].
pub fn extract_plenary<'d, D>(
    file_name: &str,
    content: &str,
    config: &ExtractionConfig,
    directory: &'d D,
) -> Result<PlenaryReport<'d>>
where
    D: PoliticianDirectory + ?Sized,
{
    let plenary_number = plenary_number_from_filename(file_name)?;
    let number: u32 = plenary_number
        .parse()
        .map_err(|_| ExtractorError::InvalidReportFilename(file_name.to_string()))?;
    let plenary_id = config.plenary_id(plenary_number);

    let html = parse_report(content);
    let date = extract_plenary_date(&html)
        .ok_or_else(|| ExtractorError::MissingDate(file_name.to_string()))?;

    let mut diagnostics = Diagnostics::new();
    let proposal_discussions = extract_proposal_discussions(&html, &plenary_id, &mut diagnostics);

    let MotionExtraction { mut motions, votes } = extract_motions_and_votes(
        &document_text(&html),
        &plenary_id,
        &VoteBlockLayout::default(),
        directory,
        &mut diagnostics,
    )?;

    let motion_data = extract_motion_data(&html, &BorderedSpanDetector, file_name, &mut diagnostics);
    link_motions(&mut motions, &motion_data, &plenary_id);

    tracing::debug!(
        plenary_id = %plenary_id,
        %date,
        discussions = proposal_discussions.len(),
        motions = motions.len(),
        votes = votes.len(),
        diagnostics = diagnostics.len(),
        "Extracted plenary"
    );

    Ok(PlenaryReport {
        plenary: Plenary {
            id: plenary_id,
            number,
            date,
            legislature: config.legislature,
            pdf_report_url: pdf_report_url(config.legislature, plenary_number),
            html_report_url: html_report_url(config.legislature, plenary_number),
            proposal_discussions,
            motions,
            motion_data,
        },
        votes,
        diagnostics,
    })
}

/// Read, decode and extract one report file.
pub fn extract_from_html_plenary_report<'d, D>(
    path: &Path,
    config: &ExtractionConfig,
    directory: &'d D,
) -> Result<PlenaryReport<'d>>
where
    D: PoliticianDirectory + ?Sized,
{
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExtractorError::InvalidReportFilename(path.display().to_string()))?;

    let content = read_plenary_html(path)?;
    extract_plenary(file_name, &content, config, directory)
}

/// Extract a report from the configured data directory by file name.
pub fn extract_from_data_dir<'d, D>(
    file_name: &str,
    config: &ExtractionConfig,
    directory: &'d D,
) -> Result<PlenaryReport<'d>>
where
    D: PoliticianDirectory + ?Sized,
{
    extract_from_html_plenary_report(&config.plenary_html_input_path(file_name), config, directory)
}

/// Session date from the paragraphs of the report's first table.
///
/// A Dutch "weekday day month year" line wins over a numeric `d-m-yyyy` one.
fn extract_plenary_date(html: &Html) -> Option<NaiveDate> {
    let table = html.select(&selector("table")).next()?;
    let paragraphs: Vec<String> = table.select(&selector("p")).map(raw_text).collect();

    paragraphs
        .iter()
        .find_map(|text| parse_weekday_date(text))
        .or_else(|| paragraphs.iter().find_map(|text| parse_numeric_date(text)))
}

fn parse_weekday_date(text: &str) -> Option<NaiveDate> {
    let text = text.to_lowercase();
    if !DAYS_NL.iter().any(|day| text.contains(day)) {
        return None;
    }

    let parts: Vec<&str> = text.split_whitespace().collect();
    let [_, day, month, year] = parts.as_slice() else {
        return None;
    };
    let month = MONTHS_NL.iter().position(|name| name == month)? + 1;

    NaiveDate::from_ymd_opt(year.parse().ok()?, u32::try_from(month).ok()?, day.parse().ok()?)
}

fn parse_numeric_date(text: &str) -> Option<NaiveDate> {
    let caps = NUMERIC_DATE_RE.captures(text.trim())?;
    NaiveDate::from_ymd_opt(
        caps[3].parse().ok()?,
        caps[2].parse().ok()?,
        caps[1].parse().ok()?,
    )
}

/// Link motions to the report item whose text announces their roll-call vote.
fn link_motions(motions: &mut [Motion], motion_data: &[MotionData], plenary_id: &str) {
    for data in motion_data {
        let body_text = data.body_text();
        for caps in VOTE_REFERENCE_RE.captures_iter(&body_text) {
            let Ok(number) = caps[1].parse::<u32>() else {
                continue;
            };
            match motions.iter_mut().find(|motion| motion.number == number) {
                Some(motion) => motion.proposal_id = Some(format!("{plenary_id}_{}", data.label)),
                None => tracing::debug!(plenary_id, number, "Motion text refers to unknown vote"),
            }
        }
    }
}

//! Reading plenary reports from disk.
//!
//! The Chamber publishes its reports in Windows-1252, not UTF-8.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use scraper::Html;

use crate::error::Result;

/// Read a report file and decode it from Windows-1252.
pub fn read_plenary_html(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        tracing::debug!(path = %path.display(), "Replaced undecodable bytes");
    }
    Ok(text.into_owned())
}

/// Parse decoded report HTML into an element tree.
#[must_use]
pub fn parse_report(content: &str) -> Html {
    Html::parse_document(content)
}

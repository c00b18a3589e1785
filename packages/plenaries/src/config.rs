//! Configuration constants, URL builders and validation functions.

use std::path::PathBuf;

use crate::error::{ExtractorError, Result};

/// Base URL of the Belgian Chamber of Representatives website.
pub const DEKAMER_BASE_URL: &str = "https://www.dekamer.be";

/// Legislature processed when nothing else is configured.
///
/// The download scripts only fetch reports of legislature 55.
pub const DEFAULT_LEGISLATURE: u32 = 55;

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Location of the plenary HTML reports below the data directory.
const PLENARY_HTML_INPUT_DIR: &str = "input/plenary/html";

/// Explicit configuration for an extraction run.
///
/// Passed into every extraction entry point instead of living in
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Legislature the reports belong to (e.g., 55).
    pub legislature: u32,

    /// Root of the data directory.
    pub data_dir: PathBuf,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            legislature: DEFAULT_LEGISLATURE,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl ExtractionConfig {
    /// Read the configuration from `PLENARY_LEGISLATURE` and `PLENARY_DATA_DIR`,
    /// falling back to the defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let legislature = std::env::var("PLENARY_LEGISLATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LEGISLATURE);

        let data_dir = std::env::var("PLENARY_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_DATA_DIR.into())
            .into();

        Self {
            legislature,
            data_dir,
        }
    }

    #[must_use]
    pub fn with_legislature(mut self, legislature: u32) -> Self {
        self.legislature = legislature;
        self
    }

    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Directory holding the downloaded plenary HTML reports.
    #[must_use]
    pub fn plenary_html_input_dir(&self) -> PathBuf {
        self.data_dir.join(PLENARY_HTML_INPUT_DIR)
    }

    /// Path of a plenary HTML report inside the data directory.
    #[must_use]
    pub fn plenary_html_input_path(&self, file_name: &str) -> PathBuf {
        self.plenary_html_input_dir().join(file_name)
    }

    /// Unique plenary identifier: legislature and plenary number.
    ///
    /// # Examples
    /// ```
    /// use plenaries::config::ExtractionConfig;
    ///
    /// assert_eq!(ExtractionConfig::default().plenary_id("298"), "55_298");
    /// ```
    #[must_use]
    pub fn plenary_id(&self, plenary_number: &str) -> String {
        format!("{}_{plenary_number}", self.legislature)
    }
}

/// Extract the plenary number from a report file name.
///
/// The number is the fixed three-character slice at positions 2..5
/// (`ip298x.html` -> `"298"`).
///
/// # Examples
/// ```
/// use plenaries::config::plenary_number_from_filename;
///
/// assert_eq!(plenary_number_from_filename("ip298x.html").unwrap(), "298");
/// assert!(plenary_number_from_filename("report.html").is_err());
/// ```
pub fn plenary_number_from_filename(file_name: &str) -> Result<&str> {
    file_name
        .get(2..5)
        .filter(|number| number.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| ExtractorError::InvalidReportFilename(file_name.to_string()))
}

/// URL of the PDF version of a plenary report.
#[must_use]
pub fn pdf_report_url(legislature: u32, plenary_number: &str) -> String {
    format!("{DEKAMER_BASE_URL}/doc/PCRI/pdf/{legislature}/ip{plenary_number}.pdf")
}

/// URL of the HTML version of a plenary report.
#[must_use]
pub fn html_report_url(legislature: u32, plenary_number: &str) -> String {
    format!("{DEKAMER_BASE_URL}/doc/PCRI/html/{legislature}/ip{plenary_number}x.html")
}

/// URL of one sub-document PDF of a parliamentary document.
///
/// # Examples
/// ```
/// use plenaries::config::sub_document_pdf_url;
///
/// assert_eq!(
///     sub_document_pdf_url(55, 1234, 5),
///     "https://www.dekamer.be/FLWB/PDF/55/1234/55K1234005.pdf"
/// );
/// ```
#[must_use]
pub fn sub_document_pdf_url(legislature: u32, document_number: u32, sub_document: u32) -> String {
    format!(
        "{DEKAMER_BASE_URL}/FLWB/PDF/{legislature}/{document_number}/{legislature}K{document_number}{sub_document:03}.pdf"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plenary_number_from_filename_valid() {
        assert_eq!(plenary_number_from_filename("ip298x.html").unwrap(), "298");
        assert_eq!(plenary_number_from_filename("ip007x.html").unwrap(), "007");
    }

    #[test]
    fn test_plenary_number_from_filename_invalid() {
        assert!(plenary_number_from_filename("").is_err());
        assert!(plenary_number_from_filename("ip2").is_err());
        assert!(plenary_number_from_filename("ipabcx.html").is_err());
    }

    #[test]
    fn test_report_urls() {
        assert_eq!(
            pdf_report_url(55, "298"),
            "https://www.dekamer.be/doc/PCRI/pdf/55/ip298.pdf"
        );
        assert_eq!(
            html_report_url(55, "298"),
            "https://www.dekamer.be/doc/PCRI/html/55/ip298x.html"
        );
    }

    #[test]
    fn test_sub_document_pdf_url_pads_sub_document_only() {
        assert_eq!(
            sub_document_pdf_url(55, 123, 2),
            "https://www.dekamer.be/FLWB/PDF/55/123/55K123002.pdf"
        );
        assert_eq!(
            sub_document_pdf_url(54, 34, 11),
            "https://www.dekamer.be/FLWB/PDF/54/34/54K34011.pdf"
        );
    }

    #[test]
    fn test_config_builders() {
        let config = ExtractionConfig::default()
            .with_legislature(56)
            .with_data_dir("/tmp/data");

        assert_eq!(config.legislature, 56);
        assert_eq!(config.plenary_id("001"), "56_001");
        assert_eq!(
            config.plenary_html_input_path("ip001x.html"),
            PathBuf::from("/tmp/data/input/plenary/html/ip001x.html")
        );
    }
}

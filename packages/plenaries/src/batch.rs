//! Batch extraction over a directory of reports.
//!
//! Reports share nothing but the read-only politician directory, so they are
//! extracted in parallel. A report that fails is recorded and skipped; the
//! others still complete.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::ExtractionConfig;
use crate::error::{ExtractorError, Result};
use crate::plenary::{extract_from_html_plenary_report, PlenaryReport};
use crate::politicians::PoliticianDirectory;
use crate::types::{Plenary, Vote};

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome<'d> {
    /// Successfully extracted reports, in file name order.
    pub reports: Vec<PlenaryReport<'d>>,

    /// One [`ExtractorError::Report`] per report that failed.
    pub failures: Vec<ExtractorError>,
}

impl<'d> BatchOutcome<'d> {
    pub fn plenaries(&self) -> impl Iterator<Item = &Plenary> {
        self.reports.iter().map(|report| &report.plenary)
    }

    pub fn votes(&self) -> impl Iterator<Item = &Vote<'d>> {
        self.reports.iter().flat_map(|report| report.votes.iter())
    }

    #[must_use]
    pub fn motion_count(&self) -> usize {
        self.plenaries().map(|plenary| plenary.motions.len()).sum()
    }

    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.reports.iter().map(|report| report.diagnostics.len()).sum()
    }
}

/// HTML report files in a directory, sorted by name.
///
/// With a `limit`, only the first `limit` files are returned.
pub fn report_paths(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            paths.push(path);
        }
    }
    paths.sort();

    if let Some(limit) = limit {
        paths.truncate(limit);
    }
    Ok(paths)
}

/// Extract the given report files in parallel.
pub fn extract_from_html_plenary_reports<'d, D>(
    paths: &[PathBuf],
    config: &ExtractionConfig,
    directory: &'d D,
) -> BatchOutcome<'d>
where
    D: PoliticianDirectory + ?Sized,
{
    tracing::info!(reports = paths.len(), "Extracting plenary reports");

    let results: Vec<Result<PlenaryReport<'d>>> = paths
        .par_iter()
        .map(|path| {
            extract_from_html_plenary_report(path, config, directory)
                .map_err(|e| e.in_report(path))
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            Ok(report) => outcome.reports.push(report),
            Err(e) => {
                tracing::warn!("Skipping report: {e}");
                outcome.failures.push(e);
            }
        }
    }

    tracing::info!(
        extracted = outcome.reports.len(),
        failed = outcome.failures.len(),
        "Finished extracting plenary reports"
    );
    outcome
}

/// Extract every report in a directory.
pub fn extract_from_directory<'d, D>(
    dir: &Path,
    limit: Option<usize>,
    config: &ExtractionConfig,
    directory: &'d D,
) -> Result<BatchOutcome<'d>>
where
    D: PoliticianDirectory + ?Sized,
{
    let paths = report_paths(dir, limit)?;
    Ok(extract_from_html_plenary_reports(&paths, config, directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::politicians::Politicians;

    const VALID_REPORT: &str = "<html><body>
<table><tr><td><p>15-12-2022</p></td></tr></table>
<p>Vote nominatif - Naamstemming: 001</p>
<p>Oui 000 Ja</p>
<p>Non 000 Nee</p>
<p>Abstentions 000 Onthoudingen</p>
</body></html>";

    const BROKEN_REPORT: &str = "<html><body>
<table><tr><td><p>16-12-2022</p></td></tr></table>
<p>Vote nominatif - Naamstemming: 001</p>
<p>Non 000 Nee</p>
<p>Oui 000 Ja</p>
<p>Abstentions 000 Onthoudingen</p>
</body></html>";

    fn write_reports(dir: &Path, reports: &[(&str, &str)]) {
        for (name, content) in reports {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn test_report_paths_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(
            dir.path(),
            &[
                ("ip300x.html", ""),
                ("ip298x.html", ""),
                ("notes.txt", ""),
                ("ip299x.html", ""),
            ],
        );

        let names: Vec<_> = report_paths(dir.path(), None)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ip298x.html", "ip299x.html", "ip300x.html"]);

        assert_eq!(report_paths(dir.path(), Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_report_paths_missing_dir() {
        assert!(report_paths(Path::new("/nonexistent/plenaries"), None).is_err());
    }

    #[test]
    fn test_failed_report_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(
            dir.path(),
            &[
                ("ip298x.html", VALID_REPORT),
                ("ip299x.html", BROKEN_REPORT),
                ("ip300x.html", VALID_REPORT),
            ],
        );
        let politicians = Politicians::default();

        let outcome = extract_from_directory(
            dir.path(),
            None,
            &ExtractionConfig::default(),
            &politicians,
        )
        .unwrap();

        let ids: Vec<_> = outcome.plenaries().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["55_298", "55_300"]);
        assert_eq!(outcome.motion_count(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(
            &outcome.failures[0],
            ExtractorError::Report { path, source }
                if path.ends_with("ip299x.html")
                    && matches!(**source, ExtractorError::MarkerOrder { .. })
        ));
    }
}

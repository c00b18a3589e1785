//! Command-line interface for plenary extraction.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{extract_from_html_plenary_reports, report_paths, BatchOutcome};
use crate::config::ExtractionConfig;
use crate::error::{ExtractorError, Result};
use crate::politicians::Politicians;
use crate::references::analyse_document_references;
use crate::yaml::save_report;

/// Extract proposals, motions and roll-call votes from Chamber plenary reports.
#[derive(Parser)]
#[command(name = "plenaries")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract plenary reports and optionally save them as YAML.
    Extract {
        /// Report file or directory of reports (default: <data dir>/input/plenary/html)
        input: Option<PathBuf>,

        /// Politician directory (JSON array of {id, full_name, party})
        #[arg(short, long)]
        politicians: PathBuf,

        /// Output directory for YAML reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only process the first N reports
        #[arg(short, long)]
        limit: Option<usize>,

        /// Legislature number (default: $PLENARY_LEGISLATURE or 55)
        #[arg(long)]
        legislature: Option<u32>,
    },

    /// Analyse the document references of all proposals.
    References {
        /// Report file or directory of reports (default: <data dir>/input/plenary/html)
        input: Option<PathBuf>,

        /// Politician directory (JSON array of {id, full_name, party})
        #[arg(short, long)]
        politicians: PathBuf,

        /// Only list references that could not be parsed
        #[arg(long)]
        bad_only: bool,

        /// Legislature number (default: $PLENARY_LEGISLATURE or 55)
        #[arg(long)]
        legislature: Option<u32>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            politicians,
            output,
            limit,
            legislature,
        } => {
            let config = load_config(legislature);
            extract_command(&config, input, &politicians, output.as_deref(), limit)
        }
        Commands::References {
            input,
            politicians,
            bad_only,
            legislature,
        } => {
            let config = load_config(legislature);
            references_command(&config, input, &politicians, bad_only)
        }
    }
}

fn load_config(legislature: Option<u32>) -> ExtractionConfig {
    let config = ExtractionConfig::from_env();
    match legislature {
        Some(legislature) => config.with_legislature(legislature),
        None => config,
    }
}

/// Resolve the input argument to a list of report files.
fn input_paths(
    config: &ExtractionConfig,
    input: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let input = input.unwrap_or_else(|| config.plenary_html_input_dir());

    if input.is_dir() {
        report_paths(&input, limit)
    } else if input.is_file() {
        Ok(vec![input])
    } else {
        Err(ExtractorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input does not exist: {}", input.display()),
        )))
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn extract_reports<'d>(
    config: &ExtractionConfig,
    paths: &[PathBuf],
    politicians: &'d Politicians,
) -> BatchOutcome<'d> {
    let pb = spinner("Extracting plenary reports...");
    let outcome = extract_from_html_plenary_reports(paths, config, politicians);
    pb.finish_and_clear();
    outcome
}

/// Execute the extract command.
fn extract_command(
    config: &ExtractionConfig,
    input: Option<PathBuf>,
    politicians_path: &Path,
    output: Option<&Path>,
    limit: Option<usize>,
) -> Result<()> {
    let paths = input_paths(config, input, limit)?;
    let politicians = Politicians::load(politicians_path)?;

    println!(
        "{} {} reports (legislature {})",
        style("Extracting").bold(),
        style(paths.len()).cyan(),
        style(config.legislature).green()
    );
    println!();

    let outcome = extract_reports(config, &paths, &politicians);
    let unresolved = outcome.votes().filter(|vote| !vote.is_resolved()).count();

    println!("  Plenaries: {}", style(outcome.reports.len()).green());
    println!("  Motions: {}", outcome.motion_count());
    println!("  Votes: {}", outcome.votes().count());
    if unresolved > 0 {
        println!("  Unresolved voters: {}", style(unresolved).yellow().bold());
    }
    if outcome.diagnostic_count() > 0 {
        println!(
            "  Warnings: {}",
            style(outcome.diagnostic_count()).yellow().bold()
        );
    }
    for failure in &outcome.failures {
        println!("  {} {failure}", style("Failed:").red().bold());
    }

    if let Some(output_dir) = output {
        for report in &outcome.reports {
            save_report(report, output_dir)?;
        }
        println!();
        println!(
            "{} {}",
            style("Saved to:").green().bold(),
            output_dir.display()
        );
    }

    Ok(())
}

/// Execute the references command.
fn references_command(
    config: &ExtractionConfig,
    input: Option<PathBuf>,
    politicians_path: &Path,
    bad_only: bool,
) -> Result<()> {
    let paths = input_paths(config, input, None)?;
    let politicians = Politicians::load(politicians_path)?;

    let outcome = extract_reports(config, &paths, &politicians);
    let plenaries: Vec<_> = outcome.plenaries().cloned().collect();
    let analysis = analyse_document_references(&plenaries);

    if bad_only {
        for (reference, locations) in analysis.bad_references() {
            println!(
                "{} {} ({})",
                style("Unparsed:").yellow().bold(),
                reference.all_documents_reference,
                locations.join(", ")
            );
        }
    } else {
        for url in analysis.sub_document_pdf_urls(config.legislature) {
            println!("{url}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from([
            "plenaries",
            "extract",
            "data/input/plenary/html",
            "--politicians",
            "politicians.json",
        ]);

        let Commands::Extract {
            input,
            politicians,
            output,
            limit,
            legislature,
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert_eq!(input, Some(PathBuf::from("data/input/plenary/html")));
        assert_eq!(politicians, PathBuf::from("politicians.json"));
        assert!(output.is_none());
        assert!(limit.is_none());
        assert!(legislature.is_none());
    }

    #[test]
    fn test_cli_parse_extract_with_options() {
        let cli = Cli::parse_from([
            "plenaries",
            "extract",
            "-p",
            "politicians.json",
            "--output",
            "out",
            "--limit",
            "5",
            "--legislature",
            "54",
        ]);

        let Commands::Extract {
            input,
            output,
            limit,
            legislature,
            ..
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert!(input.is_none());
        assert_eq!(output, Some(PathBuf::from("out")));
        assert_eq!(limit, Some(5));
        assert_eq!(legislature, Some(54));
    }

    #[test]
    fn test_cli_parse_references_bad_only() {
        let cli = Cli::parse_from([
            "plenaries",
            "references",
            "ip298x.html",
            "--politicians",
            "politicians.json",
            "--bad-only",
        ]);

        let Commands::References { input, bad_only, .. } = cli.command else {
            panic!("expected references command");
        };
        assert_eq!(input, Some(PathBuf::from("ip298x.html")));
        assert!(bad_only);
    }

    #[test]
    fn test_cli_requires_politicians() {
        assert!(Cli::try_parse_from(["plenaries", "extract", "ip298x.html"]).is_err());
    }

    #[test]
    fn test_load_config_overrides_legislature() {
        assert_eq!(load_config(Some(54)).legislature, 54);
    }

    #[test]
    fn test_input_paths_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ip298x.html");
        std::fs::write(&file, "").unwrap();

        let paths = input_paths(&ExtractionConfig::default(), Some(file.clone()), None).unwrap();
        assert_eq!(paths, vec![file]);
    }

    #[test]
    fn test_input_paths_missing() {
        let result = input_paths(
            &ExtractionConfig::default(),
            Some(PathBuf::from("/nonexistent/ip298x.html")),
            None,
        );
        assert!(result.is_err());
    }
}

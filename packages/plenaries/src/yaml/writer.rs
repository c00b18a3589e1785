//! YAML writer for plenary reports.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::plenary::PlenaryReport;
use crate::types::{Plenary, Vote, VoteType};

/// Vote representation for YAML serialization.
///
/// The politician is referenced by id only; the directory is stored elsewhere.
#[derive(Debug, Serialize)]
struct YamlVote<'a> {
    politician_id: Option<u32>,
    name: &'a str,
    motion_id: &'a str,
    vote_type: VoteType,
}

impl<'a> From<&'a Vote<'_>> for YamlVote<'a> {
    fn from(vote: &'a Vote<'_>) -> Self {
        Self {
            politician_id: vote.politician.map(|p| p.id),
            name: vote.full_name(),
            motion_id: &vote.motion_id,
            vote_type: vote.vote_type,
        }
    }
}

/// Full report representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlReport<'a> {
    #[serde(flatten)]
    plenary: &'a Plenary,
    votes: Vec<YamlVote<'a>>,
    #[serde(skip_serializing_if = "Diagnostics::is_empty")]
    diagnostics: &'a Diagnostics,
}

/// Generate the YAML document for a report.
pub fn generate_yaml(report: &PlenaryReport<'_>) -> Result<String> {
    let yaml_struct = YamlReport {
        plenary: &report.plenary,
        votes: report.votes.iter().map(YamlVote::from).collect(),
        diagnostics: &report.diagnostics,
    };
    let yaml_string = serde_yaml_ng::to_string(&yaml_struct)?;

    // Add document start marker and clean up trailing whitespace
    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Save a report as `<plenary id>.yaml` in `output_dir`.
///
/// Writes to a temp file, syncs it and renames it into place, so an
/// interrupted run never leaves a truncated report behind.
///
/// # Returns
/// Path to the saved file
pub fn save_report(report: &PlenaryReport<'_>, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let plenary_id = &report.plenary.id;
    let output_file = output_dir.join(format!("{plenary_id}.yaml"));
    let temp_file = output_dir.join(format!(".{plenary_id}.yaml.tmp"));

    let content = generate_yaml(report)?;

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;
    tracing::debug!(path = %output_file.display(), "Saved plenary report");

    Ok(output_file)
}

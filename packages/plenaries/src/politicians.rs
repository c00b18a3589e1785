//! Politician directory used to resolve voter names.
//!
//! The directory is loaded once before any report is processed and is only
//! read afterwards, so it can be shared by reference across parallel
//! extractions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;

/// A member of parliament.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Politician {
    pub id: u32,

    /// Name as printed in vote lists: last name first (e.g. "Aouasti Khalil").
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
}

/// Name-to-identity lookup service.
pub trait PoliticianDirectory: Sync {
    /// Find a politician by full name; `None` when unknown.
    fn lookup(&self, full_name: &str) -> Option<&Politician>;
}

/// In-memory politician directory.
#[derive(Debug, Clone, Default)]
pub struct Politicians {
    politicians: Vec<Politician>,
    by_name: HashMap<String, usize>,
    by_key: HashMap<String, usize>,
}

impl Politicians {
    #[must_use]
    pub fn new(politicians: Vec<Politician>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_key = HashMap::new();

        for (index, politician) in politicians.iter().enumerate() {
            by_name.entry(politician.full_name.clone()).or_insert(index);
            by_key
                .entry(normalize_name(&politician.full_name))
                .or_insert(index);
        }

        Self {
            politicians,
            by_name,
            by_key,
        }
    }

    /// Parse a JSON array of politicians.
    pub fn from_json(json: &str) -> Result<Self> {
        let politicians: Vec<Politician> = serde_json::from_str(json)?;
        Ok(Self::new(politicians))
    }

    /// Load the directory from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let politicians = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), count = politicians.len(), "Loaded politicians");
        Ok(politicians)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.politicians.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.politicians.is_empty()
    }
}

impl PoliticianDirectory for Politicians {
    fn lookup(&self, full_name: &str) -> Option<&Politician> {
        self.by_name
            .get(full_name)
            .or_else(|| self.by_key.get(&normalize_name(full_name)))
            .map(|&index| &self.politicians[index])
    }
}

/// Comparison key for a name: accents stripped, lowercased, whitespace collapsed.
///
/// # Examples
/// ```
/// use plenaries::politicians::normalize_name;
///
/// assert_eq!(normalize_name("  Bruyère   Robin "), "bruyere robin");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

//! Pattern Store: the read-only table of sector -> letter fragments.
//!
//! Loaded once at startup and shared through `AppState`. A malformed table is
//! fatal; the service never serves with a half-loaded store.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to read pattern file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("pattern file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pattern entry {index} has a blank sector name")]
    BlankSector { index: usize },

    #[error("sector '{0}' appears more than once")]
    DuplicateSector(String),

    #[error("sector '{0}' has no fragments")]
    NoFragments(String),
}

/// One sector and the prior-letter fragments associated with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub sector: String,
    pub fragments: Vec<String>,
}

/// A single (sector, fragment) pair used as stylistic hinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternFragment<'a> {
    pub sector: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    entries: Vec<PatternEntry>,
}

impl PatternStore {
    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, PatternError> {
        let entries: Vec<PatternEntry> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<PatternEntry>) -> Result<Self, PatternError> {
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let sector = entry.sector.trim();
            if sector.is_empty() {
                return Err(PatternError::BlankSector { index });
            }
            if !seen.insert(sector.to_lowercase()) {
                return Err(PatternError::DuplicateSector(sector.to_string()));
            }
            if entry.fragments.is_empty() {
                return Err(PatternError::NoFragments(sector.to_string()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn fragments(&self) -> impl Iterator<Item = PatternFragment<'_>> {
        self.entries.iter().flat_map(|entry| {
            entry.fragments.iter().map(move |text| PatternFragment {
                sector: &entry.sector,
                text,
            })
        })
    }

    /// Flattens the table to `"<sector>: <f1> | <f2>"`, one line per sector,
    /// in load order.
    pub fn render_context(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}: {}", entry.sector, entry.fragments.join(" | ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

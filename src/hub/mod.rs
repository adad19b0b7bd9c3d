//! The context hub: a shared, append-only Markdown note file.
//!
//! Participants read the whole file before acting and append one section
//! before yielding. Existing bytes are never rewritten; each append records
//! the new length and digest in a sidecar ledger so that can be checked later.
//! There is no locking. Sequential access is the caller's job.

pub mod ledger;
pub mod section;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::utils::fs::{append_bytes, remove_if_exists};
use ledger::LedgerLine;
use section::Section;

#[derive(Debug, Clone)]
pub struct Hub {
    path: PathBuf,
}

impl Hub {
    pub fn new(path: PathBuf) -> Self {
        Hub { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ledger_path(&self) -> PathBuf {
        ledger::ledger_path(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Full hub text, or `None` when there is no usable prior context
    /// (missing file, unreadable, or not UTF-8).
    pub fn read(&self) -> Option<String> {
        match fs::read(&self.path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Some(text),
                Err(_) => {
                    warn!(path = %self.path.display(), "context hub is not valid UTF-8, ignoring it");
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read context hub");
                None
            }
        }
    }

    pub fn sections(&self) -> Vec<Section> {
        self.read()
            .map(|text| section::parse_sections(&text))
            .unwrap_or_default()
    }

    /// Append one section for `role`, timestamped now
    pub fn append(&self, role: &str, body: &str) -> Result<Section> {
        let section = Section::new(role, body, Utc::now())?;
        self.append_section(&section)?;
        Ok(section)
    }

    pub fn append_section(&self, section: &Section) -> Result<LedgerLine> {
        let mut content = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let mut addition = Vec::new();
        if content.last().is_some_and(|b| *b != b'\n') {
            addition.push(b'\n');
        }
        addition.extend_from_slice(section.render().as_bytes());

        append_bytes(&self.path, &addition)?;
        content.extend_from_slice(&addition);

        let line = LedgerLine::for_content(&content);
        ledger::append_line(&self.ledger_path(), &line)?;
        debug!(role = %section.role, len = line.len, "appended context hub section");

        Ok(line)
    }

    /// Delete the hub and its ledger. Returns true if the hub file existed.
    pub fn clear(&self) -> Result<bool> {
        let removed = remove_if_exists(&self.path)?;
        remove_if_exists(&self.ledger_path())?;
        Ok(removed)
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::fs::append_bytes;
use crate::utils::hash::sha256_hex;

static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+) ([a-f0-9]{64})$").unwrap());

/// One ledger record: the hub's length and digest right after an append
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine {
    pub len: u64,
    pub digest: String,
}

impl LedgerLine {
    pub fn for_content(content: &[u8]) -> Self {
        LedgerLine {
            len: content.len() as u64,
            digest: sha256_hex(content),
        }
    }

    pub fn parse(line: &str) -> Option<Self> {
        let caps = LINE_RE.captures(line.trim_end())?;
        Some(LedgerLine {
            len: caps[1].parse().ok()?,
            digest: caps[2].to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        format!("{} {}\n", self.len, self.digest)
    }
}

/// Sidecar ledger path: `context-hub.md` -> `context-hub.md.sums`
pub fn ledger_path(hub_path: &Path) -> PathBuf {
    let mut name = hub_path.as_os_str().to_os_string();
    name.push(".sums");
    PathBuf::from(name)
}

pub fn append_line(ledger: &Path, line: &LedgerLine) -> io::Result<()> {
    append_bytes(ledger, line.to_line().as_bytes())
}

/// Read the raw ledger lines (1-based line number, parsed record if well-formed).
/// A missing ledger reads as empty.
pub fn read_lines(ledger: &Path) -> io::Result<Vec<(usize, Option<LedgerLine>)>> {
    let raw = match fs::read_to_string(ledger) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    Ok(raw
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, LedgerLine::parse(line)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ledger_path() {
        assert_eq!(
            ledger_path(Path::new(".claude/context-hub.md")),
            PathBuf::from(".claude/context-hub.md.sums")
        );
    }

    #[test]
    fn test_parse_line() {
        let line = LedgerLine::for_content(b"hello world");
        assert_eq!(line.len, 11);
        assert_eq!(LedgerLine::parse(&line.to_line()), Some(line));

        assert!(LedgerLine::parse("11 nothex").is_none());
        assert!(LedgerLine::parse("garbage").is_none());
    }

    #[test]
    fn test_read_lines_missing_and_malformed() {
        let dir = tempdir().unwrap();
        let ledger = dir.path().join("hub.md.sums");
        assert!(read_lines(&ledger).unwrap().is_empty());

        let good = LedgerLine::for_content(b"abc");
        append_line(&ledger, &good).unwrap();
        append_bytes(&ledger, b"not a record\n").unwrap();

        let lines = read_lines(&ledger).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (1, Some(good)));
        assert_eq!(lines[1], (2, None));
    }
}

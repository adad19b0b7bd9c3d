use std::fs;
use std::io;
use std::path::Path;
use std::process;

use thiserror::Error;

use crate::commands::hub::open;
use crate::hub::ledger::{self, LedgerLine};
use crate::hub::Hub;
use crate::utils::hash::{sha256_hex, short};

const EXIT_SUCCESS: i32 = 0;
const EXIT_PREFIX_ALTERED: i32 = 1;
const EXIT_NO_HUB: i32 = 2;

/// Result of a successful verification
#[derive(Debug)]
pub struct VerifyResult {
    /// Ledger records checked
    pub appends: usize,
    pub hub_len: u64,
    /// Bytes after the last recorded append (written without devhub)
    pub unrecorded: u64,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("No context hub at {0}")]
    NoHub(String),

    #[error("Hub truncated: ledger line {line} records {recorded} bytes, file has {actual}")]
    Truncated { line: usize, recorded: u64, actual: u64 },

    #[error("Hub rewritten within its first {len} bytes (ledger line {line})\nExpected: {expected}\nFound:    {found}")]
    Altered {
        line: usize,
        len: u64,
        expected: String,
        found: String,
    },

    #[error("Malformed ledger line {0}")]
    MalformedLedger(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub fn run(project_dir: &Path) -> crate::error::Result<()> {
    let hub = open(project_dir)?;

    match verify_hub(&hub) {
        Ok(result) => {
            if result.appends == 0 {
                println!("✓ Nothing recorded yet: no appends in the ledger");
            } else {
                println!("✓ Hub verified: {} appends, {} bytes", result.appends, result.hub_len);
            }
            if result.unrecorded > 0 {
                println!("  Note: {} bytes after the last recorded append", result.unrecorded);
            }
            process::exit(EXIT_SUCCESS);
        }
        Err(VerifyError::NoHub(path)) => {
            eprintln!("No context hub at {}", path);
            process::exit(EXIT_NO_HUB);
        }
        Err(VerifyError::Altered {
            line,
            len,
            expected,
            found,
        }) => {
            eprintln!("✗ Hub rewritten within its first {} bytes (ledger line {})", len, line);
            eprintln!();
            eprintln!("Expected: {}", expected);
            eprintln!("Found:    {}", found);
            eprintln!();
            eprintln!("Earlier sections were edited or removed. The hub is append-only.");
            process::exit(EXIT_PREFIX_ALTERED);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(EXIT_PREFIX_ALTERED);
        }
    }
}

/// Check every ledger record against the current hub bytes
pub fn verify_hub(hub: &Hub) -> Result<VerifyResult, VerifyError> {
    let content = match fs::read(hub.path()) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(VerifyError::NoHub(hub.path().display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let actual = content.len() as u64;

    let lines = ledger::read_lines(&hub.ledger_path())?;
    let mut last_len = 0;

    for (line, record) in &lines {
        let LedgerLine { len, digest } = record.as_ref().ok_or(VerifyError::MalformedLedger(*line))?;

        if *len > actual {
            return Err(VerifyError::Truncated {
                line: *line,
                recorded: *len,
                actual,
            });
        }

        let found = sha256_hex(&content[..*len as usize]);
        if &found != digest {
            return Err(VerifyError::Altered {
                line: *line,
                len: *len,
                expected: short(digest).to_string(),
                found: short(&found).to_string(),
            });
        }

        last_len = *len;
    }

    Ok(VerifyResult {
        appends: lines.len(),
        hub_len: actual,
        unrecorded: actual - last_len,
    })
}

//! Format-on-write hook.
//!
//! Reads a host tool event, and if it names an existing file with an
//! allow-listed extension, runs the project's formatter over it. Every
//! failure ends in a skip; the caller is never blocked.

pub mod event;
pub mod formatter;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::HookConfig;
use event::HookEvent;
use formatter::Invocation;

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Payload was not JSON or had no `tool_input.file_path`
    NoFilePath,
    ExtensionNotAllowed(PathBuf),
    FileMissing(PathBuf),
    NoFormatter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoFilePath => write!(f, "event has no tool_input.file_path"),
            SkipReason::ExtensionNotAllowed(p) => {
                write!(f, "extension not in allow-list: {}", p.display())
            }
            SkipReason::FileMissing(p) => write!(f, "file does not exist: {}", p.display()),
            SkipReason::NoFormatter => write!(f, "no formatter configured"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    Skipped(SkipReason),
    Dispatched { invocation: Invocation, succeeded: bool },
}

/// True when the text after the last `.` of the file name is in the
/// allow-list (case-insensitive). Dotfiles like `.prettierrc.json` count.
pub fn extension_allowed(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    !ext.is_empty() && extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext))
}

/// Decide what to run for a raw stdin payload, without running anything
pub fn plan(input: &str, config: &HookConfig, project_dir: &Path) -> Result<Invocation, SkipReason> {
    let event = HookEvent::parse(input).ok_or(SkipReason::NoFilePath)?;
    debug!(
        event = event.hook_event_name.as_deref().unwrap_or("-"),
        tool = event.tool_name.as_deref().unwrap_or("-"),
        "format hook received event"
    );
    let path = event.resolved_path(project_dir).ok_or(SkipReason::NoFilePath)?;

    if !extension_allowed(&path, &config.extensions) {
        return Err(SkipReason::ExtensionNotAllowed(path));
    }

    if !path.is_file() {
        return Err(SkipReason::FileMissing(path));
    }

    formatter::resolve(config, project_dir, &path).ok_or(SkipReason::NoFormatter)
}

/// Plan, then run the formatter at most once
pub fn handle(input: &str, config: &HookConfig, project_dir: &Path) -> HookOutcome {
    match plan(input, config, project_dir) {
        Ok(invocation) => {
            let succeeded = formatter::run(&invocation, project_dir);
            HookOutcome::Dispatched {
                invocation,
                succeeded,
            }
        }
        Err(reason) => HookOutcome::Skipped(reason),
    }
}

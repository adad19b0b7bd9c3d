use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

/// The subset of a host tool event the hook cares about.
/// Unknown fields are ignored; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub hook_event_name: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub tool_input: Option<Value>,
}

impl HookEvent {
    /// Parse a raw stdin payload. Anything that isn't a JSON object yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        serde_json::from_str(input).ok()
    }

    /// `tool_input.file_path`, if present as a non-empty string
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input
            .as_ref()?
            .get("file_path")?
            .as_str()
            .filter(|p| !p.trim().is_empty())
    }

    /// Resolve the file path against the event's `cwd`, then `project_dir`
    pub fn resolved_path(&self, project_dir: &Path) -> Option<PathBuf> {
        let raw = Path::new(self.file_path()?);
        if raw.is_absolute() {
            return Some(raw.to_path_buf());
        }

        let base = match self.cwd.as_deref() {
            Some(cwd) if !cwd.is_empty() => Path::new(cwd),
            _ => project_dir,
        };
        Some(base.join(raw))
    }
}

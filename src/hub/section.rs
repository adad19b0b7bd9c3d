use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DevhubError, Result};

static ROLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").unwrap());

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^## ([a-z][a-z0-9-]*) \((\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z)\)$").unwrap()
});

/// Roles shipped with the bundle. Any other kebab-case role is accepted too.
pub const BUNDLED_ROLES: [&str; 4] = ["backend-dev", "frontend-dev", "ux-designer", "code-reviewer"];

/// Validate an agent role name
pub fn validate_role(role: &str) -> Result<()> {
    if ROLE_RE.is_match(role) {
        Ok(())
    } else {
        Err(DevhubError::InvalidRole(role.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub role: String,
    pub date: String, // "2025-06-12T14:32:07Z"
    pub body: String,
}

impl Section {
    pub fn new(role: &str, body: &str, date: DateTime<Utc>) -> Result<Self> {
        validate_role(role)?;

        let body = body.trim();
        if body.is_empty() {
            return Err(DevhubError::EmptyBody);
        }

        Ok(Section {
            role: role.to_string(),
            date: date.to_rfc3339_opts(SecondsFormat::Secs, true),
            body: body.to_string(),
        })
    }

    pub fn heading(&self) -> String {
        format!("## {} ({})", self.role, self.date)
    }

    /// Markdown for this section, ending in a blank line
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n\n", self.heading(), self.body)
    }
}

/// Split hub content into sections. Text before the first heading is ignored,
/// and lines that look like headings but don't match the format stay in the body.
pub fn parse_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, String, Vec<&str>)> = None;

    for line in content.lines() {
        if let Some(caps) = HEADING_RE.captures(line) {
            if let Some((role, date, body)) = current.take() {
                sections.push(finish(role, date, &body));
            }
            current = Some((caps[1].to_string(), caps[2].to_string(), Vec::new()));
        } else if let Some((_, _, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((role, date, body)) = current {
        sections.push(finish(role, date, &body));
    }

    sections
}

fn finish(role: String, date: String, body: &[&str]) -> Section {
    Section {
        role,
        date,
        body: body.join("\n").trim().to_string(),
    }
}

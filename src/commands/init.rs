use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::config::{Config, CONFIG_FILE};
use crate::error::{DevhubError, Result};
use crate::hub::ledger::ledger_path;
use crate::hub::section::BUNDLED_ROLES;
use crate::templates::{
    default_settings, format_hook_entry, role_prompt, CLAUDE_MD_DIRECTIVE, CONFIG_TEMPLATE,
    DIRECTIVE_HEADING, HOOK_COMMAND,
};
use crate::utils::fs::{append_bytes, write_if_missing};

const AGENTS_DIR: &str = ".claude/agents";
const SETTINGS_FILE: &str = ".claude/settings.json";
const GITIGNORE_FILE: &str = ".gitignore";
const CLAUDE_MD_FILE: &str = "CLAUDE.md";

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub claude_md: bool,
}

/// What init did to one file
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Created(String),
    Updated(String),
    Skipped(String, &'static str),
}

impl Action {
    fn print(&self) {
        match self {
            Action::Created(path) => println!("  Created  {}", path),
            Action::Updated(path) => println!("  Updated  {}", path),
            Action::Skipped(path, why) => println!("  Skipped  {} ({})", path, why),
        }
    }
}

pub fn run(project_dir: &Path, options: InitOptions) -> Result<()> {
    let actions = init_in_dir(project_dir, &options)?;

    println!("Initialized devhub in {}", project_dir.display());
    for action in &actions {
        action.print();
    }
    Ok(())
}

fn init_in_dir(project_dir: &Path, options: &InitOptions) -> Result<Vec<Action>> {
    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(DevhubError::AlreadyInitialized(CONFIG_FILE.to_string()));
    }

    let mut actions = Vec::new();

    for role in BUNDLED_ROLES {
        let Some(prompt) = role_prompt(role) else {
            continue;
        };
        let rel = format!("{}/{}.md", AGENTS_DIR, role);
        if write_if_missing(&project_dir.join(&rel), &prompt)? {
            actions.push(Action::Created(rel));
        } else {
            actions.push(Action::Skipped(rel, "already exists"));
        }
    }

    actions.push(install_hook(project_dir)?);
    actions.push(update_gitignore(project_dir)?);

    if options.claude_md {
        actions.push(append_directive(project_dir)?);
    }

    // Written last: its presence marks a completed init
    write_if_missing(&config_path, CONFIG_TEMPLATE)?;
    actions.push(Action::Created(CONFIG_FILE.to_string()));

    Ok(actions)
}

/// Register the format hook in `.claude/settings.json`, merging into an existing file
fn install_hook(project_dir: &Path) -> Result<Action> {
    let path = project_dir.join(SETTINGS_FILE);
    let rel = SETTINGS_FILE.to_string();

    if !path.exists() {
        let body = serde_json::to_string_pretty(&default_settings())?;
        write_if_missing(&path, &format!("{}\n", body))?;
        return Ok(Action::Created(rel));
    }

    let raw = fs::read_to_string(&path)?;
    let mut settings: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "existing settings.json is not valid JSON");
            return Ok(Action::Skipped(rel, "not valid JSON, add the hook by hand"));
        }
    };

    if hook_registered(&settings) {
        return Ok(Action::Skipped(rel, "format hook already registered"));
    }

    let Some(root) = settings.as_object_mut() else {
        return Ok(Action::Skipped(rel, "not a JSON object, add the hook by hand"));
    };
    let hooks = root
        .entry("hooks")
        .or_insert_with(|| Value::Object(Default::default()));
    let Some(hooks) = hooks.as_object_mut() else {
        return Ok(Action::Skipped(rel, "`hooks` is not an object, add the hook by hand"));
    };
    let post = hooks
        .entry("PostToolUse")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(post) = post.as_array_mut() else {
        return Ok(Action::Skipped(rel, "`hooks.PostToolUse` is not an array, add the hook by hand"));
    };
    post.push(format_hook_entry());

    fs::write(&path, format!("{}\n", serde_json::to_string_pretty(&settings)?))?;
    Ok(Action::Updated(rel))
}

/// Whether any PostToolUse command already runs the format hook
fn hook_registered(settings: &Value) -> bool {
    settings
        .pointer("/hooks/PostToolUse")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("hooks").and_then(Value::as_array))
        .flatten()
        .filter_map(|hook| hook.get("command").and_then(Value::as_str))
        .any(|command| command.contains(HOOK_COMMAND))
}

/// Keep the hub and its ledger out of version control
fn update_gitignore(project_dir: &Path) -> Result<Action> {
    let path = project_dir.join(GITIGNORE_FILE);
    let config = Config::default();
    let hub = config.hub.path.clone();
    let ledger = ledger_path(Path::new(&hub)).to_string_lossy().to_string();

    let existing = match fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };
    let text = existing.as_deref().unwrap_or("");

    let missing: Vec<&str> = [hub.as_str(), ledger.as_str()]
        .into_iter()
        .filter(|entry| !text.lines().any(|line| line.trim().trim_start_matches('/') == *entry))
        .collect();

    if missing.is_empty() {
        return Ok(Action::Skipped(GITIGNORE_FILE.to_string(), "entries already present"));
    }

    let mut addition = String::new();
    if !text.is_empty() && !text.ends_with('\n') {
        addition.push('\n');
    }
    addition.push_str("# devhub context hub\n");
    for entry in missing {
        addition.push_str(entry);
        addition.push('\n');
    }
    append_bytes(&path, addition.as_bytes())?;

    Ok(match existing {
        Some(_) => Action::Updated(GITIGNORE_FILE.to_string()),
        None => Action::Created(GITIGNORE_FILE.to_string()),
    })
}

/// Append the context hub directive to CLAUDE.md unless it is already there
fn append_directive(project_dir: &Path) -> Result<Action> {
    let path = project_dir.join(CLAUDE_MD_FILE);
    let rel = CLAUDE_MD_FILE.to_string();

    if !path.exists() {
        fs::write(&path, CLAUDE_MD_DIRECTIVE)?;
        return Ok(Action::Created(rel));
    }

    let text = fs::read_to_string(&path)?;
    if text.contains(DIRECTIVE_HEADING) {
        return Ok(Action::Skipped(rel, "directive already present"));
    }

    let separator = if text.ends_with("\n\n") || text.is_empty() {
        ""
    } else if text.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    append_bytes(&path, format!("{}{}", separator, CLAUDE_MD_DIRECTIVE).as_bytes())?;
    Ok(Action::Updated(rel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_bundle() {
        let dir = tempdir().unwrap();
        let actions = init_in_dir(dir.path(), &InitOptions::default()).unwrap();

        assert!(dir.path().join(CONFIG_FILE).is_file());
        for role in BUNDLED_ROLES {
            assert!(dir.path().join(format!("{}/{}.md", AGENTS_DIR, role)).is_file());
        }
        assert!(actions.contains(&Action::Created(SETTINGS_FILE.to_string())));
        assert!(!dir.path().join(CLAUDE_MD_FILE).exists());

        let settings: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap()).unwrap();
        assert!(hook_registered(&settings));

        let gitignore = fs::read_to_string(dir.path().join(GITIGNORE_FILE)).unwrap();
        assert!(gitignore.contains(".claude/context-hub.md\n"));
        assert!(gitignore.contains(".claude/context-hub.md.sums\n"));
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempdir().unwrap();
        init_in_dir(dir.path(), &InitOptions::default()).unwrap();

        let result = init_in_dir(dir.path(), &InitOptions::default());
        assert!(matches!(result, Err(DevhubError::AlreadyInitialized(_))));
    }

    #[test]
    fn test_init_retries_after_failed_hook_install() {
        let dir = tempdir().unwrap();
        let settings = dir.path().join(SETTINGS_FILE);
        fs::create_dir_all(&settings).unwrap();

        assert!(init_in_dir(dir.path(), &InitOptions::default()).is_err());
        assert!(!dir.path().join(CONFIG_FILE).exists());

        fs::remove_dir(&settings).unwrap();
        let actions = init_in_dir(dir.path(), &InitOptions::default()).unwrap();

        assert!(actions.contains(&Action::Created(SETTINGS_FILE.to_string())));
        assert!(actions.contains(&Action::Created(CONFIG_FILE.to_string())));
        assert!(dir.path().join(CONFIG_FILE).is_file());
    }

    #[test]
    fn test_init_keeps_existing_agent_file() {
        let dir = tempdir().unwrap();
        let custom = dir.path().join(AGENTS_DIR).join("backend-dev.md");
        fs::create_dir_all(custom.parent().unwrap()).unwrap();
        fs::write(&custom, "my own prompt").unwrap();

        let actions = init_in_dir(dir.path(), &InitOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&custom).unwrap(), "my own prompt");
        assert!(actions.contains(&Action::Skipped(
            format!("{}/backend-dev.md", AGENTS_DIR),
            "already exists"
        )));
    }

    #[test]
    fn test_install_hook_merges_existing_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            json!({
                "permissions": { "allow": ["Bash(npm test)"] },
                "hooks": { "PostToolUse": [
                    { "matcher": "Bash", "hooks": [{ "type": "command", "command": "echo done" }] }
                ]}
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(install_hook(dir.path()).unwrap(), Action::Updated(SETTINGS_FILE.to_string()));

        let settings: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(settings["permissions"]["allow"][0], "Bash(npm test)");
        assert_eq!(settings["hooks"]["PostToolUse"].as_array().unwrap().len(), 2);
        assert!(hook_registered(&settings));

        // Second run leaves it alone
        assert!(matches!(install_hook(dir.path()).unwrap(), Action::Skipped(..)));
    }

    #[test]
    fn test_install_hook_skips_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(install_hook(dir.path()).unwrap(), Action::Skipped(..)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_update_gitignore_appends_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(GITIGNORE_FILE);
        fs::write(&path, "node_modules/\n/.claude/context-hub.md").unwrap();

        assert_eq!(update_gitignore(dir.path()).unwrap(), Action::Updated(GITIGNORE_FILE.to_string()));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("node_modules/\n/.claude/context-hub.md\n"));
        assert_eq!(text.matches("context-hub.md.sums").count(), 1);
        assert_eq!(text.matches(".claude/context-hub.md\n").count(), 1);

        assert!(matches!(update_gitignore(dir.path()).unwrap(), Action::Skipped(..)));
    }

    #[test]
    fn test_append_directive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CLAUDE_MD_FILE);
        fs::write(&path, "# Project\n\nUse pnpm.").unwrap();

        assert_eq!(append_directive(dir.path()).unwrap(), Action::Updated(CLAUDE_MD_FILE.to_string()));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Project\n\nUse pnpm.\n\n## Context Hub Protocol"));

        assert!(matches!(append_directive(dir.path()).unwrap(), Action::Skipped(..)));
        let again = fs::read_to_string(&path).unwrap();
        assert_eq!(again.matches(DIRECTIVE_HEADING).count(), 1);
    }
}

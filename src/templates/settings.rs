use serde_json::{json, Value};

pub const HOOK_COMMAND: &str = "devhub format-hook";
pub const HOOK_MATCHER: &str = "Write|Edit|MultiEdit";

/// The `PostToolUse` matcher entry that runs the format hook
pub fn format_hook_entry() -> Value {
    json!({
        "matcher": HOOK_MATCHER,
        "hooks": [
            { "type": "command", "command": HOOK_COMMAND }
        ]
    })
}

/// A fresh `.claude/settings.json` with only the format hook registered
pub fn default_settings() -> Value {
    json!({
        "hooks": {
            "PostToolUse": [format_hook_entry()]
        }
    })
}

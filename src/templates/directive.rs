pub const DIRECTIVE_HEADING: &str = "## Context Hub Protocol";

pub const CLAUDE_MD_DIRECTIVE: &str = r#"## Context Hub Protocol

Agents working in this repository share notes through the context hub
(`.claude/context-hub.md`, gitignored). Every agent MUST:

1. Run `devhub hub read` before starting and treat its output as prior context.
2. Run `devhub hub append --role <your-role>` with its notes before yielding.
3. Never edit or delete sections written by other agents.

Start a fresh hub for unrelated work with `devhub hub clear`.
Edited source files are formatted automatically by `devhub format-hook`.

"#;

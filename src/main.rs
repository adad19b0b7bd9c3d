use std::env;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod hook;
mod hub;
mod templates;
mod utils;

const LONG_ABOUT: &str = "\
devhub is the runtime half of an AI coding assistant bundle for a full-stack monorepo.

It formats files after the assistant edits them (format-on-write hook) and keeps the
context hub: a shared, append-only Markdown note file through which sequential agent
roles (backend-dev, frontend-dev, ux-designer, code-reviewer) hand work to each other.

Each agent reads the whole hub before acting and appends one section before yielding.
Earlier sections are never rewritten; every append is recorded in a ledger so that
can be checked with `devhub hub verify`.";

const AFTER_HELP: &str = "\
EXAMPLES:
    Scaffold the bundle (agent prompts, hook registration, gitignore):
        $ devhub init

    Read prior context before starting work:
        $ devhub hub read

    Hand off to the next agent:
        $ echo \"Added POST /api/users\" | devhub hub append --role backend-dev

    Start over for unrelated work:
        $ devhub hub clear

LOGGING:
    Set DEVHUB_LOG (e.g. DEVHUB_LOG=debug) to see diagnostics on stderr.";

#[derive(Parser)]
#[command(name = "devhub")]
#[command(version)]
#[command(about = "Format-on-write hook and context hub for AI coding agents")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = AFTER_HELP)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Project root; the host tool exports CLAUDE_PROJECT_DIR for hooks
    #[arg(long, global = true, env = "CLAUDE_PROJECT_DIR", default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold the agent bundle in the project
    #[command(
        long_about = "\
Scaffold the agent bundle in the project.

Creates:
  • .claude/devhub.toml          - Configuration (all defaults, commented)
  • .claude/agents/<role>.md     - Role prompts for backend-dev, frontend-dev,
                                   ux-designer and code-reviewer
  • .claude/settings.json        - PostToolUse hook running `devhub format-hook`
  • .gitignore entries           - Keeps the context hub out of version control

Existing agent prompts are never overwritten. An existing settings.json is merged.",
        after_help = "\
EXAMPLES:
    Basic initialization:
        $ devhub init

    Also add the context hub directive to CLAUDE.md:
        $ devhub init --claude-md"
    )]
    Init {
        /// Create or append to CLAUDE.md with the context hub directive
        #[arg(long)]
        claude_md: bool,
    },

    /// Format the file named by a host tool event on stdin (always exits 0)
    #[command(
        long_about = "\
Format the file named by a host tool event on stdin.

Reads a JSON event, takes `tool_input.file_path`, and if its extension is in the
allow-list and the file exists, runs the project-local formatter (falling back to
the configured remote command). Prints nothing and always exits 0, whatever the
formatter does, so the host is never blocked.",
        after_help = "\
EXAMPLES:
    $ echo '{\"tool_input\":{\"file_path\":\"src/App.tsx\"}}' | devhub format-hook"
    )]
    FormatHook,

    /// Read and append to the context hub
    #[command(subcommand)]
    Hub(HubCommands),
}

#[derive(Subcommand)]
enum HubCommands {
    /// Print the context hub (nothing if there is none yet)
    Read {
        /// Only print sections written by this role
        #[arg(long)]
        role: Option<String>,
    },

    /// Append a section for a role; the body comes from --message or stdin
    #[command(after_help = "\
EXAMPLES:
    $ devhub hub append --role code-reviewer --message \"Blocking: missing auth check in users.ts:42\"
    $ devhub hub append --role backend-dev < notes.md")]
    Append {
        /// Agent role, kebab-case (e.g. backend-dev)
        #[arg(long)]
        role: String,

        /// Section body; read from stdin when omitted
        #[arg(long, short)]
        message: Option<String>,
    },

    /// Show sections per role and ledger state
    Status,

    /// Check that no earlier bytes of the hub were rewritten
    #[command(long_about = "\
Check that no earlier bytes of the hub were rewritten.

Every append records the hub's length and SHA-256 in <hub>.sums. Verification
re-hashes each recorded prefix of the current file.

Exit codes: 0 verified, 1 rewritten or truncated, 2 no hub.")]
    Verify,

    /// Delete the hub and its ledger before unrelated work
    Clear,
}

/// Diagnostics go to stderr so hook stdout stays empty
fn init_logging() {
    let filter = EnvFilter::try_from_env("DEVHUB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}

/// Anchor a relative project root to the working directory, so paths built
/// from it stay valid once a formatter runs with the root as its cwd
fn absolute_project_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir.to_path_buf(),
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let project_dir = absolute_project_dir(&cli.project_dir);

    let result = match cli.command {
        Commands::Init { claude_md } => {
            commands::init::run(&project_dir, commands::init::InitOptions { claude_md })
        }
        Commands::FormatHook => {
            commands::format_hook::run(&project_dir);
            Ok(())
        }
        Commands::Hub(HubCommands::Read { role }) => {
            commands::hub::read(&project_dir, role.as_deref())
        }
        Commands::Hub(HubCommands::Append { role, message }) => {
            commands::hub::append(&project_dir, &role, message)
        }
        Commands::Hub(HubCommands::Status) => commands::status::run(&project_dir),
        Commands::Hub(HubCommands::Verify) => commands::verify::run(&project_dir),
        Commands::Hub(HubCommands::Clear) => commands::hub::clear(&project_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

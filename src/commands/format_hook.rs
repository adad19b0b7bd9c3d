use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::Config;
use crate::hook::{self, HookOutcome};

/// Entry point for the host tool's post-edit hook. Never fails and never
/// writes to stdout; the process exits 0 whatever happens here.
pub fn run(project_dir: &Path) {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        debug!(error = %e, "could not read hook payload from stdin");
        return;
    }

    let config = Config::load(project_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unusable config, using defaults");
        Config::default()
    });

    match hook::handle(&input, &config.hook, project_dir) {
        HookOutcome::Skipped(reason) => debug!(%reason, "format hook skipped"),
        HookOutcome::Dispatched {
            invocation,
            succeeded,
        } => debug!(
            program = %invocation.program,
            local = invocation.local,
            succeeded,
            "format hook dispatched"
        ),
    }
}

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::HookConfig;

/// A fully resolved formatter command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// True when the project-local binary was chosen
    pub local: bool,
}

/// Pick the local formatter if it is installed under the project root,
/// otherwise the fallback command. `None` when no fallback is configured.
pub fn resolve(config: &HookConfig, project_dir: &Path, file: &Path) -> Option<Invocation> {
    let local = project_dir.join(&config.local_formatter);
    let file_arg = file.to_string_lossy().to_string();

    if !config.local_formatter.is_empty() && local.is_file() {
        let mut args = config.formatter_args.clone();
        args.push(file_arg);
        return Some(Invocation {
            program: local.to_string_lossy().to_string(),
            args,
            local: true,
        });
    }

    let (program, leading) = config.fallback_formatter.split_first()?;
    let mut args = leading.to_vec();
    args.extend(config.formatter_args.iter().cloned());
    args.push(file_arg);

    Some(Invocation {
        program: program.clone(),
        args,
        local: false,
    })
}

/// Run the formatter once, detached from our stdio. Returns whether it
/// exited successfully; spawn failures count as unsuccessful.
pub fn run(invocation: &Invocation, project_dir: &Path) -> bool {
    let status = Command::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => true,
        Ok(status) => {
            debug!(program = %invocation.program, %status, "formatter exited unsuccessfully");
            false
        }
        Err(e) => {
            debug!(program = %invocation.program, error = %e, "formatter could not be started");
            false
        }
    }
}

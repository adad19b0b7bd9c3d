use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use crate::commands::hub::open;
use crate::commands::verify::{verify_hub, VerifyError};
use crate::error::Result;
use crate::hub::section::Section;
use crate::hub::Hub;

pub fn run(project_dir: &Path) -> Result<()> {
    let hub = open(project_dir)?;
    print!("{}", render(&hub));
    Ok(())
}

fn render(hub: &Hub) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Context Hub");
    let _ = writeln!(out, "───────────");
    let _ = writeln!(out, "Path:     {}", hub.path().display());

    if !hub.exists() {
        let _ = writeln!(out, "Sections: none (no prior context)");
        return out;
    }

    let sections = hub.sections();
    let _ = writeln!(out, "Sections: {}", sections.len());
    for (role, count) in count_by_role(&sections) {
        let _ = writeln!(out, "          {}: {}", role, count);
    }

    if let Some(latest) = sections.last() {
        let _ = writeln!(out, "Latest:   {} ({})", latest.role, latest.date);
    }

    out.push('\n');

    let _ = match verify_hub(hub) {
        Ok(result) if result.appends == 0 => writeln!(out, "Ledger:   Nothing recorded"),
        Ok(result) => writeln!(out, "Ledger:   ✓ Verified ({} appends)", result.appends),
        Err(VerifyError::NoHub(_)) => writeln!(out, "Ledger:   No hub"),
        Err(e) => writeln!(out, "Ledger:   ✗ {}", e),
    };

    out
}

/// Section counts per role, sorted by role name
fn count_by_role(sections: &[Section]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for section in sections {
        *counts.entry(section.role.as_str()).or_insert(0) += 1;
    }
    counts
}

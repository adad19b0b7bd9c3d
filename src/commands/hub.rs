use std::io::{self, Read};
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::hub::section::validate_role;
use crate::hub::Hub;

pub fn open(project_dir: &Path) -> Result<Hub> {
    let config = Config::load(project_dir)?;
    Ok(Hub::new(config.hub_path(project_dir)))
}

/// Print the hub, or only one role's sections. No hub prints nothing.
pub fn read(project_dir: &Path, role: Option<&str>) -> Result<()> {
    if let Some(role) = role {
        validate_role(role)?;
    }

    let hub = open(project_dir)?;
    let Some(text) = hub.read() else {
        return Ok(());
    };

    match role {
        None => print!("{}", text),
        Some(role) => {
            for section in crate::hub::section::parse_sections(&text)
                .into_iter()
                .filter(|s| s.role == role)
            {
                print!("{}", section.render());
            }
        }
    }

    Ok(())
}

/// Append a section. The body comes from `message`, or stdin when absent.
pub fn append(project_dir: &Path, role: &str, message: Option<String>) -> Result<()> {
    validate_role(role)?;

    let body = match message {
        Some(message) => message,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let hub = open(project_dir)?;
    let section = hub.append(role, &body)?;
    info!(path = %hub.path().display(), role, "section appended");

    println!("Appended: {}", section.heading());
    println!("Hub: {}", hub.path().display());
    Ok(())
}

pub fn clear(project_dir: &Path) -> Result<()> {
    let hub = open(project_dir)?;
    if hub.clear()? {
        println!("Cleared: {}", hub.path().display());
    } else {
        println!("Nothing to clear: {} does not exist", hub.path().display());
    }
    Ok(())
}

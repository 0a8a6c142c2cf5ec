use anyhow::{anyhow, Result};
use colored::*;

use authz::{can, has_all, has_any, role_permissions, Permission, Role};

/// Execute the check command
pub fn execute(role: String, permissions: Vec<String>, all: bool) -> Result<()> {
    let role: Role = role.parse()?;
    if permissions.is_empty() {
        return Err(anyhow!("No permission tags given"));
    }

    let permissions = permissions
        .iter()
        .map(|tag| tag.parse::<Permission>())
        .collect::<authz::Result<Vec<_>>>()?;

    // The catalog's default grant stands in for a live session here
    let granted = role_permissions(role);

    println!("{}", format!("=== Permission Check: {} ===", role).bold());
    println!();

    for permission in &permissions {
        let verdict = if can(role, granted, *permission) {
            "granted".green()
        } else {
            "denied".red()
        };
        println!("{:<20} {}", permission.as_str(), verdict);
    }

    if permissions.len() > 1 {
        let (label, combined) = if all {
            ("all of the above", has_all(role, granted, &permissions))
        } else {
            ("any of the above", has_any(role, granted, &permissions))
        };
        let verdict = if combined {
            "granted".green().bold()
        } else {
            "denied".red().bold()
        };
        println!();
        println!("{:<20} {}", label, verdict);
    }

    Ok(())
}

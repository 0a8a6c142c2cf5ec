use anyhow::Result;
use colored::*;
use serde_json::json;

use authz::{role_permissions, Role};

const CATALOG_ROLES: [Role; 4] = [Role::Admin, Role::Support, Role::Editor, Role::User];

/// Execute the roles command
pub fn execute(format: String) -> Result<()> {
    match format.as_str() {
        "json" => print_catalog_json()?,
        _ => print_catalog_text(),
    }

    Ok(())
}

/// Permission tags for a role, sorted for stable output
fn sorted_permissions(role: Role) -> Vec<&'static str> {
    let mut tags: Vec<_> = role_permissions(role).iter().map(|p| p.as_str()).collect();
    tags.sort_unstable();
    tags
}

fn print_catalog_json() -> Result<()> {
    let mut catalog = serde_json::Map::new();
    for role in CATALOG_ROLES {
        catalog.insert(role.to_string(), json!(sorted_permissions(role)));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(catalog))?
    );
    Ok(())
}

fn print_catalog_text() {
    println!("{}", "=== Folio Role Catalog ===".bold());
    println!();

    for role in CATALOG_ROLES {
        let permissions = sorted_permissions(role);
        let count = match permissions.len() {
            1 => "1 permission".to_string(),
            n => format!("{} permissions", n),
        };
        println!("{} ({})", role.to_string().to_uppercase().bold(), count);

        if permissions.is_empty() {
            println!("  (none)");
        } else {
            for tag in permissions {
                println!("  {}", tag);
            }
        }
        println!();
    }
}

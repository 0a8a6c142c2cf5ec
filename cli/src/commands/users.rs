use anyhow::Result;
use colored::*;

use authz::Role;

use crate::context;

/// List account profiles and their assigned roles
pub async fn list(sign_in_as: String) -> Result<()> {
    let panel = context::dashboard_panel(&sign_in_as).await?;

    let Some(profiles) = panel.fetch_profiles().await? else {
        println!(
            "{}",
            format!("The user management section is hidden for {}", sign_in_as).yellow()
        );
        return Ok(());
    };

    println!("{}", "=== Account Profiles ===".bold());
    println!();

    for profile in &profiles {
        println!(
            "{:<10} {:<24} {}",
            profile.user_id,
            profile.email,
            profile.role.to_string().cyan()
        );
    }

    println!();
    println!("Total accounts: {}", profiles.len());
    Ok(())
}

/// Reassign an account's role
pub async fn set_role(sign_in_as: String, user_id: String, role: String) -> Result<()> {
    let new_role: Role = role.parse()?;
    let panel = context::dashboard_panel(&sign_in_as).await?;

    if !panel.set_role(&user_id, new_role).await? {
        println!(
            "{}",
            format!("Role changes are hidden for {}", sign_in_as).yellow()
        );
        return Ok(());
    }

    println!(
        "{} {} is now {}",
        "Updated:".green().bold(),
        user_id.bold(),
        new_role.to_string().cyan()
    );
    println!(
        "{}",
        "The demo profile directory resets between runs".dimmed()
    );
    Ok(())
}

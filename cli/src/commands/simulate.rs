use anyhow::Result;
use colored::*;

use authz::Role;
use dashboard::GateSnapshot;

use crate::context;

/// Execute the simulate command
pub async fn execute(sign_in_as: String, target: String) -> Result<()> {
    let target_role: Role = target.parse()?;
    let panel = context::dashboard_panel(&sign_in_as).await?;

    println!("{}", "=== Dashboard Role Preview ===".bold());
    println!();
    println!("Signed in as: {}", sign_in_as.bold());
    println!();
    print_snapshot("Live flags", &panel.flags().await);

    if !panel.simulate(target_role).await {
        println!(
            "{}",
            "Preview refused: only an admin session can simulate another role".yellow()
        );
        return Ok(());
    }

    print_snapshot(
        &format!("Previewing as {}", target_role),
        &panel.flags().await,
    );

    Ok(())
}

fn print_snapshot(label: &str, snapshot: &GateSnapshot) {
    println!(
        "{} (fetch epoch {})",
        label.bold(),
        snapshot.fetch_epoch
    );
    println!("  admin panel      {}", flag(snapshot.admin_panel));
    println!("  messages         {}", flag(snapshot.sections.messages));
    println!("  analytics        {}", flag(snapshot.sections.analytics));
    println!("  user management  {}", flag(snapshot.sections.user_management));
    println!("  reply action     {}", flag(snapshot.actions.reply));
    println!("  delete action    {}", flag(snapshot.actions.delete));
    println!();
}

fn flag(value: bool) -> ColoredString {
    if value {
        "visible".green()
    } else {
        "hidden".red()
    }
}

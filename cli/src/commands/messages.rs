use anyhow::Result;
use colored::*;

use crate::context;

/// Execute the messages command
pub async fn execute(sign_in_as: String) -> Result<()> {
    let panel = context::dashboard_panel(&sign_in_as).await?;

    let Some(messages) = panel.fetch_messages().await? else {
        println!(
            "{}",
            format!("The messages section is hidden for {}", sign_in_as).yellow()
        );
        return Ok(());
    };

    println!("{}", "=== Contact Messages ===".bold());
    println!();

    if messages.is_empty() {
        println!("No messages yet");
        return Ok(());
    }

    for message in &messages {
        println!(
            "{}  {} <{}>",
            message
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            message.name.bold(),
            message.email
        );
        println!("  {}", message.message);
        println!("  {}", format!("id: {}", message.id).dimmed());
        println!();
    }

    println!("Total messages: {}", messages.len());
    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod context;

use commands::{check, messages, roles, simulate, submit, users};

/// Folio CLI - Access control and contact intake for the folio site
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the role catalog and its permission grants
    Roles {
        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Evaluate permissions for a role against the catalog
    Check {
        /// Role to evaluate (admin, support, editor, user)
        role: String,

        /// Permission tags to check
        permissions: Vec<String>,

        /// Require every listed permission instead of at least one
        #[arg(long)]
        all: bool,
    },

    /// Preview the dashboard gate flags as another role
    Simulate {
        /// Role to preview
        target: String,

        /// Demo account to sign in as (admin, support, editor, user)
        #[arg(long = "as", default_value = "admin")]
        sign_in_as: String,
    },

    /// Send a contact message through the submission pipeline
    Submit {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email address
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,

        /// Honeypot field, normally left empty
        #[arg(long, default_value = "", hide = true)]
        website: String,
    },

    /// List stored contact messages through the dashboard gate
    Messages {
        /// Demo account to sign in as (admin, support, editor, user)
        #[arg(long = "as", default_value = "admin")]
        sign_in_as: String,
    },

    /// User management commands
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List account profiles and their assigned roles
    List {
        /// Demo account to sign in as (admin, support, editor, user)
        #[arg(long = "as", default_value = "admin")]
        sign_in_as: String,
    },

    /// Reassign an account's role
    SetRole {
        /// Account to change
        user_id: String,

        /// New role (admin, support, editor, user)
        role: String,

        /// Demo account to sign in as (admin, support, editor, user)
        #[arg(long = "as", default_value = "admin")]
        sign_in_as: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Execute the command
    match cli.command {
        Commands::Roles { format } => {
            roles::execute(format)?;
        }
        Commands::Check {
            role,
            permissions,
            all,
        } => {
            check::execute(role, permissions, all)?;
        }
        Commands::Simulate {
            target,
            sign_in_as,
        } => {
            simulate::execute(sign_in_as, target).await?;
        }
        Commands::Submit {
            name,
            email,
            message,
            website,
        } => {
            submit::execute(name, email, message, website).await?;
        }
        Commands::Messages { sign_in_as } => {
            messages::execute(sign_in_as).await?;
        }
        Commands::Users { action } => match action {
            UsersAction::List { sign_in_as } => {
                users::list(sign_in_as).await?;
            }
            UsersAction::SetRole {
                user_id,
                role,
                sign_in_as,
            } => {
                users::set_role(sign_in_as, user_id, role).await?;
            }
        },
    }

    Ok(())
}

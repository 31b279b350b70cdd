//! Fixit CLI - Secret generation and table provisioning.
//!
//! # Usage
//!
//! ```bash
//! # Print a fresh SECRET_KEY (and ADMIN_PASSWORD_HASH) in .env form
//! fixit-cli secrets generate --password 'correct horse battery staple'
//!
//! # Hash an admin password
//! fixit-cli secrets hash-password 'correct horse battery staple'
//!
//! # Create the DynamoDB table configured by TABLE_NAME / AWS_REGION
//! fixit-cli table create
//! ```
//!
//! # Commands
//!
//! - `secrets generate` - New session secret, optional password hash
//! - `secrets hash-password` - SHA-256 hex digest of a password
//! - `table create` - Provision the ticket table

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fixit-cli")]
#[command(author, version, about = "Fixit CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate configuration secrets
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },
    /// Manage the DynamoDB ticket table
    Table {
        #[command(subcommand)]
        action: TableAction,
    },
}

#[derive(Subcommand)]
enum SecretsAction {
    /// Print a new SECRET_KEY, plus ADMIN_PASSWORD_HASH if a password is given
    Generate {
        /// Admin password to hash
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Print the SHA-256 hex digest of a password
    HashPassword {
        /// Password to hash
        password: String,
    },
}

#[derive(Subcommand)]
enum TableAction {
    /// Create the table if it does not exist
    Create,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Secrets { action } => match action {
            SecretsAction::Generate { password } => {
                println!("{}", commands::secrets::env_lines(password.as_deref()));
            }
            SecretsAction::HashPassword { password } => {
                println!("{}", commands::secrets::hash_password(&password));
            }
        },
        Commands::Table { action } => match action {
            TableAction::Create => commands::table::create().await?,
        },
    }
    Ok(())
}

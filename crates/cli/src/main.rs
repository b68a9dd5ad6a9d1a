//! Shoplite CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! shoplite-cli migrate
//!
//! # Seed demo users and catalog products
//! shoplite-cli seed
//!
//! # Generate random interaction events
//! shoplite-cli interactions generate --count 50
//!
//! # Delete all data (users, products, interactions, carts)
//! shoplite-cli cleanup --yes
//!
//! # Promote an existing user to admin
//! shoplite-cli admin promote --email alice@example.com
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shoplite-cli")]
#[command(author, version, about = "Shoplite CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed demo users and catalog products
    Seed,
    /// Manage the interaction log
    Interactions {
        #[command(subcommand)]
        action: InteractionsAction,
    },
    /// Delete all data from the shop schema
    Cleanup {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Manage user roles
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum InteractionsAction {
    /// Generate random interaction events across existing users and products
    Generate {
        /// Number of events to generate
        #[arg(short, long, default_value_t = 50)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Promote an existing user to the admin role
    Promote {
        /// Email of the user to promote
        #[arg(short, long)]
        email: String,
    },
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

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Interactions { action } => match action {
            InteractionsAction::Generate { count } => {
                commands::interactions::generate(count).await?;
            }
        },
        Commands::Cleanup { yes } => commands::cleanup::run(yes).await?,
        Commands::Admin { action } => match action {
            AdminAction::Promote { email } => commands::admin::promote(&email).await?,
        },
    }
    Ok(())
}

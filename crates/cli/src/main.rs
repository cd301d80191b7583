//! Tienda CLI - session and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the name "admin" gets admin affordances)
//! tienda login admin --email admin@example.com
//!
//! # Show the stored session
//! tienda whoami
//!
//! # List the second page of products matching "mate"
//! tienda products --search mate --page 2
//!
//! # Log out
//! tienda logout
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session stored in a JSON file
//! - `products` - Fetch the remote catalog and print one page

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about = "Tienda CLI tools")]
struct Cli {
    /// Session file
    #[arg(long, global = true, default_value = store::DEFAULT_STORE_FILE)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with any name (no credential check)
    Login {
        /// Display name; "admin" grants admin
        name: String,

        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// List products from the remote catalog
    Products {
        /// Filter by name or category (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Catalog URL (defaults to `PRODUCTS_SOURCE_URL`)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to warn so command output is not interleaved with logs
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { name, email } => commands::session::login(&cli.store, &name, &email)?,
        Commands::Logout => commands::session::logout(&cli.store)?,
        Commands::Whoami => commands::session::whoami(&cli.store)?,
        Commands::Products { search, page, url } => {
            commands::products::list(search.as_deref(), page, url).await?;
        }
    }
    Ok(())
}

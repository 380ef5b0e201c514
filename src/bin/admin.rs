//! CLI administration tool for digestlink.
//!
//! Computes, registers and resolves short codes and checks the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Print the code a URL maps to (no store needed)
//! cargo run --bin digestlink-admin -- shorten https://www.google.com
//!
//! # Register / resolve against the configured store
//! cargo run --bin digestlink-admin -- register https://www.google.com
//! cargo run --bin digestlink-admin -- resolve aB3xY9
//!
//! # Check database connection
//! cargo run --bin digestlink-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `digestlink::config`. `db` commands require the
//! postgres backend.

use digestlink::application::services::UrlService;
use digestlink::config::{self, StoreBackend};
use digestlink::domain::repositories::UrlStore;
use digestlink::error::AppError;
use digestlink::infrastructure::persistence::{PgUrlStore, TimeoutUrlStore};
use digestlink::server::build_store;
use digestlink::utils::code_generator::{Sha256Base62Shortener, Shortener};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing digestlink.
#[derive(Parser)]
#[command(name = "digestlink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the short code for a URL without storing it
    Shorten {
        /// Long URL
        long: String,
    },

    /// Register a URL in the configured store
    Register {
        /// Long URL
        long: String,
    },

    /// Resolve a short code from the configured store
    Resolve {
        /// Short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count stored mappings
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shorten { long } => {
            let code = Sha256Base62Shortener.shorten(&long);
            println!("{}", code.bright_yellow().bold());
        }
        Commands::Register { long } => register(&long).await?,
        Commands::Resolve { code } => resolve(&code).await?,
        Commands::Db { action } => handle_db_action(action).await?,
    }

    Ok(())
}

async fn url_service() -> Result<UrlService> {
    let config = config::load_from_env().context("Invalid configuration")?;
    let store = build_store(&config).await?;

    Ok(UrlService::with_default_shortener(Arc::new(
        TimeoutUrlStore::new(store, config.store_timeout()),
    )))
}

async fn register(long: &str) -> Result<()> {
    let service = url_service().await?;

    let registered = service.register(long).await;
    service.close().await?;
    let code = registered.map_err(|e| anyhow::anyhow!("Failed to register: {}", e))?;

    println!("{}", "✅ Registered".green().bold());
    println!("  Long:  {}", long.cyan());
    println!("  Short: {}", code.bright_yellow().bold());

    Ok(())
}

async fn resolve(code: &str) -> Result<()> {
    let service = url_service().await?;

    let resolved = service.resolve(code).await;
    service.close().await?;

    match resolved {
        Ok(long) => {
            println!("{}", long.cyan());
            Ok(())
        }
        Err(AppError::NotFound) => {
            println!("{} {}", "❌".red(), AppError::NotFound.to_string().red());
            anyhow::bail!("short code `{code}` is not registered")
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve: {}", e)),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    let config = config::load_from_env().context("Invalid configuration")?;

    if config.store_backend != StoreBackend::Postgres {
        anyhow::bail!("db commands require STORE_BACKEND=postgres");
    }

    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let store = PgUrlStore::connect(url, config.pool_settings())
        .await
        .context("Failed to connect to database")?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(store.pool()).await?;
            println!("{}", "✅ Database connection OK".green().bold());

            store.migrate().await.context("Failed to migrate")?;
            let count = store.count().await?;

            println!(
                "  Stored URLs: {}",
                count.to_string().bright_green().bold()
            );
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(store.pool())
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Database:   {}",
                config::mask_connection_string(url).bright_black()
            );
            println!();
        }
    }

    store.close().await?;

    Ok(())
}

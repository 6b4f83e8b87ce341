//! CLI administration tool for link-gate.
//!
//! Creates and inspects short links directly in PostgreSQL, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link (prompts for the URL when omitted)
//! cargo run --bin admin -- link create https://example.com
//!
//! # Show one link
//! cargo run --bin admin -- link show aB3xZ9
//!
//! # View statistics
//! cargo run --bin admin -- stats --top 20
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` (required): PostgreSQL connection
//! - `BASE_URL` (optional): prefix for printed short URLs
//! - `SHORT_ID_LENGTH` (optional): length of generated identifiers

use link_gate::application::services::LinkService;
use link_gate::config::Config;
use link_gate::infrastructure::persistence::PgShortLinkRepository;
use link_gate::utils::id_generator::{DEFAULT_ID_LENGTH, MAX_ID_LENGTH, MIN_ID_LENGTH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-gate.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats {
        /// Number of most-clicked links to list
        #[arg(short, long, default_value_t = 10)]
        top: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Destination URL (prompted when omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a short link and its click count
    Show {
        short_id: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats { top } => handle_stats(&pool, top).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(pool: &PgPool) -> LinkService {
    let repo = Arc::new(PgShortLinkRepository::new(Arc::new(pool.clone())));
    let id_length = std::env::var("SHORT_ID_LENGTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|len| (MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(len))
        .unwrap_or(DEFAULT_ID_LENGTH);

    LinkService::with_id_length(repo, id_length)
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let service = link_service(pool);

    match action {
        LinkAction::Create { url, yes } => create_link(&service, url, yes).await,
        LinkAction::Show { short_id } => show_link(&service, &short_id).await,
    }
}

/// Creates a short link with interactive prompts.
async fn create_link(service: &LinkService, url: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let original_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  Destination: {}", original_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .shorten(&original_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "✅ Link created".green().bold());
    println!("  ID:        {}", link.short_id.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        service.short_url(&base_url(), &link.short_id).bright_cyan()
    );
    println!();

    Ok(())
}

async fn show_link(service: &LinkService, short_id: &str) -> Result<()> {
    let link = service
        .get_link(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();
    println!("  ID:          {}", link.short_id.bright_yellow());
    println!("  Destination: {}", link.original_url.cyan());
    println!(
        "  Short URL:   {}",
        service.short_url(&base_url(), &link.short_id)
    );
    println!(
        "  Clicks:      {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:     {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Displays link totals and the most-clicked links.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics
///
///   Links:  42
///   Clicks: 1337
///
///   ID        Clicks  Destination
///   ──────────────────────────────────────────────
///   aB3xZ9    120     https://example.com/a
/// ```
async fn handle_stats(pool: &PgPool, top: i64) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = link_service(pool);

    let links_count = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let clicks_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM short_links")
            .fetch_one(pool)
            .await?;

    println!("  Links:  {}", links_count.to_string().bright_green().bold());
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    let top_links = service
        .top_links(top.max(1))
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if top_links.is_empty() {
        println!("{}", "  No links yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {}",
        "ID".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for link in &top_links {
        println!(
            "  {:<10} {:<8} {}",
            link.short_id.cyan(),
            link.clicks.to_string().bright_green(),
            link.original_url
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

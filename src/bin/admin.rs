//! CLI administration tool for linkbio.
//!
//! Provides commands for provisioning accounts, managing subscription
//! plans, running the activation sweep by hand and inspecting the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List plans and their limits
//! cargo run --bin admin -- plan list
//!
//! # Show the effective plan of an account
//! cargo run --bin admin -- plan show 6f1c0f3e-2a8e-4c57-9d43-6b1e0cf0a001
//!
//! # Move an account to the premium plan
//! cargo run --bin admin -- plan set 6f1c0f3e-2a8e-4c57-9d43-6b1e0cf0a001 premium
//!
//! # Provision a new account
//! cargo run --bin admin -- account create --username alice
//!
//! # Activate scheduled links that are due
//! cargo run --bin admin -- links activate-due
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`linkbio::config`]. Only the database settings
//! matter here.

use linkbio::config;
use linkbio::domain::activation_worker::sweep_once;
use linkbio::domain::entities::{SubscriptionLimits, SubscriptionTier};
use linkbio::domain::repositories::SubscriptionRepository;
use linkbio::infrastructure::persistence::{
    PgLinkRepository, PgProfileRepository, PgSubscriptionRepository,
};
use linkbio::server;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing linkbio.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage subscription plans
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Link maintenance
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Plan subcommands.
#[derive(Subcommand)]
enum PlanAction {
    /// List all plans
    List,

    /// Show the effective plan of an account
    Show {
        /// Account ID
        account: Uuid,
    },

    /// Put an account on a plan
    Set {
        /// Account ID
        account: Uuid,

        /// Plan tier (free, premium, enterprise)
        tier: SubscriptionTier,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Account subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Provision a new account with an empty profile
    Create {
        /// Username for the profile
        #[arg(short, long)]
        username: Option<String>,

        /// Use this account ID instead of a random one
        #[arg(long)]
        id: Option<Uuid>,
    },
}

/// Link maintenance subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// Activate every scheduled link whose time has come
    ActivateDue,
}

/// Database operation subcommands.
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

    let config = config::load_from_env()?;
    let pool = server::connect(&config).await?;

    match cli.command {
        Commands::Plan { action } => handle_plan_action(action, &pool).await?,
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn format_limit(limits: &SubscriptionLimits) -> String {
    if limits.is_unlimited() {
        "unlimited".to_string()
    } else {
        limits.link_limit.to_string()
    }
}

fn format_flag(enabled: bool) -> ColoredString {
    if enabled { "yes".green() } else { "no".bright_black() }
}

/// Dispatches plan commands.
async fn handle_plan_action(action: PlanAction, pool: &PgPool) -> Result<()> {
    let repo = PgSubscriptionRepository::new(Arc::new(pool.clone()));

    match action {
        PlanAction::List => list_plans(&repo).await?,
        PlanAction::Show { account } => show_plan(&repo, pool, account).await?,
        PlanAction::Set { account, tier, yes } => set_plan(&repo, account, tier, yes).await?,
    }

    Ok(())
}

/// Lists every plan with its limits.
///
/// # Output Format
///
/// ```text
/// 📋 Subscription Plans
///
///   Tier         Links       Analytics   Scheduling
///   ──────────────────────────────────────────────────
///   free         5           no          no
///   premium      50          yes         yes
///   enterprise   unlimited   yes         yes
/// ```
async fn list_plans(repo: &PgSubscriptionRepository) -> Result<()> {
    println!("{}", "📋 Subscription Plans".bright_blue().bold());
    println!();

    let plans = repo
        .list_plans()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list plans: {}", e))?;

    println!(
        "  {:<12} {:<11} {:<11} {}",
        "Tier".bright_white().bold(),
        "Links".bright_white().bold(),
        "Analytics".bright_white().bold(),
        "Scheduling".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for plan in &plans {
        println!(
            "  {:<12} {:<11} {:<11} {}",
            plan.tier.as_str().cyan(),
            format_limit(&plan.limits),
            format_flag(plan.limits.advanced_analytics_enabled),
            format_flag(plan.limits.link_scheduling_enabled)
        );
    }

    println!();
    Ok(())
}

/// Shows the effective plan of an account and how much of it is used.
async fn show_plan(repo: &PgSubscriptionRepository, pool: &PgPool, account: Uuid) -> Result<()> {
    println!("{}", "🔎 Account Plan".bright_blue().bold());
    println!();

    let limits = repo
        .fetch(account)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load plan: {}", e))?;

    let used: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE account_id = $1")
        .bind(account)
        .fetch_one(pool)
        .await?;

    println!("  Account:    {}", account.to_string().bright_black());
    println!("  Plan:       {}", limits.tier().label().cyan());
    if limits.subscription_tier.is_none() {
        println!("  {}", "(no subscription row, free plan applies)".yellow());
    }
    println!("  Links:      {} / {}", used, format_limit(&limits));
    println!(
        "  Analytics:  {}",
        format_flag(limits.advanced_analytics_enabled)
    );
    println!(
        "  Scheduling: {}",
        format_flag(limits.link_scheduling_enabled)
    );
    println!();

    Ok(())
}

/// Moves an account to another plan with a confirmation prompt.
async fn set_plan(
    repo: &PgSubscriptionRepository,
    account: Uuid,
    tier: SubscriptionTier,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "💳 Change Plan".bright_blue().bold());
    println!();

    let current = repo
        .fetch(account)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load plan: {}", e))?;

    if current.subscription_tier == Some(tier) {
        println!(
            "{}",
            format!("⚠️  Account is already on the {}", tier.label()).yellow()
        );
        return Ok(());
    }

    println!("  Account: {}", account.to_string().bright_black());
    println!("  From:    {}", current.tier().label().cyan());
    println!("  To:      {}", tier.label().bright_yellow().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Apply this change?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.assign_tier(account, tier)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change plan: {}", e))?;

    println!();
    println!("{}", "✅ Plan updated".green().bold());
    println!();

    Ok(())
}

/// Dispatches account commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    let repo = PgProfileRepository::new(Arc::new(pool.clone()));

    match action {
        AccountAction::Create { username, id } => {
            println!("{}", "👤 Create Account".bright_blue().bold());
            println!();

            let username = match username {
                Some(u) => u,
                None => Input::new()
                    .with_prompt("Username (leave empty for none)")
                    .allow_empty(true)
                    .interact_text()?,
            };
            let username = username.trim();
            let username = (!username.is_empty()).then_some(username);

            let account_id = id.unwrap_or_else(Uuid::new_v4);
            let profile = repo
                .provision(account_id, username)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

            println!("{}", "✅ Account created".green().bold());
            println!();
            println!("  ID:       {}", profile.id.to_string().bright_yellow().bold());
            if let Some(username) = &profile.username {
                println!("  Username: {}", username.cyan());
            }
            println!();
            println!("{}", "Add this to your requests:".bright_white());
            println!("  {}: {}", "X-Account-Id".bright_cyan(), profile.id);
            println!();
        }
    }

    Ok(())
}

/// Dispatches link maintenance commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinksAction::ActivateDue => {
            println!("{}", "⏰ Activating scheduled links...".bright_blue());

            let activated = sweep_once(&repo, Utc::now())
                .await
                .map_err(|e| anyhow::anyhow!("Activation failed: {}", e))?;

            println!(
                "{} {}",
                "✅ Activated:".green().bold(),
                activated.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of accounts and paid subscriptions
/// - Total and active links
/// - Links still waiting for their schedule
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await?;

    let paid: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE tier <> 'free'")
        .fetch_one(pool)
        .await?;

    let (links, active, scheduled): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(*) FILTER (WHERE is_active),
               COUNT(*) FILTER (WHERE is_scheduled AND NOT is_active)
        FROM links
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Accounts:       {}",
        accounts.to_string().bright_green().bold()
    );
    println!("  Paid accounts:  {}", paid.to_string().bright_green().bold());
    println!("  Links:          {}", links.to_string().bright_green().bold());
    println!("  Active links:   {}", active.to_string().bright_green().bold());
    println!(
        "  Scheduled:      {}",
        scheduled.to_string().bright_green().bold()
    );
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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .context("Migrations table missing; start the server once to migrate")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

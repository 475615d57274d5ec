//! CLI administration tool for linkhub.
//!
//! Manages user accounts and sessions, prints analytics reports and global
//! statistics, and runs database checks without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing fields)
//! cargo run --bin admin -- user create
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Delete expired sessions
//! cargo run --bin admin -- session purge
//!
//! # Analytics for a user over the last 7 days
//! cargo run --bin admin -- analytics alice --days 7
//!
//! # Global counters
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use linkhub::api::dto::auth::RegisterRequest;
use linkhub::application::services::{AnalyticsService, Registration, UserService};
use linkhub::config::Config;
use linkhub::domain::analytics::AnalyticsWindow;
use linkhub::domain::entities::CurrentUser;
use linkhub::domain::repositories::SessionRepository;
use linkhub::infrastructure::persistence::{
    PgAnalyticsRepository, PgSessionRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing linkhub.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage login sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Print the analytics report for a user
    Analytics {
        /// Username or email
        user: String,

        /// Trailing window in days
        #[arg(short, long, default_value_t = 30)]
        days: u64,
    },

    /// Show global statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users, newest first
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Create a user account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted, or generated with --yes, if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete sessions past their expiry
    Purge,
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
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Session { action } => handle_session_action(action, &pool).await?,
        Commands::Analytics { user, days } => handle_analytics(&pool, &user, days).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService<PgUserRepository> {
    UserService::new(Arc::new(PgUserRepository::new(Arc::new(pool.clone()))))
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = user_service(pool);

    match action {
        UserAction::List { limit } => list_users(&service, limit).await?,
        UserAction::Create {
            username,
            email,
            password,
            yes,
        } => create_user(&service, username, email, password, yes).await?,
    }

    Ok(())
}

/// Lists users in a table.
///
/// ```text
/// 👥 Users
///
///   ID    Username             Email                          Created
///   ─────────────────────────────────────────────────────────────────────────
///   1     alice                alice@example.com              2024-01-15 10:30
/// ```
async fn list_users(service: &UserService<PgUserRepository>, limit: i64) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = service
        .list_users(limit, 0)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    let total = service
        .count_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    println!();
    println!(
        "  Showing {} of {}",
        users.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Creates a user with interactive prompts for missing fields.
///
/// Input goes through the same validation and sanitisation as
/// `POST /api/auth/register`. A generated password is shown once.
async fn create_user(
    service: &UserService<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let (password, generated) = match password {
        Some(p) => (p, false),
        None if skip_confirm => (generate_password(), true),
        None => {
            let generate = Confirm::new()
                .with_prompt("Generate a random password?")
                .default(true)
                .interact()?;
            if generate {
                (generate_password(), true)
            } else {
                let entered = Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()?;
                (entered, false)
            }
        }
    };

    let request = RegisterRequest {
        username,
        email,
        password,
    };
    if let Err(errors) = request.validate() {
        println!("{}", "❌ Invalid input:".red().bold());
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                println!("  {}: {}", field.to_string().yellow(), message);
            }
        }
        anyhow::bail!("Validation failed");
    }

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", request.username.cyan());
    println!("  Email:    {}", request.email.cyan());
    if generated {
        println!("  Password: {}", request.password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now! It will not be shown again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .register(Registration {
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created with ID".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = PgSessionRepository::new(Arc::new(pool.clone()));

    match action {
        SessionAction::Purge => {
            println!("{}", "🧹 Purging expired sessions...".bright_blue());

            let removed = repo
                .purge_expired(Utc::now())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

            println!(
                "{} {}",
                "✅ Removed".green().bold(),
                format!("{removed} session(s)").bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Prints the analytics report for one user.
async fn handle_analytics(pool: &PgPool, login: &str, days: u64) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let user = user_service(&pool)
        .find_by_login(login)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Not tied to a real session; the report only reads user_id.
    let current = CurrentUser {
        user_id: user.id,
        username: user.username.clone(),
        session_id: 0,
    };

    let service = AnalyticsService::new(Arc::new(PgAnalyticsRepository::new(pool)));
    let report = service
        .get_report(&current, AnalyticsWindow::new(days))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build report: {}", e))?;

    println!(
        "{} {} {}",
        "📈 Analytics for".bright_blue().bold(),
        user.username.cyan().bold(),
        format!("(last {days} days)").bright_black()
    );
    println!();

    let o = &report.overview;
    println!("{}", "Overview".bright_white().bold());
    println!(
        "  Shortlinks:   {} ({} active, {} clicks)",
        o.total_shortlinks.to_string().bright_green().bold(),
        o.active_shortlinks,
        o.total_shortlink_clicks
    );
    println!(
        "  Link lists:   {} ({} items, {} clicks)",
        o.total_linklists.to_string().bright_green().bold(),
        o.total_list_items,
        o.total_list_clicks
    );
    println!(
        "  Total clicks: {}",
        o.total_clicks.to_string().bright_green().bold()
    );
    println!();

    println!("{}", "Clicks over time".bright_white().bold());
    if report.clicks_over_time.is_empty() {
        println!("  {}", "No clicks in this window".yellow());
    }
    for day in &report.clicks_over_time {
        println!("  {}  {}", day.date.format("%Y-%m-%d"), day.clicks);
    }
    println!();

    println!("{}", "Top shortlinks".bright_white().bold());
    for top in &report.top_shortlinks {
        println!("  {:<30} {}", top.name.cyan(), top.clicks);
    }
    println!();

    println!("{}", "Top list items".bright_white().bold());
    for top in &report.top_list_items {
        println!(
            "  {:<30} {:<6} {}",
            top.title.cyan(),
            top.clicks,
            format!("in {}", top.list_title).bright_black()
        );
    }
    println!();

    Ok(())
}

/// Displays global counters across all users.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let counts = [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Shortlinks", "SELECT COUNT(*) FROM shortlinks"),
        ("Link lists", "SELECT COUNT(*) FROM link_lists"),
        ("List items", "SELECT COUNT(*) FROM link_list_items"),
        ("Click events", "SELECT COUNT(*) FROM click_events"),
        (
            "Active sessions",
            "SELECT COUNT(*) FROM sessions WHERE expires_at > NOW()",
        ),
    ];

    for (label, sql) in counts {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<16} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

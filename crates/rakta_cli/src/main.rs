// rakta_cli/src/main.rs
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use rakta_cli::commands;
use rakta_cli::config::Config;

#[derive(Parser)]
#[command(name = "rakta")]
#[command(about = "Blood donor matching toolchain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the database schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),

    /// File a new blood request
    CreateRequest(commands::create_request::CreateRequestArgs),

    /// List open requests, most critical first
    ListRequests(commands::list_requests::ListRequestsArgs),

    /// Find compatible donors for a blood type
    FindDonors(commands::find_donors::FindDonorsArgs),

    /// Record a donor accepting a request
    Accept(commands::accept::AcceptArgs),

    /// Attach a donation report and close the request
    CompleteDonation(commands::complete_donation::CompleteDonationArgs),

    /// Show both sides of the compatibility table for a blood type
    Compat(commands::compat::CompatArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load Config (Fails fast if invalid)
    let config = Config::from_env()?;

    // 3. Parse arguments and route to the correct command
    let cli = Cli::parse();

    match cli.command {
        Commands::Rebuild(args) => {
            // 2. Connect to Postgres
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::rebuild::execute(pool, args).await?;
        }
        Commands::CreateRequest(args) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::create_request::execute(pool, config, args).await?;
        }
        Commands::ListRequests(args) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::list_requests::execute(pool, config, args).await?;
        }
        Commands::FindDonors(args) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::find_donors::execute(pool, config, args).await?;
        }
        Commands::Accept(args) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::accept::execute(pool, config, args).await?;
        }
        Commands::CompleteDonation(args) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::complete_donation::execute(pool, config, args).await?;
        }
        Commands::Compat(args) => {
            // Note: Compat doesn't need the pool, keeping it pure logic.
            commands::compat::execute(args)?;
        }
    }

    Ok(())
}

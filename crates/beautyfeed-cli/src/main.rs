mod import;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "beautyfeed")]
#[command(about = "Import YML product feeds into the beautyfeed catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse the feed and upsert its categories, brands and products
    Import {
        /// Feed file to read instead of `BEAUTYFEED_FEED_PATH`
        #[arg(long)]
        file: Option<PathBuf>,

        /// Parse and normalize only; nothing is written to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check that the database is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = beautyfeed_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(config = ?config, "configuration loaded");

    match cli.command {
        Commands::Import { file, dry_run } => {
            import::run_import(&config, file.as_deref(), dry_run).await?;
        }
        Commands::Db { command } => {
            let pool = beautyfeed_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Migrate => {
                    let applied = beautyfeed_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
                DbCommands::Ping => {
                    beautyfeed_db::ping(&pool).await?;
                    println!("database connection ok");
                }
            }
            pool.close().await;
        }
    }

    Ok(())
}

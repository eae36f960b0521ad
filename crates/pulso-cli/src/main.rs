mod analyze;
mod profile;
mod settings;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pulso")]
#[command(about = "Social profile scraping and sentiment analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run pending database migrations and seed default settings.
    Migrate,
    /// Manage monitored profiles.
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommand,
    },
    /// Inspect and edit runtime analysis settings.
    Settings {
        #[command(subcommand)]
        command: settings::SettingsCommand,
    },
    /// Scrape and analyze profiles (posts, comments, sentiment).
    Analyze {
        /// Comma-separated profile ids; omit to analyze every profile.
        #[arg(long, value_delimiter = ',')]
        profiles: Option<Vec<i64>>,
        /// Analyze even profiles that were analyzed recently.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pulso_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let pool = pulso_db::connect_pool(
        &config.database_url,
        pulso_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    match cli.command {
        Commands::Migrate => {
            pulso_db::run_migrations(&pool).await?;
            pulso_db::seed_default_settings(&pool).await?;
            println!("migrations applied, default settings seeded");
        }
        Commands::Profile { command } => profile::run(&pool, command).await?,
        Commands::Settings { command } => settings::run(&pool, command).await?,
        Commands::Analyze { profiles, force } => {
            analyze::run(&pool, &config, profiles.as_deref(), force).await?;
        }
    }

    Ok(())
}

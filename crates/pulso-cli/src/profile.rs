//! Profile management subcommands.

use clap::Subcommand;
use pulso_core::Platform;
use sqlx::PgPool;

#[derive(Debug, Subcommand)]
pub(crate) enum ProfileCommand {
    /// Add a profile to monitor.
    Add {
        /// Platform: instagram, tiktok, or facebook.
        platform: String,
        /// Username, @handle, or full profile URL.
        username_or_url: String,
        /// Human-readable name shown in listings.
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List all monitored profiles.
    List,
    /// Remove a profile and all its scraped posts and comments.
    Remove { id: i64 },
}

pub(crate) async fn run(pool: &PgPool, command: ProfileCommand) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Add {
            platform,
            username_or_url,
            display_name,
        } => {
            let platform: Platform = platform.parse()?;
            let id = pulso_db::add_profile(
                pool,
                platform.as_str(),
                &username_or_url,
                display_name.as_deref(),
            )
            .await?;
            println!("profile {id}: {platform} {username_or_url}");
        }
        ProfileCommand::List => {
            let profiles = pulso_db::list_profiles(pool).await?;
            if profiles.is_empty() {
                println!("no profiles configured");
                return Ok(());
            }
            println!(
                "{:>5}  {:<10}  {:<30}  last analyzed",
                "id", "platform", "username"
            );
            for p in profiles {
                let last = p
                    .last_analyzed
                    .map_or_else(|| "never".to_owned(), |ts| ts.to_rfc3339());
                println!(
                    "{:>5}  {:<10}  {:<30}  {last}",
                    p.id, p.platform, p.username_or_url
                );
            }
        }
        ProfileCommand::Remove { id } => {
            if pulso_db::delete_profile(pool, id).await? {
                println!("profile {id} removed");
            } else {
                println!("profile {id} not found");
            }
        }
    }
    Ok(())
}

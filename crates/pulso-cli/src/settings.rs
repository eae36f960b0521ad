//! Runtime settings subcommands.

use clap::Subcommand;
use sqlx::PgPool;

#[derive(Debug, Subcommand)]
pub(crate) enum SettingsCommand {
    /// Print one setting value.
    Get { key: String },
    /// Set a setting. List values (keyword lists) take a JSON array.
    Set { key: String, value: String },
    /// Print all settings.
    List,
}

pub(crate) async fn run(pool: &PgPool, command: SettingsCommand) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Get { key } => match pulso_db::get_setting(pool, &key).await? {
            Some(value) => println!("{value}"),
            None => println!("(unset)"),
        },
        SettingsCommand::Set { key, value } => {
            pulso_db::set_setting(pool, &key, &value).await?;
            println!("{key} = {value}");
        }
        SettingsCommand::List => {
            for (key, value) in pulso_db::all_settings(pool).await? {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}

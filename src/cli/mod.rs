pub mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::database::Store;

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "Inventory CLI - schema setup, sample data and user administration")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Database URL (overrides DATABASE_URL / DB_NAME)")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the devices, users and assignments tables")]
    Init {
        #[arg(long, help = "Drop existing tables (and their rows) first")]
        force: bool,
    },

    #[command(about = "Insert sample users, devices and assignments")]
    Seed {
        #[arg(long, default_value = "password123", help = "Password given to every sample user")]
        password: String,
    },

    #[command(about = "Create a user with a hashed password")]
    CreateUser(commands::user::CreateUserArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Print `text` or the JSON form of `value`, per the selected format
    pub fn print<T: Serialize>(&self, text: &str, value: &T) -> anyhow::Result<()> {
        match self {
            OutputFormat::Text => println!("{}", text),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        }
        Ok(())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let mut config = AppConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let store = Store::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;

    let result = match cli.command {
        Commands::Init { force } => commands::init::handle(&store, force, output_format).await,
        Commands::Seed { password } => {
            commands::seed::handle(&store, &config, &password, output_format).await
        }
        Commands::CreateUser(args) => {
            commands::user::handle(&store, &config, args, output_format).await
        }
    };

    store.close().await;
    result
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;

const DEFAULT_DB_NAME: &str = "xiv.sqlite";

#[derive(Parser, Debug)]
#[command(name = "xiv-data-to-sqlite")]
#[command(version, about = "Load FFXIV items, recipes and worlds into SQLite")]
pub struct Cli {
    /// SQLite database path (default: per-user data directory)
    #[arg(short, long, env = "XIV_DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Directory containing items.jsonl, recipes.jsonl and worlds.jsonl
    #[arg(long, env = "XIV_DATA_DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Maximum concurrent database statements (and pooled connections)
    #[arg(short, long, env = "XIV_MAX_CONNECTIONS", default_value_t = 8, global = true)]
    pub max_connections: u32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create the item and recipe tables
    Create,
    /// Drop the item and recipe tables
    Delete,
    /// Load every item
    LoadItems,
    /// Load every recipe
    LoadRecipes,
    /// Create the worlds table
    CreateWorlds,
    /// Load every world
    LoadWorlds,
    /// List managed tables in creation order
    ListTables,
    /// Interactive prompt (default)
    Shell,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Explicit database path, or the default under the user's data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("", "", "xiv-data-to-sqlite")
            .context("Could not determine data directory")?;
        let dir = proj_dirs.data_dir();
        std::fs::create_dir_all(dir).context("Failed to create data directory")?;

        Ok(dir.join(DEFAULT_DB_NAME))
    }
}

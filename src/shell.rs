//! Line-oriented operator prompt

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::error;

use crate::cli::Commands;
use crate::dump::{dump_items, dump_recipes, dump_worlds};
use crate::source::GameData;
use crate::writer::{BulkLoader, Database, SchemaManager};

const MENU: &[(&str, &str)] = &[
    ("create", "Create all SQL tables"),
    ("delete", "Delete all SQL tables"),
    ("load items", "Load all items into SQL"),
    ("load recipes", "Load all recipes"),
    ("create worlds", "Create worlds table"),
    ("load worlds", "Dump worlds into SQL"),
    ("quit", "Exit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Create,
    Delete,
    LoadItems,
    LoadRecipes,
    CreateWorlds,
    LoadWorlds,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let command = match s.trim() {
            "create" => ShellCommand::Create,
            "delete" => ShellCommand::Delete,
            "load items" => ShellCommand::LoadItems,
            "load recipes" => ShellCommand::LoadRecipes,
            "create worlds" => ShellCommand::CreateWorlds,
            "load worlds" => ShellCommand::LoadWorlds,
            "quit" => ShellCommand::Quit,
            other => bail!("invalid input: {:?}", other),
        };
        Ok(command)
    }
}

impl TryFrom<&Commands> for ShellCommand {
    type Error = anyhow::Error;

    fn try_from(command: &Commands) -> Result<Self> {
        let command = match command {
            Commands::Create => ShellCommand::Create,
            Commands::Delete => ShellCommand::Delete,
            Commands::LoadItems => ShellCommand::LoadItems,
            Commands::LoadRecipes => ShellCommand::LoadRecipes,
            Commands::CreateWorlds => ShellCommand::CreateWorlds,
            Commands::LoadWorlds => ShellCommand::LoadWorlds,
            other => bail!("{:?} is not an operator command", other),
        };
        Ok(command)
    }
}

/// Operator commands bound to a data source and a database
pub struct App<D> {
    data: Arc<D>,
    schema: SchemaManager,
    loader: BulkLoader,
}

impl<D: GameData + Send + Sync + 'static> App<D> {
    pub fn new(data: D, db: Database) -> Self {
        Self {
            data: Arc::new(data),
            schema: SchemaManager::new(db.clone()),
            loader: BulkLoader::new(db),
        }
    }

    /// Run one command. Schema errors and unreadable sheets are returned;
    /// per-record failures only show up in the logs and the summary.
    pub async fn execute(&self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Create => self.schema.create_all().await?,
            ShellCommand::Delete => self.schema.delete_all().await?,
            ShellCommand::CreateWorlds => self.schema.create_worlds_table().await?,
            ShellCommand::LoadItems => {
                let report = dump_items(&self.read(D::items).await?, &self.loader).await?;
                println!("Items: {}", report);
            }
            ShellCommand::LoadRecipes => {
                let report = dump_recipes(&self.read(D::recipes).await?, &self.loader).await?;
                println!("Recipes: {}", report);
            }
            ShellCommand::LoadWorlds => {
                let report = dump_worlds(&self.read(D::worlds).await?, &self.loader).await?;
                println!("Worlds: {}", report);
            }
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    /// Read a sheet on the blocking pool
    async fn read<T, F>(&self, sheet: F) -> Result<Vec<T>>
    where
        T: Send + 'static,
        F: FnOnce(&D) -> Result<Vec<T>> + Send + 'static,
    {
        let data = Arc::clone(&self.data);
        tokio::task::spawn_blocking(move || sheet(&*data))
            .await
            .context("sheet reader task failed")?
    }

    /// Prompt until `quit` or end of input
    pub async fn run_shell<R, W>(&self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            for (command, help) in MENU {
                writeln!(out, "{}: {}", command, help)?;
            }
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match line.parse::<ShellCommand>() {
                Ok(command) => command,
                Err(_) => {
                    writeln!(out, "invalid input")?;
                    continue;
                }
            };

            if command == ShellCommand::Quit {
                break;
            }

            if let Err(e) = self.execute(command).await {
                error!(?command, "command failed: {:#}", e);
                writeln!(out, "{:?} failed: {:#}", command, e)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("create".parse::<ShellCommand>().unwrap(), ShellCommand::Create);
        assert_eq!(
            "load recipes\n".parse::<ShellCommand>().unwrap(),
            ShellCommand::LoadRecipes
        );
        assert_eq!(
            "  create worlds ".parse::<ShellCommand>().unwrap(),
            ShellCommand::CreateWorlds
        );
        assert_eq!("quit".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_unknown_command() {
        assert!("load everything".parse::<ShellCommand>().is_err());
        assert!("".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_cli_commands_convert() {
        assert_eq!(
            ShellCommand::try_from(&Commands::LoadWorlds).unwrap(),
            ShellCommand::LoadWorlds
        );
        assert!(ShellCommand::try_from(&Commands::ListTables).is_err());
    }
}

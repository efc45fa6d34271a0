//! Read-only access to the game data sheets

pub mod record;

pub use record::*;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

pub const ITEMS_FILE: &str = "items.jsonl";
pub const RECIPES_FILE: &str = "recipes.jsonl";
pub const WORLDS_FILE: &str = "worlds.jsonl";

/// Provider of the item, recipe and world sheets
pub trait GameData {
    fn items(&self) -> Result<Vec<ItemRecord>>;
    fn recipes(&self) -> Result<Vec<RecipeRecord>>;
    fn worlds(&self) -> Result<Vec<WorldRow>>;
}

/// Sheets exported as one JSON document per line, one file per sheet
pub struct JsonlSheets {
    dir: PathBuf,
}

impl JsonlSheets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_sheet<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file_name);
        let file = File::open(&path).with_context(|| format!("Failed to open: {:?}", path))?;
        parse_sheet(BufReader::new(file), file_name)
    }
}

impl GameData for JsonlSheets {
    fn items(&self) -> Result<Vec<ItemRecord>> {
        self.read_sheet(ITEMS_FILE)
    }

    fn recipes(&self) -> Result<Vec<RecipeRecord>> {
        self.read_sheet(RECIPES_FILE)
    }

    fn worlds(&self) -> Result<Vec<WorldRow>> {
        self.read_sheet(WORLDS_FILE)
    }
}

/// Parse every non-blank line of a sheet
pub fn parse_sheet<T: DeserializeOwned>(reader: impl BufRead, sheet: &str) -> Result<Vec<T>> {
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line in {}", sheet))?;
        if line.trim().is_empty() {
            continue;
        }

        let row = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse record in {} at line {}", sheet, idx + 1))?;
        rows.push(row);
    }

    Ok(rows)
}

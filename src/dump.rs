//! Sheet to table pipelines: read records, map them, load them

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::mapper::{map_item, map_recipe, map_world};
use crate::source::{ItemRecord, RecipeRecord, WorldRow};
use crate::writer::{BulkLoader, LoadReport};

pub async fn dump_items(records: &[ItemRecord], loader: &BulkLoader) -> Result<LoadReport> {
    let entries: Vec<_> = records.iter().map(map_item).collect();
    let progress = progress_bar(entries.len(), "items")?;

    let report = loader.load_all(entries, &progress).await;
    finish(&progress, "items", &report);
    Ok(report)
}

pub async fn dump_recipes(records: &[RecipeRecord], loader: &BulkLoader) -> Result<LoadReport> {
    let entries: Vec<_> = records.iter().map(map_recipe).collect();
    let progress = progress_bar(entries.len(), "recipes")?;

    let report = loader.load_all(entries, &progress).await;
    finish(&progress, "recipes", &report);
    Ok(report)
}

/// Rows missing a required field are skipped on their own; the rest still load
pub async fn dump_worlds(rows: &[WorldRow], loader: &BulkLoader) -> Result<LoadReport> {
    let mut skipped = 0;
    let mut entries = Vec::with_capacity(rows.len());

    for row in rows {
        match map_world(row) {
            Ok(entry) => entries.push(entry),
            Err(warning) => {
                warn!(world_id = row.key, "{}", warning);
                skipped += 1;
            }
        }
    }

    let progress = progress_bar(entries.len(), "worlds")?;
    let mut report = loader.load_all(entries, &progress).await;
    report.skipped += skipped;
    finish(&progress, "worlds", &report);
    Ok(report)
}

fn progress_bar(len: usize, label: &'static str) -> Result<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template("{msg:12} [{bar:40.cyan/blue}] {pos}/{len}")
        .context("Invalid progress template")?
        .progress_chars("=>-");

    let pb = ProgressBar::new(len as u64);
    pb.set_style(style);
    pb.set_message(label);
    Ok(pb)
}

fn finish(progress: &ProgressBar, label: &str, report: &LoadReport) {
    progress.finish_with_message(format!("{}: {} records", label, report.total()));
    info!(sheet = label, %report, "load finished");
}

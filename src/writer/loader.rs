//! Concurrent inserts of mapped entries
//!
//! Each record is loaded by its own task. A record's failure is logged and
//! counted, never returned, so siblings and the batch always run to the end.

use indicatif::ProgressBar;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use super::db::Database;
use super::schema_gen::generate_insert;
use super::value::SqlValue;
use crate::entry::{ItemEntry, Origin, RecipeEntry, WorldEntry};
use crate::error::{LoadError, MappingWarning};
use crate::schema::{ITEMS, ITEM_EQUIPMENT_TYPES, ITEM_ORIGINS, RECIPES, RECIPE_INGREDIENTS, WORLDS};

/// Result of loading one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Parent row and every child row written
    Loaded,
    /// Parent row written, `failed` child rows were not
    Partial { failed: usize },
    /// Malformed record, nothing written
    Skipped,
    /// Parent row rejected, no child rows attempted
    Failed,
}

/// Outcome counts for a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub partial: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl LoadReport {
    pub fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Loaded => self.loaded += 1,
            RecordOutcome::Partial { .. } => self.partial += 1,
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.loaded + self.partial + self.skipped + self.failed
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} loaded, {} partial, {} skipped, {} failed",
            self.loaded, self.partial, self.skipped, self.failed
        )
    }
}

/// Any entry the loader accepts
#[derive(Debug, Clone)]
pub enum Record {
    Item(ItemEntry),
    Recipe(RecipeEntry),
    World(WorldEntry),
}

impl From<ItemEntry> for Record {
    fn from(entry: ItemEntry) -> Self {
        Record::Item(entry)
    }
}

impl From<RecipeEntry> for Record {
    fn from(entry: RecipeEntry) -> Self {
        Record::Recipe(entry)
    }
}

impl From<WorldEntry> for Record {
    fn from(entry: WorldEntry) -> Self {
        Record::World(entry)
    }
}

struct InsertStatements {
    items: Arc<str>,
    item_origins: Arc<str>,
    item_equipment_types: Arc<str>,
    recipes: Arc<str>,
    recipe_ingredients: Arc<str>,
    worlds: Arc<str>,
}

impl InsertStatements {
    fn new() -> Self {
        Self {
            items: generate_insert(&ITEMS).into(),
            item_origins: generate_insert(&ITEM_ORIGINS).into(),
            item_equipment_types: generate_insert(&ITEM_EQUIPMENT_TYPES).into(),
            recipes: generate_insert(&RECIPES).into(),
            recipe_ingredients: generate_insert(&RECIPE_INGREDIENTS).into(),
            worlds: generate_insert(&WORLDS).into(),
        }
    }
}

#[derive(Clone)]
pub struct BulkLoader {
    db: Database,
    statements: Arc<InsertStatements>,
}

impl BulkLoader {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            statements: Arc::new(InsertStatements::new()),
        }
    }

    /// Load every record on its own task and wait for all of them
    pub async fn load_all<R>(
        &self,
        records: impl IntoIterator<Item = R>,
        progress: &ProgressBar,
    ) -> LoadReport
    where
        R: Into<Record>,
    {
        let mut tasks = JoinSet::new();
        for record in records {
            let loader = self.clone();
            let record = record.into();
            tasks.spawn(async move { loader.load(record).await });
        }

        let mut report = LoadReport::default();
        while let Some(result) = tasks.join_next().await {
            let outcome = result.unwrap_or_else(|e| {
                error!(error = %e, "load task failed");
                RecordOutcome::Failed
            });
            report.record(outcome);
            progress.inc(1);
        }

        report
    }

    pub async fn load(&self, record: Record) -> RecordOutcome {
        match record {
            Record::Item(entry) => self.load_item(entry).await,
            Record::Recipe(entry) => self.load_recipe(entry).await,
            Record::World(entry) => self.load_world(entry).await,
        }
    }

    pub async fn load_item(&self, item: ItemEntry) -> RecordOutcome {
        let currency = item.special_currency;
        let params = vec![
            item.item_id.into(),
            item.item_type.as_str().into(),
            item.name.as_str().into(),
            item.item_level.into(),
            currency.and_then(|c| c.item_id).into(),
            currency.and_then(|c| c.count).into(),
            item.high_qualityable.into(),
            item.marketable.into(),
            item.gil_price.into(),
            item.class_job_restriction.clone().into(),
        ];

        if let Err(e) = self.db.execute(self.statements.items.clone(), params).await {
            error!(item_id = item.item_id, name = %item.name, error = %e, "failed to write item");
            return RecordOutcome::Failed;
        }

        // Child rows need the item row to exist
        let mut children = JoinSet::new();

        let origins: BTreeSet<Origin> = item.origins.iter().copied().collect();
        for origin in origins {
            let params = vec![item.item_id.into(), origin.as_str().into()];
            self.spawn_insert(&mut children, &self.statements.item_origins, params);
        }

        for equipment_type in &item.equipment_types {
            let params = vec![item.item_id.into(), equipment_type.as_str().into()];
            self.spawn_insert(&mut children, &self.statements.item_equipment_types, params);
        }

        match join_children(children).await {
            0 => {
                debug!(item_id = item.item_id, name = %item.name, "loaded item");
                RecordOutcome::Loaded
            }
            failed => {
                error!(item_id = item.item_id, name = %item.name, failed, "failed to write item subtables");
                RecordOutcome::Partial { failed }
            }
        }
    }

    pub async fn load_recipe(&self, recipe: RecipeEntry) -> RecordOutcome {
        if recipe.ingredients.is_empty() {
            let warning = MappingWarning::NoIngredients {
                key: recipe.recipe_id,
            };
            warn!(recipe_id = recipe.recipe_id, "{}", warning);
            return RecordOutcome::Skipped;
        }

        let params = vec![
            recipe.recipe_id.into(),
            recipe.crafted_item_id.into(),
            recipe.crafted_item_count.into(),
        ];

        if let Err(e) = self.db.execute(self.statements.recipes.clone(), params).await {
            error!(recipe_id = recipe.recipe_id, error = %e, "failed to write recipe");
            return RecordOutcome::Failed;
        }

        let mut children = JoinSet::new();
        for ingredient in &recipe.ingredients {
            let params = vec![
                recipe.recipe_id.into(),
                ingredient.ingredient_id.into(),
                ingredient.quantity.into(),
            ];
            self.spawn_insert(&mut children, &self.statements.recipe_ingredients, params);
        }

        match join_children(children).await {
            0 => {
                debug!(recipe_id = recipe.recipe_id, "loaded recipe");
                RecordOutcome::Loaded
            }
            failed => {
                error!(recipe_id = recipe.recipe_id, failed, "failed to write recipe ingredients");
                RecordOutcome::Partial { failed }
            }
        }
    }

    pub async fn load_world(&self, world: WorldEntry) -> RecordOutcome {
        let params = vec![
            world.world_id.into(),
            world.name.as_str().into(),
            world.datacenter.as_str().into(),
            world.is_public.into(),
        ];

        match self.db.execute(self.statements.worlds.clone(), params).await {
            Ok(_) => {
                debug!(world_id = world.world_id, name = %world.name, "loaded world");
                RecordOutcome::Loaded
            }
            Err(e) => {
                error!(world_id = world.world_id, name = %world.name, error = %e, "failed to load world");
                RecordOutcome::Failed
            }
        }
    }

    fn spawn_insert(
        &self,
        children: &mut JoinSet<Result<usize, LoadError>>,
        sql: &Arc<str>,
        params: Vec<SqlValue>,
    ) {
        let db = self.db.clone();
        let sql = Arc::clone(sql);
        children.spawn(async move { db.execute(sql, params).await });
    }
}

/// Wait for every child insert, logging each failure. Returns the failure count.
async fn join_children(mut children: JoinSet<Result<usize, LoadError>>) -> usize {
    let mut failed = 0;
    while let Some(result) = children.join_next().await {
        let error = match result {
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => e,
            Err(e) => LoadError::Task(e),
        };
        warn!(error = %error, "child row rejected");
        failed += 1;
    }
    failed
}

use anyhow::{anyhow, Context, Result};
use tracing::info;

use super::db::Database;
use super::schema_gen::{generate_create_table, generate_drop_table};
use crate::schema::{DependencyResolver, TableSchema, WORLDS};

/// Creates and drops the item and recipe tables
pub struct SchemaManager {
    db: Database,
    resolver: DependencyResolver,
}

impl SchemaManager {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            resolver: DependencyResolver::new(),
        }
    }

    /// Create any missing table, parents first
    pub async fn create_all(&self) -> Result<()> {
        let tables = self.resolver.creation_order().map_err(|e| anyhow!(e))?;
        for schema in tables {
            self.create_table(schema).await?;
        }
        Ok(())
    }

    /// Drop every table, children first. Fails if a table is missing.
    pub async fn delete_all(&self) -> Result<()> {
        let tables = self.resolver.drop_order().map_err(|e| anyhow!(e))?;
        for schema in tables {
            self.db
                .execute_batch(generate_drop_table(schema))
                .await
                .with_context(|| format!("Failed to drop table: {}", schema.name))?;
            info!(table = schema.name, "dropped table");
        }
        Ok(())
    }

    pub async fn create_worlds_table(&self) -> Result<()> {
        self.create_table(&WORLDS).await
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<()> {
        self.db
            .execute_batch(generate_create_table(schema))
            .await
            .with_context(|| format!("Failed to create table: {}", schema.name))?;
        info!(table = schema.name, "created table");
        Ok(())
    }
}

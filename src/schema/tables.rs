//! Table schema definitions for the item, recipe and world tables

use super::types::*;

// =============================================================================
// Item tables
// =============================================================================

pub static ITEMS: TableSchema = TableSchema {
    name: "items",
    columns: &[
        Column::required("item_id", ColumnType::Integer),
        Column::required("type", ColumnType::Text),
        Column::required("name", ColumnType::Text),
        Column::new("item_level", ColumnType::Integer),
        Column::new("special_currency_item_id", ColumnType::Integer),
        Column::new("special_currency_count", ColumnType::Integer),
        Column::required("high_qualityable", ColumnType::Boolean),
        Column::required("marketable", ColumnType::Boolean),
        Column::new("gil_price", ColumnType::Integer),
        Column::new("class_job_restriction", ColumnType::Text),
    ],
    primary_key: &["item_id"],
    foreign_keys: &[],
};

pub static ITEM_ORIGINS: TableSchema = TableSchema {
    name: "item_origins",
    columns: &[
        Column::required("item_id", ColumnType::Integer),
        Column::required("origin", ColumnType::Text),
    ],
    primary_key: &["item_id", "origin"],
    foreign_keys: &[ForeignKey::new("item_id", "items", "item_id")],
};

pub static ITEM_EQUIPMENT_TYPES: TableSchema = TableSchema {
    name: "item_equipment_types",
    columns: &[
        Column::required("item_id", ColumnType::Integer),
        Column::required("equipment_type", ColumnType::Text),
    ],
    primary_key: &["item_id", "equipment_type"],
    foreign_keys: &[ForeignKey::new("item_id", "items", "item_id")],
};

// =============================================================================
// Recipe tables
// =============================================================================

pub static RECIPES: TableSchema = TableSchema {
    name: "recipes",
    columns: &[
        Column::required("recipe_id", ColumnType::Integer),
        Column::required("crafted_item_id", ColumnType::Integer),
        Column::required("crafted_item_count", ColumnType::Integer),
    ],
    primary_key: &["recipe_id"],
    foreign_keys: &[ForeignKey::new("crafted_item_id", "items", "item_id")],
};

pub static RECIPE_INGREDIENTS: TableSchema = TableSchema {
    name: "recipe_ingredients",
    columns: &[
        Column::required("recipe_id", ColumnType::Integer),
        Column::required("ingredient_id", ColumnType::Integer),
        Column::required("quantity", ColumnType::Integer),
    ],
    primary_key: &["recipe_id", "ingredient_id"],
    foreign_keys: &[
        ForeignKey::new("recipe_id", "recipes", "recipe_id"),
        ForeignKey::new("ingredient_id", "items", "item_id"),
    ],
};

// =============================================================================
// Independent tables
// =============================================================================

pub static WORLDS: TableSchema = TableSchema {
    name: "worlds",
    columns: &[
        Column::required("world_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("datacenter", ColumnType::Text),
        Column::required("is_public", ColumnType::Boolean),
    ],
    primary_key: &["world_id"],
    foreign_keys: &[],
};

// =============================================================================
// Schema Registry
// =============================================================================

/// The item and recipe tables managed together by create/delete
pub static ALL_TABLES: &[&TableSchema] = &[
    &ITEMS,
    &ITEM_ORIGINS,
    &ITEM_EQUIPMENT_TYPES,
    &RECIPES,
    &RECIPE_INGREDIENTS,
];

/// Get table schema by name, including the standalone worlds table
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES
        .iter()
        .copied()
        .chain(std::iter::once(&WORLDS))
        .find(|t| t.name == name)
}
